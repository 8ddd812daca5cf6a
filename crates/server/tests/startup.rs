use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use configs::AppConfig;
use serde_json::Value;
use server::startup;
use tower::ServiceExt;

#[tokio::test]
async fn missing_credentials_still_serve_pages() -> anyhow::Result<()> {
    // default config selects postgres without any credentials
    let app = startup::build_app(startup::build_state(&AppConfig::default()).await);

    let req = Request::builder().uri("/users").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    assert_eq!(body["error"], "Failed to list users");
    let details = body["details"].as_str().unwrap_or_default();
    assert!(details.contains("DATABASE_USERNAME"), "{details}");

    for uri in ["/home", "/health"] {
        let req = Request::builder().uri(uri).body(Body::empty())?;
        let resp = app.clone().oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
    Ok(())
}
