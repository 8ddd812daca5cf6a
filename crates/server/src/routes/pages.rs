use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use common::types::Health;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

pub const HOME_PAGE: &str = "<h1>Testando uma home page com express</h1>";

/// `/` always sends clients to the home page.
pub async fn root() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/home")])
}

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
