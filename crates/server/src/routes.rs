use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use crate::state::ServerState;

pub mod pages;
pub mod users;

/// Build the full application router: static pages, health, API docs and the
/// user resource.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::root))
        .route("/home", get(pages::home))
        .route("/health", get(pages::health))
        .route("/api-docs/openapi.json", get(pages::openapi_json));

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", delete(users::delete_user));

    page_routes
        .merge(user_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
