use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, DatabaseConfig, StoreBackend};
use service::{
    InMemoryUserRepository, SeaOrmUserRepository, UnavailableUserRepository, UserRepository,
    UserService,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the user store for this process.
///
/// A failed database connection is logged and replaced by a repository that
/// fails each request, so the listener still comes up.
pub async fn build_repository(cfg: &DatabaseConfig) -> Arc<dyn UserRepository> {
    match cfg.backend {
        StoreBackend::Memory => {
            warn!("using in-memory user store; records are lost on exit");
            Arc::new(InMemoryUserRepository::new())
        }
        StoreBackend::Postgres => match models::db::connect(cfg).await {
            Ok(db) => Arc::new(SeaOrmUserRepository::new(db)),
            Err(e) => {
                error!(err = %e, db_target = %cfg.display_target(), "error connecting to the database; user routes will answer 500");
                Arc::new(UnavailableUserRepository::new(e.to_string()))
            }
        },
    }
}

pub async fn build_state(cfg: &AppConfig) -> ServerState {
    let repo = build_repository(&cfg.database).await;
    ServerState::new(UserService::new(repo)).with_error_details(cfg.server.expose_error_details)
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(err = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Serve with an already loaded configuration (logging must be set up).
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await;
    let app = build_app(state);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening on port {}", addr.port());
    info!("open http://{}/home", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
