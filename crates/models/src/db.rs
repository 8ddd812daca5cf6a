use std::time::Duration;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::errors::ConnectionError;

/// Build pool options from config; fails when no usable credentials are set.
pub fn connect_options(cfg: &DatabaseConfig) -> Result<ConnectOptions, ConnectionError> {
    let url = cfg
        .connection_url()
        .map_err(|e| ConnectionError::Config(e.to_string()))?;
    let mut opt = ConnectOptions::new(url);
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    Ok(opt)
}

/// Open the shared connection pool and bring the schema up to date.
///
/// Meant to be called once at process start; the returned handle is cloned
/// into every request handler.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ConnectionError> {
    let opt = connect_options(cfg)?;
    let db = Database::connect(opt)
        .await
        .map_err(|e| ConnectionError::Connect(e.to_string()))?;

    if cfg.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| ConnectionError::Migration(e.to_string()))?;
    }

    info!(db_target = %cfg.display_target(), "database connection established");
    Ok(db)
}
