use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    /// Include the underlying store message as `details` in 500 bodies.
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5324,
            worker_threads: Some(4),
            expose_error_details: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("unknown database backend `{other}` (expected postgres or memory)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Full connection URL; takes precedence over the credential fields.
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Host (and optional port) of the database cluster.
    pub cluster_name: Option<String>,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub sqlx_logging: bool,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            url: None,
            username: None,
            password: None,
            cluster_name: None,
            name: "users".into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 3600,
            acquire_timeout_secs: 30,
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Read `config.toml` when present (defaults otherwise), overlay the
    /// process environment, then normalize.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment values win over the file when set and non-empty.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got `{port}`"))?;
        }
        if let Some(threads) = get("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = threads.trim().parse().ok();
        }

        if let Some(backend) = get("DATABASE_BACKEND") {
            self.database.backend = backend.parse()?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(username) = get("DATABASE_USERNAME") {
            self.database.username = Some(username);
        }
        if let Some(password) = get("DATABASE_PASSWORD") {
            self.database.password = Some(password);
        }
        if let Some(cluster) = get("DATABASE_CLUSTER_NAME") {
            self.database.cluster_name = Some(cluster);
        }
        if let Some(name) = get("DATABASE_NAME") {
            self.database.name = name;
        }

        if let Some(format) = get("LOG_FORMAT") {
            self.logging.format = if format.eq_ignore_ascii_case("json") {
                LogFormat::Json
            } else {
                LogFormat::Compact
            };
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // Connection credentials are checked at connect time so a bad store
        // setup never blocks the listener.
        self.database.validate_pool()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn validate_pool(&self) -> Result<()> {
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    /// Resolve the connection string: an explicit `url`, or one composed from
    /// username, password and cluster name.
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = non_empty(self.url.clone()) {
            let lower = url.to_lowercase();
            if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
                return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
            }
            return Ok(url);
        }

        let username = non_empty(self.username.clone());
        let password = non_empty(self.password.clone());
        let cluster = non_empty(self.cluster_name.clone());

        let mut missing = Vec::new();
        if username.is_none() {
            missing.push("DATABASE_USERNAME");
        }
        if password.is_none() {
            missing.push("DATABASE_PASSWORD");
        }
        if cluster.is_none() {
            missing.push("DATABASE_CLUSTER_NAME");
        }
        match (username, password, cluster) {
            (Some(username), Some(password), Some(cluster)) => Ok(format!(
                "postgres://{}:{}@{}/{}",
                urlencoding::encode(&username),
                urlencoding::encode(&password),
                cluster.trim(),
                self.name.trim(),
            )),
            _ => Err(anyhow!(
                "missing database credentials: {} (or set DATABASE_URL)",
                missing.join(", ")
            )),
        }
    }

    /// `cluster/name` without credentials, for log lines.
    pub fn display_target(&self) -> String {
        match non_empty(self.url.clone()) {
            Some(url) => url
                .rsplit_once('@')
                .map(|(_, target)| target.to_string())
                .unwrap_or_else(|| "<url>".to_string()),
            None => format!(
                "{}/{}",
                self.cluster_name.as_deref().unwrap_or("<unset>"),
                self.name
            ),
        }
    }
}
