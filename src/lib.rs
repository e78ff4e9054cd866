//! Movies Graph API
//!
//! A small HTTP service over a Neo4j movie graph:
//! - `GET /movie/{title}` returns a movie with its cast
//! - `GET /movie/search?q=` searches movie titles by substring
//! - `GET /health` reports graph connectivity

pub mod api;
pub mod movies;
pub mod neo4j;


use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub neo4j: Neo4jYamlConfig,
    pub logging: LoggingYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Server version string; only "4.x" servers get an explicit database
    pub version: String,
    pub database: String,
    pub max_connections: usize,
    pub fetch_size: usize,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "movies".into(),
            version: String::new(),
            database: "movies".into(),
            max_connections: 16,
            fetch_size: 200,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingYamlConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: "info,movies_graph_api=debug,tower_http=debug".into(),
            format: LogFormat::Text,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidEnv {
                var: "LOG_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration loading failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub neo4j_version: String,
    pub neo4j_database: String,
    pub neo4j_max_connections: usize,
    pub neo4j_fetch_size: usize,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Database to target for a given server version.
///
/// Named databases only exist from Neo4j 4 on; older single-database
/// servers must not be sent a name at all.
pub fn database_for_version<'a>(version: &str, database: &'a str) -> Option<&'a str> {
    if version.starts_with('4') {
        Some(database)
    } else {
        None
    }
}

/// Config file picked up from CWD when no `--config` is given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

fn env_parse<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Load configuration from `config.yaml` (if present) and env vars.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD and falls back to
    /// defaults only when it does not exist. A file that is present must read
    /// and parse, whether it was given explicitly or found in CWD.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults)
        let yaml = match yaml_path {
            Some(path) => Self::load_yaml(path)?,
            None => Self::load_optional_yaml(Path::new(DEFAULT_CONFIG_PATH))?,
        };

        // 2. Build Config with env var overrides
        let server_port = match env_parse::<u16>("PORT")? {
            Some(port) => port,
            None => env_parse("SERVER_PORT")?.unwrap_or(yaml.server.port),
        };

        Ok(Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(yaml.server.host),
            server_port,
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            neo4j_version: std::env::var("NEO4J_VERSION").unwrap_or(yaml.neo4j.version),
            neo4j_database: std::env::var("NEO4J_DATABASE").unwrap_or(yaml.neo4j.database),
            neo4j_max_connections: env_parse("NEO4J_MAX_CONNECTIONS")?
                .unwrap_or(yaml.neo4j.max_connections),
            neo4j_fetch_size: env_parse("NEO4J_FETCH_SIZE")?.unwrap_or(yaml.neo4j.fetch_size),
            log_level: yaml.logging.level,
            log_format: env_parse("LOG_FORMAT")?.unwrap_or(yaml.logging.format),
        })
    }

    /// Database name sessions should target, if any
    pub fn session_database(&self) -> Option<String> {
        database_for_version(&self.neo4j_version, &self.neo4j_database).map(str::to_string)
    }

    fn load_yaml(path: &Path) -> Result<YamlConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Defaults when `path` does not exist; otherwise it must load.
    fn load_optional_yaml(path: &Path) -> Result<YamlConfig, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using env vars / defaults", path.display());
            return Ok(YamlConfig::default());
        }
        Self::load_yaml(path)
    }
}

// ============================================================================
// Application state and server
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub movies: movies::MovieRepository,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect to Neo4j and wire the repository
    pub async fn new(config: Config) -> Result<Self> {
        let neo4j: Arc<dyn neo4j::GraphStore> =
            Arc::new(neo4j::client::Neo4jClient::new(&config).await?);

        Ok(Self {
            movies: movies::MovieRepository::new(neo4j),
            config: Arc::new(config),
        })
    }
}

/// Start the HTTP server and run until Ctrl+C
pub async fn start_server(config: Config) -> Result<()> {
    let state = AppState::new(config).await?;
    let addr = format!("{}:{}", state.config.server_host, state.config.server_port);

    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// Tests
// ============================================================================
