//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// API authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout applied by the HTTP layer.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Serve the GraphiQL IDE on `GET /graphql`.
    #[serde(default = "default_true")]
    pub graphiql: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            graphiql: true,
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// API authentication configuration.
///
/// Operations that require an authenticated caller accept any of
/// `api_tokens` as a bearer token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Accepted bearer tokens.
    #[serde(default)]
    pub api_tokens: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8911
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `RECIPEBOX_ENV`)
    /// 4. Environment variables with `RECIPEBOX__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();

        let env = std::env::var("RECIPEBOX_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(Self::env_source())
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::env_source())
            .build()?;

        config.try_deserialize()
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix("RECIPEBOX")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("auth.api_tokens")
            .try_parsing(true)
    }

    /// Socket address string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/recipebox"
            "#,
        );

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8911);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert!(config.server.graphiql);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.min_connections, 2);
        assert!(config.auth.api_tokens.is_empty());
        assert!(!config.logging.json);
    }

    #[test]
    fn test_explicit_values() {
        let config = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [database]
            url = "postgres://db/recipes"
            max_connections = 5

            [auth]
            api_tokens = ["alpha", "beta"]

            [logging]
            json = true
            "#,
        );

        assert_eq!(config.bind_address(), "127.0.0.1:4000");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.api_tokens, vec!["alpha", "beta"]);
        assert!(config.logging.json);
    }

    #[test]
    fn test_shipped_default_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
        let config = Config::from_file(path).unwrap();

        assert_eq!(config.server.port, 8911);
        assert!(config.database.url.starts_with("postgres://"));
    }

    #[test]
    fn test_missing_database_is_error() {
        let result = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<Config>();

        assert!(result.is_err());
    }
}
