//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Database configuration.
    pub database: Database,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// REST API configuration.
    pub api: Api,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    ///
    /// `*` allows any origin.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Database configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Database {
    /// Storage backend to use.
    pub backend: Backend,
}

/// Storage backend.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Postgres database described by the [`Postgres`] configuration.
    #[cfg_attr(feature = "postgres", default)]
    Postgres,

    /// Process memory, lost on shutdown.
    #[cfg_attr(not(feature = "postgres"), default)]
    Memory,
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,

    /// Connection pool configuration.
    pub pool: Pool,
}

/// Postgres connection pool configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pool {
    /// Maximum number of open connections.
    #[default(16)]
    pub max_size: usize,

    /// Maximum time to wait for a free connection.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub wait_timeout: time::Duration,
}

#[cfg(feature = "postgres")]
impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        use service::infra::postgres::{PoolConfig, Timeouts};

        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
            pool: Pool {
                max_size,
                wait_timeout,
            },
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            pool: Some(PoolConfig {
                max_size,
                timeouts: Timeouts {
                    wait: Some(wait_timeout),
                    ..Timeouts::default()
                },
                ..PoolConfig::default()
            }),
            ..Self::default()
        }
    }
}

/// REST API configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Page size used when a list request doesn't specify one.
    #[default(10)]
    pub default_page_size: u32,

    /// Maximum page size a list request may ask for.
    #[default(100)]
    pub max_page_size: u32,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Backend, Config};

    #[test]
    fn falls_back_to_defaults_without_file() {
        let conf = Config::new("does-not-exist.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.api.default_page_size, 10);
        assert_eq!(conf.api.max_page_size, 100);
        #[cfg(feature = "postgres")]
        assert_eq!(conf.database.backend, Backend::Postgres);
        #[cfg(not(feature = "postgres"))]
        assert_eq!(conf.database.backend, Backend::Memory);
    }
}
