//! [`Config`]-related definitions.

use std::time;

use common::pagination;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::http;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Remote collection configuration.
    pub remote: Remote,

    /// Directory configuration.
    pub directory: Directory,

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
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Remote collection configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Remote {
    /// URL of the remote collection.
    #[default("https://695ba32b1d8041d5eeb7b9fe.mockapi.io/api/v1/users".to_owned())]
    pub url: String,

    /// Timeout of a single request to the remote collection.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Remote> for http::Config {
    fn from(value: Remote) -> Self {
        let Remote { url, timeout } = value;
        Self { url, timeout }
    }
}

/// Directory configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Directory {
    /// Number of users on a single listing page.
    #[default(service::Config::default().page_size)]
    pub page_size: pagination::Size,

    /// Quiet period after the last edit before a uniqueness check is sent.
    #[default(service::Config::default().debounce)]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,

    /// Time a notification stays visible.
    #[default(service::Config::default().notification_ttl)]
    #[serde(with = "humantime_serde")]
    pub notification_ttl: time::Duration,

    /// Avatar URL assigned to newly created users.
    #[default(service::DEFAULT_AVATAR.to_owned())]
    pub default_avatar: String,
}

impl From<Directory> for service::Config {
    fn from(value: Directory) -> Self {
        let Directory {
            page_size,
            debounce,
            notification_ttl,
            default_avatar,
        } = value;

        Self {
            page_size,
            debounce,
            notification_ttl,
            default_avatar: default_avatar.into(),
        }
    }
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
    use super::{Config, Directory};

    #[test]
    fn defaults_match_service() {
        let conf = service::Config::from(Directory::default());
        let default = service::Config::default();

        assert_eq!(conf.page_size, default.page_size);
        assert_eq!(conf.debounce, default.debounce);
        assert_eq!(conf.notification_ttl, default.notification_ttl);
        assert_eq!(conf.default_avatar, default.default_avatar);
    }

    #[test]
    fn loads_defaults_without_file() {
        let conf = Config::new("does/not/exist.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.remote.timeout.as_secs(), 10);
        assert_eq!(conf.directory.page_size.get(), 5);
    }
}
