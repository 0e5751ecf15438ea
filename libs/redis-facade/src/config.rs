//! Connection configuration
//!
//! Values are layered with figment:
//! 1. `FacadeConfig::default()`
//! 2. An optional TOML/YAML/JSON file (format picked by extension)
//! 3. Environment variables prefixed `REDIS_FACADE_` (e.g. `REDIS_FACADE_PORT=6380`)

use crate::error::{FacadeError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix read by [`FacadeConfig::load`]
pub const ENV_PREFIX: &str = "REDIS_FACADE_";

/// Redis connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacadeConfig {
    /// Redis server hostname
    #[serde(default = "default_host")]
    pub host: String,

    /// Redis server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Connect timeout in seconds, 0 waits indefinitely
    #[serde(default)]
    pub timeout: f64,

    /// Database number
    #[serde(default)]
    pub database: i64,

    /// ACL username (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Redis password (optional)
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: 0.0,
            database: 0,
            username: None,
            password: None,
        }
    }
}

impl FacadeConfig {
    pub fn new(host: impl Into<String>, port: u16, timeout: f64) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
            ..Default::default()
        }
    }

    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = merge_file(figment, path)?;
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| FacadeError::config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file, ignoring the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let figment = merge_file(Figment::from(Serialized::defaults(Self::default())), path)?;
        let config: Self = figment.extract().map_err(|e| {
            FacadeError::config(format!("Failed to load configuration from file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(FacadeError::config("host must not be empty"));
        }
        if self.port == 0 {
            return Err(FacadeError::config("port must not be 0"));
        }
        if !self.timeout.is_finite() || self.timeout < 0.0 {
            return Err(FacadeError::config(format!(
                "timeout must be a non-negative number of seconds, got {}",
                self.timeout
            )));
        }
        Ok(())
    }

    /// `host:port`, used in logs and connection errors
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connect timeout, `None` when the connect may wait indefinitely
    pub fn connect_timeout(&self) -> Option<Duration> {
        if self.timeout > 0.0 {
            Some(Duration::from_secs_f64(self.timeout))
        } else {
            None
        }
    }

    /// Redis URL with the password redacted
    pub fn display_url(&self) -> String {
        let auth = match (&self.username, &self.password) {
            (Some(user), Some(_)) => format!("{}:***@", user),
            (None, Some(_)) => ":***@".to_string(),
            (Some(user), None) => format!("{}@", user),
            (None, None) => String::new(),
        };
        format!(
            "redis://{}{}:{}/{}",
            auth, self.host, self.port, self.database
        )
    }

    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.database,
                username: self.username.clone(),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| FacadeError::config("Config file must have an extension"))?;

    if !path.exists() {
        return Err(FacadeError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    match extension {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(FacadeError::config(format!(
            "Unsupported config file format: {}",
            extension
        ))),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6379
}
