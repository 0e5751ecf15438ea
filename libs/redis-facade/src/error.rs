//! Error types for redis-facade

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("Failed to connect to Redis server at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Timed out after {timeout:?} connecting to Redis server at {addr}")]
    ConnectTimeout { addr: String, timeout: Duration },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Command failures pass through exactly as the driver reported them.
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

impl FacadeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The driver error behind this failure, if any.
    pub fn redis_error(&self) -> Option<&redis::RedisError> {
        match self {
            Self::Connect { source, .. } => Some(source),
            Self::Redis(err) => Some(err),
            Self::ConnectTimeout { .. } | Self::Config(_) => None,
        }
    }

    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Connect { .. } | Self::ConnectTimeout { .. } => true,
            Self::Redis(err) => err.is_io_error() || err.is_connection_dropped(),
            Self::Config(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FacadeError>;
