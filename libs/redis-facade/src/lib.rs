//! Redis Facade
//!
//! A thin async facade over the `redis` crate. Every command method on
//! [`RedisFacade`] issues exactly one Redis command (or one MULTI/EXEC or
//! pipelined batch) and returns the driver's reply unchanged.
//!
//! # Key Components
//!
//! - **RedisFacade**: connection handle plus one method per command
//! - **FacadeConfig**: host/port/timeout/credentials, loaded with figment
//! - **RecordingConnection**: in-process connection for tests
//!
//! # Example
//! ```no_run
//! use redis_facade::RedisFacade;
//!
//! # async fn run() -> redis_facade::Result<()> {
//! let redis = RedisFacade::connect("127.0.0.1", 6379, 2.0).await?;
//! redis.insert("greeting", "hello", 60).await?;
//! let value: Option<String> = redis.select("greeting").await?;
//! assert_eq!(value.as_deref(), Some("hello"));
//! redis.close();
//! # Ok(())
//! # }
//! ```

pub mod client;

pub mod commands;

pub mod config;

pub mod error;

pub mod logging;

pub mod testing;

// Re-exports
pub use redis;
pub use redis::{Msg, Pipeline, Value};

pub use client::RedisFacade;
pub use commands::stream::{AUTO_ID, RANGE_END, RANGE_START};
pub use config::FacadeConfig;
pub use error::{FacadeError, Result};
pub use logging::{init_logging, init_test_logging, LogConfig, LogFormat};
pub use testing::{recording_facade, RecordingConnection};
