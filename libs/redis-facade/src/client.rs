//! Facade type and connection lifecycle
//!
//! Each command method lives in `commands/` grouped by data type and forwards
//! to exactly one Redis command.

use crate::config::FacadeConfig;
use crate::error::{FacadeError, Result};
use redis::aio::{ConnectionLike, ConnectionManager, ConnectionManagerConfig};
use redis::Client;
use tracing::{debug, info};

/// Pass-through facade over a Redis connection
///
/// Holds the driver client (used to open dedicated pub/sub connections) and a
/// single connection handle. Every command call clones the handle, which for
/// `ConnectionManager` is a cheap multiplexed reference to the same socket.
pub struct RedisFacade<C = ConnectionManager> {
    client: Client,
    conn: C,
}

impl<C> std::fmt::Debug for RedisFacade<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisFacade")
            .field("addr", &self.client.get_connection_info().addr)
            .field("db", &self.client.get_connection_info().redis.db)
            .finish()
    }
}

impl RedisFacade<ConnectionManager> {
    /// Connect to `host:port`, waiting at most `timeout` seconds (0 = no limit)
    pub async fn connect(host: &str, port: u16, timeout: f64) -> Result<Self> {
        Self::with_config(&FacadeConfig::new(host, port, timeout)).await
    }

    /// Connect using a full configuration
    ///
    /// Fails when the initial connection or its PING does not succeed.
    pub async fn with_config(config: &FacadeConfig) -> Result<Self> {
        config.validate()?;
        let addr = config.addr();

        let client = Client::open(config.connection_info()).map_err(|source| {
            FacadeError::Connect {
                addr: addr.clone(),
                source,
            }
        })?;

        // A refused first attempt fails construction; retries only apply to reconnects.
        let manager_config = ConnectionManagerConfig::new().set_number_of_retries(0);
        let connecting = ConnectionManager::new_with_config(client.clone(), manager_config);
        let connected = match config.connect_timeout() {
            Some(timeout) => tokio::time::timeout(timeout, connecting)
                .await
                .map_err(|_| FacadeError::ConnectTimeout {
                    addr: addr.clone(),
                    timeout,
                })?,
            None => connecting.await,
        };
        let mut conn = connected.map_err(|source| FacadeError::Connect {
            addr: addr.clone(),
            source,
        })?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|source| FacadeError::Connect {
                addr: addr.clone(),
                source,
            })?;

        info!("Redis connected: {}", config.display_url());
        Ok(Self { client, conn })
    }
}

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// Wrap an existing client and connection handle without any I/O
    pub fn from_connection(client: Client, conn: C) -> Self {
        Self { client, conn }
    }

    /// Underlying driver client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// A clone of the connection handle, for commands the facade does not cover
    pub fn connection(&self) -> C {
        self.conn.clone()
    }

    /// PING the server
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.conn.clone();
        Ok(redis::cmd("PING").query_async(&mut conn).await?)
    }

    /// Disconnect
    ///
    /// The socket closes once the last clone of the handle is dropped.
    pub fn close(self) {
        let info = self.client.get_connection_info();
        debug!("Closing Redis connection to {}", info.addr);
        drop(self.conn);
        info!("Redis connection closed: {}", info.addr);
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::testing::{bulk, recording_facade, RecordingConnection};

    fn facade() -> (RedisFacade<RecordingConnection>, RecordingConnection) {
        recording_facade().unwrap()
    }

    #[tokio::test]
    async fn test_ping_issues_ping() {
        let (facade, conn) = facade();
        conn.reply(redis::Value::SimpleString("PONG".to_string()));

        assert_eq!(facade.ping().await.unwrap(), "PONG");
        assert_eq!(conn.commands(), vec![vec!["PING".to_string()]]);
    }

    #[tokio::test]
    async fn test_connection_clone_shares_log() {
        let (facade, conn) = facade();
        conn.reply(bulk("v"));

        let mut raw = facade.connection();
        let value: String = redis::cmd("GET").arg("k").query_async(&mut raw).await.unwrap();
        assert_eq!(value, "v");
        assert_eq!(conn.last_command().unwrap(), vec!["GET", "k"]);
    }

    #[test]
    fn test_close_sends_nothing() {
        let (facade, conn) = facade();
        facade.close();
        assert!(conn.commands().is_empty());
    }

    #[test]
    fn test_debug_shows_address() {
        let (facade, _) = facade();
        let debug = format!("{:?}", facade);
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("6379"));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let err = RedisFacade::connect("", 6379, 0.0).await.unwrap_err();
        assert!(matches!(err, FacadeError::Config(_)));
    }

    #[tokio::test]
    async fn test_connect_refused_is_connection_error() {
        // Port 1 is reserved and nothing listens there in test environments.
        let err = RedisFacade::connect("127.0.0.1", 1, 2.0).await.unwrap_err();
        assert!(err.is_connection_error());
        assert!(err.to_string().contains("127.0.0.1:1"));
    }

    #[tokio::test]
    async fn test_connect_refused_fails_on_first_attempt() {
        let started = std::time::Instant::now();
        let err = RedisFacade::connect("127.0.0.1", 1, 5.0).await.unwrap_err();

        assert!(
            matches!(err, FacadeError::Connect { ref addr, .. } if addr == "127.0.0.1:1"),
            "expected Connect error, got {:?}",
            err
        );
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_connect_refused_without_timeout_returns() {
        let err = RedisFacade::connect("127.0.0.1", 1, 0.0).await.unwrap_err();
        assert!(matches!(err, FacadeError::Connect { .. }));
    }
}
