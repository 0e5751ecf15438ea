//! Transactions and pipelines
//!
//! Both take a closure that queues commands on a `redis::Pipeline`. The
//! driver encodes the batch and sends it in one write.

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, Pipeline};
use tracing::debug;

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// MULTI / EXEC around the commands queued by `build`
    ///
    /// Returns the EXEC reply, one element per queued command that was not
    /// marked `.ignore()`.
    pub async fn transaction<F, T>(&self, build: F) -> Result<T>
    where
        F: FnOnce(&mut Pipeline) + Send,
        T: FromRedisValue,
    {
        let mut pipe = redis::pipe();
        pipe.atomic();
        build(&mut pipe);
        debug!("Executing Redis transaction");

        let mut conn = self.connection();
        Ok(pipe.query_async(&mut conn).await?)
    }

    /// Send the commands queued by `build` as one pipelined batch, no MULTI/EXEC
    pub async fn pipeline<F, T>(&self, build: F) -> Result<T>
    where
        F: FnOnce(&mut Pipeline) + Send,
        T: FromRedisValue,
    {
        let mut pipe = redis::pipe();
        build(&mut pipe);
        debug!("Executing Redis pipeline");

        let mut conn = self.connection();
        Ok(pipe.query_async(&mut conn).await?)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use crate::error::FacadeError;
    use crate::testing::{bulk, recording_facade};
    use redis::{ErrorKind, RedisError, Value};
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn test_transaction_wraps_in_multi_exec() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(Value::Array(vec![Value::Int(1), Value::Int(2)]));

        let counts: Vec<i64> = facade
            .transaction(|pipe| {
                pipe.cmd("INCR").arg("hits").cmd("INCR").arg("hits");
            })
            .await
            .unwrap();

        assert_eq!(counts, vec![1, 2]);
        assert_eq!(
            conn.commands(),
            vec![
                vec!["MULTI"],
                vec!["INCR", "hits"],
                vec!["INCR", "hits"],
                vec!["EXEC"]
            ]
        );
        assert!(logs_contain("Executing Redis transaction"));
    }

    #[tokio::test]
    async fn test_transaction_ignored_commands_drop_from_reply() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(Value::Array(vec![Value::Okay, bulk("v")]));

        let (value,): (String,) = facade
            .transaction(|pipe| {
                pipe.cmd("SET").arg("k").arg("v").ignore();
                pipe.cmd("GET").arg("k");
            })
            .await
            .unwrap();

        assert_eq!(value, "v");
    }

    #[tokio::test]
    async fn test_pipeline_has_no_multi_exec() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(Value::Okay).reply(bulk("v"));

        let (set, get): (String, String) = facade
            .pipeline(|pipe| {
                pipe.cmd("SET").arg("k").arg("v");
                pipe.cmd("GET").arg("k");
            })
            .await
            .unwrap();

        assert_eq!(set, "OK");
        assert_eq!(get, "v");
        assert_eq!(
            conn.commands(),
            vec![vec!["SET", "k", "v"], vec!["GET", "k"]]
        );
    }

    #[tokio::test]
    async fn test_pipeline_error_surfaces() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply_error(RedisError::from((ErrorKind::IoError, "broken pipe")));

        let result: Result<Vec<Value>, FacadeError> = facade
            .pipeline(|pipe| {
                pipe.cmd("PING");
            })
            .await;

        assert!(result.unwrap_err().is_connection_error());
    }
}
