//! Plain key/value commands

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// SET, or SETEX when `expiration` (seconds) is non-zero
    pub async fn insert<V>(&self, key: &str, value: V, expiration: u64) -> Result<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let cmd = if expiration > 0 {
            let mut cmd = redis::cmd("SETEX");
            cmd.arg(key).arg(expiration).arg(value);
            cmd
        } else {
            let mut cmd = redis::cmd("SET");
            cmd.arg(key).arg(value);
            cmd
        };
        Ok(cmd.query_async(&mut conn).await?)
    }

    /// GET
    pub async fn select<T: FromRedisValue>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.connection();
        Ok(redis::cmd("GET").arg(key).query_async(&mut conn).await?)
    }

    /// DEL, returns the number of keys removed
    pub async fn delete(&self, key: &str) -> Result<usize> {
        let mut conn = self.connection();
        Ok(redis::cmd("DEL").arg(key).query_async(&mut conn).await?)
    }

    /// Same as [`insert`](Self::insert)
    pub async fn update<V>(&self, key: &str, value: V, expiration: u64) -> Result<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.insert(key, value, expiration).await
    }

    /// INCRBY, returns the value after the increment
    pub async fn increment(&self, key: &str, amount: i64) -> Result<i64> {
        let mut conn = self.connection();
        Ok(redis::cmd("INCRBY")
            .arg(key)
            .arg(amount)
            .query_async(&mut conn)
            .await?)
    }

    /// DECRBY, returns the value after the decrement
    pub async fn decrement(&self, key: &str, amount: i64) -> Result<i64> {
        let mut conn = self.connection();
        Ok(redis::cmd("DECRBY")
            .arg(key)
            .arg(amount)
            .query_async(&mut conn)
            .await?)
    }

    /// KEYS *
    ///
    /// Walks the whole keyspace in one blocking server call.
    pub async fn select_all<T: FromRedisValue>(&self) -> Result<T> {
        let mut conn = self.connection();
        Ok(redis::cmd("KEYS").arg("*").query_async(&mut conn).await?)
    }

    /// FLUSHALL
    ///
    /// **WARNING**: deletes every key in every database of the server.
    pub async fn flush(&self) -> Result<()> {
        let mut conn = self.connection();
        Ok(redis::cmd("FLUSHALL").query_async(&mut conn).await?)
    }
}
