//! Hash commands

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// HSET, returns the number of fields added (0 when an existing field was overwritten)
    pub async fn hash_insert<V>(&self, hash: &str, field: &str, value: V) -> Result<usize>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("HSET")
            .arg(hash)
            .arg(field)
            .arg(value)
            .query_async(&mut conn)
            .await?)
    }

    /// HGET
    pub async fn hash_select<T: FromRedisValue>(&self, hash: &str, field: &str) -> Result<Option<T>> {
        let mut conn = self.connection();
        Ok(redis::cmd("HGET")
            .arg(hash)
            .arg(field)
            .query_async(&mut conn)
            .await?)
    }

    /// HDEL, returns the number of fields removed
    pub async fn hash_delete(&self, hash: &str, field: &str) -> Result<usize> {
        let mut conn = self.connection();
        Ok(redis::cmd("HDEL")
            .arg(hash)
            .arg(field)
            .query_async(&mut conn)
            .await?)
    }

    /// HGETALL, typically read as `HashMap<String, String>`
    pub async fn hash_select_all<T: FromRedisValue>(&self, hash: &str) -> Result<T> {
        let mut conn = self.connection();
        Ok(redis::cmd("HGETALL").arg(hash).query_async(&mut conn).await?)
    }
}
