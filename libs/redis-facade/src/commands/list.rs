//! List commands

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// LPUSH, returns the list length after the push
    pub async fn push<V>(&self, list: &str, value: V) -> Result<usize>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("LPUSH")
            .arg(list)
            .arg(value)
            .query_async(&mut conn)
            .await?)
    }

    /// RPOP
    ///
    /// Together with [`push`](Self::push) this gives FIFO order.
    pub async fn pop<T: FromRedisValue>(&self, list: &str) -> Result<Option<T>> {
        let mut conn = self.connection();
        Ok(redis::cmd("RPOP").arg(list).query_async(&mut conn).await?)
    }

    /// LRANGE, `stop` is inclusive and negative indexes count from the tail
    pub async fn list_range<T: FromRedisValue>(
        &self,
        list: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<T>> {
        let mut conn = self.connection();
        Ok(redis::cmd("LRANGE")
            .arg(list)
            .arg(start)
            .arg(stop)
            .query_async(&mut conn)
            .await?)
    }
}
