//! Sorted set commands

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// ZADD, returns the number of new members
    pub async fn zadd<M>(&self, zset: &str, score: f64, member: M) -> Result<usize>
    where
        M: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("ZADD")
            .arg(zset)
            .arg(score)
            .arg(member)
            .query_async(&mut conn)
            .await?)
    }

    /// ZREM, returns the number of members removed
    pub async fn zrem<M>(&self, zset: &str, member: M) -> Result<usize>
    where
        M: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("ZREM")
            .arg(zset)
            .arg(member)
            .query_async(&mut conn)
            .await?)
    }

    /// ZRANGE, ascending by score
    ///
    /// With `with_scores` read the reply as `Vec<(String, f64)>`.
    pub async fn zrange<T: FromRedisValue>(
        &self,
        zset: &str,
        start: isize,
        stop: isize,
        with_scores: bool,
    ) -> Result<T> {
        self.range_by_rank("ZRANGE", zset, start, stop, with_scores)
            .await
    }

    /// ZREVRANGE, descending by score
    pub async fn zrevrange<T: FromRedisValue>(
        &self,
        zset: &str,
        start: isize,
        stop: isize,
        with_scores: bool,
    ) -> Result<T> {
        self.range_by_rank("ZREVRANGE", zset, start, stop, with_scores)
            .await
    }

    /// ZSCORE, `None` when the member is absent
    pub async fn zscore<M>(&self, zset: &str, member: M) -> Result<Option<f64>>
    where
        M: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("ZSCORE")
            .arg(zset)
            .arg(member)
            .query_async(&mut conn)
            .await?)
    }

    /// ZRANK (0-based, ascending), `None` when the member is absent
    pub async fn zrank<M>(&self, zset: &str, member: M) -> Result<Option<usize>>
    where
        M: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("ZRANK")
            .arg(zset)
            .arg(member)
            .query_async(&mut conn)
            .await?)
    }

    async fn range_by_rank<T: FromRedisValue>(
        &self,
        command: &str,
        zset: &str,
        start: isize,
        stop: isize,
        with_scores: bool,
    ) -> Result<T> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd(command);
        cmd.arg(zset).arg(start).arg(stop);
        if with_scores {
            cmd.arg("WITHSCORES");
        }
        Ok(cmd.query_async(&mut conn).await?)
    }
}
