//! Stream commands
//!
//! Replies can be read into the driver's typed stream replies
//! (`redis::streams::StreamRangeReply`, `redis::streams::StreamReadReply`)
//! or kept as `redis::Value`.

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};
use std::time::Duration;

/// Let the server assign the entry id
pub const AUTO_ID: &str = "*";

/// Lowest possible id, for `xrange`
pub const RANGE_START: &str = "-";

/// Highest possible id, for `xrange`
pub const RANGE_END: &str = "+";

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// XADD, returns the id of the new entry
    pub async fn xadd<F, V>(&self, stream: &str, fields: &[(F, V)], id: &str) -> Result<String>
    where
        F: ToRedisArgs + Send + Sync,
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("XADD");
        cmd.arg(stream).arg(id);
        for (field, value) in fields {
            cmd.arg(field).arg(value);
        }
        Ok(cmd.query_async(&mut conn).await?)
    }

    /// XRANGE between two ids, both inclusive
    pub async fn xrange<T: FromRedisValue>(&self, stream: &str, start: &str, end: &str) -> Result<T> {
        let mut conn = self.connection();
        Ok(redis::cmd("XRANGE")
            .arg(stream)
            .arg(start)
            .arg(end)
            .query_async(&mut conn)
            .await?)
    }

    /// XREAD from `(stream, last_seen_id)` pairs
    ///
    /// `block` adds `BLOCK <ms>`; `Some(Duration::ZERO)` waits until data
    /// arrives. The reply is nil when nothing was read, so read it as an
    /// `Option<..>`.
    pub async fn xread<T: FromRedisValue>(
        &self,
        streams: &[(&str, &str)],
        block: Option<Duration>,
    ) -> Result<T> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("XREAD");
        if let Some(block) = block {
            cmd.arg("BLOCK")
                .arg(u64::try_from(block.as_millis()).unwrap_or(u64::MAX));
        }
        cmd.arg("STREAMS");
        for (stream, _) in streams {
            cmd.arg(*stream);
        }
        for (_, id) in streams {
            cmd.arg(*id);
        }
        Ok(cmd.query_async(&mut conn).await?)
    }
}
