//! Lua scripting

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};
use tracing::debug;

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// EVAL `script` with `keys` as KEYS[] and `args` as ARGV[]
    ///
    /// The script body is sent on every call (no EVALSHA caching).
    pub async fn eval<K, A, T>(&self, script: &str, keys: &[K], args: &[A]) -> Result<T>
    where
        K: ToRedisArgs + Send + Sync,
        A: ToRedisArgs + Send + Sync,
        T: FromRedisValue,
    {
        debug!("EVAL with {} keys, {} args", keys.len(), args.len());
        let mut conn = self.connection();
        let mut cmd = redis::cmd("EVAL");
        cmd.arg(script).arg(keys.len());
        for key in keys {
            cmd.arg(key);
        }
        for arg in args {
            cmd.arg(arg);
        }
        Ok(cmd.query_async(&mut conn).await?)
    }
}
