//! Key expiration

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// EXPIRE, true when the timeout was set (false if the key does not exist)
    pub async fn set_expiration(&self, key: &str, seconds: i64) -> Result<bool> {
        let mut conn = self.connection();
        Ok(redis::cmd("EXPIRE")
            .arg(key)
            .arg(seconds)
            .query_async(&mut conn)
            .await?)
    }

    /// TTL in seconds: -1 when the key has no expiry, -2 when it does not exist
    pub async fn get_ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection();
        Ok(redis::cmd("TTL").arg(key).query_async(&mut conn).await?)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use crate::testing::recording_facade;
    use redis::Value;

    #[tokio::test]
    async fn test_set_expiration() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(Value::Int(1)).reply(Value::Int(0));

        assert!(facade.set_expiration("session", 60).await.unwrap());
        assert!(!facade.set_expiration("gone", 60).await.unwrap());
        assert_eq!(
            conn.commands(),
            vec![vec!["EXPIRE", "session", "60"], vec!["EXPIRE", "gone", "60"]]
        );
    }

    #[tokio::test]
    async fn test_get_ttl_sentinels_unmodified() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(Value::Int(42))
            .reply(Value::Int(-1))
            .reply(Value::Int(-2));

        assert_eq!(facade.get_ttl("session").await.unwrap(), 42);
        assert_eq!(facade.get_ttl("persistent").await.unwrap(), -1);
        assert_eq!(facade.get_ttl("missing").await.unwrap(), -2);
        assert_eq!(conn.last_command().unwrap(), vec!["TTL", "missing"]);
    }
}
