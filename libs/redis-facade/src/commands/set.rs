//! Set commands

use crate::client::RedisFacade;
use crate::error::Result;
use redis::aio::ConnectionLike;
use redis::{FromRedisValue, ToRedisArgs};

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// SADD, returns the number of members added
    pub async fn set_add<V>(&self, set: &str, value: V) -> Result<usize>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("SADD")
            .arg(set)
            .arg(value)
            .query_async(&mut conn)
            .await?)
    }

    /// SREM, returns the number of members removed
    pub async fn set_remove<V>(&self, set: &str, value: V) -> Result<usize>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("SREM")
            .arg(set)
            .arg(value)
            .query_async(&mut conn)
            .await?)
    }

    /// SMEMBERS
    pub async fn set_members<T: FromRedisValue>(&self, set: &str) -> Result<T> {
        let mut conn = self.connection();
        Ok(redis::cmd("SMEMBERS").arg(set).query_async(&mut conn).await?)
    }

    /// SINTER of two sets
    pub async fn set_intersect<T: FromRedisValue>(&self, set1: &str, set2: &str) -> Result<T> {
        let mut conn = self.connection();
        Ok(redis::cmd("SINTER")
            .arg(set1)
            .arg(set2)
            .query_async(&mut conn)
            .await?)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use crate::testing::{bulk_array, recording_facade};
    use redis::Value;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_set_add_and_remove() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(Value::Int(1)).reply(Value::Int(0));

        assert_eq!(facade.set_add("tags", "rust").await.unwrap(), 1);
        assert_eq!(facade.set_remove("tags", "go").await.unwrap(), 0);
        assert_eq!(
            conn.commands(),
            vec![vec!["SADD", "tags", "rust"], vec!["SREM", "tags", "go"]]
        );
    }

    #[tokio::test]
    async fn test_set_members_as_hashset() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(bulk_array(["rust", "redis"]));

        let members: HashSet<String> = facade.set_members("tags").await.unwrap();
        assert!(members.contains("rust"));
        assert!(members.contains("redis"));
        assert_eq!(conn.last_command().unwrap(), vec!["SMEMBERS", "tags"]);
    }

    #[tokio::test]
    async fn test_set_intersect_keeps_argument_order() {
        let (facade, conn) = recording_facade().unwrap();
        conn.reply(bulk_array(["redis"]));

        let common: Vec<String> = facade.set_intersect("tags:a", "tags:b").await.unwrap();
        assert_eq!(common, vec!["redis"]);
        assert_eq!(conn.last_command().unwrap(), vec!["SINTER", "tags:a", "tags:b"]);
    }
}
