//! Publish / subscribe

use crate::client::RedisFacade;
use crate::error::Result;
use futures::{Stream, StreamExt};
use redis::aio::ConnectionLike;
use redis::{Msg, ToRedisArgs};
use std::ops::ControlFlow;
use tracing::{debug, info};

impl<C> RedisFacade<C>
where
    C: ConnectionLike + Clone + Send,
{
    /// PUBLISH, returns the number of subscribers that received the message
    pub async fn publish<M>(&self, channel: &str, message: M) -> Result<usize>
    where
        M: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        Ok(redis::cmd("PUBLISH")
            .arg(channel)
            .arg(message)
            .query_async(&mut conn)
            .await?)
    }

    /// SUBSCRIBE to `channel` and hand each message to `handler`
    ///
    /// Runs on a dedicated connection opened from the facade's client, since
    /// a subscribed connection cannot issue other commands. Returns when the
    /// handler breaks or the server ends the stream.
    pub async fn subscribe<F>(&self, channel: &str, mut handler: F) -> Result<()>
    where
        F: FnMut(Msg) -> ControlFlow<()> + Send,
    {
        let mut pubsub = self.client().get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;
        info!("Subscribed to channel {}", channel);

        let received = deliver(pubsub.on_message(), &mut handler).await;
        info!("Subscription to {} ended ({} messages)", channel, received);
        Ok(())
    }
}

/// Feed `messages` to `handler` until it breaks or the stream ends
///
/// Returns the number of messages delivered.
async fn deliver<S, F>(messages: S, handler: &mut F) -> u64
where
    S: Stream<Item = Msg>,
    F: FnMut(Msg) -> ControlFlow<()>,
{
    let mut messages = std::pin::pin!(messages);
    let mut received = 0u64;
    while let Some(msg) = messages.next().await {
        received += 1;
        if handler(msg).is_break() {
            debug!("Subscription handler stopped after {} messages", received);
            break;
        }
    }
    received
}
