//! In-process connection for exercising the facade without a server
//!
//! `RecordingConnection` implements `redis::aio::ConnectionLike`. It decodes
//! the exact RESP request bytes the driver produces, records every command as
//! a list of arguments, and answers from a queue of scripted replies.
//! Clones share the same log and queue.

use crate::client::RedisFacade;
use crate::config::FacadeConfig;
use parking_lot::Mutex;
use redis::aio::ConnectionLike;
use redis::{Client, Cmd, ErrorKind, Pipeline, RedisError, RedisFuture, RedisResult, Value};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Default)]
struct Recorder {
    commands: Vec<Vec<String>>,
    replies: VecDeque<RedisResult<Value>>,
}

/// Scripted `ConnectionLike` that records the commands it receives
#[derive(Clone, Default)]
pub struct RecordingConnection {
    inner: Arc<Mutex<Recorder>>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the reply for the next command
    ///
    /// Commands without a queued reply are answered with `+OK`.
    pub fn reply(&self, value: Value) -> &Self {
        self.inner.lock().replies.push_back(Ok(value));
        self
    }

    /// Queue an error reply for the next command
    pub fn reply_error(&self, error: RedisError) -> &Self {
        self.inner.lock().replies.push_back(Err(error));
        self
    }

    /// Every command received so far, oldest first
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.inner.lock().commands.clone()
    }

    pub fn last_command(&self) -> Option<Vec<String>> {
        self.inner.lock().commands.last().cloned()
    }

    pub fn pending_replies(&self) -> usize {
        self.inner.lock().replies.len()
    }

    pub fn clear(&self) {
        let mut recorder = self.inner.lock();
        recorder.commands.clear();
        recorder.replies.clear();
    }

    fn respond(&self, packed: &[u8], count: usize) -> RedisResult<Vec<Value>> {
        let commands = decode_requests(packed).ok_or_else(|| {
            RedisError::from((ErrorKind::ClientError, "malformed request bytes"))
        })?;

        let mut recorder = self.inner.lock();
        recorder.commands.extend(commands);

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(recorder.replies.pop_front().unwrap_or(Ok(Value::Okay))?);
        }
        Ok(values)
    }
}

impl ConnectionLike for RecordingConnection {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        let reply = self.respond(&cmd.get_packed_command(), 1).and_then(|values| {
            values.into_iter().next().ok_or_else(|| {
                RedisError::from((ErrorKind::ClientError, "no reply produced"))
            })
        });
        Box::pin(async move { reply })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        cmd: &'a Pipeline,
        _offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        let reply = self.respond(&cmd.get_packed_pipeline(), count);
        Box::pin(async move { reply })
    }

    fn get_db(&self) -> i64 {
        0
    }
}

/// A facade over a fresh `RecordingConnection`, plus a handle to inspect it
///
/// The client points at the default local address but never connects.
pub fn recording_facade() -> RedisResult<(RedisFacade<RecordingConnection>, RecordingConnection)> {
    let client = Client::open(FacadeConfig::default().connection_info())?;
    let conn = RecordingConnection::new();
    Ok((RedisFacade::from_connection(client, conn.clone()), conn))
}

/// Bulk string reply
pub fn bulk(value: impl AsRef<[u8]>) -> Value {
    Value::BulkString(value.as_ref().to_vec())
}

/// Array reply of bulk strings
pub fn bulk_array<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    Value::Array(items.into_iter().map(bulk).collect())
}

/// Split a buffer of RESP-encoded requests into argument lists
fn decode_requests(mut buf: &[u8]) -> Option<Vec<Vec<String>>> {
    let mut commands = Vec::new();
    while !buf.is_empty() {
        let (argc, rest) = read_header(buf, b'*')?;
        buf = rest;

        let mut args = Vec::with_capacity(argc);
        for _ in 0..argc {
            let (len, rest) = read_header(buf, b'$')?;
            let arg = rest.get(..len)?;
            args.push(String::from_utf8_lossy(arg).into_owned());
            buf = rest.get(len + 2..)?;
        }
        commands.push(args);
    }
    Some(commands)
}

fn read_header(buf: &[u8], marker: u8) -> Option<(usize, &[u8])> {
    if *buf.first()? != marker {
        return None;
    }
    let end = buf.windows(2).position(|w| w == b"\r\n")?;
    let n = std::str::from_utf8(&buf[1..end]).ok()?.parse().ok()?;
    Some((n, &buf[end + 2..]))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_command() {
        let packed = redis::cmd("SET").arg("k").arg("v").get_packed_command();
        assert_eq!(
            decode_requests(&packed).unwrap(),
            vec![vec!["SET".to_string(), "k".to_string(), "v".to_string()]]
        );
    }

    #[test]
    fn test_decode_binary_and_empty_args() {
        let packed = redis::cmd("SET")
            .arg("line\r\nbreak")
            .arg("")
            .get_packed_command();
        let decoded = decode_requests(&packed).unwrap();
        assert_eq!(decoded[0][1], "line\r\nbreak");
        assert_eq!(decoded[0][2], "");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_requests(b"PING\r\n").is_none());
        assert!(decode_requests(b"*1\r\n$10\r\nPING\r\n").is_none());
    }

    #[test]
    fn test_decode_atomic_pipeline() {
        let mut pipe = redis::pipe();
        pipe.atomic().cmd("INCR").arg("a").cmd("INCR").arg("b");
        let decoded = decode_requests(&pipe.get_packed_pipeline()).unwrap();
        let names: Vec<&str> = decoded.iter().map(|c| c[0].as_str()).collect();
        assert_eq!(names, vec!["MULTI", "INCR", "INCR", "EXEC"]);
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut conn = RecordingConnection::new();
        conn.reply(Value::Int(1)).reply(bulk("two"));

        let first: i64 = redis::cmd("INCR").arg("n").query_async(&mut conn).await.unwrap();
        let second: String = redis::cmd("GET").arg("s").query_async(&mut conn).await.unwrap();
        let third: String = redis::cmd("PING").query_async(&mut conn).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, "two");
        assert_eq!(third, "OK");
        assert_eq!(conn.commands().len(), 3);
        assert_eq!(conn.pending_replies(), 0);
    }

    #[tokio::test]
    async fn test_error_reply_is_returned() {
        let mut conn = RecordingConnection::new();
        conn.reply_error(RedisError::from((ErrorKind::ResponseError, "ERR boom")));

        let result: RedisResult<String> = redis::cmd("GET").arg("k").query_async(&mut conn).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ResponseError);
        assert_eq!(conn.last_command().unwrap(), vec!["GET", "k"]);
    }

    #[test]
    fn test_clones_share_state() {
        let conn = RecordingConnection::new();
        let other = conn.clone();
        other.reply(Value::Nil);
        assert_eq!(conn.pending_replies(), 1);
        conn.clear();
        assert_eq!(other.pending_replies(), 0);
    }
}
