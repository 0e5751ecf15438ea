//! One subcommand per facade operation

use crate::output::{bulk, format_value, int, optional};
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::*;
use redis_facade::redis::aio::ConnectionLike;
use redis_facade::{RedisFacade, Value, AUTO_ID, RANGE_END, RANGE_START};
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::debug;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the connection
    Ping,

    // === Keys ===
    /// Get the value of a key
    Get { key: String },

    /// Set a key, optionally with an expiry
    Set {
        key: String,
        value: String,
        /// Expire after this many seconds (0 = never)
        #[arg(long, default_value_t = 0)]
        ex: u64,
    },

    /// Delete a key
    Del { key: String },

    /// Increment an integer key
    Incr {
        key: String,
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        by: i64,
    },

    /// Decrement an integer key
    Decr {
        key: String,
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        by: i64,
    },

    /// List every key (KEYS *)
    Keys,

    /// Remove all keys from all databases
    Flush {
        /// Required, FLUSHALL cannot be undone
        #[arg(short, long)]
        force: bool,
    },

    // === Hashes ===
    /// Set a hash field
    Hset {
        hash: String,
        field: String,
        value: String,
    },

    /// Get a hash field
    Hget { hash: String, field: String },

    /// Delete a hash field
    Hdel { hash: String, field: String },

    /// Get all fields and values of a hash
    Hgetall { hash: String },

    // === Lists ===
    /// Push onto the head of a list
    Push { list: String, value: String },

    /// Pop from the tail of a list
    Pop { list: String },

    /// Read a range of a list
    Range {
        list: String,
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        start: isize,
        #[arg(default_value_t = -1, allow_negative_numbers = true)]
        stop: isize,
    },

    // === Sets ===
    /// Add a member to a set
    Sadd { set: String, member: String },

    /// Remove a member from a set
    Srem { set: String, member: String },

    /// List the members of a set
    Smembers { set: String },

    /// Members common to two sets
    Sinter { set1: String, set2: String },

    // === Sorted sets ===
    /// Add a member with a score
    Zadd {
        zset: String,
        #[arg(allow_negative_numbers = true)]
        score: f64,
        member: String,
    },

    /// Remove a member
    Zrem { zset: String, member: String },

    /// Members by rank
    Zrange {
        zset: String,
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        start: isize,
        #[arg(default_value_t = -1, allow_negative_numbers = true)]
        stop: isize,
        /// Highest score first
        #[arg(long)]
        rev: bool,
        /// Include scores in the reply
        #[arg(long)]
        with_scores: bool,
    },

    /// Score of a member
    Zscore { zset: String, member: String },

    /// Rank of a member, lowest score first
    Zrank { zset: String, member: String },

    // === Streams ===
    /// Append an entry to a stream
    Xadd {
        stream: String,
        /// Entry fields as field=value
        #[arg(required = true)]
        fields: Vec<String>,
        /// Entry id, `*` lets the server choose
        #[arg(long, default_value = AUTO_ID)]
        id: String,
    },

    /// Entries between two ids
    Xrange {
        stream: String,
        #[arg(default_value = RANGE_START, allow_hyphen_values = true)]
        start: String,
        #[arg(default_value = RANGE_END)]
        end: String,
    },

    /// Read entries after the given ids
    Xread {
        /// Streams as key=id (id defaults to 0)
        #[arg(required = true)]
        streams: Vec<String>,
        /// Block for up to this many milliseconds (0 = forever)
        #[arg(long)]
        block: Option<u64>,
    },

    // === Scripting ===
    /// Run a Lua script
    Eval {
        script: String,
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        args: Vec<String>,
    },

    // === Pub/Sub ===
    /// Publish a message
    Publish { channel: String, message: String },

    /// Print messages from a channel
    Subscribe {
        channel: String,
        /// Stop after this many messages
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    // === Expiration ===
    /// Set a key's time to live in seconds
    Expire {
        key: String,
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },

    /// Remaining time to live of a key
    Ttl { key: String },
}

/// Execute one command, returning the reply to print
///
/// `subscribe` prints as messages arrive and returns `None`.
pub async fn run<C>(redis: &RedisFacade<C>, command: Commands) -> Result<Option<Value>>
where
    C: ConnectionLike + Clone + Send,
{
    debug!("Running {:?}", command);

    let reply = match command {
        Commands::Ping => Value::SimpleString(redis.ping().await?),

        Commands::Get { key } => redis.select::<Value>(&key).await?.unwrap_or(Value::Nil),
        Commands::Set { key, value, ex } => {
            redis.insert(&key, value, ex).await?;
            Value::Okay
        },
        Commands::Del { key } => int(redis.delete(&key).await?),
        Commands::Incr { key, by } => Value::Int(redis.increment(&key, by).await?),
        Commands::Decr { key, by } => Value::Int(redis.decrement(&key, by).await?),
        Commands::Keys => redis.select_all().await?,
        Commands::Flush { force } => {
            if !force {
                bail!("FLUSHALL deletes every key on the server; rerun with --force");
            }
            redis.flush().await?;
            Value::Okay
        },

        Commands::Hset { hash, field, value } => int(redis.hash_insert(&hash, &field, value).await?),
        Commands::Hget { hash, field } => redis
            .hash_select::<Value>(&hash, &field)
            .await?
            .unwrap_or(Value::Nil),
        Commands::Hdel { hash, field } => int(redis.hash_delete(&hash, &field).await?),
        Commands::Hgetall { hash } => redis.hash_select_all(&hash).await?,

        Commands::Push { list, value } => int(redis.push(&list, value).await?),
        Commands::Pop { list } => redis.pop::<Value>(&list).await?.unwrap_or(Value::Nil),
        Commands::Range { list, start, stop } => {
            Value::Array(redis.list_range(&list, start, stop).await?)
        },

        Commands::Sadd { set, member } => int(redis.set_add(&set, member).await?),
        Commands::Srem { set, member } => int(redis.set_remove(&set, member).await?),
        Commands::Smembers { set } => redis.set_members(&set).await?,
        Commands::Sinter { set1, set2 } => redis.set_intersect(&set1, &set2).await?,

        Commands::Zadd {
            zset,
            score,
            member,
        } => int(redis.zadd(&zset, score, member).await?),
        Commands::Zrem { zset, member } => int(redis.zrem(&zset, member).await?),
        Commands::Zrange {
            zset,
            start,
            stop,
            rev,
            with_scores,
        } => {
            if rev {
                redis.zrevrange(&zset, start, stop, with_scores).await?
            } else {
                redis.zrange(&zset, start, stop, with_scores).await?
            }
        },
        Commands::Zscore { zset, member } => optional(redis.zscore(&zset, member).await?),
        Commands::Zrank { zset, member } => redis
            .zrank(&zset, member)
            .await?
            .map_or(Value::Nil, int),

        Commands::Xadd { stream, fields, id } => {
            let fields = parse_pairs(&fields)?;
            bulk(redis.xadd(&stream, &fields, &id).await?)
        },
        Commands::Xrange { stream, start, end } => redis.xrange(&stream, &start, &end).await?,
        Commands::Xread { streams, block } => {
            let streams = parse_stream_ids(&streams);
            let keys: Vec<(&str, &str)> = streams
                .iter()
                .map(|(key, id)| (key.as_str(), id.as_str()))
                .collect();
            redis
                .xread(&keys, block.map(Duration::from_millis))
                .await?
        },

        Commands::Eval { script, keys, args } => redis.eval(&script, &keys, &args).await?,

        Commands::Publish { channel, message } => int(redis.publish(&channel, message).await?),
        Commands::Subscribe { channel, count } => {
            subscribe(redis, &channel, count).await?;
            return Ok(None);
        },

        Commands::Expire { key, seconds } => {
            Value::Int(i64::from(redis.set_expiration(&key, seconds).await?))
        },
        Commands::Ttl { key } => Value::Int(redis.get_ttl(&key).await?),
    };

    Ok(Some(reply))
}

async fn subscribe<C>(redis: &RedisFacade<C>, channel: &str, count: Option<usize>) -> Result<()>
where
    C: ConnectionLike + Clone + Send,
{
    println!(
        "{} {} {}",
        "Reading messages from".bright_cyan(),
        channel.bright_yellow(),
        "(Ctrl-C to quit)".dimmed()
    );

    let mut seen = 0usize;
    redis
        .subscribe(channel, |msg| {
            seen += 1;
            let message = Value::Array(vec![
                bulk("message"),
                bulk(msg.get_channel_name()),
                Value::BulkString(msg.get_payload_bytes().to_vec()),
            ]);
            println!("{}", format_value(&message));

            match count {
                Some(limit) if seen >= limit => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        })
        .await
        .with_context(|| format!("Subscription to {} failed", channel))
}

/// Split `field=value` arguments
pub fn parse_pairs(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((field, value)) if !field.is_empty() => Ok((field.to_string(), value.to_string())),
            _ => bail!("Expected field=value, got '{}'", arg),
        })
        .collect()
}

/// Split `key[=id]` arguments, defaulting the id to `0`
pub fn parse_stream_ids(args: &[String]) -> Vec<(String, String)> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, id)) => (key.to_string(), id.to_string()),
            None => (arg.clone(), "0".to_string()),
        })
        .collect()
}
