//! Command methods of [`RedisFacade`](crate::RedisFacade), one file per data type

mod batch;
mod crud;
mod expire;
mod hash;
mod list;
mod pubsub;
mod script;
mod set;
pub mod stream;
mod zset;
