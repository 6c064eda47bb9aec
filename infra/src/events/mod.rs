//! Session event publishing over Redis pub/sub

mod redis_sink;

pub use redis_sink::RedisEventSink;
