//! Native execution host for the relay core.
//!
//! Every header-sync and proof-verification operation runs as a call
//! inside a [`NativeContext`]: a strictly nested call-frame stack with a
//! shared gas counter, witness (authorization) checks, and a
//! copy-on-write key/value overlay that is committed or rolled back as a
//! unit at the enclosing transaction boundary.

pub mod cache;
pub mod constants;
pub mod context;
pub mod errors;
pub mod kv;

pub use cache::CacheDb;
pub use constants::*;
pub use context::{CallFrame, NativeContext, NotifyEvent};
pub use errors::HostError;
pub use kv::{DbError, KvStore, MemStore};
