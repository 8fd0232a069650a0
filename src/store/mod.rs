//! Hash Store Module
//!
//! Abstraction over the hosted key-value store that holds the counters.
//!
//! ## Core Concepts
//! - **Hashes**: every key maps to a set of named fields with independent
//!   string values; counters are decimal integer strings inside one hash
//!   per `"<namespace>:<slug>"` key.
//! - **Atomic increment**: `hincrby` is the only mutation. Concurrency
//!   correctness is delegated entirely to the store: N concurrent increments
//!   on the same (key, field) must raise the value by exactly N.
//! - **Injection**: the store is constructed once at startup and handed to
//!   each service as `Arc<dyn HashStore>`, so tests can substitute doubles.
//!
//! ## Submodules
//! - **`upstash`**: client for the hosted Redis REST API (production).
//! - **`memory`**: DashMap-backed implementation for dev mode and tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub mod memory;
pub mod upstash;


/// Minimal hash-store surface the counter service depends on.
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Returns all fields of the hash at `key`. A key that was never written
    /// yields an empty map, not an error.
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>>;

    /// Atomically adds `delta` to the integer field `field` of the hash at
    /// `key`, creating the hash and the field (starting from 0) if absent.
    /// Returns the value after the increment.
    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64>;
}
