use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

use super::HashStore;

/// In-process hash store used in dev mode and by the test suite.
///
/// Mirrors the hosted store's semantics: a missing field starts at 0 and a
/// stored value that is not a decimal integer makes `hincrby` fail. The
/// DashMap entry lock makes each increment atomic, so concurrent increments
/// on one field serialize the same way they do server-side.
#[derive(Default)]
pub struct MemoryStore {
    hashes: DashMap<String, HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw field value, bypassing increment semantics. Used to seed
    /// dev data and to plant malformed values in tests.
    pub fn hset(&self, key: &str, field: &str, value: &str) {
        self.hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }
}

#[async_trait]
impl HashStore for MemoryStore {
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .hashes
            .get(key)
            .map(|hash| hash.value().clone())
            .unwrap_or_default())
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut hash = self.hashes.entry(key.to_string()).or_default();
        let value = hash.entry(field.to_string()).or_insert_with(|| "0".to_string());

        let current: i64 = value.trim().parse().map_err(|_| {
            anyhow::anyhow!("hash value at {}.{} is not an integer", key, field)
        })?;
        let next = current + delta;
        *value = next.to_string();
        Ok(next)
    }
}
