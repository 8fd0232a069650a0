use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::types::{CountMap, CounterFamily};
use crate::store::HashStore;

#[derive(Debug, Error)]
pub enum CounterError {
    /// Read without a slug. No store access is attempted.
    #[error("slug required")]
    SlugRequired,

    /// Increment with an empty slug or a dimension outside the family's set.
    /// No store mutation is attempted.
    #[error("invalid params")]
    InvalidParams,

    /// The hash store call failed. Never retried; the request fails once.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// One counter family over an injected hash store. Instantiated twice, for
/// feedback and reactions; the instances differ only in their
/// `CounterFamily`.
pub struct CounterService {
    family: CounterFamily,
    store: Arc<dyn HashStore>,
}

impl CounterService {
    pub fn new(family: CounterFamily, store: Arc<dyn HashStore>) -> Self {
        Self { family, store }
    }

    fn key(&self, slug: &str) -> String {
        format!("{}:{}", self.family.namespace, slug)
    }

    /// Derives the response map from raw hash fields. Every allowed dimension
    /// appears in the result; absent or non-numeric stored values read as 0.
    fn parse_counts(&self, raw: &HashMap<String, String>) -> CountMap {
        self.family
            .dimensions
            .iter()
            .map(|dimension| {
                let count = raw
                    .get(*dimension)
                    .and_then(|value| value.trim().parse::<i64>().ok())
                    .unwrap_or(0);
                (dimension.to_string(), count)
            })
            .collect()
    }

    /// Current totals for `slug`. A slug nobody has voted on yet reads as
    /// all zeros.
    pub async fn counts(&self, slug: &str) -> Result<CountMap, CounterError> {
        if slug.is_empty() {
            return Err(CounterError::SlugRequired);
        }
        let raw = self.store.hgetall(&self.key(slug)).await?;
        Ok(self.parse_counts(&raw))
    }

    /// Adds exactly one durable vote to `(slug, dimension)` and returns the
    /// totals observed on re-read. There is no idempotency token: a retried
    /// request counts again.
    pub async fn increment(&self, slug: &str, dimension: &str) -> Result<CountMap, CounterError> {
        if slug.is_empty() || !self.family.dimensions.iter().any(|d| *d == dimension) {
            return Err(CounterError::InvalidParams);
        }

        let key = self.key(slug);
        self.store.hincrby(&key, dimension, 1).await?;
        let raw = self.store.hgetall(&key).await?;
        Ok(self.parse_counts(&raw))
    }
}
