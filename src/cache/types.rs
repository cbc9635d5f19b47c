//! Cache data structures with TTL support

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// Cacheable data domains. The set is fixed at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Teams,
    Fantasy,
    Predictions,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Teams, Category::Fantasy, Category::Predictions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Teams => "teams",
            Category::Fantasy => "fantasy",
            Category::Predictions => "predictions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload together with the instant it was fetched.
///
/// Entries are immutable; a refresh swaps in a whole new entry so the payload
/// and its timestamp are always published together.
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub category: Category,
    pub payload: Arc<T>,
    pub fetched_at: Instant,
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            category: self.category,
            payload: Arc::clone(&self.payload),
            fetched_at: self.fetched_at,
        }
    }
}

impl<T> CacheEntry<T> {
    pub fn new(category: Category, payload: T, fetched_at: Instant) -> Self {
        Self {
            category,
            payload: Arc::new(payload),
            fetched_at,
        }
    }

    /// Age of the entry at `now`. An entry stamped after `now` has age zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    /// Fresh while strictly younger than `ttl`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        let age = self.age(now);
        let fresh = age < ttl;

        trace!(
            "Cache freshness check: category={}, age={:?}, ttl={:?}, fresh={}",
            self.category, age, ttl, fresh
        );

        fresh
    }
}

/// Point-in-time view of one category, used by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub category: Category,
    pub present: bool,
    pub fresh: bool,
    pub age_ms: Option<u64>,
}
