use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::types::{CacheEntry, CacheStatus, Category};
use crate::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::models::{Document, PredictionGroup};

/// Single-category slot holding at most one entry.
///
/// The lock is only held for the swap or the clone of the entry, never across
/// an upstream fetch.
#[derive(Debug)]
pub struct CacheSlot<T> {
    category: Category,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry<T>>>,
}

impl<T> CacheSlot<T> {
    fn new(category: Category, ttl: Duration) -> Self {
        Self {
            category,
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Current entry, fresh or not. No side effects.
    pub async fn get(&self) -> Option<CacheEntry<T>> {
        self.entry.read().await.clone()
    }

    /// An absent entry is never fresh.
    pub fn is_fresh(&self, entry: Option<&CacheEntry<T>>, now: Instant) -> bool {
        entry.is_some_and(|entry| entry.is_fresh(now, self.ttl))
    }

    /// Replaces the entry as one unit and returns what was stored.
    pub async fn put(&self, payload: T, now: Instant) -> CacheEntry<T> {
        let entry = CacheEntry::new(self.category, payload, now);
        *self.entry.write().await = Some(entry.clone());
        entry
    }

    pub async fn status(&self, now: Instant) -> CacheStatus {
        let entry = self.get().await;
        CacheStatus {
            category: self.category,
            present: entry.is_some(),
            fresh: self.is_fresh(entry.as_ref(), now),
            age_ms: entry.map(|e| u64::try_from(e.age(now).as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// Per-category memoisation of document store fetches.
///
/// Built once at start-up and shared with the request handlers.
pub struct CacheStore {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    teams: CacheSlot<Document>,
    fantasy: CacheSlot<Document>,
    predictions: CacheSlot<Vec<PredictionGroup>>,
}

impl CacheStore {
    /// Creates a store driven by the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ttl,
            teams: CacheSlot::new(Category::Teams, ttl),
            fantasy: CacheSlot::new(Category::Fantasy, ttl),
            predictions: CacheSlot::new(Category::Predictions, ttl),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn teams(&self) -> &CacheSlot<Document> {
        &self.teams
    }

    pub fn fantasy(&self) -> &CacheSlot<Document> {
        &self.fantasy
    }

    pub fn predictions(&self) -> &CacheSlot<Vec<PredictionGroup>> {
        &self.predictions
    }

    /// Serves `slot` if fresh, otherwise runs `fetch` and stores its result.
    ///
    /// A failed fetch leaves the slot untouched so a stale entry stays
    /// available for later reads. Concurrent misses may each run `fetch`.
    #[instrument(skip_all, fields(category = %slot.category()))]
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        slot: &CacheSlot<T>,
        fetch: F,
    ) -> Result<Arc<T>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let cached = slot.get().await;
        let now = self.now();

        if let Some(entry) = cached.as_ref().filter(|e| slot.is_fresh(Some(*e), now)) {
            debug!(
                "Cache hit: category={}, age={:?}",
                slot.category(),
                entry.age(now)
            );
            return Ok(Arc::clone(&entry.payload));
        }

        match &cached {
            Some(entry) => debug!(
                "Cache stale: category={}, age={:?}, ttl={:?}",
                slot.category(),
                entry.age(now),
                self.ttl
            ),
            None => debug!("Cache miss: category={}", slot.category()),
        }

        match fetch().await {
            Ok(payload) => {
                let entry = slot.put(payload, self.now()).await;
                info!("Refreshed cache entry: category={}", slot.category());
                Ok(entry.payload)
            }
            Err(e) => {
                warn!(
                    "Fetch failed for category={}, keeping existing entry (present={}): {}",
                    slot.category(),
                    cached.is_some(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Status of every category
    pub async fn statuses(&self) -> Vec<CacheStatus> {
        let now = self.now();
        let (teams, fantasy, predictions) = tokio::join!(
            self.teams.status(now),
            self.fantasy.status(now),
            self.predictions.status(now),
        );
        vec![teams, fantasy, predictions]
    }
}
