use std::sync::Arc;

use crate::cache::CacheStore;
use crate::provider::DataProvider;

/// Shared handler state. Cloned per request; all fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheStore>,
    pub provider: Arc<dyn DataProvider>,
    pub season: i32,
}

impl AppState {
    pub fn new(cache: CacheStore, provider: Arc<dyn DataProvider>, season: i32) -> Self {
        Self {
            cache: Arc::new(cache),
            provider,
            season,
        }
    }
}
