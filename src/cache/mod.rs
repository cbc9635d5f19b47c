pub mod store;
pub mod types;

// Re-export cache types
pub use store::{CacheSlot, CacheStore};
pub use types::{CacheEntry, CacheStatus, Category};
