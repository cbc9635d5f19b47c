//! Football prediction API server library
//!
//! Serves team, fantasy and match prediction documents from a document store
//! behind a short-lived per-category cache, and derives betting outcome views
//! from the stored predictions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use scoreline_api::app::run_server;
//! use scoreline_api::config::Config;
//! use scoreline_api::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config {
//!         api_domain: "http://localhost:27080".to_string(),
//!         ..Config::default()
//!     };
//!     run_server(&config).await
//! }
//! ```

pub mod api;
pub mod app;
pub mod cache;
pub mod classifier;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod provider;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use api::{AppState, create_router};
pub use cache::{CacheStore, Category};
pub use classifier::{Scheme, classify_groups};
pub use config::Config;
pub use error::AppError;
pub use models::{OutcomeGroup, OutcomeRecord, PredictionGroup, PredictionRecord};
pub use provider::{DataProvider, HttpDocumentStore};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
