//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests to the document store in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Season whose team document is served when none is configured
pub const DEFAULT_SEASON: i32 = 2023;

/// Address the API server binds to when none is configured
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Default log file name inside the log directory
pub const LOG_FILE_NAME: &str = "scoreline_api.log";

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// TTL shared by the teams, fantasy and predictions categories
    pub const CATEGORY_SECONDS: u64 = 30;
}

/// Document store endpoint paths, relative to the configured API domain
pub mod store_paths {
    /// Team data documents, keyed by season
    pub const TEAM_DATA: &str = "team-data";

    /// The single fantasy document
    pub const FANTASY: &str = "fantasy";

    /// Flat list of persisted prediction rows
    pub const PREDICTIONS: &str = "predictions";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for document store domain override
    pub const API_DOMAIN: &str = "SCORELINE_API_DOMAIN";

    /// Environment variable for season override
    pub const SEASON: &str = "SCORELINE_SEASON";

    /// Environment variable for bind address override
    pub const BIND_ADDRESS: &str = "SCORELINE_BIND_ADDRESS";

    /// Environment variable for cache TTL override in seconds
    pub const CACHE_TTL: &str = "SCORELINE_CACHE_TTL";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "SCORELINE_HTTP_TIMEOUT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "SCORELINE_LOG_FILE";
}

/// Retry configuration for document store requests
pub mod retry {
    /// Maximum number of retry attempts for transient failures
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Initial backoff between retries (milliseconds), doubled on each attempt
    pub const BASE_DELAY_MS: u64 = 250;

    /// Upper bound on any single wait, including server supplied `Retry-After`
    pub const MAX_RETRY_AFTER_SECS: u64 = 2;
}
