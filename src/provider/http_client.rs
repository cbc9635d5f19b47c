//! HTTP client creation for the document store

use reqwest::Client;
use std::time::Duration;

/// Creates a pooled HTTP client whose requests time out after
/// `timeout_seconds`. The timeout is the only cancellation a store fetch has.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}
