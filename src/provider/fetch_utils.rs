//! Generic JSON fetching with retry logic and error classification

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::retry;
use crate::error::AppError;

/// Maps a non-success status to the matching error variant
fn status_error(status: reqwest::StatusCode, url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");

    match status_code {
        404 => AppError::store_not_found(url),
        429 => AppError::store_rate_limit(reason, url),
        502 | 503 => AppError::store_service_unavailable(status_code, reason, url),
        400..=499 => AppError::store_client_error(status_code, reason, url),
        _ => AppError::store_server_error(status_code, reason, url),
    }
}

/// Maps a failed send to the matching error variant
fn send_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::StoreFetch(e)
    }
}

/// Seconds from a numeric `Retry-After` header
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Fetches `url` and parses the body as `T`.
///
/// - Retries failures that [`AppError::is_retryable`] accepts with
///   exponential backoff, honouring `Retry-After` up to
///   [`retry::MAX_RETRY_AFTER_SECS`]
/// - Distinguishes empty bodies, non-JSON bodies and JSON of the wrong shape
#[instrument(skip(client))]
pub(super) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching document store data from URL: {url}");

    let max_wait = Duration::from_secs(retry::MAX_RETRY_AFTER_SECS);
    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);
    let response = loop {
        let (err, wait) = match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => break resp,
            Ok(resp) => {
                let wait = retry_after(&resp).unwrap_or(backoff);
                (status_error(resp.status(), url), wait)
            }
            Err(e) => (send_error(e, url), backoff),
        };

        if !err.is_retryable() || attempt >= retry::MAX_ATTEMPTS {
            error!("Request failed for URL {}: {}", url, err);
            return Err(err);
        }

        let wait = wait.min(max_wait);
        warn!(
            "Transient failure from {}: {}. Retrying in {:?} (attempt {}/{})",
            url,
            err,
            wait,
            attempt + 1,
            retry::MAX_ATTEMPTS
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
        backoff = backoff.saturating_mul(2);
    };

    debug!("Response status: {}", response.status());

    let response_text = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", url, e);
        AppError::StoreFetch(e)
    })?;

    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse document store response: {} (URL: {})", e, url);

            let trimmed = response_text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::store_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::store_malformed_json("Response is not valid JSON", url))
            } else {
                Err(AppError::store_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
