use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from document store: {0}")]
    StoreFetch(#[from] reqwest::Error),

    #[error("Failed to parse document store response: {0}")]
    StoreParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("Document store request not found (404): {url}")]
    StoreNotFound { url: String },

    #[error("Document store server error ({status}): {message} (URL: {url})")]
    StoreServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Document store client error ({status}): {message} (URL: {url})")]
    StoreClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Document store rate limit exceeded (429): {message} (URL: {url})")]
    StoreRateLimit { message: String, url: String },

    #[error("Document store unavailable ({status}): {message} (URL: {url})")]
    StoreServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("Document store returned malformed JSON: {message} (URL: {url})")]
    StoreMalformedJson { message: String, url: String },

    #[error("Document store returned unexpected data structure: {message} (URL: {url})")]
    StoreUnexpectedStructure { message: String, url: String },

    #[error("Document store returned empty or missing data: {message} (URL: {url})")]
    StoreNoData { message: String, url: String },

    #[error("Team data not found for season: {season}")]
    SeasonNotFound { season: i32 },

    #[error("Malformed prediction record {id}: missing {field}")]
    MalformedRecord { id: String, field: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Invalid bind address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date/time parsing error: {0}")]
    DateTimeParse(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a date/time parsing error with context
    pub fn datetime_parse_error(msg: impl Into<String>) -> Self {
        Self::DateTimeParse(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a document store not found error
    pub fn store_not_found(url: impl Into<String>) -> Self {
        Self::StoreNotFound { url: url.into() }
    }

    /// Create a document store server error (5xx status codes)
    pub fn store_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::StoreServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a document store client error (4xx status codes except 404 and 429)
    pub fn store_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::StoreClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a document store rate limit error
    pub fn store_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::StoreRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a document store service unavailable error
    pub fn store_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::StoreServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn store_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::StoreMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn store_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::StoreUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn store_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::StoreNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a season not found error
    pub fn season_not_found(season: i32) -> Self {
        Self::SeasonNotFound { season }
    }

    /// Create a malformed prediction record error
    pub fn malformed_record(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            field: field.into(),
        }
    }

    /// Check if error is retryable (network issues, server errors, rate limits)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::StoreServerError { .. }
                | AppError::StoreServiceUnavailable { .. }
                | AppError::StoreRateLimit { .. }
        )
    }

    /// Check if the error came from the document store side of a fetch.
    ///
    /// These are the failures that leave cached data untouched and map to a
    /// gateway status rather than an internal one.
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(
            self,
            AppError::StoreFetch(_)
                | AppError::StoreParse(_)
                | AppError::StoreNotFound { .. }
                | AppError::StoreServerError { .. }
                | AppError::StoreClientError { .. }
                | AppError::StoreRateLimit { .. }
                | AppError::StoreServiceUnavailable { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::StoreMalformedJson { .. }
                | AppError::StoreUnexpectedStructure { .. }
                | AppError::StoreNoData { .. }
                | AppError::SeasonNotFound { .. }
        )
    }

    /// HTTP status used when this error reaches an API handler
    pub fn status_code(&self) -> StatusCode {
        if self.is_provider_unavailable() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_store_not_found_helper() {
        let error = AppError::store_not_found("http://store.local/fantasy");
        assert!(matches!(error, AppError::StoreNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "Document store request not found (404): http://store.local/fantasy"
        );
    }

    #[test]
    fn test_store_server_error_helper() {
        let error = AppError::store_server_error(500, "Internal server error", "http://store.local");
        assert_eq!(
            error.to_string(),
            "Document store server error (500): Internal server error (URL: http://store.local)"
        );
    }

    #[test]
    fn test_malformed_record_helper() {
        let error = AppError::malformed_record("ARS vs CHE", "prediction.homeGoals");
        assert!(matches!(error, AppError::MalformedRecord { .. }));
        assert_eq!(
            error.to_string(),
            "Malformed prediction record ARS vs CHE: missing prediction.homeGoals"
        );
    }

    #[test]
    fn test_season_not_found_helper() {
        let error = AppError::season_not_found(2023);
        assert_eq!(error.to_string(), "Team data not found for season: 2023");
    }

    #[test]
    fn test_is_retryable() {
        assert!(AppError::network_timeout("url").is_retryable());
        assert!(AppError::network_connection("url", "message").is_retryable());
        assert!(AppError::store_server_error(500, "message", "url").is_retryable());
        assert!(AppError::store_rate_limit("message", "url").is_retryable());
        assert!(AppError::store_service_unavailable(503, "message", "url").is_retryable());

        assert!(!AppError::store_not_found("url").is_retryable());
        assert!(!AppError::store_client_error(400, "message", "url").is_retryable());
        assert!(!AppError::config_error("message").is_retryable());
        assert!(!AppError::malformed_record("id", "field").is_retryable());
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AppError::network_timeout("url").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::store_no_data("empty", "url").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::season_not_found(2023).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::malformed_record("id", "field").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::config_error("bad").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::StoreParse(_)));
        assert!(app_error.is_provider_unavailable());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert!(!app_error.is_provider_unavailable());
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let toml_error = toml::from_str::<serde_json::Value>("invalid = [toml").unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }

    #[test]
    fn test_error_from_addr_parse() {
        let parse_error = "not-an-address".parse::<std::net::SocketAddr>().unwrap_err();
        let app_error: AppError = parse_error.into();
        assert!(matches!(app_error, AppError::AddrParse(_)));
    }
}
