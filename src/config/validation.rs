use super::Config;
use crate::error::AppError;
use std::net::SocketAddr;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty and must be a URL or domain name
/// - Bind address must parse as a socket address
/// - Cache TTL and HTTP timeout must be positive
/// - If a log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_api_domain(&config.api_domain)?;

    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        AppError::config_error(format!(
            "Invalid bind address '{}': {}",
            config.bind_address, e
        ))
    })?;

    if config.cache_ttl_seconds == 0 {
        return Err(AppError::config_error("Cache TTL must be at least 1 second"));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        validate_log_path(log_path)?;
    }

    Ok(())
}

fn validate_api_domain(api_domain: &str) -> Result<(), AppError> {
    if api_domain.is_empty() {
        return Err(AppError::config_error(
            "API domain is not set. Use --config <API_DOMAIN> or SCORELINE_API_DOMAIN",
        ));
    }

    let host = api_domain
        .trim_start_matches("http://")
        .trim_start_matches("https://");
    if host.is_empty() || (!host.contains('.') && !host.starts_with("localhost")) {
        return Err(AppError::config_error(
            "API domain must be a valid URL or domain name",
        ));
    }

    Ok(())
}

fn validate_log_path(log_path: &str) -> Result<(), AppError> {
    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    if let Some(parent) = Path::new(log_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            api_domain: "http://localhost:27080".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
        let remote = Config {
            api_domain: "https://store.example.com".to_string(),
            ..valid()
        };
        assert!(validate_config(&remote).is_ok());
    }

    #[test]
    fn test_rejects_bad_domains() {
        for domain in ["", "https://", "not-a-domain"] {
            let config = Config {
                api_domain: domain.to_string(),
                ..valid()
            };
            assert!(
                matches!(validate_config(&config), Err(AppError::Config(_))),
                "{domain:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        let config = Config {
            bind_address: "localhost".to_string(),
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_durations() {
        let no_ttl = Config {
            cache_ttl_seconds: 0,
            ..valid()
        };
        let no_timeout = Config {
            http_timeout_seconds: 0,
            ..valid()
        };
        assert!(validate_config(&no_ttl).is_err());
        assert!(validate_config(&no_timeout).is_err());
    }

    #[test]
    fn test_log_path_parent_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("api.log");
        let config = Config {
            log_file_path: Some(log_path.to_string_lossy().to_string()),
            ..valid()
        };

        assert!(validate_config(&config).is_ok());
        assert!(temp_dir.path().join("logs").exists());
    }

    #[test]
    fn test_rejects_empty_log_path() {
        let config = Config {
            log_file_path: Some(String::new()),
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }
}
