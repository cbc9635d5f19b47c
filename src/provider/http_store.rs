use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::DataProvider;
use super::fetch_utils::fetch;
use super::grouping::group_by_match_date;
use super::http_client::create_http_client_with_timeout;
use crate::config::Config;
use crate::constants::store_paths;
use crate::error::AppError;
use crate::models::{Document, PredictionGroup, PredictionRecord};

/// Document store reached over its JSON HTTP interface.
///
/// - `GET {domain}/team-data/{season}` returns one team document
/// - `GET {domain}/fantasy` returns the fantasy document
/// - `GET {domain}/predictions` returns every persisted prediction row
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
}

impl HttpDocumentStore {
    pub fn new(client: Client, api_domain: &str) -> Self {
        Self {
            client,
            base_url: api_domain.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, &config.api_domain))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Rejects `null` so a missing document is reported instead of served
    fn require_document(document: Document, url: &str) -> Result<Document, AppError> {
        if document.is_null() {
            Err(AppError::store_no_data("Document is null", url))
        } else {
            Ok(document)
        }
    }
}

#[async_trait]
impl DataProvider for HttpDocumentStore {
    #[instrument(skip(self))]
    async fn fetch_teams(&self, season: i32) -> Result<Document, AppError> {
        let url = self.url(&format!("{}/{}", store_paths::TEAM_DATA, season));
        let document = match fetch::<Document>(&self.client, &url).await {
            Err(AppError::StoreNotFound { .. }) => return Err(AppError::season_not_found(season)),
            other => other?,
        };
        Self::require_document(document, &url)
    }

    #[instrument(skip(self))]
    async fn fetch_fantasy(&self) -> Result<Document, AppError> {
        let url = self.url(store_paths::FANTASY);
        let document = fetch::<Document>(&self.client, &url).await?;
        Self::require_document(document, &url)
    }

    #[instrument(skip(self))]
    async fn fetch_predictions(&self) -> Result<Vec<PredictionGroup>, AppError> {
        let url = self.url(store_paths::PREDICTIONS);
        let records = fetch::<Vec<PredictionRecord>>(&self.client, &url).await?;
        let record_count = records.len();
        let groups = group_by_match_date(records);

        info!(
            "Fetched {} prediction records in {} date groups",
            record_count,
            groups.len()
        );
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = create_http_client_with_timeout(5).unwrap();
        let store = HttpDocumentStore::new(client, "http://store.local/api/");
        assert_eq!(store.base_url(), "http://store.local/api");
        assert_eq!(store.url("fantasy"), "http://store.local/api/fantasy");
    }

    #[test]
    fn test_from_config_uses_domain() {
        let config = Config {
            api_domain: "http://localhost:27080".to_string(),
            ..Config::default()
        };
        let store = HttpDocumentStore::from_config(&config).unwrap();
        assert_eq!(store.base_url(), "http://localhost:27080");
    }
}
