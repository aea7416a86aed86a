use super::types::{FileEntry, Record};
use crate::error::ZenfetchError;
use crate::http::{authorized_get, error_for_status};
use reqwest::Client;
use url::Url;

/// Metadata endpoint of `record_id` below the records API at `api_url`.
pub fn record_url(api_url: &str, record_id: &str) -> Result<Url, ZenfetchError> {
    let raw = format!("{}/{}", api_url.trim_end_matches('/'), record_id);
    Url::parse(&raw).map_err(|e| ZenfetchError::ConfigValidation {
        details: format!("Invalid record URL {raw}: {e}"),
    })
}

#[derive(Debug, Clone)]
pub struct RecordClient {
    http: Client,
    api_url: String,
    access_token: Option<String>,
}

impl RecordClient {
    pub fn new(http: Client, api_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            access_token,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub async fn fetch_record(&self, record_id: &str) -> Result<Record, ZenfetchError> {
        let url = record_url(&self.api_url, record_id)?;
        tracing::debug!(record = record_id, url = %url, "Fetching record metadata");

        let response = authorized_get(&self.http, url.as_str(), self.access_token()).send().await?;
        let body = error_for_status(response)?.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| ZenfetchError::RecordMetadata {
            record_id: record_id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Looks up a single `filename` in the record's listing. The name must match exactly.
    ///
    /// Every call requests the metadata again. Resolving several files of one record
    /// goes through [`RecordClient::fetch_record`] and [`Record::require_file`] instead.
    pub async fn resolve_file(
        &self,
        record_id: &str,
        filename: &str,
    ) -> Result<FileEntry, ZenfetchError> {
        let record = self.fetch_record(record_id).await?;
        let entry = record.require_file(record_id, filename)?;

        tracing::debug!(
            record = record_id,
            file = filename,
            size = entry.size,
            url = entry.download_url(),
            "Resolved file"
        );
        Ok(entry.clone())
    }
}
