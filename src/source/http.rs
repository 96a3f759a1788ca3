//! PostgREST-style HTTP announcement source.
//! Reads the first active row of the announcements table.

use super::traits::{AnnouncementSource, FetchFuture};
use crate::announcement::Announcement;
use crate::config::SourceConfig;
use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 256;

pub struct HttpAnnouncementSource {
    api_key: Option<String>,
    table: String,
    /// Pre-computed table URL (avoids `format!` per request).
    cached_table_url: String,
    client: Client,
}

impl HttpAnnouncementSource {
    pub fn new(base_url: &str, api_key: Option<&str>, table: &str) -> Self {
        Self::with_client(base_url, api_key, table, build_source_client(30, 10))
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, FetchError> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| FetchError::NotConfigured("source.base_url is not set".into()))?;

        Ok(Self::with_client(
            base_url,
            config.api_key.as_deref(),
            &config.table,
            build_source_client(config.timeout_secs, config.connect_timeout_secs),
        ))
    }

    fn with_client(base_url: &str, api_key: Option<&str>, table: &str, client: Client) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(ToOwned::to_owned),
            table: table.to_string(),
            cached_table_url: format!("{base_url}/rest/v1/{table}"),
            client,
        }
    }

    pub fn table_url(&self) -> &str {
        &self.cached_table_url
    }

    async fn fetch(&self) -> Result<Option<Announcement>, FetchError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            FetchError::NotConfigured("source.api_key is not set".into())
        })?;

        let response = self
            .client
            .get(&self.cached_table_url)
            .query(&[("select", "*"), ("active", "eq.true"), ("limit", "1")])
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let bytes = response.bytes().await.map_err(FetchError::Request)?;
        let rows: Vec<Announcement> = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::Decode(err.to_string()))?;

        tracing::debug!(table = %self.table, rows = rows.len(), "announcement rows fetched");
        Ok(rows.into_iter().next())
    }
}

impl AnnouncementSource for HttpAnnouncementSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_active_announcement(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch())
    }
}

pub fn build_source_client(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn truncate_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut truncated: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push('…');
    truncated
}
