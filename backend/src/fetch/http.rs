//! reqwest-backed source talking to the resolver's statistics API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::HistorySource;
use crate::config::UpstreamSettings;
use crate::error::FetchError;
use crate::models::{FetchResult, HistoryPayload, TimeRange};

/// Fetches the over-time statistics over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHistorySource {
    client: Client,
    url: String,
}

impl HttpHistorySource {
    pub fn new(settings: &UpstreamSettings) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: settings.endpoint(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HistorySource for HttpHistorySource {
    async fn fetch(&self, range: Option<&TimeRange>) -> FetchResult<HistoryPayload> {
        let mut request = self.client.get(&self.url);
        if let Some(range) = range {
            request = request.query(&[
                ("from", range.from.timestamp()),
                ("until", range.until.timestamp()),
            ]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("fetched {} bytes from {}", body.len(), self.url);
        Ok(HistoryPayload::from_json(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
