//! HTTP client for the Brent dashboard resource API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, RangeQuery},
    types::{ChangePointRecord, EventEntry, PriceRecord, Resource, Response, StatsRecord},
    Error,
};

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// HTTP client for the four dashboard resources.
///
/// Each request builds a fresh `reqwest::Client` with the configured timeout
/// (30 seconds unless overridden).
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to `http://localhost:5000/api`.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the local development API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, resource: Resource, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, resource.path()).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed { resource }
            })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, resource: Resource, query: Option<&Q>) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(resource, query)?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed { resource }
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {}: {}", resource, e);
                Error::RequestFailed { resource }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response body: {}", resource, e);
            Error::RequestFailed { resource }
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("{} request failed with status {}: {}", resource, status, snippet);
            return Err(Error::HttpStatus {
                resource,
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<Response<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {}: {} | body: {}", resource, e, snippet);
            Error::Parse {
                resource,
                message: e.to_string(),
            }
        })?;

        Ok(parsed)
    }

    /// Fetches the log-return series inside the range.
    pub async fn get_prices(&self, query: &RangeQuery) -> Result<Response<Vec<PriceRecord>>, Error> {
        self.get::<Vec<PriceRecord>, RangeQuery>(Resource::Prices, Some(query))
            .await
    }

    /// Fetches the detected change point for the range, if any.
    pub async fn get_change_point(
        &self,
        query: &RangeQuery,
    ) -> Result<Response<ChangePointRecord>, Error> {
        self.get::<ChangePointRecord, RangeQuery>(Resource::ChangePoint, Some(query))
            .await
    }

    /// Fetches the event calendar inside the range.
    pub async fn get_events(&self, query: &RangeQuery) -> Result<Response<Vec<EventEntry>>, Error> {
        self.get::<Vec<EventEntry>, RangeQuery>(Resource::Events, Some(query))
            .await
    }

    /// Fetches summary statistics for the range.
    pub async fn get_stats(&self, query: &RangeQuery) -> Result<Response<StatsRecord>, Error> {
        self.get::<StatsRecord, RangeQuery>(Resource::Stats, Some(query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...[truncated]", &body[..cut])
    }
}
