//! HTTP client for the `*arr` v3 API.
//!
//! Every request is `GET {base_url}/api/v3/{endpoint}` carrying the API key
//! in `X-Api-Key`.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ArrError;

pub const DEFAULT_RETRIES: u32 = 2;

const API_PREFIX: &str = "api/v3";
const BACKOFF_BASE: Duration = Duration::from_millis(300);
const RETRYABLE_STATUSES: [StatusCode; 7] = [
    StatusCode::REQUEST_TIMEOUT,
    StatusCode::PAYLOAD_TOO_LARGE,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Extra attempts after the first failed one.
    pub retries: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            retries: DEFAULT_RETRIES,
        }
    }
}

pub struct ArrClient {
    base_url: String,
    api_key: String,
    retries: u32,
    client: reqwest::Client,
}

impl ArrClient {
    pub fn new(config: ClientConfig) -> Self {
        let base_url = config
            .base_url
            .strip_suffix('/')
            .unwrap_or(&config.base_url)
            .to_string();
        Self {
            base_url,
            api_key: config.api_key,
            retries: config.retries,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{API_PREFIX}/{endpoint}", self.base_url)
    }

    /// Fetch `endpoint` and decode its JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ArrError> {
        let url = self.endpoint_url(endpoint);
        let mut attempt = 0;

        let resp = loop {
            debug!(url = %url, attempt, "arr request");

            let result = self
                .client
                .get(&url)
                .header("X-Api-Key", &self.api_key)
                .header(ACCEPT, "application/json")
                .send()
                .await;

            let retry = match &result {
                Ok(resp) => is_retryable(resp.status()),
                Err(e) => !e.is_builder(),
            };
            if !retry || attempt >= self.retries {
                break result;
            }

            let delay = backoff(attempt);
            warn!(
                url = %url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        };

        let resp = resp.map_err(|source| ArrError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ArrError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        resp.json().await.map_err(|source| ArrError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

pub fn is_retryable(status: StatusCode) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Delay before retry number `attempt + 1`: 300ms, 600ms, 1.2s, ...
pub fn backoff(attempt: u32) -> Duration {
    BACKOFF_BASE * 2u32.saturating_pow(attempt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_trailing_slash() {
        let client = ArrClient::new(ClientConfig::new("http://localhost:7878/", "key"));
        assert_eq!(
            client.endpoint_url("movie"),
            "http://localhost:7878/api/v3/movie"
        );

        let client = ArrClient::new(ClientConfig::new("http://nas/radarr", "key"));
        assert_eq!(
            client.endpoint_url("episode?seriesId=3&includeEpisodeFile=true"),
            "http://nas/radarr/api/v3/episode?seriesId=3&includeEpisodeFile=true"
        );
    }

    #[test]
    fn config_defaults_to_two_retries() {
        assert_eq!(ClientConfig::new("http://x", "k").retries, 2);
    }

    #[test]
    fn retryable_statuses() {
        for status in [408, 413, 429, 500, 502, 503, 504] {
            assert!(is_retryable(StatusCode::from_u16(status).unwrap()), "{status}");
        }
        for status in [200, 400, 401, 404, 501] {
            assert!(!is_retryable(StatusCode::from_u16(status).unwrap()), "{status}");
        }
    }

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff(0), Duration::from_millis(300));
        assert_eq!(backoff(1), Duration::from_millis(600));
        assert_eq!(backoff(2), Duration::from_millis(1200));
    }
}
