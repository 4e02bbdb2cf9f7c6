//! HTTP client for the raceOdds endpoint

use super::{parse_quinella_odds, QuinellaSnapshot};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Base URL for the latest race odds feed
const BASE_URL_RACE_ODDS: &str = "https://racing.stheadline.com/api/raceOdds/latest";

/// Market type selector for quinella (連贏) odds
const MARKET_TYPE_QUINELLA: &str = "quin";

/// Fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    #[error("Failed to decode odds response: {0}")]
    DecodeFailed(String),

    #[error("No quinella odds found for race")]
    NoOddsFound,
}

impl FetchError {
    /// True for the no-data case, as opposed to a transport or decode
    /// failure. Both degrade to an empty table, but callers report them
    /// differently.
    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchError::NoOddsFound)
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Odds feed base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL_RACE_ODDS.to_string(),
            timeout_secs: 5,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Odds client with a fixed timeout
pub struct OddsClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl OddsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build URL for the quinella odds of a race
    fn build_url(&self, race_no: u8) -> String {
        format!(
            "{}?raceNo={}&type={}&rev=2",
            self.config.base_url, race_no, MARKET_TYPE_QUINELLA
        )
    }

    /// Fetch quinella odds for a single race
    ///
    /// One request, no retries. Each refresh cycle issues a fresh call;
    /// nothing is cached between calls.
    pub async fn fetch_quinella(&self, race_no: u8) -> Result<QuinellaSnapshot, FetchError> {
        let url = self.build_url(race_no);
        tracing::info!("Fetching quinella odds: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let body = response.text().await?;
        let quinella = parse_quinella_odds(&body)?;

        if quinella.is_empty() {
            return Err(FetchError::NoOddsFound);
        }

        Ok(QuinellaSnapshot {
            race_no,
            fetched_at: Utc::now().to_rfc3339(),
            quinella,
        })
    }

    /// Fetch quinella odds, degrading any failure to an empty map
    ///
    /// The failure is logged as a warning and never propagated; an empty
    /// map is the well-defined "nothing available" value downstream code
    /// already handles.
    pub async fn fetch_quinella_or_empty(&self, race_no: u8) -> HashMap<String, f64> {
        match self.fetch_quinella(race_no).await {
            Ok(snapshot) => snapshot.quinella,
            Err(e) => {
                tracing::warn!("Quinella fetch for race {} returned nothing: {}", race_no, e);
                HashMap::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_url, BASE_URL_RACE_ODDS);
    }

    #[test]
    fn test_build_url() {
        let client = OddsClient::new(ClientConfig::default());
        let url = client.build_url(7);
        assert_eq!(
            url,
            "https://racing.stheadline.com/api/raceOdds/latest?raceNo=7&type=quin&rev=2"
        );
    }

    #[test]
    fn test_build_url_custom_base() {
        let config = ClientConfig {
            base_url: "http://localhost:9000/raceOdds".to_string(),
            ..Default::default()
        };
        let client = OddsClient::new(config);
        assert_eq!(
            client.build_url(1),
            "http://localhost:9000/raceOdds?raceNo=1&type=quin&rev=2"
        );
    }

    #[test]
    fn test_fetch_error_is_no_data() {
        assert!(FetchError::NoOddsFound.is_no_data());
        assert!(!FetchError::HttpStatus(502).is_no_data());
        assert!(!FetchError::DecodeFailed("bad".to_string()).is_no_data());
    }
}
