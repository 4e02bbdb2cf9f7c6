use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Build the canonical key for a quinella pair
///
/// A quinella is unordered, so the key always puts the lower horse
/// number first: `pair_key(5, 3)` and `pair_key(3, 5)` are both "3-5".
pub fn pair_key(a: u32, b: u32) -> String {
    if a <= b {
        format!("{}-{}", a, b)
    } else {
        format!("{}-{}", b, a)
    }
}

/// Parse a pair key "3-5" to (3, 5)
pub fn parse_pair_key(key: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    Some((first, second))
}

/// Dutching request
#[derive(Debug, Serialize, Deserialize)]
pub struct DutchRequest {
    pub race_no: u8,
    pub banker: u32,
    pub others: Vec<u32>,
    pub total_stake: f64,
}

/// Dutching response
#[derive(Debug, Serialize, Deserialize)]
pub struct DutchResponse {
    pub race_no: u8,
    /// "ok", "no_data" or "fetch_failed"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub total_stake: f64,
    pub bets: Vec<crate::core::dutching::DutchBet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
}

/// Odds response for a single race
#[derive(Debug, Serialize, Deserialize)]
pub struct OddsResponse {
    pub race_no: u8,
    /// "ok", "no_data" or "fetch_failed"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub odds: HashMap<String, f64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
