//! Odds fetcher for the racing.stheadline.com raceOdds feed
//!
//! Fetches quinella (連贏) odds for a single race and normalizes them
//! into a pair-key map.
//!
//! # Example
//!
//! ```no_run
//! use quindutch::fetcher::{ClientConfig, OddsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OddsClient::new(ClientConfig::default());
//!
//!     // Fetch quinella odds for race 1
//!     let snapshot = client.fetch_quinella(1).await?;
//!     println!("Found {} combinations", snapshot.quinella.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod quinella;

pub use client::{ClientConfig, FetchError, OddsClient};
pub use quinella::parse_quinella_odds;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quinella odds for a single race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuinellaSnapshot {
    pub race_no: u8,
    pub fetched_at: String,
    /// Odds map: key = "low-high" (e.g., "3-5"), value = odds
    pub quinella: HashMap<String, f64>,
}

impl QuinellaSnapshot {
    /// Get odds for a pair of horses, in either order
    pub fn get(&self, a: u32, b: u32) -> Option<f64> {
        let key = format!("{}-{}", a, b);
        if let Some(&v) = self.quinella.get(&key) {
            return Some(v);
        }
        let rev = format!("{}-{}", b, a);
        self.quinella.get(&rev).copied()
    }

    /// All horse numbers appearing in the odds, sorted ascending
    pub fn horses(&self) -> Vec<u32> {
        let mut horses: Vec<u32> = self
            .quinella
            .keys()
            .filter_map(|k| crate::models::parse_pair_key(k))
            .flat_map(|(a, b)| [a, b])
            .collect();
        horses.sort_unstable();
        horses.dedup();
        horses
    }

    pub fn is_empty(&self) -> bool {
        self.quinella.is_empty()
    }
}
