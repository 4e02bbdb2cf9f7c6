//! Quindutch - Quinella banker dutching calculator
//!
//! This library provides:
//! - Quinella (連贏) odds fetching from the raceOdds feed
//! - Equal-profit dutching allocation for banker quinella bets
//! - Shared request/response types for the API and CLI surfaces
//!
//! # Example
//!
//! ```
//! use quindutch::core::dutching::dutch_banker_quinella;
//! use std::collections::HashMap;
//!
//! let mut odds = HashMap::new();
//! odds.insert("1-2".to_string(), 5.0);
//! odds.insert("1-3".to_string(), 10.0);
//!
//! // Banker 1 paired with 2 and 3, 100 total stake
//! let allocation = dutch_banker_quinella(1, &[2, 3], &odds, 100.0);
//! assert_eq!(allocation.pairs.len(), 2);
//!
//! // Profit is the same whichever pair wins
//! let profit = allocation.expected_profit().unwrap();
//! assert!((profit - 233.333).abs() < 0.001);
//! ```

pub mod core;
pub mod fetcher;
pub mod models;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod error;

// Re-export commonly used types
pub use crate::core::dutching::{dutch_banker_quinella, resolve_pair, DutchBet, DutchingAllocation};
pub use fetcher::{ClientConfig, FetchError, OddsClient, QuinellaSnapshot};
pub use models::{pair_key, parse_pair_key};
