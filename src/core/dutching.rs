//! Banker Quinella Dutching
//!
//! Equal-profit stake allocation across every quinella pairing a banker
//! horse with a set of partner horses.
//!
//! Requiring the payout `stake_i * odds_i` to be the same for every pair
//! while the stakes sum to the total gives the closed form:
//!
//! ```text
//! inverse_sum = Σ (1 / odds_j)
//! stake_i     = total_stake / (odds_i * inverse_sum)
//! ```
//!
//! Every winning pair then returns `total_stake / inverse_sum`, so the
//! profit is identical no matter which pair comes in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::parse_pair_key;

/// One quinella combination with its allocated stake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutchBet {
    pub pair: String,
    pub odds: f64,
    pub stake: f64,
    pub expected_return: f64,
    pub expected_profit: f64,
}

/// Result of a dutching run
///
/// All three maps are keyed by the pair key under which the odd was
/// found. Empty when no pair could be resolved; that is a first-class
/// "nothing to allocate" value, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DutchingAllocation {
    /// Resolved pair -> odds
    pub pairs: HashMap<String, f64>,
    /// Resolved pair -> stake
    pub stakes: HashMap<String, f64>,
    /// Resolved pair -> expected profit
    pub profits: HashMap<String, f64>,
}

impl DutchingAllocation {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The equalized profit, identical across all pairs
    pub fn expected_profit(&self) -> Option<f64> {
        self.profits.values().next().copied()
    }

    /// Profit as a fraction of the total stake
    pub fn roi(&self, total_stake: f64) -> Option<f64> {
        if total_stake <= 0.0 {
            return None;
        }
        self.expected_profit().map(|p| p / total_stake)
    }

    /// Row view of the allocation, sorted by pair for stable display
    pub fn bets(&self) -> Vec<DutchBet> {
        let mut bets: Vec<DutchBet> = self
            .pairs
            .iter()
            .map(|(pair, &odds)| {
                let stake = self.stakes.get(pair).copied().unwrap_or(0.0);
                DutchBet {
                    pair: pair.clone(),
                    odds,
                    stake,
                    expected_return: stake * odds,
                    expected_profit: self.profits.get(pair).copied().unwrap_or(0.0),
                }
            })
            .collect();

        bets.sort_by_key(|b| parse_pair_key(&b.pair).unwrap_or((u32::MAX, u32::MAX)));
        bets
    }
}

/// Resolve the quoted odds for a banker/partner pair
///
/// The quinella market is unordered, so the pair may be quoted under
/// either key ordering. Returns the key it was found under together with
/// the odd, or `None` when the combination has no quote at all.
pub fn resolve_pair(banker: u32, other: u32, odds: &HashMap<String, f64>) -> Option<(String, f64)> {
    let key = format!("{}-{}", banker, other);
    if let Some(&v) = odds.get(&key) {
        return Some((key, v));
    }

    let rev = format!("{}-{}", other, banker);
    odds.get(&rev).map(|&v| (rev, v))
}

/// Allocate a total stake across banker quinella pairs for equal profit
///
/// Partners with no quoted combination are skipped; a horse simply may
/// not have a market against the banker. A partner equal to the banker
/// resolves nothing, since no self-pair is ever quoted. When nothing
/// resolves, the empty allocation is returned.
pub fn dutch_banker_quinella(
    banker: u32,
    others: &[u32],
    odds: &HashMap<String, f64>,
    total_stake: f64,
) -> DutchingAllocation {
    let mut valid_pairs: HashMap<String, f64> = HashMap::new();
    for &other in others {
        if other == banker {
            continue;
        }
        if let Some((key, v)) = resolve_pair(banker, other, odds) {
            valid_pairs.insert(key, v);
        }
    }

    if valid_pairs.is_empty() {
        return DutchingAllocation::default();
    }

    // Odds table values are strictly positive, so inverse_sum > 0
    let inverse_sum: f64 = valid_pairs.values().map(|v| 1.0 / v).sum();

    let stakes: HashMap<String, f64> = valid_pairs
        .iter()
        .map(|(pair, &v)| (pair.clone(), total_stake / (v * inverse_sum)))
        .collect();

    let profits: HashMap<String, f64> = valid_pairs
        .iter()
        .map(|(pair, &v)| (pair.clone(), stakes[pair] * v - total_stake))
        .collect();

    DutchingAllocation {
        pairs: valid_pairs,
        stakes,
        profits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn odds(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_two_pair_allocation() {
        let odds = odds(&[("1-2", 5.0), ("1-3", 10.0)]);
        let alloc = dutch_banker_quinella(1, &[2, 3], &odds, 100.0);

        // inverse_sum = 1/5 + 1/10 = 0.3
        assert!((alloc.stakes["1-2"] - 100.0 / (5.0 * 0.3)).abs() < EPS);
        assert!((alloc.stakes["1-3"] - 100.0 / (10.0 * 0.3)).abs() < EPS);
        assert!((alloc.stakes["1-2"] - 66.6666666).abs() < 1e-4);
        assert!((alloc.stakes["1-3"] - 33.3333333).abs() < 1e-4);

        // Either winning pair returns 100 / 0.3 = 333.33 for the same profit
        assert!((alloc.profits["1-2"] - 233.3333333).abs() < 1e-4);
        assert!((alloc.profits["1-3"] - 233.3333333).abs() < 1e-4);
    }

    #[test]
    fn test_equal_profit_invariant() {
        let odds = odds(&[
            ("4-7", 3.2),
            ("2-4", 11.0),
            ("4-9", 54.5),
            ("4-12", 7.8),
            ("1-4", 101.0),
        ]);
        let alloc = dutch_banker_quinella(4, &[7, 2, 9, 12, 1], &odds, 250.0);

        assert_eq!(alloc.pairs.len(), 5);
        let profits: Vec<f64> = alloc.profits.values().copied().collect();
        for p in &profits {
            assert!((p - profits[0]).abs() < EPS);
        }
    }

    #[test]
    fn test_stake_conservation() {
        let odds = odds(&[("1-2", 5.0), ("1-3", 10.0), ("1-4", 4.4)]);
        let alloc = dutch_banker_quinella(1, &[2, 3, 4], &odds, 1000.0);

        let total: f64 = alloc.stakes.values().sum();
        assert!((total - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_resolve_pair_order_independence() {
        let odds = odds(&[("3-5", 12.0)]);

        let from_banker_3 = resolve_pair(3, 5, &odds);
        let from_banker_5 = resolve_pair(5, 3, &odds);

        assert_eq!(from_banker_3, Some(("3-5".to_string(), 12.0)));
        assert_eq!(from_banker_5, Some(("3-5".to_string(), 12.0)));
    }

    #[test]
    fn test_reversed_key_resolves() {
        // Odds stored under the reversed ordering only
        let odds = odds(&[("2-1", 4.0)]);
        let alloc = dutch_banker_quinella(1, &[2], &odds, 100.0);

        assert_eq!(alloc.pairs.len(), 1);
        assert!((alloc.stakes["2-1"] - 100.0).abs() < EPS);
        assert!((alloc.profits["2-1"] - 300.0).abs() < EPS);
    }

    #[test]
    fn test_unquoted_partner_skipped() {
        let odds = odds(&[("1-2", 5.0)]);
        let alloc = dutch_banker_quinella(1, &[2, 8], &odds, 100.0);

        // Horse 8 has no quoted combination with the banker; the single
        // resolved pair takes the whole stake.
        assert_eq!(alloc.pairs.len(), 1);
        assert!((alloc.stakes["1-2"] - 100.0).abs() < EPS);
    }

    #[test]
    fn test_empty_others() {
        let odds = odds(&[("1-2", 5.0)]);
        let alloc = dutch_banker_quinella(1, &[], &odds, 100.0);

        assert!(alloc.is_empty());
        assert!(alloc.pairs.is_empty());
        assert!(alloc.stakes.is_empty());
        assert!(alloc.profits.is_empty());
    }

    #[test]
    fn test_empty_odds_table() {
        let alloc = dutch_banker_quinella(1, &[2, 3], &HashMap::new(), 100.0);
        assert!(alloc.is_empty());
        assert_eq!(alloc.expected_profit(), None);
    }

    #[test]
    fn test_banker_in_others_is_ignored() {
        let odds = odds(&[("1-2", 5.0)]);
        let alloc = dutch_banker_quinella(1, &[1, 2], &odds, 100.0);

        assert_eq!(alloc.pairs.len(), 1);
        assert!(alloc.pairs.contains_key("1-2"));
    }

    #[test]
    fn test_zero_stake_degenerates_to_zero() {
        let odds = odds(&[("1-2", 5.0), ("1-3", 10.0)]);
        let alloc = dutch_banker_quinella(1, &[2, 3], &odds, 0.0);

        assert_eq!(alloc.pairs.len(), 2);
        for stake in alloc.stakes.values() {
            assert!(stake.abs() < EPS);
        }
        for profit in alloc.profits.values() {
            assert!(profit.abs() < EPS);
        }
    }

    #[test]
    fn test_expected_profit_and_roi() {
        let odds = odds(&[("1-2", 5.0), ("1-3", 10.0)]);
        let alloc = dutch_banker_quinella(1, &[2, 3], &odds, 100.0);

        let profit = alloc.expected_profit().unwrap();
        assert!((profit - 233.3333333).abs() < 1e-4);

        let roi = alloc.roi(100.0).unwrap();
        assert!((roi - 2.3333333).abs() < 1e-4);

        assert_eq!(alloc.roi(0.0), None);
    }

    #[test]
    fn test_bets_rows_sorted() {
        let odds = odds(&[("1-12", 8.0), ("1-2", 5.0), ("1-3", 10.0)]);
        let alloc = dutch_banker_quinella(1, &[12, 2, 3], &odds, 100.0);

        let bets = alloc.bets();
        let pairs: Vec<&str> = bets.iter().map(|b| b.pair.as_str()).collect();
        assert_eq!(pairs, vec!["1-2", "1-3", "1-12"]);

        for bet in &bets {
            assert!((bet.expected_return - bet.stake * bet.odds).abs() < EPS);
            assert!((bet.expected_profit - (bet.expected_return - 100.0)).abs() < EPS);
        }
    }
}
