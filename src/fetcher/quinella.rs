//! Quinella (連贏) odds JSON parser
//!
//! The feed nests the odds list under `data.quin.raceOddsList`; each
//! entry carries two horse numbers and the decimal odd:
//!
//! ```json
//! {"data": {"quin": {"raceOddsList": [
//!     {"horseNo1": 1, "horseNo2": 2, "value": 5.0}
//! ]}}}
//! ```

use super::FetchError;
use crate::models::pair_key;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct RaceOddsBody {
    data: Option<RaceOddsData>,
}

#[derive(Debug, Deserialize)]
struct RaceOddsData {
    quin: Option<QuinSection>,
}

#[derive(Debug, Deserialize)]
struct QuinSection {
    #[serde(rename = "raceOddsList", default)]
    race_odds_list: Vec<RawOddsEntry>,
}

#[derive(Debug, Deserialize)]
struct RawOddsEntry {
    #[serde(rename = "horseNo1")]
    horse_no1: Option<u32>,
    #[serde(rename = "horseNo2")]
    horse_no2: Option<u32>,
    value: Option<f64>,
}

/// Parse quinella odds from a raceOdds response body
///
/// Entries with a missing horse number or a non-positive value are
/// dropped. Keys are canonicalized to ascending order, so "5-3" in the
/// feed lands under "3-5". A missing `data` or `quin` section parses as
/// an empty map; only a malformed body is an error.
pub fn parse_quinella_odds(body: &str) -> Result<HashMap<String, f64>, FetchError> {
    let parsed: RaceOddsBody =
        serde_json::from_str(body).map_err(|e| FetchError::DecodeFailed(e.to_string()))?;

    let entries = parsed
        .data
        .and_then(|d| d.quin)
        .map(|q| q.race_odds_list)
        .unwrap_or_default();

    let mut odds: HashMap<String, f64> = HashMap::new();
    for entry in entries {
        let (Some(h1), Some(h2)) = (entry.horse_no1, entry.horse_no2) else {
            continue;
        };
        if h1 == h2 {
            continue;
        }
        match entry.value {
            Some(v) if v > 0.0 => {
                odds.insert(pair_key(h1, h2), v);
            }
            _ => {}
        }
    }

    Ok(odds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominal_body() {
        let body = r#"{
            "data": {
                "quin": {
                    "raceOddsList": [
                        {"horseNo1": 1, "horseNo2": 2, "value": 5.0},
                        {"horseNo1": 1, "horseNo2": 3, "value": 10.0},
                        {"horseNo1": 2, "horseNo2": 3, "value": 27.5}
                    ]
                }
            }
        }"#;

        let odds = parse_quinella_odds(body).unwrap();
        assert_eq!(odds.len(), 3);
        assert!((odds["1-2"] - 5.0).abs() < 1e-9);
        assert!((odds["1-3"] - 10.0).abs() < 1e-9);
        assert!((odds["2-3"] - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_canonicalizes_reversed_keys() {
        let body = r#"{
            "data": {"quin": {"raceOddsList": [
                {"horseNo1": 5, "horseNo2": 3, "value": 12.0}
            ]}}
        }"#;

        let odds = parse_quinella_odds(body).unwrap();
        assert_eq!(odds.get("3-5"), Some(&12.0));
        assert_eq!(odds.get("5-3"), None);
    }

    #[test]
    fn test_parse_drops_invalid_entries() {
        let body = r#"{
            "data": {"quin": {"raceOddsList": [
                {"horseNo1": 1, "horseNo2": 2, "value": 5.0},
                {"horseNo1": 1, "horseNo2": 3, "value": 0.0},
                {"horseNo1": 1, "horseNo2": 4, "value": -2.5},
                {"horseNo1": 1, "horseNo2": 5, "value": null},
                {"horseNo1": 1, "horseNo2": 6},
                {"horseNo1": null, "horseNo2": 7, "value": 8.0},
                {"horseNo2": 8, "value": 9.0},
                {"horseNo1": 9, "horseNo2": 9, "value": 4.0}
            ]}}
        }"#;

        let odds = parse_quinella_odds(body).unwrap();
        assert_eq!(odds.len(), 1);
        assert!(odds.contains_key("1-2"));
    }

    #[test]
    fn test_parse_missing_sections() {
        assert!(parse_quinella_odds("{}").unwrap().is_empty());
        assert!(parse_quinella_odds(r#"{"data": null}"#).unwrap().is_empty());
        assert!(parse_quinella_odds(r#"{"data": {}}"#).unwrap().is_empty());
        assert!(parse_quinella_odds(r#"{"data": {"quin": {}}}"#)
            .unwrap()
            .is_empty());
        assert!(
            parse_quinella_odds(r#"{"data": {"quin": {"raceOddsList": []}}}"#)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_quinella_odds("not json at all").unwrap_err();
        assert!(matches!(err, FetchError::DecodeFailed(_)));

        let err = parse_quinella_odds(r#"{"data": {"quin": {"raceOddsList": 42}}}"#).unwrap_err();
        assert!(matches!(err, FetchError::DecodeFailed(_)));
    }
}
