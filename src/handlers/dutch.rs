use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::warn;

use crate::AppState;
use quindutch::core::dutching::dutch_banker_quinella;
use quindutch::error::{validate_banker_selection, validate_race_no, validate_stake, AppError};
use quindutch::models::{DutchRequest, DutchResponse};

/// Compute an equal-profit dutching allocation for a race
///
/// Odds are fetched fresh on every request. Fetch failures and races
/// with no resolvable pair both come back as HTTP 200 with empty bets;
/// only invalid input is a client error.
pub async fn dutch_race(
    state: web::Data<Arc<AppState>>,
    req: web::Json<DutchRequest>,
) -> Result<HttpResponse, AppError> {
    validate_race_no(req.race_no)?;
    validate_stake(req.total_stake)?;
    validate_banker_selection(req.banker, &req.others)?;

    let (odds, status, notice) = match state.client.fetch_quinella(req.race_no).await {
        Ok(snapshot) => (snapshot.quinella, "ok".to_string(), None),
        Err(e) if e.is_no_data() => (
            Default::default(),
            "no_data".to_string(),
            Some(format!("No quinella odds available for race {}", req.race_no)),
        ),
        Err(e) => {
            warn!("Odds fetch for race {} failed: {}", req.race_no, e);
            (
                Default::default(),
                "fetch_failed".to_string(),
                Some(e.to_string()),
            )
        }
    };

    let allocation = dutch_banker_quinella(req.banker, &req.others, &odds, req.total_stake);

    let (status, notice) = if allocation.is_empty() && status == "ok" {
        (
            "no_data".to_string(),
            Some("No quoted quinella combination for the selected horses".to_string()),
        )
    } else {
        (status, notice)
    };

    let response = DutchResponse {
        race_no: req.race_no,
        status,
        notice,
        total_stake: req.total_stake,
        expected_profit: allocation.expected_profit(),
        roi: allocation.roi(req.total_stake),
        bets: allocation.bets(),
    };

    Ok(HttpResponse::Ok().json(response))
}
