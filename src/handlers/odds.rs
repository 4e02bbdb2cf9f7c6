use actix_web::{web, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::AppState;
use quindutch::error::{validate_race_no, AppError};
use quindutch::models::OddsResponse;

/// Current quinella odds for a race
///
/// Fetch failures do not fail the request; they degrade to an empty
/// odds map with the reason carried in `notice`.
pub async fn race_odds(
    state: web::Data<Arc<AppState>>,
    path: web::Path<u8>,
) -> Result<HttpResponse, AppError> {
    let race_no = path.into_inner();
    validate_race_no(race_no)?;

    let response = match state.client.fetch_quinella(race_no).await {
        Ok(snapshot) => OddsResponse {
            race_no,
            status: "ok".to_string(),
            fetched_at: Some(snapshot.fetched_at),
            notice: None,
            odds: snapshot.quinella,
        },
        Err(e) if e.is_no_data() => OddsResponse {
            race_no,
            status: "no_data".to_string(),
            fetched_at: None,
            notice: Some(format!("No quinella odds available for race {}", race_no)),
            odds: HashMap::new(),
        },
        Err(e) => {
            warn!("Odds fetch for race {} failed: {}", race_no, e);
            OddsResponse {
                race_no,
                status: "fetch_failed".to_string(),
                fetched_at: None,
                notice: Some(e.to_string()),
                odds: HashMap::new(),
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}
