use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ErrorResponse;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Invalid request data
    ValidationError(String),
    /// Upstream odds feed failure
    FetchFailed(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
            AppError::FetchFailed(msg) => ("fetch_failed", msg.clone()),
            AppError::InternalError(msg) => ("internal_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

/// Validation functions
pub fn validate_race_no(race_no: u8) -> Result<(), AppError> {
    if !(1..=12).contains(&race_no) {
        return Err(AppError::ValidationError(format!(
            "Race number must be between 1 and 12, got {}",
            race_no
        )));
    }
    Ok(())
}

pub fn validate_stake(stake: f64) -> Result<(), AppError> {
    if !stake.is_finite() || stake < 0.0 {
        return Err(AppError::ValidationError(format!(
            "Total stake must be non-negative, got {}",
            stake
        )));
    }
    Ok(())
}

pub fn validate_horse_no(horse_no: u32) -> Result<(), AppError> {
    if horse_no == 0 {
        return Err(AppError::ValidationError(
            "Horse number must be positive".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_banker_selection(banker: u32, others: &[u32]) -> Result<(), AppError> {
    validate_horse_no(banker)?;
    for &other in others {
        validate_horse_no(other)?;
    }
    if others.contains(&banker) {
        return Err(AppError::ValidationError(format!(
            "Banker horse {} must not appear among the paired horses",
            banker
        )));
    }
    Ok(())
}
