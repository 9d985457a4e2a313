//! Errors surfaced to API clients.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use campus_safety_ledger::LedgerError;
use campus_safety_server_models::ApiErrorBody;
use thiserror::Error;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A `location` field is neither a known location ID nor a valid
    /// `{lat, lng}` pair.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The body could not be read as the expected JSON shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A ledger lookup failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidLocation(_) | Self::MissingField(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Ledger(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::warn!("Rejected request: {self}");
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.to_string(),
        })
    }
}
