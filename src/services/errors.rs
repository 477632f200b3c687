use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::form::ExpenseDraft;

pub const FETCH_FAILED: &str = "Could not fetch expenses!";
pub const SAVE_FAILED: &str = "Could not save data - please try again later!";
pub const DELETE_FAILED: &str = "Could not delete expense - please try again later!";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error("invalid input")]
    Invalid(Box<ExpenseDraft>),
    #[error("a fetch is already in progress")]
    Busy,
    #[error("screen dismissed")]
    Dismissed,
    #[error("{0}")]
    Store(&'static str),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Busy => StatusCode::CONFLICT,
            ServiceError::Dismissed => StatusCode::GONE,
            ServiceError::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
