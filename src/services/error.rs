use crate::{ApiError, ErrorDetail};
use rocket::serde::json::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InternalError(String),
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(detail) => {
                ApiError::BadRequest(Json(ErrorDetail { error: detail }))
            }
            ServiceError::NotFound(detail) => {
                ApiError::NotFound(Json(ErrorDetail { error: detail }))
            }
            // Persistence failures keep their detail in the server log and
            // answer with a generic body.
            ServiceError::InternalError(detail) => {
                log::error!("Internal error: {detail}");
                ApiError::InternalError(Json(ErrorDetail {
                    error: "Internal server error".to_string(),
                }))
            }
            ServiceError::Database(e) => {
                log::error!("Database error: {e}");
                ApiError::InternalError(Json(ErrorDetail {
                    error: "Internal server error".to_string(),
                }))
            }
        }
    }
}
