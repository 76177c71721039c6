use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::RivalryError;
use crate::rivalry::{RivalryService, ScoringService};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub rivalry_service: Arc<RivalryService>,
    pub scoring_service: Arc<ScoringService>,
}

impl AppState {
    pub fn new(rivalry_service: Arc<RivalryService>) -> Self {
        let scoring_service = Arc::new(ScoringService::new(Arc::clone(&rivalry_service)));
        Self {
            rivalry_service,
            scoring_service,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<RivalryError> for AppError {
    fn from(err: RivalryError) -> Self {
        match err {
            RivalryError::Validation(msg) => AppError::BadRequest(msg),
            RivalryError::NotFound(msg) => AppError::NotFound(msg),
            RivalryError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
