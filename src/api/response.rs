//! Response envelopes and HTTP error mapping
//!
//! Statement kinds (BOL) and document kinds (GEC) answer with different
//! success envelopes. Persistence failures differ too: document kinds report
//! `Failed to save data.`, statement kinds fall through to the bare
//! `Server Error` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::error::{BatchErrors, IntakeError};
use crate::models::PersistedRecord;
use crate::services::IntakeOutcome;

pub const SAVED_MESSAGE: &str = "All data saved successfully.";

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub success: bool,
    pub data: Vec<PersistedRecord>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub success: bool,
    pub count_req: usize,
    pub count_output: usize,
    pub data: Vec<PersistedRecord>,
}

/// Success body for a stored batch, shaped by its kind
#[derive(Debug)]
pub enum IntakeResponse {
    Statement(StatementResponse),
    Document(DocumentResponse),
}

impl From<IntakeOutcome> for IntakeResponse {
    fn from(outcome: IntakeOutcome) -> Self {
        if outcome.kind.is_statement() {
            IntakeResponse::Statement(StatementResponse {
                success: true,
                data: outcome.records,
                message: SAVED_MESSAGE,
            })
        } else {
            IntakeResponse::Document(DocumentResponse {
                success: true,
                count_req: outcome.requested,
                count_output: outcome.records.len(),
                data: outcome.records,
            })
        }
    }
}

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        match self {
            IntakeResponse::Statement(body) => (StatusCode::OK, Json(body)).into_response(),
            IntakeResponse::Document(body) => (StatusCode::OK, Json(body)).into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(BatchErrors),

    /// Document-kind persistence failure
    #[error("Failed to save data.")]
    SaveFailed,

    /// Statement-kind persistence failure
    #[error("Server Error")]
    ServerError,

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthenticated.")]
    Unauthorized,
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::InvalidPayload(reason) => ApiError::BadRequest(reason),
            IntakeError::Validation(errors) => ApiError::Validation(errors),
            IntakeError::Persistence { kind, .. } if kind.is_statement() => ApiError::ServerError,
            IntakeError::Persistence { .. } => ApiError::SaveFailed,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::SaveFailed | ApiError::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn body(&self) -> Value {
        let message = self.to_string();
        match self {
            ApiError::Validation(errors) => json!({
                "success": false,
                "error": message,
                "messages": errors,
            }),
            ApiError::SaveFailed => json!({
                "success": false,
                "error": message,
                "data": [],
            }),
            ApiError::ServerError => json!({ "message": message }),
            ApiError::BadRequest(_) | ApiError::Unauthorized => json!({
                "success": false,
                "error": message,
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
