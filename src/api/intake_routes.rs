//! REST API routes for record intake
//!
//! One POST endpoint per record kind under `/public`, all sharing the same
//! handler body: parse the JSON array, run the intake pipeline, wrap the
//! outcome in the kind's envelope.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{ApiError, IntakeResponse};
use super::AppState;
use crate::mapping::MappingMode;
use crate::models::RecordKind;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct IntakeParams {
    /// Overrides the configured mapping mode for this request
    pub strict: Option<bool>,
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn ingest(
    state: &AppState,
    kind: RecordKind,
    params: Result<Query<IntakeParams>, QueryRejection>,
    body: Bytes,
) -> Result<IntakeResponse, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mode = params
        .strict
        .map(MappingMode::from_flag)
        .unwrap_or(state.default_mode);

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Request body is not valid JSON: {}", e)))?;

    let outcome = state.intake.ingest(kind, &payload, mode).await?;
    Ok(outcome.into())
}

/// POST /public/bol-bs
/// Store balance sheets, upserting on (company_id, year)
async fn ingest_balance_sheets(
    State(state): State<AppState>,
    params: Result<Query<IntakeParams>, QueryRejection>,
    body: Bytes,
) -> Result<IntakeResponse, ApiError> {
    ingest(&state, RecordKind::BalanceSheet, params, body).await
}

/// POST /public/bol-ic
/// Store income statements, upserting on (company_id, year)
async fn ingest_income_statements(
    State(state): State<AppState>,
    params: Result<Query<IntakeParams>, QueryRejection>,
    body: Bytes,
) -> Result<IntakeResponse, ApiError> {
    ingest(&state, RecordKind::IncomeStatement, params, body).await
}

/// POST /public/gec-po
async fn ingest_purchase_orders(
    State(state): State<AppState>,
    params: Result<Query<IntakeParams>, QueryRejection>,
    body: Bytes,
) -> Result<IntakeResponse, ApiError> {
    ingest(&state, RecordKind::PurchaseOrder, params, body).await
}

/// POST /public/gec-inv
async fn ingest_invoices(
    State(state): State<AppState>,
    params: Result<Query<IntakeParams>, QueryRejection>,
    body: Bytes,
) -> Result<IntakeResponse, ApiError> {
    ingest(&state, RecordKind::Invoice, params, body).await
}

/// GET /ping
pub async fn ping() -> Json<Value> {
    Json(json!({"message": "API is working!", "status": "ok"}))
}

// ============================================================================
// Router
// ============================================================================

pub fn create_intake_router() -> Router<AppState> {
    Router::new()
        .route("/public/bol-bs", post(ingest_balance_sheets))
        .route("/public/bol-ic", post(ingest_income_statements))
        .route("/public/gec-po", post(ingest_purchase_orders))
        .route("/public/gec-inv", post(ingest_invoices))
}
