//! HTTP-level tests for the intake API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` on top of
//! the in-memory record store, so no database is required.

#![cfg(feature = "server")]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use smf_api::api::{create_router, AppState};
use smf_api::config::AppConfig;
use smf_api::models::{PersistedRecord, RecordKey, RecordKind, ValidatedRecord};
use smf_api::repository::{InMemoryRecordRepository, RecordRepository};

const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

// ── Test app builders ──────────────────────────────────────────

fn build_app_with(config: AppConfig) -> (Router, Arc<InMemoryRecordRepository>) {
    let repo = Arc::new(InMemoryRecordRepository::new());
    let state = AppState::new(repo.clone(), &config);
    (create_router(state, &config), repo)
}

fn build_app() -> (Router, Arc<InMemoryRecordRepository>) {
    build_app_with(AppConfig::default())
}

/// Store whose writes always fail
struct BrokenRepository;

#[async_trait]
impl RecordRepository for BrokenRepository {
    async fn find_by_key(
        &self,
        _kind: RecordKind,
        _key: &RecordKey,
    ) -> anyhow::Result<Option<PersistedRecord>> {
        Ok(None)
    }

    async fn insert(&self, _record: &ValidatedRecord) -> anyhow::Result<PersistedRecord> {
        anyhow::bail!("relation does not exist")
    }

    async fn upsert(&self, _record: &ValidatedRecord) -> anyhow::Result<PersistedRecord> {
        anyhow::bail!("relation does not exist")
    }

    async fn count(&self, _kind: RecordKind) -> anyhow::Result<i64> {
        Ok(0)
    }
}

fn make_jwt(sub: &str) -> String {
    let claims = json!({
        "sub": sub,
        "exp": chrono::Utc::now().timestamp() + 3600,
        "email": "ops@example.com",
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode test JWT")
}

// ── Helpers ────────────────────────────────────────────────────

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(
        |_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    );
    (status, body)
}

async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

// ── Statement kinds ────────────────────────────────────────────

#[tokio::test]
async fn test_balance_sheet_is_stored_and_updated_in_place() {
    let (app, repo) = build_app();

    let (status, body) = post(
        &app,
        "/public/bol-bs",
        json!([{"company_id": "C1", "year": 2023, "Assets": 1000}]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("All data saved successfully."));
    let row = &body["data"][0];
    assert_eq!(row["company_id"], json!("C1"));
    assert_eq!(row["year"], json!(2023));
    assert_eq!(row["assets"], json!(1000));
    assert_eq!(row["total_liabilities"], json!(null));
    let id = row["id"].clone();
    let created_at = row["created_at"].clone();

    let (status, body) = post(
        &app,
        "/public/bol-bs",
        json!([{"company_id": "C1", "year": 2023, "Assets": 1500, "Total Liabilities": "20.5"}]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["data"][0];
    assert_eq!(row["id"], id);
    assert_eq!(row["created_at"], created_at);
    assert_eq!(row["assets"], json!(1500));
    assert_eq!(row["total_liabilities"], json!(20.5));
    assert_eq!(repo.count(RecordKind::BalanceSheet).await.unwrap(), 1);
}

#[tokio::test]
async fn test_identical_submission_is_idempotent() {
    let (app, repo) = build_app();
    let payload = json!([{"company_id": "C1", "company_name": "Acme", "year": 2023, "Assets": 1000}]);

    let (_, first) = post(&app, "/public/bol-bs", payload.clone()).await;
    let (_, second) = post(&app, "/public/bol-bs", payload).await;

    assert_eq!(first["data"][0]["id"], second["data"][0]["id"]);
    assert_eq!(first["data"][0]["assets"], second["data"][0]["assets"]);
    assert_eq!(first["data"][0]["company_name"], json!("Acme"));
    assert_eq!(repo.count(RecordKind::BalanceSheet).await.unwrap(), 1);
}

#[tokio::test]
async fn test_years_are_distinct_rows() {
    let (app, repo) = build_app();

    let (status, body) = post(
        &app,
        "/public/bol-ic",
        json!([
            {"company_id": "C1", "year": 2022, "Total revenues": 10},
            {"company_id": "C1", "year": 2023, "Total revenues": 12},
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_ne!(body["data"][0]["id"], body["data"][1]["id"]);
    assert_eq!(body["data"][1]["total_revenues"], json!(12));
    assert_eq!(repo.count(RecordKind::IncomeStatement).await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_key_fields_fail_validation() {
    let (app, repo) = build_app();

    let (status, body) = post(&app, "/public/bol-bs", json!([{"Assets": 1000}])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Validation failed",
            "messages": {"0": {
                "company_id": ["The company id field is required."],
                "year": ["The year field is required."],
            }}
        })
    );
    assert_eq!(repo.count(RecordKind::BalanceSheet).await.unwrap(), 0);
}

#[tokio::test]
async fn test_statement_batch_stops_at_first_invalid_record() {
    let (app, repo) = build_app();

    let (status, body) = post(
        &app,
        "/public/bol-ic",
        json!([
            {"company_id": "C1", "year": 2023},
            {"company_id": "C2", "year": "next year"},
            {"company_id": "C3"},
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let messages = body["messages"].as_object().unwrap();
    assert_eq!(messages.keys().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(
        body["messages"]["1"]["year"],
        json!(["The year field must be an integer."])
    );
    assert_eq!(repo.count(RecordKind::IncomeStatement).await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_numeric_amount_fails() {
    let (app, _) = build_app();

    let (status, body) = post(
        &app,
        "/public/bol-bs",
        json!([{"company_id": "C1", "year": 2023, "Total assets": "a lot"}]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["messages"]["0"]["total_assets"],
        json!(["The total assets field must be a number."])
    );
}

// ── Document kinds ─────────────────────────────────────────────

#[tokio::test]
async fn test_purchase_order_validation_failure() {
    let (app, repo) = build_app();

    let (status, body) = post(
        &app,
        "/public/gec-po",
        json!([{"po_no": "PO1", "amount_excl_vat": "not-a-number"}]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Validation failed",
            "messages": {"0": {"amount_excl_vat": ["The amount excl vat field must be a number."]}}
        })
    );
    assert_eq!(repo.count(RecordKind::PurchaseOrder).await.unwrap(), 0);
}

#[tokio::test]
async fn test_purchase_orders_are_inserted() {
    let (app, _) = build_app();
    let payload = json!([
        {"po_no": "PO1", "po_date": "2024-01-15", "amount_excl_vat": 100, "vat_amount": 7, "amount_incl_vat": 107},
        {"po_no": "PO2", "supplier_name": "Widgets Co", "ignored_field": true},
    ]);

    let (status, body) = post(&app, "/public/gec-po", payload.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count_req"], json!(2));
    assert_eq!(body["count_output"], json!(2));
    assert_eq!(body["data"][0]["po_date"], json!("2024-01-15"));
    assert_eq!(body["data"][0]["amount_incl_vat"], json!(107));
    assert_eq!(body["data"][1]["supplier_name"], json!("Widgets Co"));
    assert!(body["data"][1].get("ignored_field").is_none());

    // no natural key: resubmitting creates new rows
    let (_, again) = post(&app, "/public/gec-po", payload).await;
    assert_ne!(again["data"][0]["id"], body["data"][0]["id"]);
}

#[tokio::test]
async fn test_invoice_batch_reports_every_invalid_record() {
    let (app, repo) = build_app();

    let (status, body) = post(
        &app,
        "/public/gec-inv",
        json!([
            {"invoice_no": "INV-1", "invoice_date": "31/01/2024"},
            {"invoice_no": "INV-2"},
            {"invoice_no": "INV-3", "vat_amount": "seven"},
            42,
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let messages = body["messages"].as_object().unwrap();
    assert_eq!(messages.keys().collect::<Vec<_>>(), vec!["0", "2", "3"]);
    assert_eq!(
        body["messages"]["0"]["invoice_date"],
        json!(["The invoice date field must be a valid date."])
    );
    assert_eq!(
        body["messages"]["3"]["_record"],
        json!(["The record must be a JSON object."])
    );
    assert_eq!(repo.count(RecordKind::Invoice).await.unwrap(), 0);
}

// ── Mapping modes ──────────────────────────────────────────────

#[tokio::test]
async fn test_strict_query_reports_unknown_labels() {
    let (app, _) = build_app();
    let payload = json!([{"company_id": "C1", "year": 2023, "assets": 1000}]);

    let (status, _) = post(&app, "/public/bol-bs", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/public/bol-bs?strict=true", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["messages"]["0"]["assets"],
        json!(["The assets field is not recognized."])
    );
}

#[tokio::test]
async fn test_strict_default_can_be_relaxed_per_request() {
    let (app, _) = build_app_with(AppConfig {
        strict_mapping: true,
        ..AppConfig::default()
    });
    let payload = json!([{"po_no": "PO1", "po_number": "PO1"}]);

    let (status, _) = post(&app, "/public/gec-po", payload.clone()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/public/gec-po?strict=false", payload).await;
    assert_eq!(status, StatusCode::OK);
}

// ── Bad requests ───────────────────────────────────────────────

#[tokio::test]
async fn test_non_array_body_is_bad_request() {
    let (app, _) = build_app();

    let (status, body) = post(&app, "/public/bol-bs", json!({"company_id": "C1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["error"],
        json!("Request body must be a JSON array of records.")
    );

    let (status, body) = post_raw(&app, "/public/gec-inv", "[{".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_invalid_strict_flag_is_bad_request() {
    let (app, _) = build_app();
    let (status, body) = post(&app, "/public/gec-po?strict=perhaps", json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

// ── Persistence failures ───────────────────────────────────────

#[tokio::test]
async fn test_persistence_failure_envelopes() {
    let config = AppConfig::default();
    let app = create_router(AppState::new(Arc::new(BrokenRepository), &config), &config);

    let (status, body) = post(
        &app,
        "/public/gec-po",
        json!([{"po_no": "PO1"}]),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to save data.", "data": []})
    );

    let (status, body) = post(
        &app,
        "/public/bol-bs",
        json!([{"company_id": "C1", "year": 2023}]),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Server Error"}));
}

// ── Ping, prefix and auth ──────────────────────────────────────

#[tokio::test]
async fn test_ping() {
    let (app, _) = build_app();
    let (status, body) = get(&app, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "API is working!", "status": "ok"}));
}

#[tokio::test]
async fn test_route_prefix() {
    let (app, repo) = build_app_with(AppConfig {
        route_prefix: "/api".to_string(),
        ..AppConfig::default()
    });

    let (status, _) = get(&app, "/api/ping", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/ping", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/api/public/bol-bs",
        json!([{"company_id": "C1", "year": 2023}]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.count(RecordKind::BalanceSheet).await.unwrap(), 1);
}

#[tokio::test]
async fn test_user_requires_configured_secret() {
    let (app, _) = build_app();
    let (status, body) = get(&app, "/user", Some(&make_jwt("7"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "error": "Unauthenticated."}));
}

#[tokio::test]
async fn test_user_returns_verified_claims() {
    let (app, _) = build_app_with(AppConfig {
        jwt_secret: Some(TEST_JWT_SECRET.to_string()),
        ..AppConfig::default()
    });

    let (status, _) = get(&app, "/user", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/user", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&app, "/user", Some(&make_jwt("7"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], json!("7"));
    assert_eq!(body["email"], json!("ops@example.com"));

    // public routes stay open
    let (status, _) = post(&app, "/public/gec-inv", json!([])).await;
    assert_eq!(status, StatusCode::OK);
}
