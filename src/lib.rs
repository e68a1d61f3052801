//! SMF API - financial statement and trade document intake
//!
//! Accepts batches of balance sheets, income statements, purchase orders and
//! invoices as JSON arrays, maps human-readable field labels to canonical
//! columns, validates every record against its kind's schema and stores it.
//!
//! ## Pipeline
//! JSON array -> FieldMapper -> RecordValidator -> RecordRepository
//!
//! Statement kinds upsert on `(company_id, year)`; document kinds always insert.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use smf_api::mapping::MappingMode;
//! use smf_api::models::RecordKind;
//! use smf_api::repository::InMemoryRecordRepository;
//! use smf_api::services::IntakeService;
//!
//! # async fn run() -> Result<(), smf_api::error::IntakeError> {
//! let service = IntakeService::new(Arc::new(InMemoryRecordRepository::new()));
//! let payload = serde_json::json!([{"company_id": "C1", "year": 2023, "Assets": 1000}]);
//! let outcome = service
//!     .ingest(RecordKind::BalanceSheet, &payload, MappingMode::Lenient)
//!     .await?;
//! assert_eq!(outcome.records.len(), 1);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Record kinds, field tables and typed values
pub mod models;

// Field mapping and validation
pub mod mapping;
pub mod validation;

// Storage seam and in-memory store
pub mod repository;

pub mod services;

pub mod config;

// Database integration (when enabled)
#[cfg(feature = "database")]
pub mod database;

// REST API (when enabled)
#[cfg(feature = "server")]
pub mod api;

pub use error::{IntakeError, IntakeResult};
pub use models::RecordKind;
