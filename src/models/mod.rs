//! Domain models for the statement intake pipeline

pub mod record;
pub mod schema;
pub mod tables;

pub use record::{FieldValue, PersistedRecord, RecordKey, ValidatedRecord};
pub use schema::{BatchPolicy, FieldRule, FieldSpec, FieldType, Presence, RecordKind, RecordSchema};
