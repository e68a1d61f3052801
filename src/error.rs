//! Error handling for the intake pipeline
//!
//! Validation failures are collected per record and per field so they can be
//! reported together; persistence failures carry the index of the record that
//! could not be written.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::models::RecordKind;

/// Main error type for one intake request
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Validation failed for {} record(s)", .0.len())]
    Validation(BatchErrors),

    #[error("Failed to persist {kind} record {index}: {source:#}")]
    Persistence {
        kind: RecordKind,
        index: usize,
        #[source]
        source: anyhow::Error,
    },
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Field name to messages for one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// Record index to field errors for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchErrors(BTreeMap<usize, FieldErrors>);

impl BatchErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, errors: FieldErrors) {
        self.0.insert(index, errors);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&FieldErrors> {
        self.0.get(&index)
    }

    pub fn indexes(&self) -> Vec<usize> {
        self.0.keys().copied().collect()
    }
}
