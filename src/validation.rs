//! Record validation against a kind's field schema
//!
//! Every field of the schema is checked independently and all failures of a
//! record are collected before returning. Values that pass are converted to
//! typed [`FieldValue`]s; raw JSON does not leave this module.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::FieldErrors;
use crate::mapping::{MappedRecord, MappingMode};
use crate::models::{FieldSpec, FieldType, FieldValue, Presence, RecordKind, ValidatedRecord};

/// Error key used when an array element is not an object
pub const RECORD_FIELD: &str = "_record";

#[derive(Debug, Clone, Copy)]
pub struct RecordValidator {
    kind: RecordKind,
}

impl RecordValidator {
    pub fn new(kind: RecordKind) -> Self {
        Self { kind }
    }

    /// Validate mapped fields against the schema
    pub fn validate(
        &self,
        fields: &HashMap<&'static str, Value>,
    ) -> Result<ValidatedRecord, FieldErrors> {
        let mut record = ValidatedRecord::new(self.kind);
        let mut errors = FieldErrors::new();

        for field in self.kind.schema().fields {
            match check_field(field, fields.get(field.column)) {
                Ok(Some(value)) => {
                    record.values.insert(field.column, value);
                }
                Ok(None) => {}
                Err(message) => errors.add(field.column, message),
            }
        }

        errors.into_result(record)
    }

    /// Validate a mapper result; in strict mode unmapped keys fail too
    pub fn validate_mapped(
        &self,
        mapped: &MappedRecord,
        mode: MappingMode,
    ) -> Result<ValidatedRecord, FieldErrors> {
        let result = self.validate(&mapped.fields);
        if mode == MappingMode::Lenient || mapped.unmapped.is_empty() {
            return result;
        }

        let mut errors = result.err().unwrap_or_default();
        for key in &mapped.unmapped {
            errors.add(key.as_str(), format!("The {} field is not recognized.", key));
        }
        Err(errors)
    }

    /// Errors reported for an array element that is not a JSON object
    pub fn not_an_object() -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.add(RECORD_FIELD, "The record must be a JSON object.");
        errors
    }
}

fn check_field(field: &FieldSpec, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    let attribute = field.column.replace('_', " ");

    let Some(value) = present(raw) else {
        return match field.rule.presence {
            Presence::Required => Err(format!("The {} field is required.", attribute)),
            Presence::Nullable => Ok(None),
        };
    };

    let coerced = match field.rule.field_type {
        FieldType::String => value
            .as_str()
            .map(|s| FieldValue::Text(s.trim().to_string()))
            .ok_or("must be a string"),
        FieldType::Integer => coerce_integer(value)
            .map(FieldValue::Integer)
            .ok_or("must be an integer"),
        FieldType::Numeric => coerce_numeric(value).map(FieldValue::Numeric),
        FieldType::Date => value
            .as_str()
            .and_then(parse_date)
            .map(FieldValue::Date)
            .ok_or("must be a valid date"),
    };

    coerced
        .map(Some)
        .map_err(|reason| format!("The {} field {}.", attribute, reason))
}

/// Null, missing and blank strings all count as absent
fn present(raw: Option<&Value>) -> Option<&Value> {
    match raw? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Numbers beyond `Decimal`'s range fail as out of range, not as non-numeric
fn coerce_numeric(value: &Value) -> Result<Decimal, &'static str> {
    let (text, numeric) = match value {
        Value::Number(n) => (n.to_string(), true),
        Value::String(s) => {
            let text = s.trim().to_string();
            let numeric = looks_numeric(&text);
            (text, numeric)
        }
        _ => return Err("must be a number"),
    };

    match parse_decimal(&text) {
        Some(decimal) => Ok(decimal),
        None if numeric => Err("is out of range"),
        None => Err("must be a number"),
    }
}

fn looks_numeric(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && text.parse::<f64>().is_ok()
}

pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}
