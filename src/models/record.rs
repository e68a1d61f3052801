//! Typed record values produced by validation and returned by the store

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::schema::RecordKind;

/// A single validated column value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Numeric(Decimal),
    Date(NaiveDate),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Numeric(d) => serialize_decimal(d, serializer),
            FieldValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Amounts go out as JSON numbers; integral values without a fractional part
///
/// Fractional amounts are written as the nearest `f64`, so digits past double
/// precision are rounded in the response body. The stored `NUMERIC` value is
/// exact.
fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract().is_zero() {
        if let Some(i) = value.to_i64() {
            return serializer.serialize_i64(i);
        }
    }
    match value.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => serializer.serialize_str(&value.to_string()),
    }
}

/// Values of a record's natural key, in key-column order
#[derive(Debug, Clone, PartialEq)]
pub struct RecordKey(pub Vec<(&'static str, FieldValue)>);

impl RecordKey {
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(column, value)| match value {
                FieldValue::Text(s) => format!("{}={}", column, s),
                FieldValue::Integer(i) => format!("{}={}", column, i),
                FieldValue::Numeric(d) => format!("{}={}", column, d),
                FieldValue::Date(d) => format!("{}={}", column, d),
            })
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// A record that passed validation. Null and absent fields are not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub kind: RecordKind,
    pub values: BTreeMap<&'static str, FieldValue>,
}

impl ValidatedRecord {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
        }
    }

    /// Builder used by tests and fixtures. Unknown columns are ignored.
    pub fn with(mut self, column: &str, value: FieldValue) -> Self {
        if let Some(field) = self.kind.schema().field(column) {
            self.values.insert(field.column, value);
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.values.get(column)
    }

    /// Natural key values, or `None` when the kind has no natural key
    pub fn key(&self) -> Option<RecordKey> {
        let columns = self.kind.schema().natural_key?;
        let mut parts = Vec::with_capacity(columns.len());
        for column in columns {
            let (name, value) = self.values.get_key_value(column)?;
            parts.push((*name, value.clone()));
        }
        Some(RecordKey(parts))
    }
}

/// A stored row: store-assigned id, column values and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    pub kind: RecordKind,
    pub id: i64,
    pub values: BTreeMap<&'static str, FieldValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersistedRecord {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.values.get(column)
    }

    pub fn matches_key(&self, key: &RecordKey) -> bool {
        key.0
            .iter()
            .all(|(column, value)| self.values.get(column) == Some(value))
    }
}

impl Serialize for PersistedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let schema = self.kind.schema();
        let mut map = serializer.serialize_map(Some(schema.fields.len() + 3))?;
        map.serialize_entry("id", &self.id)?;
        for column in schema.columns() {
            map.serialize_entry(column, &self.values.get(column))?;
        }
        map.serialize_entry(
            "created_at",
            &self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        )?;
        map.serialize_entry(
            "updated_at",
            &self.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        )?;
        map.end()
    }
}
