//! Field mapper: external labels to canonical columns
//!
//! Mapping is a lossy projection over the kind's field table. In lenient mode
//! unknown keys disappear without a trace; strict mode keeps them so the
//! validator can report them.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{FieldSpec, RecordKind};

static MAPPING_TABLES: LazyLock<HashMap<RecordKind, HashMap<&'static str, &'static FieldSpec>>> =
    LazyLock::new(|| {
        RecordKind::ALL
            .into_iter()
            .map(|kind| {
                let table = kind
                    .schema()
                    .fields
                    .iter()
                    .map(|field| (field.external, field))
                    .collect();
                (kind, table)
            })
            .collect()
    });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingMode {
    /// Unknown keys are dropped silently
    #[default]
    Lenient,
    /// Unknown keys are reported as validation failures
    Strict,
}

impl MappingMode {
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            MappingMode::Strict
        } else {
            MappingMode::Lenient
        }
    }
}

/// Output of mapping one external record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRecord {
    /// Canonical column to raw value
    pub fields: HashMap<&'static str, Value>,
    /// External keys with no entry in the table, in input order
    pub unmapped: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldMapper {
    kind: RecordKind,
}

impl FieldMapper {
    pub fn new(kind: RecordKind) -> Self {
        Self { kind }
    }

    /// Look up the field spec for an external label
    pub fn lookup(&self, external: &str) -> Option<&'static FieldSpec> {
        MAPPING_TABLES
            .get(&self.kind)
            .and_then(|table| table.get(external))
            .copied()
    }

    pub fn map(&self, record: &Map<String, Value>) -> MappedRecord {
        let mut mapped = MappedRecord::default();
        for (key, value) in record {
            match self.lookup(key) {
                Some(field) => {
                    mapped.fields.insert(field.column, value.clone());
                }
                None => mapped.unmapped.push(key.clone()),
            }
        }
        mapped
    }
}
