//! Record kinds and their immutable field schemas
//!
//! A [`FieldSpec`] pairs the external (client-facing) label of a field with its
//! canonical column and the rule the value must satisfy. One static list per
//! [`RecordKind`] drives the field mapper, the validator and the store.

use std::fmt;

use super::tables;

/// The four record kinds accepted by the intake API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    BalanceSheet,
    IncomeStatement,
    PurchaseOrder,
    Invoice,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::BalanceSheet,
        RecordKind::IncomeStatement,
        RecordKind::PurchaseOrder,
        RecordKind::Invoice,
    ];

    /// Static schema for this kind
    pub fn schema(self) -> &'static RecordSchema {
        match self {
            RecordKind::BalanceSheet => &BALANCE_SHEET,
            RecordKind::IncomeStatement => &INCOME_STATEMENT,
            RecordKind::PurchaseOrder => &PURCHASE_ORDER,
            RecordKind::Invoice => &INVOICE,
        }
    }

    /// How a batch of this kind reacts to an invalid record
    pub fn batch_policy(self) -> BatchPolicy {
        match self {
            RecordKind::BalanceSheet | RecordKind::IncomeStatement => BatchPolicy::FailFast,
            RecordKind::PurchaseOrder | RecordKind::Invoice => BatchPolicy::CollectAll,
        }
    }

    /// Financial statements (BOL) as opposed to trade documents (GEC)
    pub fn is_statement(self) -> bool {
        matches!(self, RecordKind::BalanceSheet | RecordKind::IncomeStatement)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::BalanceSheet => "bol-bs",
            RecordKind::IncomeStatement => "bol-ic",
            RecordKind::PurchaseOrder => "gec-po",
            RecordKind::Invoice => "gec-inv",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch-level validation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Stop at the first invalid record and report only that record
    FailFast,
    /// Validate every record and report all failing records
    CollectAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Nullable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Numeric,
    Date,
}

impl FieldType {
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldType::String => "TEXT",
            FieldType::Integer => "BIGINT",
            FieldType::Numeric => "NUMERIC",
            FieldType::Date => "DATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub presence: Presence,
    pub field_type: FieldType,
}

/// External label, canonical column and validation rule of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub external: &'static str,
    pub column: &'static str,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub const fn required(
        external: &'static str,
        column: &'static str,
        field_type: FieldType,
    ) -> Self {
        Self {
            external,
            column,
            rule: FieldRule {
                presence: Presence::Required,
                field_type,
            },
        }
    }

    pub const fn nullable(
        external: &'static str,
        column: &'static str,
        field_type: FieldType,
    ) -> Self {
        Self {
            external,
            column,
            rule: FieldRule {
                presence: Presence::Nullable,
                field_type,
            },
        }
    }

    /// Nullable numeric line item, the bulk of every statement
    pub const fn amount(external: &'static str, column: &'static str) -> Self {
        Self::nullable(external, column, FieldType::Numeric)
    }
}

/// Complete description of one record kind
#[derive(Debug)]
pub struct RecordSchema {
    pub kind: RecordKind,
    pub table: &'static str,
    /// Columns whose combined value identifies a record across submissions
    pub natural_key: Option<&'static [&'static str]>,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, column: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.column == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.column)
    }

    pub fn is_key_column(&self, column: &str) -> bool {
        self.natural_key
            .map(|key| key.contains(&column))
            .unwrap_or(false)
    }
}

const STATEMENT_KEY: &[&str] = &["company_id", "year"];

static BALANCE_SHEET: RecordSchema = RecordSchema {
    kind: RecordKind::BalanceSheet,
    table: "bol_bs_raw",
    natural_key: Some(STATEMENT_KEY),
    fields: tables::balance_sheet::FIELDS,
};

static INCOME_STATEMENT: RecordSchema = RecordSchema {
    kind: RecordKind::IncomeStatement,
    table: "bol_ic_raw",
    natural_key: Some(STATEMENT_KEY),
    fields: tables::income_statement::FIELDS,
};

static PURCHASE_ORDER: RecordSchema = RecordSchema {
    kind: RecordKind::PurchaseOrder,
    table: "gec_po_raw",
    natural_key: None,
    fields: tables::purchase_order::FIELDS,
};

static INVOICE: RecordSchema = RecordSchema {
    kind: RecordKind::Invoice,
    table: "gec_inv_raw",
    natural_key: None,
    fields: tables::invoice::FIELDS,
};
