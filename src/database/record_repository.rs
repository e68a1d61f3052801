//! Postgres record store
//!
//! Statements are built from the kind's schema with `sqlx::QueryBuilder`, so
//! every column of the table is written on each insert or upsert. Upserts use
//! `INSERT ... ON CONFLICT (natural key) DO UPDATE`, which keeps the lookup and
//! the write in a single statement.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::collections::BTreeMap;

use crate::models::{
    FieldType, FieldValue, PersistedRecord, RecordKey, RecordKind, RecordSchema, ValidatedRecord,
};
use crate::repository::RecordRepository;

#[derive(Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn insert_statement(
        schema: &RecordSchema,
        record: &ValidatedRecord,
    ) -> QueryBuilder<'static, Postgres> {
        let mut query_builder = QueryBuilder::new(format!("INSERT INTO {} (", schema.table));
        query_builder.push(schema.columns().collect::<Vec<_>>().join(", "));
        query_builder.push(") VALUES (");

        for (i, field) in schema.fields.iter().enumerate() {
            if i > 0 {
                query_builder.push(", ");
            }
            push_field_bind(&mut query_builder, field.rule.field_type, record.get(field.column));
        }
        query_builder.push(")");
        query_builder
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn find_by_key(
        &self,
        kind: RecordKind,
        key: &RecordKey,
    ) -> Result<Option<PersistedRecord>> {
        let schema = kind.schema();
        let mut query_builder =
            QueryBuilder::<Postgres>::new(format!("SELECT * FROM {} WHERE ", schema.table));

        for (i, (column, value)) in key.0.iter().enumerate() {
            if i > 0 {
                query_builder.push(" AND ");
            }
            query_builder.push(*column).push(" = ");
            push_value_bind(&mut query_builder, value);
        }

        let row = query_builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to look up {} record {}", kind, key))?;

        row.map(|row| decode_row(schema, &row)).transpose()
    }

    async fn insert(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        let schema = record.kind.schema();
        let mut query_builder = Self::insert_statement(schema, record);
        query_builder.push(" RETURNING *");

        let row = query_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to insert {} record", record.kind))?;

        decode_row(schema, &row)
    }

    async fn upsert(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        let schema = record.kind.schema();
        let key_columns = schema
            .natural_key
            .ok_or_else(|| anyhow!("{} record has no natural key to upsert on", record.kind))?;

        let mut query_builder = Self::insert_statement(schema, record);
        query_builder.push(" ON CONFLICT (");
        query_builder.push(key_columns.join(", "));
        query_builder.push(") DO UPDATE SET ");

        for column in schema.columns().filter(|c| !schema.is_key_column(c)) {
            query_builder.push(format!("{column} = EXCLUDED.{column}, "));
        }
        query_builder.push("updated_at = NOW() RETURNING *");

        let row = query_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to upsert {} record", record.kind))?;

        decode_row(schema, &row)
    }

    async fn count(&self, kind: RecordKind) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.schema().table);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to count {} records", kind))?;

        Ok(count)
    }
}

/// Bind a column value; absent values bind a NULL of the column's type
fn push_field_bind(
    query_builder: &mut QueryBuilder<'static, Postgres>,
    field_type: FieldType,
    value: Option<&FieldValue>,
) {
    match (field_type, value) {
        (_, Some(value)) => push_value_bind(query_builder, value),
        (FieldType::String, None) => {
            query_builder.push_bind(None::<String>);
        }
        (FieldType::Integer, None) => {
            query_builder.push_bind(None::<i64>);
        }
        (FieldType::Numeric, None) => {
            query_builder.push_bind(None::<Decimal>);
        }
        (FieldType::Date, None) => {
            query_builder.push_bind(None::<NaiveDate>);
        }
    }
}

fn push_value_bind(query_builder: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Text(s) => query_builder.push_bind(s.clone()),
        FieldValue::Integer(i) => query_builder.push_bind(*i),
        FieldValue::Numeric(d) => query_builder.push_bind(*d),
        FieldValue::Date(d) => query_builder.push_bind(*d),
    };
}

fn decode_row(schema: &RecordSchema, row: &PgRow) -> Result<PersistedRecord> {
    let mut values = BTreeMap::new();

    for field in schema.fields {
        let column = field.column;
        let value = match field.rule.field_type {
            FieldType::String => row
                .try_get::<Option<String>, _>(column)?
                .map(FieldValue::Text),
            FieldType::Integer => row
                .try_get::<Option<i64>, _>(column)?
                .map(FieldValue::Integer),
            FieldType::Numeric => row
                .try_get::<Option<Decimal>, _>(column)?
                .map(FieldValue::Numeric),
            FieldType::Date => row
                .try_get::<Option<NaiveDate>, _>(column)?
                .map(FieldValue::Date),
        };
        if let Some(value) = value {
            values.insert(column, value);
        }
    }

    Ok(PersistedRecord {
        kind: schema.kind,
        id: row.try_get("id")?,
        values,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
