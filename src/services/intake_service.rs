//! Intake service: map, validate and persist one batch of records
//!
//! Validation of the whole batch completes before anything is written, so a
//! rejected batch never leaves rows behind. Persistence then runs record by
//! record in input order and stops at the first store failure.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{BatchErrors, IntakeError, IntakeResult};
use crate::mapping::{FieldMapper, MappingMode};
use crate::models::{BatchPolicy, PersistedRecord, RecordKind, ValidatedRecord};
use crate::repository::RecordRepository;
use crate::validation::RecordValidator;

/// Result of a successfully stored batch
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub kind: RecordKind,
    /// Number of records in the request
    pub requested: usize,
    /// Stored rows in input order
    pub records: Vec<PersistedRecord>,
}

#[derive(Clone)]
pub struct IntakeService {
    repository: Arc<dyn RecordRepository>,
}

impl IntakeService {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Process one request body for `kind`
    pub async fn ingest(
        &self,
        kind: RecordKind,
        payload: &Value,
        mode: MappingMode,
    ) -> IntakeResult<IntakeOutcome> {
        let Some(items) = payload.as_array() else {
            return Err(IntakeError::InvalidPayload(
                "Request body must be a JSON array of records.".to_string(),
            ));
        };

        let validated = validate_batch(kind, items, mode)?;
        let records = self.persist(kind, &validated).await?;

        info!(
            "Stored {} {} record(s) out of {} submitted",
            records.len(),
            kind,
            items.len()
        );

        Ok(IntakeOutcome {
            kind,
            requested: items.len(),
            records,
        })
    }

    async fn persist(
        &self,
        kind: RecordKind,
        validated: &[ValidatedRecord],
    ) -> IntakeResult<Vec<PersistedRecord>> {
        let mut records = Vec::with_capacity(validated.len());

        for (index, record) in validated.iter().enumerate() {
            let stored = self.repository.save(record).await.map_err(|source| {
                error!("Failed to persist {} record {}: {:#}", kind, index, source);
                IntakeError::Persistence {
                    kind,
                    index,
                    source,
                }
            })?;
            debug!("Persisted {} record {} as id {}", kind, index, stored.id);
            records.push(stored);
        }

        Ok(records)
    }
}

/// Validate every item according to the kind's batch policy
pub fn validate_batch(
    kind: RecordKind,
    items: &[Value],
    mode: MappingMode,
) -> IntakeResult<Vec<ValidatedRecord>> {
    let mapper = FieldMapper::new(kind);
    let validator = RecordValidator::new(kind);
    let policy = kind.batch_policy();

    let mut validated = Vec::with_capacity(items.len());
    let mut errors = BatchErrors::new();

    for (index, item) in items.iter().enumerate() {
        let result = match item.as_object() {
            Some(object) => validator.validate_mapped(&mapper.map(object), mode),
            None => Err(RecordValidator::not_an_object()),
        };

        match result {
            Ok(record) => validated.push(record),
            Err(field_errors) => {
                errors.insert(index, field_errors);
                if policy == BatchPolicy::FailFast {
                    break;
                }
            }
        }
    }

    if !errors.is_empty() {
        warn!(
            "Rejected {} batch, invalid record index(es): {:?}",
            kind,
            errors.indexes()
        );
        return Err(IntakeError::Validation(errors));
    }

    Ok(validated)
}
