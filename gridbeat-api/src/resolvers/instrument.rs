//! Instrument queries and mutations

use gridbeat_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use crate::db::{instruments, samples};
use crate::models::{Instrument, InstrumentMapping, InstrumentView};

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentMappingInput {
    pub note: i64,
    #[serde(rename = "sampleID")]
    pub sample_id: Uuid,
    pub detune: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstrumentInput {
    pub label: String,
    #[serde(default)]
    pub group: Option<String>,
    pub mapping: Vec<InstrumentMappingInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentMutationResponse {
    pub code: u16,
    pub success: bool,
    pub message_template: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub instrument: Option<InstrumentView>,
}

impl InstrumentMutationResponse {
    fn success(template: &str, message: String, instrument: InstrumentView) -> Self {
        Self {
            code: 200,
            success: true,
            message_template: template.to_string(),
            message: Some(message),
            error: None,
            instrument: Some(instrument),
        }
    }

    fn failure(template: &str, message: String, error: Option<String>) -> Self {
        Self {
            code: 200,
            success: false,
            message_template: template.to_string(),
            message: Some(message),
            error,
            instrument: None,
        }
    }
}

pub async fn instrument_list(pool: &SqlitePool) -> Result<Vec<InstrumentView>> {
    instruments::list_instruments_resolved(pool).await
}

/// Create an instrument from a note-to-sample mapping.
///
/// Construction is best-effort, not atomic: mapping entries whose sample id
/// does not resolve are dropped silently, and `samples` becomes the
/// deduplicated resolved set. Incoming sample ids are deduplicated before
/// lookup so shared samples are fetched once.
pub async fn create_instrument(
    pool: &SqlitePool,
    input: CreateInstrumentInput,
) -> Result<InstrumentMutationResponse> {
    let id = Uuid::new_v4();

    let mut seen = HashSet::new();
    let mut unique_ids = Vec::new();
    for entry in &input.mapping {
        if seen.insert(entry.sample_id) {
            unique_ids.push(entry.sample_id);
        }
    }

    let mut resolved_ids = Vec::with_capacity(unique_ids.len());
    for sample_id in unique_ids {
        if samples::find_sample(pool, sample_id).await?.is_some() {
            resolved_ids.push(sample_id);
        }
    }

    let mapping: Vec<InstrumentMapping> = input
        .mapping
        .iter()
        .filter(|entry| resolved_ids.contains(&entry.sample_id))
        .map(|entry| InstrumentMapping {
            note: entry.note,
            sample: entry.sample_id,
            detune: entry.detune,
        })
        .collect();

    debug!(instrument_id = %id, retained = mapping.len(), "Instrument mapping resolved");

    let instrument = Instrument::new(id, input.label, input.group, resolved_ids, mapping);

    if let Err(e) = instrument.validate() {
        return Ok(InstrumentMutationResponse::failure(
            "mutation.createSample.success",
            "Failed to create instrument".to_string(),
            Some(e.to_string()),
        ));
    }

    instruments::insert_instrument(pool, &instrument).await?;

    match instruments::find_instrument_resolved(pool, id).await? {
        None => Ok(InstrumentMutationResponse::failure(
            "mutation.createSample.success",
            "Failed to create instrument".to_string(),
            None,
        )),
        Some(view) => Ok(InstrumentMutationResponse::success(
            "mutation.createSample.success",
            format!("The instrument n°{} has been created successfully", id),
            view,
        )),
    }
}
