//! Instrument entity: a MIDI-note-to-sample mapping table
//!
//! Stored form references samples by id; the resolved view embeds the full
//! sample records for the read path.

use chrono::{DateTime, Utc};
use gridbeat_common::validators::{is_valid_detune, is_valid_midi_note};
use gridbeat_common::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Sample;

pub const DEFAULT_INSTRUMENT_GROUP: &str = "NO_GROUP";

/// One mapping row: play `sample` (detuned by `detune` cents) for `note`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMapping {
    pub note: i64,
    pub sample: Uuid,
    pub detune: i64,
}

impl InstrumentMapping {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_midi_note(self.note) {
            return Err(Error::Validation(format!(
                "Not a valid MIDI note: {}",
                self.note
            )));
        }
        if !is_valid_detune(self.detune) {
            return Err(Error::Validation(format!(
                "Not a valid detune value: {}",
                self.detune
            )));
        }
        Ok(())
    }
}

/// Stored instrument document. `samples` is the deduplicated union of every
/// mapping entry's sample reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: Uuid,
    pub label: String,
    pub group: String,
    pub samples: Vec<Uuid>,
    pub mapping: Vec<InstrumentMapping>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Instrument {
    pub fn new(
        id: Uuid,
        label: String,
        group: Option<String>,
        samples: Vec<Uuid>,
        mapping: Vec<InstrumentMapping>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            label,
            group: group.unwrap_or_else(|| DEFAULT_INSTRUMENT_GROUP.to_string()),
            samples,
            mapping,
            created_at: now,
            updated_at: now,
        }
    }

    /// Field predicates plus the cross-reference invariant: every mapping
    /// entry's sample must appear in `samples`.
    pub fn validate(&self) -> Result<()> {
        if self.label.is_empty() {
            return Err(Error::Validation("Instrument label required".to_string()));
        }
        for entry in &self.mapping {
            entry.validate()?;
            if !self.samples.contains(&entry.sample) {
                return Err(Error::Validation(format!(
                    "Mapping references sample {} missing from the sample set",
                    entry.sample
                )));
            }
        }
        Ok(())
    }
}

/// Mapping row with the sample record embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMappingView {
    pub note: i64,
    pub sample: Sample,
    pub detune: i64,
}

/// Instrument with all sample references resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentView {
    pub id: Uuid,
    pub label: String,
    pub group: String,
    pub samples: Vec<Sample>,
    pub mapping: Vec<InstrumentMappingView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
