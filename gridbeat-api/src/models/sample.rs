//! Sample entity: one uploaded audio file's metadata record

use chrono::{DateTime, Utc};
use gridbeat_common::validators::{has_file_extension, is_valid_audio_mime_type};
use gridbeat_common::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub mime_type: String,
    pub label: String,
    pub group: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sample {
    /// Build a record for a freshly stored file. `label` falls back to the
    /// original filename when absent.
    pub fn new(
        id: Uuid,
        url: String,
        filename: String,
        mime_type: String,
        label: Option<String>,
        group: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            url,
            label: label.unwrap_or_else(|| filename.clone()),
            filename,
            mime_type,
            group,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !has_file_extension(&self.filename) {
            return Err(Error::Validation(format!(
                "Filename extension required, {} given",
                self.filename
            )));
        }
        if !is_valid_audio_mime_type(&self.mime_type) {
            return Err(Error::Validation(format!(
                "Audio MIME type required, {} given",
                self.mime_type
            )));
        }
        Ok(())
    }
}
