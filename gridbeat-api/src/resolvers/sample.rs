//! Sample queries and mutations

use gridbeat_common::validators::{has_file_extension, is_valid_audio_mime_type};
use gridbeat_common::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::samples::{self, SamplePatch};
use crate::models::Sample;
use crate::storage::FileStore;

/// An upload already read off the wire: original filename, declared MIME
/// type, and the raw bytes
#[derive(Debug, Clone)]
pub struct SampleUpload {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleMutationResponse {
    pub code: u16,
    pub success: bool,
    pub message_template: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub sample: Option<Sample>,
}

impl SampleMutationResponse {
    fn success(template: &str, message: String, sample: Sample) -> Self {
        Self {
            code: 200,
            success: true,
            message_template: template.to_string(),
            message: Some(message),
            error: None,
            sample: Some(sample),
        }
    }

    fn failure(template: &str, message: String) -> Self {
        Self {
            code: 200,
            success: false,
            message_template: template.to_string(),
            message: Some(message),
            error: None,
            sample: None,
        }
    }
}

pub async fn sample_list(pool: &SqlitePool) -> Result<Vec<Sample>> {
    samples::list_samples(pool).await
}

/// Create a sample from an upload: validate, write the file, record the
/// metadata. Validation failures are errors at the mutation boundary (not
/// structured responses), so nothing is persisted on bad input.
pub async fn create_sample(
    pool: &SqlitePool,
    store: &FileStore,
    upload: SampleUpload,
    label: Option<String>,
    group: Option<String>,
) -> Result<SampleMutationResponse> {
    if !has_file_extension(&upload.filename) {
        return Err(Error::Validation(format!(
            "Filename extension required, {} given",
            upload.filename
        )));
    }
    if !is_valid_audio_mime_type(&upload.mime_type) {
        return Err(Error::Validation(format!(
            "Audio MIME type required, {} given",
            upload.mime_type
        )));
    }

    let stored = store.store(&upload.filename, &upload.data).await?;
    let url = if stored.file_extension.is_empty() {
        format!("/samples/{}", stored.id)
    } else {
        format!("/samples/{}.{}", stored.id, stored.file_extension)
    };

    let sample = Sample::new(
        stored.id,
        url,
        upload.filename,
        upload.mime_type,
        label,
        group,
    );
    sample.validate()?;
    samples::insert_sample(pool, &sample).await?;

    debug!(sample_id = %sample.id, "Sample created");

    Ok(SampleMutationResponse::success(
        "mutation.createSample.success",
        format!("The sample n°{} has been created successfully", sample.id),
        sample,
    ))
}

pub async fn update_sample(
    pool: &SqlitePool,
    id: Uuid,
    patch: SamplePatch,
) -> Result<SampleMutationResponse> {
    match samples::update_sample(pool, id, &patch).await? {
        None => Ok(SampleMutationResponse::failure(
            "mutation.updateSample.failure",
            format!(
                "The sample n°{} could not be updated because it could not have been retrieved.",
                id
            ),
        )),
        Some(sample) => Ok(SampleMutationResponse::success(
            "mutation.updateSample.success",
            format!("The sample n°{} has been updated successfully.", id),
            sample,
        )),
    }
}

/// Delete the metadata record, then best-effort remove the backing file.
/// The record deletion is the primary outcome; a failed unlink is logged
/// and swallowed.
pub async fn delete_sample(
    pool: &SqlitePool,
    static_dir: &Path,
    id: Uuid,
) -> Result<SampleMutationResponse> {
    match samples::delete_sample(pool, id).await? {
        None => Ok(SampleMutationResponse::failure(
            "mutation.deleteSample.failure",
            format!("The sample n°{} could not be deleted", id),
        )),
        Some(sample) => {
            let file_path = static_dir.join(sample.url.trim_start_matches('/'));
            if let Err(e) = tokio::fs::remove_file(&file_path).await {
                warn!(
                    "Failed to remove sample file {}: {}",
                    file_path.display(),
                    e
                );
            }

            Ok(SampleMutationResponse::success(
                "mutation.deleteSample.success",
                format!("The sample n°{} has been deleted successfully", id),
                sample,
            ))
        }
    }
}
