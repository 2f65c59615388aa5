//! Sample API handlers
//!
//! `POST /api/samples` accepts a multipart form: a `file` part carrying the
//! audio bytes plus optional `label` and `group` text parts.

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::db::samples::SamplePatch;
use crate::error::{ApiError, ApiResult};
use crate::models::Sample;
use crate::resolvers::sample::{self, SampleMutationResponse, SampleUpload};
use crate::storage::FileStore;
use crate::AppState;

pub fn sample_routes() -> Router<AppState> {
    Router::new()
        .route("/api/samples", get(list_samples).post(create_sample))
        .route("/api/samples/:id", patch(update_sample).delete(delete_sample))
}

/// GET /api/samples
async fn list_samples(State(state): State<AppState>) -> ApiResult<Json<Vec<Sample>>> {
    Ok(Json(sample::sample_list(&state.db).await?))
}

/// POST /api/samples (multipart)
async fn create_sample(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SampleMutationResponse>> {
    let mut upload: Option<SampleUpload> = None;
    let mut label: Option<String> = None;
    let mut group: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                upload = Some(SampleUpload {
                    filename,
                    mime_type,
                    data: data.to_vec(),
                });
            }
            Some("label") => {
                label = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            Some("group") => {
                group = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let upload = upload
        .ok_or_else(|| ApiError::BadRequest("Multipart field 'file' is required".to_string()))?;

    let store = FileStore::new(state.sample_dir.clone());
    let response = sample::create_sample(&state.db, &store, upload, label, group).await?;
    Ok(Json(response))
}

/// PATCH /api/samples/:id
async fn update_sample(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SamplePatch>,
) -> ApiResult<Json<SampleMutationResponse>> {
    Ok(Json(sample::update_sample(&state.db, id, patch).await?))
}

/// DELETE /api/samples/:id
async fn delete_sample(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SampleMutationResponse>> {
    Ok(Json(
        sample::delete_sample(&state.db, &state.static_dir, id).await?,
    ))
}
