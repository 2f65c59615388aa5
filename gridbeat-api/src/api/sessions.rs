//! Session API handlers

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::SessionView;
use crate::resolvers::session::{
    self, CreateSessionInput, SessionMutationResponse, UpdateSessionInput,
};
use crate::AppState;

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/update", post(update_session))
        .route("/api/sessions/:id", get(get_session))
}

/// GET /api/sessions/:id
///
/// Body is `null` when the session does not exist; an unknown id is not an
/// error on the read path.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Option<SessionView>>> {
    Ok(Json(session::session(&state.db, id).await?))
}

/// POST /api/sessions
async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSessionInput>,
) -> ApiResult<Json<SessionMutationResponse>> {
    Ok(Json(session::create_session(&state.db, input).await?))
}

/// POST /api/sessions/update
async fn update_session(
    State(state): State<AppState>,
    Json(input): Json<UpdateSessionInput>,
) -> ApiResult<Json<SessionMutationResponse>> {
    Ok(Json(session::update_session(&state.db, input).await?))
}
