//! Session queries and mutations, including the instrument-attach mutation

use gridbeat_common::color::MaterialColor;
use gridbeat_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::db::{instruments, sessions};
use crate::models::{Session, SessionView, Track};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionInput {
    #[serde(rename = "creatorID")]
    pub creator_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSessionInput {
    #[serde(rename = "sessionID")]
    pub session_id: Uuid,
    #[serde(rename = "instrumentID", default)]
    pub instrument_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMutationResponse {
    pub code: u16,
    pub success: bool,
    pub message_template: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub session: Option<SessionView>,
}

impl SessionMutationResponse {
    fn success(template: &str, message: String, session: SessionView) -> Self {
        Self {
            code: 200,
            success: true,
            message_template: template.to_string(),
            message: Some(message),
            error: None,
            session: Some(session),
        }
    }

    fn failure(template: &str, message: String, error: Option<String>) -> Self {
        Self {
            code: 200,
            success: false,
            message_template: template.to_string(),
            message: Some(message),
            error,
            session: None,
        }
    }

    fn update_failure() -> Self {
        Self::failure(
            "mutation.updateSession.success",
            "Failed to update session".to_string(),
            None,
        )
    }
}

/// Resolve a session with all references populated; `None` when unknown
/// (not an error).
pub async fn session(pool: &SqlitePool, id: Uuid) -> Result<Option<SessionView>> {
    sessions::find_session_resolved(pool, id).await
}

/// Create an empty session for a creator
pub async fn create_session(
    pool: &SqlitePool,
    input: CreateSessionInput,
) -> Result<SessionMutationResponse> {
    let session = Session::new(input.creator_id);

    if let Err(e) = session.validate() {
        return Ok(SessionMutationResponse::failure(
            "mutation.createSession.failure",
            "Failed to create session".to_string(),
            Some(e.to_string()),
        ));
    }

    sessions::insert_session(pool, &session).await?;

    match sessions::find_session_resolved(pool, session.id).await? {
        None => Ok(SessionMutationResponse::failure(
            "mutation.createSession.failure",
            "Failed to create session".to_string(),
            None,
        )),
        Some(view) => Ok(SessionMutationResponse::success(
            "mutation.createSession.success",
            format!("Session {} created successfully", view.id),
            view,
        )),
    }
}

/// The instrument-attach mutation.
///
/// With an `instrumentID`, builds a new pink track from the instrument and
/// appends it to the session's four collections (tracks, trackOrder,
/// instruments, samples — the latter two without dedup). Without one, the
/// persist still runs and refreshes `updatedAt`. Every failure path returns
/// a structured `success: false` response rather than an error — including
/// an unknown instrument, which crashed in earlier revisions of this
/// mutation.
pub async fn update_session(
    pool: &SqlitePool,
    input: UpdateSessionInput,
) -> Result<SessionMutationResponse> {
    let Some(mut session) = sessions::find_session(pool, input.session_id).await? else {
        return Ok(SessionMutationResponse::update_failure());
    };

    if let Some(instrument_id) = input.instrument_id {
        let Some(instrument) = instruments::find_instrument_resolved(pool, instrument_id).await?
        else {
            return Ok(SessionMutationResponse::update_failure());
        };

        let track = Track::new(instrument.id, MaterialColor::Pink);
        debug!(session_id = %session.id, track_id = %track.id, instrument_id = %instrument.id, "Attaching track");
        session.attach_track(track, &instrument);
    }

    sessions::persist_session(pool, &session).await?;

    match sessions::find_session_resolved(pool, session.id).await? {
        None => Ok(SessionMutationResponse::update_failure()),
        Some(view) => Ok(SessionMutationResponse::success(
            "mutation.updateSession.success",
            format!("Session {} updated successfully", view.id),
            view,
        )),
    }
}
