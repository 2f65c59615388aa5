//! Session database operations
//!
//! The aggregate's nested collections (`track_order`, `tracks`,
//! `instruments`, `samples`) live in JSON TEXT columns so order and
//! duplicate references survive round-trips. The attach mutation's
//! read-modify-write (find, mutate in memory, persist) is not transactional;
//! concurrent writers to the same session race and the last persist wins.

use chrono::Utc;
use gridbeat_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::instruments::find_instrument_resolved;
use crate::db::samples::{find_sample, parse_timestamp};
use crate::models::{Session, SessionView, Track, TrackView};

pub async fn insert_session(pool: &SqlitePool, session: &Session) -> Result<()> {
    let (track_order, tracks, instruments, samples) = serialize_collections(session)?;

    sqlx::query(
        r#"
        INSERT INTO sessions (
            id, creator_id, tempo, master_gain, active_track_id, active_cell_beat,
            track_order, tracks, instruments, samples, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(session.id.to_string())
    .bind(&session.creator_id)
    .bind(session.tempo)
    .bind(session.master_gain)
    .bind(session.active_track_id.map(|id| id.to_string()))
    .bind(session.active_cell_beat)
    .bind(&track_order)
    .bind(&tracks)
    .bind(&instruments)
    .bind(&samples)
    .bind(session.created_at.to_rfc3339())
    .bind(session.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrite the stored document with the in-memory state. `updated_at` is
/// refreshed to now on every persist, whether or not anything else changed.
pub async fn persist_session(pool: &SqlitePool, session: &Session) -> Result<()> {
    let (track_order, tracks, instruments, samples) = serialize_collections(session)?;
    let updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE sessions
        SET creator_id = ?, tempo = ?, master_gain = ?, active_track_id = ?,
            active_cell_beat = ?, track_order = ?, tracks = ?, instruments = ?,
            samples = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&session.creator_id)
    .bind(session.tempo)
    .bind(session.master_gain)
    .bind(session.active_track_id.map(|id| id.to_string()))
    .bind(session.active_cell_beat)
    .bind(&track_order)
    .bind(&tracks)
    .bind(&instruments)
    .bind(&samples)
    .bind(updated_at.to_rfc3339())
    .bind(session.id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_session(pool: &SqlitePool, id: Uuid) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT id, creator_id, tempo, master_gain, active_track_id, active_cell_beat,
               track_order, tracks, instruments, samples, created_at, updated_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(session_from_row).transpose()
}

/// Load a session with every reference resolved: each track's instrument,
/// the session-level instrument list, and the session-level sample list.
/// Dangling references resolve to omission (tracks keep `instrument: None`).
pub async fn find_session_resolved(pool: &SqlitePool, id: Uuid) -> Result<Option<SessionView>> {
    let Some(session) = find_session(pool, id).await? else {
        return Ok(None);
    };

    let mut tracks = Vec::with_capacity(session.tracks.len());
    for track in &session.tracks {
        let instrument = find_instrument_resolved(pool, track.instrument).await?;
        tracks.push(track_view(track, instrument));
    }

    let mut instruments = Vec::with_capacity(session.instruments.len());
    for instrument_id in &session.instruments {
        if let Some(view) = find_instrument_resolved(pool, *instrument_id).await? {
            instruments.push(view);
        }
    }

    let mut samples = Vec::with_capacity(session.samples.len());
    for sample_id in &session.samples {
        if let Some(sample) = find_sample(pool, *sample_id).await? {
            samples.push(sample);
        }
    }

    Ok(Some(SessionView {
        id: session.id,
        creator_id: session.creator_id,
        tempo: session.tempo,
        master_gain: session.master_gain,
        active_track_id: session.active_track_id,
        active_cell_beat: session.active_cell_beat,
        track_order: session.track_order,
        tracks,
        instruments,
        samples,
        created_at: session.created_at,
        updated_at: session.updated_at,
    }))
}

fn track_view(track: &Track, instrument: Option<crate::models::InstrumentView>) -> TrackView {
    TrackView {
        id: track.id,
        color: track.color,
        label: track.label.clone(),
        note_resolution: track.note_resolution,
        instrument,
        muted: track.muted,
        soloed: track.soloed,
        cells: track.cells.clone(),
        processing: track.processing.clone(),
    }
}

fn serialize_collections(session: &Session) -> Result<(String, String, String, String)> {
    let track_order = serde_json::to_string(&session.track_order)
        .map_err(|e| Error::Internal(format!("Failed to serialize track order: {}", e)))?;
    let tracks = serde_json::to_string(&session.tracks)
        .map_err(|e| Error::Internal(format!("Failed to serialize tracks: {}", e)))?;
    let instruments = serde_json::to_string(&session.instruments)
        .map_err(|e| Error::Internal(format!("Failed to serialize instruments: {}", e)))?;
    let samples = serde_json::to_string(&session.samples)
        .map_err(|e| Error::Internal(format!("Failed to serialize samples: {}", e)))?;
    Ok((track_order, tracks, instruments, samples))
}

fn session_from_row(row: sqlx::sqlite::SqliteRow) -> Result<Session> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| Error::Internal(format!("Failed to parse session id: {}", e)))?;

    let active_track_id: Option<String> = row.get("active_track_id");
    let active_track_id = active_track_id
        .map(|s| Uuid::parse_str(&s))
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to parse active track id: {}", e)))?;

    let track_order: String = row.get("track_order");
    let track_order: Vec<Uuid> = serde_json::from_str(&track_order)
        .map_err(|e| Error::Internal(format!("Failed to deserialize track order: {}", e)))?;

    let tracks: String = row.get("tracks");
    let tracks: Vec<Track> = serde_json::from_str(&tracks)
        .map_err(|e| Error::Internal(format!("Failed to deserialize tracks: {}", e)))?;

    let instruments: String = row.get("instruments");
    let instruments: Vec<Uuid> = serde_json::from_str(&instruments)
        .map_err(|e| Error::Internal(format!("Failed to deserialize instruments: {}", e)))?;

    let samples: String = row.get("samples");
    let samples: Vec<Uuid> = serde_json::from_str(&samples)
        .map_err(|e| Error::Internal(format!("Failed to deserialize samples: {}", e)))?;

    Ok(Session {
        id,
        creator_id: row.get("creator_id"),
        tempo: row.get("tempo"),
        master_gain: row.get("master_gain"),
        active_track_id,
        active_cell_beat: row.get("active_cell_beat"),
        track_order,
        tracks,
        instruments,
        samples,
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}
