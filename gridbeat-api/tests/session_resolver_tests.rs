//! Session resolver tests: creation defaults and the instrument-attach
//! mutation's collection semantics

use gridbeat_api::db::samples;
use gridbeat_api::models::{Sample, PATTERN_LENGTH};
use gridbeat_api::resolvers::instrument::{CreateInstrumentInput, InstrumentMappingInput};
use gridbeat_api::resolvers::session::{self, CreateSessionInput, UpdateSessionInput};
use gridbeat_api::resolvers::instrument;
use gridbeat_common::color::MaterialColor;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();
    gridbeat_common::db::create_all_tables(&pool).await.unwrap();
    pool
}

async fn seed_sample(pool: &SqlitePool, name: &str) -> Sample {
    let id = Uuid::new_v4();
    let sample = Sample::new(
        id,
        format!("/samples/{}.wav", id),
        format!("{}.wav", name),
        "audio/wave".to_string(),
        Some(name.to_string()),
        None,
    );
    samples::insert_sample(pool, &sample).await.unwrap();
    sample
}

/// Instrument backed by one sample per (note, name) pair
async fn seed_instrument(pool: &SqlitePool, label: &str, notes: &[(i64, &str)]) -> Uuid {
    let mut mapping = Vec::new();
    for (note, name) in notes {
        let sample = seed_sample(pool, name).await;
        mapping.push(InstrumentMappingInput {
            note: *note,
            sample_id: sample.id,
            detune: 0,
        });
    }
    instrument::create_instrument(
        pool,
        CreateInstrumentInput {
            label: label.to_string(),
            group: None,
            mapping,
        },
    )
    .await
    .unwrap()
    .instrument
    .unwrap()
    .id
}

async fn seed_session(pool: &SqlitePool) -> Uuid {
    session::create_session(
        pool,
        CreateSessionInput {
            creator_id: "foo".to_string(),
        },
    )
    .await
    .unwrap()
    .session
    .unwrap()
    .id
}

#[tokio::test]
async fn create_session_starts_empty_with_default_transport() {
    let pool = test_pool().await;

    let response = session::create_session(
        &pool,
        CreateSessionInput {
            creator_id: "foo".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(response.code, 200);
    assert!(response.success);
    assert_eq!(response.message_template, "mutation.createSession.success");

    let view = response.session.unwrap();
    assert_eq!(view.creator_id, "foo");
    assert!(view.tracks.is_empty());
    assert!(view.track_order.is_empty());
    assert!(view.instruments.is_empty());
    assert!(view.samples.is_empty());
    assert_eq!(view.tempo, 120.0);
    assert_eq!(view.master_gain, 1.0);
}

#[tokio::test]
async fn create_session_with_empty_creator_reports_structured_failure() {
    let pool = test_pool().await;

    let response = session::create_session(
        &pool,
        CreateSessionInput {
            creator_id: String::new(),
        },
    )
    .await
    .unwrap();

    assert!(!response.success);
    assert!(response.error.is_some());
}

#[tokio::test]
async fn session_query_returns_none_for_unknown_id() {
    let pool = test_pool().await;
    assert!(session::session(&pool, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_without_instrument_only_refreshes_updated_at() {
    let pool = test_pool().await;
    let session_id = seed_session(&pool).await;
    let before = session::session(&pool, session_id).await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let response = session::update_session(
        &pool,
        UpdateSessionInput {
            session_id,
            instrument_id: None,
        },
    )
    .await
    .unwrap();

    assert!(response.success);
    let after = response.session.unwrap();
    assert!(after.tracks.is_empty());
    assert!(after.track_order.is_empty());
    assert!(after.instruments.is_empty());
    assert!(after.samples.is_empty());
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn update_unknown_session_reports_structured_failure() {
    let pool = test_pool().await;

    let response = session::update_session(
        &pool,
        UpdateSessionInput {
            session_id: Uuid::new_v4(),
            instrument_id: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(response.code, 200);
    assert!(!response.success);
    assert_eq!(response.message, Some("Failed to update session".to_string()));
    assert!(response.session.is_none());
}

#[tokio::test]
async fn update_with_unknown_instrument_reports_structured_failure() {
    // An unknown instrument used to escape as a crash out of an unchecked
    // lookup; it now fails like the sibling paths. Deliberate behavior
    // change from earlier revisions of this mutation.
    let pool = test_pool().await;
    let session_id = seed_session(&pool).await;

    let response = session::update_session(
        &pool,
        UpdateSessionInput {
            session_id,
            instrument_id: Some(Uuid::new_v4()),
        },
    )
    .await
    .unwrap();

    assert_eq!(response.code, 200);
    assert!(!response.success);
    assert!(response.session.is_none());

    // Nothing was appended
    let unchanged = session::session(&pool, session_id).await.unwrap().unwrap();
    assert!(unchanged.tracks.is_empty());
    assert!(unchanged.track_order.is_empty());
}

#[tokio::test]
async fn attach_builds_a_fully_defaulted_track() {
    let pool = test_pool().await;
    let session_id = seed_session(&pool).await;
    let instrument_id = seed_instrument(&pool, "Drums", &[(36, "kick")]).await;

    let response = session::update_session(
        &pool,
        UpdateSessionInput {
            session_id,
            instrument_id: Some(instrument_id),
        },
    )
    .await
    .unwrap();

    assert!(response.success);
    let view = response.session.unwrap();
    assert_eq!(view.tracks.len(), 1);

    let track = &view.tracks[0];
    assert_eq!(track.color, MaterialColor::Pink);
    assert_eq!(track.label, "Untitled track");
    assert_eq!(track.note_resolution, 1);
    assert!(!track.muted);
    assert!(!track.soloed);
    assert_eq!(track.cells.len(), PATTERN_LENGTH);
    assert!(!track.cells[0].scheduled);
    assert_eq!(track.cells[0].midi, None);
    assert_eq!(track.cells[0].processing.gain.gain, 1.0);
    assert_eq!(track.processing.gain.gain, 1.0);

    let resolved = track.instrument.as_ref().unwrap();
    assert_eq!(resolved.id, instrument_id);
    assert_eq!(view.track_order, vec![track.id]);
}

#[tokio::test]
async fn double_attach_duplicates_instrument_and_sample_references() {
    let pool = test_pool().await;
    let session_id = seed_session(&pool).await;
    let instrument_id =
        seed_instrument(&pool, "Drums", &[(36, "kick"), (38, "snare")]).await;

    for _ in 0..2 {
        let response = session::update_session(
            &pool,
            UpdateSessionInput {
                session_id,
                instrument_id: Some(instrument_id),
            },
        )
        .await
        .unwrap();
        assert!(response.success);
    }

    let view = session::session(&pool, session_id).await.unwrap().unwrap();
    assert_eq!(view.tracks.len(), 2);
    assert_eq!(view.track_order.len(), 2);
    // No dedup on the denormalized reference lists
    assert_eq!(view.instruments.len(), 2);
    assert_eq!(view.samples.len(), 4);
}

#[tokio::test]
async fn track_order_reflects_attach_sequence() {
    let pool = test_pool().await;
    let session_id = seed_session(&pool).await;
    let first = seed_instrument(&pool, "First", &[(36, "kick2")]).await;
    let second = seed_instrument(&pool, "Second", &[(38, "snare2")]).await;

    for instrument_id in [first, second] {
        session::update_session(
            &pool,
            UpdateSessionInput {
                session_id,
                instrument_id: Some(instrument_id),
            },
        )
        .await
        .unwrap();
    }

    let view = session::session(&pool, session_id).await.unwrap().unwrap();
    assert_eq!(view.tracks.len(), 2);
    assert_eq!(view.track_order[0], view.tracks[0].id);
    assert_eq!(view.track_order[1], view.tracks[1].id);
    assert_eq!(
        view.tracks[0].instrument.as_ref().unwrap().label,
        "First"
    );
    assert_eq!(
        view.tracks[1].instrument.as_ref().unwrap().label,
        "Second"
    );
}
