//! Instrument database operations
//!
//! The `samples` and `mapping` collections are persisted as JSON documents
//! in TEXT columns; scalar fields stay real columns.

use gridbeat_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::samples::{find_sample, parse_timestamp};
use crate::models::{Instrument, InstrumentMapping, InstrumentMappingView, InstrumentView};

pub async fn insert_instrument(pool: &SqlitePool, instrument: &Instrument) -> Result<()> {
    let samples = serde_json::to_string(&instrument.samples)
        .map_err(|e| Error::Internal(format!("Failed to serialize samples: {}", e)))?;
    let mapping = serde_json::to_string(&instrument.mapping)
        .map_err(|e| Error::Internal(format!("Failed to serialize mapping: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO instruments (id, label, grouping, samples, mapping, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(instrument.id.to_string())
    .bind(&instrument.label)
    .bind(&instrument.group)
    .bind(&samples)
    .bind(&mapping)
    .bind(instrument.created_at.to_rfc3339())
    .bind(instrument.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_instrument(pool: &SqlitePool, id: Uuid) -> Result<Option<Instrument>> {
    let row = sqlx::query(
        r#"
        SELECT id, label, grouping, samples, mapping, created_at, updated_at
        FROM instruments
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(instrument_from_row).transpose()
}

pub async fn list_instruments(pool: &SqlitePool) -> Result<Vec<Instrument>> {
    let rows = sqlx::query(
        r#"
        SELECT id, label, grouping, samples, mapping, created_at, updated_at
        FROM instruments
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(instrument_from_row).collect()
}

/// Load an instrument with its sample references resolved. Dangling
/// references (a sample deleted after the instrument was created) resolve
/// to omission, and mapping rows whose sample is gone are dropped.
pub async fn find_instrument_resolved(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<InstrumentView>> {
    match find_instrument(pool, id).await? {
        Some(instrument) => Ok(Some(resolve_instrument(pool, instrument).await?)),
        None => Ok(None),
    }
}

pub async fn list_instruments_resolved(pool: &SqlitePool) -> Result<Vec<InstrumentView>> {
    let mut views = Vec::new();
    for instrument in list_instruments(pool).await? {
        views.push(resolve_instrument(pool, instrument).await?);
    }
    Ok(views)
}

pub(crate) async fn resolve_instrument(
    pool: &SqlitePool,
    instrument: Instrument,
) -> Result<InstrumentView> {
    let mut samples = Vec::with_capacity(instrument.samples.len());
    for sample_id in &instrument.samples {
        if let Some(sample) = find_sample(pool, *sample_id).await? {
            samples.push(sample);
        }
    }

    let mut mapping = Vec::with_capacity(instrument.mapping.len());
    for entry in &instrument.mapping {
        if let Some(sample) = samples.iter().find(|s| s.id == entry.sample) {
            mapping.push(InstrumentMappingView {
                note: entry.note,
                sample: sample.clone(),
                detune: entry.detune,
            });
        }
    }

    Ok(InstrumentView {
        id: instrument.id,
        label: instrument.label,
        group: instrument.group,
        samples,
        mapping,
        created_at: instrument.created_at,
        updated_at: instrument.updated_at,
    })
}

fn instrument_from_row(row: sqlx::sqlite::SqliteRow) -> Result<Instrument> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| Error::Internal(format!("Failed to parse instrument id: {}", e)))?;

    let samples: String = row.get("samples");
    let samples: Vec<Uuid> = serde_json::from_str(&samples)
        .map_err(|e| Error::Internal(format!("Failed to deserialize samples: {}", e)))?;

    let mapping: String = row.get("mapping");
    let mapping: Vec<InstrumentMapping> = serde_json::from_str(&mapping)
        .map_err(|e| Error::Internal(format!("Failed to deserialize mapping: {}", e)))?;

    Ok(Instrument {
        id,
        label: row.get("label"),
        group: row.get("grouping"),
        samples,
        mapping,
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}
