//! Sample database operations

use chrono::{DateTime, Utc};
use gridbeat_common::Result;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::Sample;

/// Partial patch for `update_sample`; absent fields are left untouched
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SamplePatch {
    pub label: Option<String>,
    pub group: Option<String>,
}

pub async fn insert_sample(pool: &SqlitePool, sample: &Sample) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO samples (id, url, filename, mime_type, label, grouping, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(sample.id.to_string())
    .bind(&sample.url)
    .bind(&sample.filename)
    .bind(&sample.mime_type)
    .bind(&sample.label)
    .bind(&sample.group)
    .bind(sample.created_at.to_rfc3339())
    .bind(sample.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_sample(pool: &SqlitePool, id: Uuid) -> Result<Option<Sample>> {
    let row = sqlx::query(
        r#"
        SELECT id, url, filename, mime_type, label, grouping, created_at, updated_at
        FROM samples
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(sample_from_row).transpose()
}

pub async fn list_samples(pool: &SqlitePool) -> Result<Vec<Sample>> {
    let rows = sqlx::query(
        r#"
        SELECT id, url, filename, mime_type, label, grouping, created_at, updated_at
        FROM samples
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(sample_from_row).collect()
}

/// Apply a partial patch; only provided fields change, `updated_at` is
/// refreshed. Returns the updated record, `None` when the id is unknown.
pub async fn update_sample(
    pool: &SqlitePool,
    id: Uuid,
    patch: &SamplePatch,
) -> Result<Option<Sample>> {
    let Some(mut sample) = find_sample(pool, id).await? else {
        return Ok(None);
    };

    if let Some(label) = &patch.label {
        sample.label = label.clone();
    }
    if let Some(group) = &patch.group {
        sample.group = Some(group.clone());
    }
    sample.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE samples
        SET label = ?, grouping = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&sample.label)
    .bind(&sample.group)
    .bind(sample.updated_at.to_rfc3339())
    .bind(id.to_string())
    .execute(pool)
    .await?;

    Ok(Some(sample))
}

/// Delete the record, returning it; `None` when the id is unknown
pub async fn delete_sample(pool: &SqlitePool, id: Uuid) -> Result<Option<Sample>> {
    let Some(sample) = find_sample(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM samples WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(Some(sample))
}

fn sample_from_row(row: sqlx::sqlite::SqliteRow) -> Result<Sample> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| gridbeat_common::Error::Internal(format!("Failed to parse sample id: {}", e)))?;

    Ok(Sample {
        id,
        url: row.get("url"),
        filename: row.get("filename"),
        mime_type: row.get("mime_type"),
        label: row.get("label"),
        group: row.get("grouping"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

pub(crate) fn parse_timestamp(value: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| gridbeat_common::Error::Internal(format!("Failed to parse timestamp: {}", e)))
}
