//! Database initialization
//!
//! Opens (or creates) the SQLite database and brings the schema up to date.
//! Every `create_*_table` function is idempotent so startup and tests share
//! the same bootstrap path.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_all_tables(&pool).await?;

    Ok(pool)
}

/// Create every entity table (idempotent, shared with tests)
pub async fn create_all_tables(pool: &SqlitePool) -> Result<()> {
    create_samples_table(pool).await?;
    create_instruments_table(pool).await?;
    create_sessions_table(pool).await?;
    Ok(())
}

/// Create the samples table
///
/// Stores uploaded audio file metadata. `grouping` holds the user-facing
/// "group" field (reserved word in SQL).
pub async fn create_samples_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS samples (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL UNIQUE,
            filename TEXT NOT NULL,
            mime_type TEXT NOT NULL,
            label TEXT NOT NULL,
            grouping TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the instruments table
///
/// `samples` and `mapping` are JSON documents: the deduplicated sample
/// reference set and the ordered note-to-sample mapping.
pub async fn create_instruments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instruments (
            id TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            grouping TEXT NOT NULL DEFAULT 'NO_GROUP',
            samples TEXT NOT NULL,
            mapping TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the sessions table
///
/// The aggregate's ordered/nested collections (`track_order`, `tracks`,
/// `instruments`, `samples`) are JSON documents; JSON arrays preserve both
/// order and duplicate entries, which the attach mutation relies on.
pub async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            creator_id TEXT NOT NULL,
            tempo REAL NOT NULL DEFAULT 120.0,
            master_gain REAL NOT NULL DEFAULT 1.0,
            active_track_id TEXT,
            active_cell_beat INTEGER,
            track_order TEXT NOT NULL,
            tracks TEXT NOT NULL,
            instruments TEXT NOT NULL,
            samples TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (tempo > 0.0),
            CHECK (active_cell_beat IS NULL OR active_cell_beat > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_creator ON sessions(creator_id)")
        .execute(pool)
        .await?;

    Ok(())
}
