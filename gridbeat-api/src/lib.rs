//! gridbeat-api library interface
//!
//! Backend for the Gridbeat collaborative step sequencer: sessions, tracks,
//! instruments, and uploaded samples, persisted in SQLite and exposed over
//! an HTTP JSON API. Exposed as a library for integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod resolvers;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Root of statically served files; sample URLs are relative to it
    pub static_dir: PathBuf,
    /// Where uploaded sample files are written
    pub sample_dir: PathBuf,
}

impl AppState {
    pub fn new(db: SqlitePool, static_dir: PathBuf, sample_dir: PathBuf) -> Self {
        Self {
            db,
            static_dir,
            sample_dir,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let sample_files = ServeDir::new(state.sample_dir.clone());

    Router::new()
        .merge(api::sample_routes())
        .merge(api::instrument_routes())
        .merge(api::session_routes())
        .merge(api::health_routes())
        .nest_service("/samples", sample_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
