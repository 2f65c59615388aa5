//! Shared types for the Gridbeat backend
//!
//! Error taxonomy, pure validation primitives, the track color palette,
//! configuration resolution, and database bootstrap.

pub mod color;
pub mod config;
pub mod db;
pub mod error;
pub mod validators;

pub use error::{Error, Result};
