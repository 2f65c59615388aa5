//! Database repositories
//!
//! Free async functions over a `SqlitePool`, one module per entity.
//! Reference resolution is an explicit read path (`*_resolved` variants),
//! not a side effect of every query.

pub mod instruments;
pub mod samples;
pub mod sessions;
