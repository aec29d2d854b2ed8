//! Error types for the crate.
//!
//! We use `thiserror` for library-style errors. Only loader-facing
//! population can fail; aggregation and queries are infallible.

use crate::model::GcId;
use thiserror::Error;

/// Errors that can occur while populating an isolate from raw records
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid isolate record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GC event {0} already recorded")]
    DuplicateGcEvent(GcId),

    #[error("Isolate address is empty")]
    EmptyAddress,
}
