//! Isolate and GC snapshot data model.
//!
//! This module defines:
//! - The isolate entity and its query surface
//! - GC events, datasets and per-instance-type entries
//! - The raw isolate record accepted from loaders

pub mod gc_event;
pub mod isolate;

// Re-export main types
pub use gc_event::{Dataset, GcEvent, GcId, TypeEntry};
pub use isolate::{Isolate, IsolateRecord};
