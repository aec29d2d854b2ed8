//! Aggregation of GC snapshots into summary statistics.
//!
//! This module transforms an isolate's raw GC events into:
//! - Peak memory and per-instance-type peak memory
//! - Ascending instance type rankings per dataset
//! - Histogram sanity diagnostics
//! - A descending ranking of instance type peaks

pub mod dataset;
pub mod histogram;
pub mod peaks;
pub mod ranking;

// Re-export main types and functions
pub use dataset::finalize_dataset;
pub use histogram::{check_histogram, weighted_sum, HistogramKind};
pub use peaks::PeakStats;
pub use ranking::rank_instance_type_peaks;
