//! Heap Stats
//!
//! Summary statistics over the garbage-collection snapshots of one
//! isolate, for use by a visualization layer.
//!
//! A loader fills an [`Isolate`] with raw GC events. A single
//! [`Isolate::finalize`] call then derives:
//! - peak memory and per-instance-type peak memory
//! - an ascending instance type ranking for every dataset
//! - a descending ranking of instance type peaks
//!
//! Inconsistent histograms are reported through a [`DiagnosticSink`] and
//! never stop processing.
//!
//! ```
//! use heap_stats::{Dataset, GcEvent, Isolate, TypeEntry};
//!
//! let mut live = Dataset::new(2_097_152, vec![16, 32]);
//! live.insert_type("STRING_TYPE", TypeEntry::new(2_097_152).with_histogram(vec![0, 4, 2]));
//!
//! let mut isolate = Isolate::new("0x1");
//! isolate.insert_gc_event(1, GcEvent::new().with_dataset("live", live)).unwrap();
//! isolate.finalize();
//!
//! assert_eq!(isolate.label(), "0x1: gc=#1 peak=2MB");
//! ```

pub mod aggregator;
pub mod diagnostics;
pub mod model;
pub mod utils;

pub use diagnostics::{DiagnosticSink, HistogramDiagnostic, LogSink};
pub use model::{Dataset, GcEvent, GcId, Isolate, IsolateRecord, TypeEntry};
pub use utils::ModelError;
