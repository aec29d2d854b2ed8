//! Diagnostic sinks for soft data-quality findings.
//!
//! Aggregation never fails on inconsistent instrumentation data. Findings
//! are reported through a [`DiagnosticSink`] supplied by the host and
//! processing always continues.

use crate::aggregator::histogram::HistogramKind;
use log::warn;
use serde::Serialize;
use std::fmt;

/// A histogram whose weighted lower bound meets or exceeds its reported total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramDiagnostic {
    /// Instance type owning the histogram
    pub instance_type: String,

    /// Which histogram was checked
    pub kind: HistogramKind,

    /// Weighted bucket sum
    pub sum: u64,

    /// Total the sum was checked against
    pub total: u64,
}

impl fmt::Display for HistogramDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: sum('{}') >= {} ({} >= {})",
            self.instance_type,
            self.kind.field_name(),
            self.kind.total_field_name(),
            self.sum,
            self.total
        )
    }
}

/// Receiver for diagnostics emitted during finalization
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: HistogramDiagnostic);
}

/// Forwards diagnostics to the `log` facade at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: HistogramDiagnostic) {
        warn!(target: "heap_stats::histogram", "{}", diagnostic);
    }
}

/// Collects diagnostics in report order
impl DiagnosticSink for Vec<HistogramDiagnostic> {
    fn report(&mut self, diagnostic: HistogramDiagnostic) {
        self.push(diagnostic);
    }
}
