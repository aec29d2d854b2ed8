//! Sanity checks of bucketed histograms against reported totals.
//!
//! A histogram entry `i` counts objects whose size is at least
//! `bucket_sizes[i - 1]`, so `sum(histogram[i] * bucket_sizes[i - 1])` is a
//! lower bound for the bytes the entry represents. Index 0 is the overflow
//! bucket and has no fixed width, so it never contributes.

use crate::diagnostics::{DiagnosticSink, HistogramDiagnostic};
use crate::model::TypeEntry;
use log::trace;
use serde::Serialize;

/// The two histograms carried by every [`TypeEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramKind {
    /// `histogram`, checked against `overall`
    Histogram,
    /// `over_allocated_histogram`, checked against `over_allocated`
    OverAllocated,
}

impl HistogramKind {
    pub const ALL: [HistogramKind; 2] = [HistogramKind::Histogram, HistogramKind::OverAllocated];

    pub fn field_name(self) -> &'static str {
        match self {
            HistogramKind::Histogram => "histogram",
            HistogramKind::OverAllocated => "over_allocated_histogram",
        }
    }

    pub fn total_field_name(self) -> &'static str {
        match self {
            HistogramKind::Histogram => "overall",
            HistogramKind::OverAllocated => "over_allocated",
        }
    }

    /// Histogram counts and the total they are checked against
    fn select(self, entry: &TypeEntry) -> (&[u64], u64) {
        match self {
            HistogramKind::Histogram => (entry.histogram.as_slice(), entry.overall),
            HistogramKind::OverAllocated => {
                (entry.over_allocated_histogram.as_slice(), entry.over_allocated)
            }
        }
    }
}

/// Weighted lower bound of a histogram
///
/// Counts without a matching bucket width contribute nothing.
pub fn weighted_sum(histogram: &[u64], bucket_sizes: &[u64]) -> u64 {
    histogram
        .iter()
        .skip(1)
        .zip(bucket_sizes)
        .fold(0u64, |sum, (count, width)| {
            sum.saturating_add(count.saturating_mul(*width))
        })
}

/// Check one histogram of `entry`, reporting to `sink` when inconsistent
///
/// # Returns
/// `true` if the weighted sum stays below the total
pub fn check_histogram(
    instance_type: &str,
    entry: &TypeEntry,
    bucket_sizes: &[u64],
    kind: HistogramKind,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    let (histogram, total) = kind.select(entry);
    let sum = weighted_sum(histogram, bucket_sizes);
    trace!("{} {}: weighted sum {} vs {}", instance_type, kind.field_name(), sum, total);

    if sum < total {
        return true;
    }

    sink.report(HistogramDiagnostic {
        instance_type: instance_type.to_string(),
        kind,
        sum,
        total,
    });
    false
}
