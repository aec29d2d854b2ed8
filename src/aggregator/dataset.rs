//! Per-dataset finalization: instance type ranking and histogram checks.

use super::histogram::{check_histogram, HistogramKind};
use crate::diagnostics::DiagnosticSink;
use crate::model::Dataset;
use log::debug;

/// Rank the dataset's instance types and validate every histogram
///
/// **Public** - called once per dataset by the GC event finalizer
///
/// Overwrites any previous ranking. Diagnostics go to `sink`; this
/// never fails.
pub fn finalize_dataset(dataset: &mut Dataset, sink: &mut dyn DiagnosticSink) {
    dataset.ranked_instance_types = rank_by_size(dataset);

    for (name, entry) in &dataset.instance_type_data {
        for kind in HistogramKind::ALL {
            check_histogram(name, entry, &dataset.bucket_sizes, kind, sink);
        }
    }
}

/// Non-empty instance types ordered ascending by `overall`
///
/// **Private** - ties keep their non-empty set order
fn rank_by_size(dataset: &Dataset) -> Vec<String> {
    let mut ranked: Vec<String> = dataset.non_empty_instance_types.iter().cloned().collect();
    ranked.sort_by_key(|name| dataset.type_overall(name));

    debug!("Ranked {} non-empty instance types", ranked.len());
    ranked
}
