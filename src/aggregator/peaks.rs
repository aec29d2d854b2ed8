//! Folding GC events into peak memory statistics.
//!
//! Peaks are maxima over the immutable raw snapshots. A fresh
//! [`PeakStats`] is built on every finalization so repeated runs agree.

use super::dataset::finalize_dataset;
use crate::diagnostics::DiagnosticSink;
use crate::model::GcEvent;
use indexmap::{IndexMap, IndexSet};

/// Running maxima over the "live" datasets seen so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakStats {
    /// Largest live `overall`
    pub peak_memory: u64,

    /// Largest live `overall` per instance type, in first-seen order
    pub instance_type_peak_memory: IndexMap<String, u64>,
}

impl PeakStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize the event's datasets and fold its live data into the peaks
    ///
    /// **Public** - GC event finalizer, called once per event in capture order
    ///
    /// # Arguments
    /// * `event` - Snapshot to fold; its datasets receive rankings
    /// * `data_set_keys` - Dataset names known to the owning isolate
    /// * `sink` - Receiver for histogram diagnostics
    pub fn fold_gc_event(
        &mut self,
        event: &mut GcEvent,
        data_set_keys: &IndexSet<String>,
        sink: &mut dyn DiagnosticSink,
    ) {
        for key in data_set_keys {
            if let Some(dataset) = event.dataset_mut(key) {
                finalize_dataset(dataset, sink);
            }
        }

        // Snapshots without live data leave the peaks alone
        let Some(live) = event.live() else {
            return;
        };

        self.peak_memory = self.peak_memory.max(live.overall);
        for (name, entry) in &live.instance_type_data {
            let peak = self.instance_type_peak_memory.entry(name.clone()).or_insert(0);
            *peak = (*peak).max(entry.overall);
        }
    }
}
