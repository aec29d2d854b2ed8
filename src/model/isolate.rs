//! The isolate entity and its raw record form.

use super::gc_event::{GcEvent, GcId};
use crate::aggregator::{rank_instance_type_peaks, PeakStats};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::utils::config::{LABEL_PRECISION, MB, MILLIS_TO_SECONDS, ZONE_SAMPLES};
use crate::utils::error::ModelError;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};

/// Raw per-isolate record as produced by a loader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsolateRecord {
    pub address: String,

    /// Capture start in milliseconds
    #[serde(default)]
    pub start: Option<f64>,

    /// Capture end in milliseconds
    #[serde(default)]
    pub end: Option<f64>,

    #[serde(default)]
    pub zonetags: Vec<String>,

    /// Per-category samples passed through to the renderer
    #[serde(default)]
    pub samples: IndexMap<String, serde_json::Value>,

    #[serde(default, alias = "non_empty_instance_types")]
    pub non_empty_instance_types: IndexSet<String>,

    /// GC events in capture order
    #[serde(default, alias = "gcEvents")]
    pub gcs: IndexMap<GcId, GcEvent>,
}

impl IsolateRecord {
    /// Convert an in-memory JSON value into a record
    ///
    /// # Errors
    /// * `ModelError::Json` - Value does not have the record shape
    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// One profiled process instance
///
/// Raw fields are filled by a loader. Derived fields are only meaningful
/// after [`Isolate::finalize`] and are rebuilt from the raw fields on
/// every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Isolate {
    pub address: String,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub zonetags: Vec<String>,

    /// Per-category samples, starting with an empty "zone" entry
    pub samples: IndexMap<String, serde_json::Value>,

    /// Instance types non-empty in any dataset of any GC event
    pub non_empty_instance_types: IndexSet<String>,

    /// Dataset names present across all GC events
    pub data_set_keys: IndexSet<String>,

    /// GC events in capture order
    pub gc_events: IndexMap<GcId, GcEvent>,

    peak_memory: u64,
    instance_type_peak_memory: IndexMap<String, u64>,
    single_instance_type_peak_memory: u64,

    #[serde(skip)]
    finalized: bool,
}

impl Isolate {
    /// Empty isolate for incremental loading
    ///
    /// The address is not validated here; [`Isolate::from_record`] is the
    /// checked entry point for loader records.
    pub fn new(address: impl Into<String>) -> Self {
        let mut samples = IndexMap::new();
        samples.insert(ZONE_SAMPLES.to_string(), serde_json::json!({}));

        Self {
            address: address.into(),
            samples,
            ..Self::default()
        }
    }

    /// Build an unfinalized isolate from a raw record
    ///
    /// # Errors
    /// * `ModelError::EmptyAddress` - Record has no address, unlike
    ///   [`Isolate::new`] which accepts any
    pub fn from_record(record: IsolateRecord) -> Result<Self, ModelError> {
        if record.address.is_empty() {
            return Err(ModelError::EmptyAddress);
        }

        let mut isolate = Isolate::new(record.address);
        isolate.start = record.start;
        isolate.end = record.end;
        isolate.zonetags = record.zonetags;
        isolate.samples.extend(record.samples);
        isolate
            .non_empty_instance_types
            .extend(record.non_empty_instance_types);
        for (id, event) in record.gcs {
            isolate.insert_gc_event(id, event)?;
        }

        debug!(
            "Loaded isolate {} with {} GC events",
            isolate.address,
            isolate.gc_count()
        );
        Ok(isolate)
    }

    /// Append a GC event and record its dataset and non-empty type names
    ///
    /// Marks the isolate unfinalized until the next [`Isolate::finalize`].
    ///
    /// # Errors
    /// * `ModelError::DuplicateGcEvent` - `id` is already present
    pub fn insert_gc_event(&mut self, id: GcId, event: GcEvent) -> Result<(), ModelError> {
        match self.gc_events.entry(id) {
            Entry::Occupied(_) => Err(ModelError::DuplicateGcEvent(id)),
            Entry::Vacant(slot) => {
                self.data_set_keys
                    .extend(event.dataset_names().map(str::to_string));
                for (_, dataset) in event.datasets() {
                    self.non_empty_instance_types
                        .extend(dataset.non_empty_instance_types.iter().cloned());
                }
                slot.insert(event);
                self.finalized = false;
                Ok(())
            }
        }
    }

    pub fn gc_count(&self) -> usize {
        self.gc_events.len()
    }

    /// Capture length in seconds, when both bounds are known and ordered
    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some((end - start) * MILLIS_TO_SECONDS),
            _ => None,
        }
    }

    /// Derive all summary fields, logging histogram diagnostics
    ///
    /// See [`Isolate::finalize_with`].
    pub fn finalize(&mut self) {
        self.finalize_with(&mut LogSink);
    }

    /// Derive all summary fields, reporting histogram diagnostics to `sink`
    ///
    /// Runs the GC event finalizer over every event in capture order, then
    /// ranks instance type peaks. Idempotent.
    ///
    /// Must complete before any peak, label or ranking query. Nothing else
    /// may mutate the isolate while this runs.
    pub fn finalize_with(&mut self, sink: &mut dyn DiagnosticSink) {
        debug!(
            "Finalizing {} GC events for isolate {}",
            self.gc_events.len(),
            self.address
        );

        let mut stats = PeakStats::new();
        for event in self.gc_events.values_mut() {
            stats.fold_gc_event(event, &self.data_set_keys, sink);
        }

        let PeakStats {
            peak_memory,
            mut instance_type_peak_memory,
        } = stats;
        self.single_instance_type_peak_memory =
            rank_instance_type_peaks(&mut instance_type_peak_memory);
        self.peak_memory = peak_memory;
        self.instance_type_peak_memory = instance_type_peak_memory;
        self.finalized = true;

        debug!(
            "Isolate {}: peak {} bytes over {} instance types",
            self.address,
            self.peak_memory,
            self.instance_type_peak_memory.len()
        );
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Display label, e.g. `0x1: gc=#3 peak=2MB`
    pub fn label(&self) -> String {
        let peak_mb = self.peak_memory as f64 / MB as f64;
        let peak_mb = (peak_mb * LABEL_PRECISION).round() / LABEL_PRECISION;
        format!("{}: gc=#{} peak={}MB", self.address, self.gc_count(), peak_mb)
    }

    /// Largest live `overall` over all GC events, 0 if none had live data
    pub fn peak_memory(&self) -> u64 {
        self.peak_memory
    }

    /// Per-instance-type peaks, largest first
    pub fn instance_type_peak_memory(&self) -> &IndexMap<String, u64> {
        &self.instance_type_peak_memory
    }

    /// Peak for `instance_type`, 0 if it was never observed
    pub fn instance_type_peak(&self, instance_type: &str) -> u64 {
        self.instance_type_peak_memory
            .get(instance_type)
            .copied()
            .unwrap_or(0)
    }

    /// Largest peak of any single instance type
    pub fn single_instance_type_peak_memory(&self) -> u64 {
        self.single_instance_type_peak_memory
    }

    /// Ascending ranking of one dataset within one GC event
    pub fn ranked_instance_types(&self, gc: GcId, dataset: &str) -> Option<&[String]> {
        self.gc_events
            .get(&gc)?
            .dataset(dataset)
            .map(|data| data.ranked_instance_types())
    }
}
