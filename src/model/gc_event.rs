//! Per-GC snapshot records: datasets and per-instance-type entries.
//!
//! Field names follow the loader's record shape. Both camelCase and the
//! snake_case names emitted by the heap stats tracer are accepted.

use crate::utils::config::LIVE_DATASET;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Identifier of one GC pause
pub type GcId = u64;

/// Stats for one instance type within a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    /// Bytes attributed to this type
    #[serde(default)]
    pub overall: u64,

    /// Bucket-indexed object counts; index 0 is the overflow bucket
    #[serde(default)]
    pub histogram: Vec<u64>,

    /// Bytes wasted by allocation rounding
    #[serde(default, alias = "over_allocated")]
    pub over_allocated: u64,

    /// Bucket-indexed counts of over-allocated objects
    #[serde(default, alias = "over_allocated_histogram")]
    pub over_allocated_histogram: Vec<u64>,
}

impl TypeEntry {
    pub fn new(overall: u64) -> Self {
        Self {
            overall,
            ..Self::default()
        }
    }

    pub fn with_histogram(mut self, histogram: Vec<u64>) -> Self {
        self.histogram = histogram;
        self
    }

    pub fn with_over_allocated(mut self, over_allocated: u64, histogram: Vec<u64>) -> Self {
        self.over_allocated = over_allocated;
        self.over_allocated_histogram = histogram;
        self
    }
}

/// One named category of memory statistics within a GC event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Total bytes in this dataset
    #[serde(default)]
    pub overall: u64,

    /// Increasing bucket-width boundaries shared by all histograms
    #[serde(default, alias = "bucket_sizes")]
    pub bucket_sizes: Vec<u64>,

    /// Instance types with non-zero data
    #[serde(default, alias = "non_empty_instance_types")]
    pub non_empty_instance_types: IndexSet<String>,

    #[serde(default, alias = "instance_type_data")]
    pub instance_type_data: IndexMap<String, TypeEntry>,

    /// Non-empty instance types ordered ascending by size; set by finalize
    #[serde(default, skip_deserializing)]
    pub(crate) ranked_instance_types: Vec<String>,
}

impl Dataset {
    pub fn new(overall: u64, bucket_sizes: Vec<u64>) -> Self {
        Self {
            overall,
            bucket_sizes,
            ..Self::default()
        }
    }

    /// Add or replace an instance type, keeping the non-empty set in step
    pub fn insert_type(&mut self, name: impl Into<String>, entry: TypeEntry) {
        let name = name.into();
        if entry.overall > 0 {
            self.non_empty_instance_types.insert(name.clone());
        } else {
            self.non_empty_instance_types.shift_remove(&name);
        }
        self.instance_type_data.insert(name, entry);
    }

    /// Bytes recorded for `name`, 0 when the type is absent
    pub fn type_overall(&self, name: &str) -> u64 {
        self.instance_type_data
            .get(name)
            .map_or(0, |entry| entry.overall)
    }

    /// Ascending-by-size ranking; empty until the owning isolate is finalized
    pub fn ranked_instance_types(&self) -> &[String] {
        &self.ranked_instance_types
    }
}

/// One GC pause's snapshot, keyed by dataset name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GcEvent {
    datasets: IndexMap<String, Dataset>,
}

impl GcEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, name: impl Into<String>, dataset: Dataset) -> Self {
        self.insert_dataset(name, dataset);
        self
    }

    pub fn insert_dataset(&mut self, name: impl Into<String>, dataset: Dataset) {
        self.datasets.insert(name.into(), dataset);
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub(crate) fn dataset_mut(&mut self, name: &str) -> Option<&mut Dataset> {
        self.datasets.get_mut(name)
    }

    /// The "live" dataset, absent for snapshots focused on other datasets
    pub fn live(&self) -> Option<&Dataset> {
        self.dataset(LIVE_DATASET)
    }

    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn datasets(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.datasets.iter().map(|(name, data)| (name.as_str(), data))
    }
}
