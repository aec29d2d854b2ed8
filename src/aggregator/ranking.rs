//! Descending ranking of per-instance-type peak memory.

use indexmap::IndexMap;

/// Reorder peaks largest first and return the single largest peak
///
/// **Public** - last step of isolate finalization
///
/// Key/value pairs are unchanged. Returns 0 for an empty map.
pub fn rank_instance_type_peaks(peaks: &mut IndexMap<String, u64>) -> u64 {
    peaks.sort_by(|_, a, _, b| b.cmp(a));
    peaks.values().copied().max().unwrap_or(0)
}
