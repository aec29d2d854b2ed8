//! Configuration and constants for heap statistics.

/// Bytes per kilobyte
pub const KB: u64 = 1024;

/// Bytes per megabyte
pub const MB: u64 = KB * KB;

/// Dataset holding currently reachable objects; the only one feeding peaks
pub const LIVE_DATASET: &str = "live";

/// Sample category every isolate starts with
pub const ZONE_SAMPLES: &str = "zone";

// Isolate time bounds are recorded in milliseconds
pub const MILLIS_TO_SECONDS: f64 = 1.0 / 1000.0;

/// Labels round megabytes to hundredths
pub const LABEL_PRECISION: f64 = 100.0;
