use heap_stats::{HistogramDiagnostic, Isolate, IsolateRecord, ModelError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_record() -> serde_json::Value {
    json!({
        "address": "0x2a3f",
        "start": 100.0,
        "end": 4100.0,
        "zonetags": ["parse", "compile"],
        "samples": { "parse": { "1": 512 } },
        "gcs": {
            "1": {
                "live": {
                    "overall": 3145728,
                    "bucket_sizes": [32, 64, 128],
                    "non_empty_instance_types": ["STRING_TYPE", "FIXED_ARRAY_TYPE"],
                    "instance_type_data": {
                        "STRING_TYPE": {
                            "overall": 1048576,
                            "histogram": [0, 10, 5, 1],
                            "over_allocated": 64,
                            "over_allocated_histogram": [0, 1, 0, 0]
                        },
                        "FIXED_ARRAY_TYPE": {
                            "overall": 2097152,
                            "histogram": [3, 0, 0, 2],
                            "over_allocated": 128,
                            "over_allocated_histogram": [0, 0, 1, 0]
                        }
                    }
                }
            },
            "2": {
                "zone": {
                    "overall": 4096,
                    "bucketSizes": [32],
                    "nonEmptyInstanceTypes": ["ZONE_TYPE"],
                    "instanceTypeData": {
                        "ZONE_TYPE": {
                            "overall": 4096,
                            "histogram": [0, 4],
                            "overAllocated": 16,
                            "overAllocatedHistogram": [0, 0]
                        }
                    }
                }
            }
        }
    })
}

#[test]
fn test_record_from_json() {
    let record = IsolateRecord::from_json(sample_record()).unwrap();

    assert_eq!(record.address, "0x2a3f");
    assert_eq!(record.zonetags, vec!["parse", "compile"]);
    assert_eq!(record.gcs.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_record_from_json_rejects_wrong_shape() {
    let err = IsolateRecord::from_json(json!({ "address": 12 })).unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
}

#[test]
fn test_isolate_from_record_end_to_end() {
    let record = IsolateRecord::from_json(sample_record()).unwrap();
    let mut isolate = Isolate::from_record(record).unwrap();

    assert_eq!(
        isolate.data_set_keys.iter().collect::<Vec<_>>(),
        vec!["live", "zone"]
    );
    assert_eq!(isolate.duration_seconds(), Some(4.0));
    assert_eq!(
        isolate.non_empty_instance_types.iter().collect::<Vec<_>>(),
        vec!["STRING_TYPE", "FIXED_ARRAY_TYPE", "ZONE_TYPE"]
    );
    assert_eq!(isolate.samples.keys().collect::<Vec<_>>(), vec!["zone", "parse"]);

    let mut sink: Vec<HistogramDiagnostic> = Vec::new();
    isolate.finalize_with(&mut sink);

    assert!(sink.is_empty());
    assert_eq!(isolate.peak_memory(), 3_145_728);
    assert_eq!(isolate.label(), "0x2a3f: gc=#2 peak=3MB");
    assert_eq!(
        isolate.instance_type_peak_memory().keys().collect::<Vec<_>>(),
        vec!["FIXED_ARRAY_TYPE", "STRING_TYPE"]
    );
    assert_eq!(isolate.single_instance_type_peak_memory(), 2_097_152);
    assert_eq!(isolate.instance_type_peak("ZONE_TYPE"), 0);
    assert_eq!(
        isolate.ranked_instance_types(1, "live").unwrap(),
        ["STRING_TYPE", "FIXED_ARRAY_TYPE"]
    );
    assert_eq!(isolate.ranked_instance_types(2, "zone").unwrap(), ["ZONE_TYPE"]);
}

#[test]
fn test_finalized_isolate_serializes_summary() {
    let record = IsolateRecord::from_json(sample_record()).unwrap();
    let mut isolate = Isolate::from_record(record).unwrap();
    isolate.finalize();

    let value = serde_json::to_value(&isolate).unwrap();
    assert_eq!(value["peakMemory"], json!(3_145_728));
    assert_eq!(value["singleInstanceTypePeakMemory"], json!(2_097_152));
    assert_eq!(
        value["gcEvents"]["1"]["live"]["rankedInstanceTypes"],
        json!(["STRING_TYPE", "FIXED_ARRAY_TYPE"])
    );
}
