// Snapshot JSON shape

mod common;

use common::sample_snapshot;
use homedash::models::{MemoryUsage, UNKNOWN_STATUS};

#[test]
fn memory_usage_percentage() {
    let m = MemoryUsage::from_used_total(256, 1024);
    assert_eq!(m.percent, 25.0);
    assert_eq!(MemoryUsage::from_used_total(10, 0).percent, 0.0);
}

#[test]
fn snapshot_serializes_camel_case() {
    let json = serde_json::to_value(sample_snapshot(Some(48.0))).unwrap();
    for key in [
        "hostname",
        "system",
        "timestamp",
        "uptime",
        "cpuPercent",
        "cpuTemperature",
        "memory",
        "swap",
        "disks",
        "network",
        "services",
        "containers",
        "topProcesses",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["network"]["upRate"], "1.0 KB/s");
    assert_eq!(json["topProcesses"][0]["cpuPercent"], 0.5);
    assert_eq!(json["memory"]["percent"], 50.0);
    assert_eq!(json["services"][0]["status"], UNKNOWN_STATUS);
}

#[test]
fn missing_temperature_is_null_not_sentinel() {
    let json = serde_json::to_value(sample_snapshot(None)).unwrap();
    assert!(json["cpuTemperature"].is_null());
}
