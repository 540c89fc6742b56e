// Memory usage and the full snapshot record

use serde::{Deserialize, Serialize};

use super::{ContainerEntry, DiskEntry, NetworkInfo, ProcessEntry, ServiceEntry};

/// Used/total bytes plus percentage; shared by RAM and swap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub used: u64,
    pub total: u64,
    pub percent: f64,
}

impl MemoryUsage {
    pub fn from_used_total(used: u64, total: u64) -> Self {
        let percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            used,
            total,
            percent,
        }
    }
}

/// Everything sampled for one request. Built once, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hostname: String,
    pub system: String,
    /// Local time, ISO-8601 with second precision.
    pub timestamp: String,
    pub uptime: String,
    pub uptime_secs: u64,
    pub cpu_percent: f64,
    /// Absent when no known CPU sensor exists on this host.
    pub cpu_temperature: Option<f64>,
    pub memory: MemoryUsage,
    pub swap: MemoryUsage,
    pub disks: Vec<DiskEntry>,
    pub network: NetworkInfo,
    pub services: Vec<ServiceEntry>,
    pub containers: Vec<ContainerEntry>,
    pub top_processes: Vec<ProcessEntry>,
}
