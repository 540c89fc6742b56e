// Top-N process ranking

use crate::models::ProcessEntry;

/// Name used when a process name cannot be read.
pub const UNKNOWN_PROCESS_NAME: &str = "?";

/// Sorts by CPU percentage, highest first, and keeps the first `n`.
/// The sort is stable: equal CPU values keep their enumeration order.
pub fn rank_processes(mut processes: Vec<ProcessEntry>, n: usize) -> Vec<ProcessEntry> {
    processes.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    processes.truncate(n);
    processes
}

/// Replaces unreadable fields with safe defaults instead of dropping the process.
pub fn process_entry(pid: u32, name: &str, cpu: f32, mem_percent: f64) -> ProcessEntry {
    let name = name.trim();
    ProcessEntry {
        pid,
        name: if name.is_empty() {
            UNKNOWN_PROCESS_NAME.to_string()
        } else {
            name.to_string()
        },
        cpu_percent: if cpu.is_finite() { cpu as f64 } else { 0.0 },
        mem_percent: if mem_percent.is_finite() {
            mem_percent
        } else {
            0.0
        },
    }
}
