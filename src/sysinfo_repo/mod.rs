// Host metrics via sysinfo

mod linux;
mod processes;

pub use processes::{UNKNOWN_PROCESS_NAME, process_entry, rank_processes};

use crate::error::ProbeError;
use crate::models::{DiskEntry, MemoryUsage, ProcessEntry};
use crate::net_rate::CounterReading;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sysinfo::{Components, Disks, Networks, ProcessesToUpdate, System};
use tracing::instrument;

/// Sensor label prefixes that identify a CPU package sensor, highest priority first.
pub const CPU_SENSOR_LABELS: [&str; 7] = [
    "coretemp",
    "k10temp",
    "zenpower",
    "cpu_thermal",
    "cpu-thermal",
    "soc_thermal",
    "acpitz",
];

/// Static host identity; read once at startup.
#[derive(Debug, Clone)]
pub struct HostIdentity {
    pub hostname: String,
    /// e.g. "Debian GNU/Linux 12 (bookworm) 6.1.0-18-amd64"
    pub system: String,
}

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    components: Arc<std::sync::Mutex<Components>>,
    cpu_window: Duration,
}

impl SysinfoRepo {
    /// `cpu_window` is how long each CPU-load sample blocks; raised to sysinfo's minimum if lower.
    pub fn new(cpu_window: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(std::sync::Mutex::new(Networks::new_with_refreshed_list())),
            components: Arc::new(std::sync::Mutex::new(Components::new_with_refreshed_list())),
            cpu_window: cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn host_identity(&self) -> HostIdentity {
        let hostname = System::host_name().unwrap_or_else(|| "unknown".into());
        let os = linux::read_os_pretty_name_linux()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.into());
        let system = match System::kernel_version() {
            Some(kernel) if !kernel.is_empty() => format!("{} {}", os, kernel),
            _ => os,
        };
        HostIdentity { hostname, system }
    }

    /// Whole seconds since boot.
    pub fn uptime_secs(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        now.saturating_sub(System::boot_time())
    }

    /// Blocks for the configured window on a private sampler, so concurrent callers
    /// each pay their own window rather than queueing on a shared lock.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_percent"))]
    pub async fn cpu_percent(&self) -> anyhow::Result<f64> {
        let window = self.cpu_window;
        tokio::task::spawn_blocking(move || {
            let mut sampler = System::new();
            sampler.refresh_cpu_usage();
            std::thread::sleep(window);
            sampler.refresh_cpu_usage();
            Ok((sampler.global_cpu_usage() as f64).clamp(0.0, 100.0))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// RAM and swap, read from one refresh.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    pub async fn memory(&self) -> anyhow::Result<(MemoryUsage, MemoryUsage)> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let used = total.saturating_sub(sys.available_memory());
            let ram = MemoryUsage::from_used_total(used, total);
            let swap = MemoryUsage::from_used_total(sys.used_swap(), sys.total_swap());
            Ok((ram, swap))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Mounted partitions with a filesystem type. Mounts whose usage cannot be read
    /// (sysinfo reports zero size, e.g. permission denied) are skipped.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "disks"))]
    pub async fn disks(&self) -> anyhow::Result<Vec<DiskEntry>> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(true);
            let entries = disks_guard
                .list()
                .iter()
                .filter(|d| !d.file_system().is_empty())
                .filter_map(|d| {
                    let total = d.total_space();
                    if total == 0 {
                        tracing::debug!(
                            mount = %d.mount_point().display(),
                            "skipping mount without readable usage"
                        );
                        return None;
                    }
                    let used = total.saturating_sub(d.available_space());
                    Some(DiskEntry {
                        mount: d.mount_point().to_string_lossy().into_owned(),
                        total,
                        used,
                        percent: (used as f64 / total as f64) * 100.0,
                    })
                })
                .collect();
            Ok(entries)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_temperature"))]
    pub async fn cpu_temperature(&self) -> anyhow::Result<Result<f64, ProbeError>> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let mut components = components
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo components lock poisoned: {}", e))?;
            components.refresh(true);
            Ok(pick_cpu_temperature(
                components.list().iter().map(|c| (c.label(), c.temperature())),
            ))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Cumulative bytes over all interfaces, stamped with the read time.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "net_counters"))]
    pub fn net_counters(&self) -> anyhow::Result<CounterReading> {
        let mut networks = self
            .networks
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
        networks.refresh(true);
        let (bytes_sent, bytes_recv) = networks
            .list()
            .values()
            .fold((0u64, 0u64), |(tx, rx), data| {
                (
                    tx.saturating_add(data.total_transmitted()),
                    rx.saturating_add(data.total_received()),
                )
            });
        Ok(CounterReading {
            bytes_sent,
            bytes_recv,
            at: Instant::now(),
        })
    }

    /// Every visible process in ascending PID order; CPU is usage since the previous call.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "processes"))]
    pub async fn processes(&self) -> anyhow::Result<Vec<ProcessEntry>> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            sys.refresh_cpu_usage();
            sys.refresh_processes(ProcessesToUpdate::All, true);

            let total_memory = sys.total_memory();
            let mut entries: Vec<ProcessEntry> = sys
                .processes()
                .values()
                .map(|p| {
                    let mem_percent = if total_memory > 0 {
                        (p.memory() as f64 / total_memory as f64) * 100.0
                    } else {
                        0.0
                    };
                    process_entry(
                        p.pid().as_u32(),
                        &p.name().to_string_lossy(),
                        p.cpu_usage(),
                        mem_percent,
                    )
                })
                .collect();
            entries.sort_by_key(|p| p.pid);
            Ok(entries)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

/// Picks the first reading whose label starts with a known CPU sensor name, in
/// [`CPU_SENSOR_LABELS`] priority order. No readings at all means the platform exposes none.
pub fn pick_cpu_temperature<'a>(
    readings: impl IntoIterator<Item = (&'a str, Option<f32>)>,
) -> Result<f64, ProbeError> {
    let readings: Vec<(String, f32)> = readings
        .into_iter()
        .filter_map(|(label, temp)| temp.map(|t| (label.to_lowercase(), t)))
        .filter(|(_, t)| t.is_finite())
        .collect();
    if readings.is_empty() {
        return Err(ProbeError::Unsupported("temperature sensors"));
    }
    CPU_SENSOR_LABELS
        .iter()
        .find_map(|wanted| {
            readings
                .iter()
                .find(|(label, _)| label.starts_with(wanted))
                .map(|(_, t)| *t as f64)
        })
        .ok_or(ProbeError::SensorNotFound(readings.len()))
}
