// Builds one Snapshot per request from the host probe, rate tracker and external probes.
// Every sub-probe fails soft: a failure is logged and replaced by its placeholder.

use crate::models::{MemoryUsage, NetworkInfo, Snapshot};
use crate::net_rate::RateTracker;
use crate::probes::{
    ContainerStatusProvider, ServiceStatusProvider, container_statuses, service_statuses,
};
use crate::sysinfo_repo::{HostIdentity, SysinfoRepo, rank_processes};
use crate::units::{format_bytes, format_rate, format_uptime};
use std::sync::Arc;

/// Repos and providers the collector samples from.
pub struct CollectorDeps {
    pub sysinfo_repo: Arc<SysinfoRepo>,
    pub services: Arc<dyn ServiceStatusProvider>,
    pub containers: Arc<dyn ContainerStatusProvider>,
}

/// What to sample; fixed for the process lifetime.
pub struct CollectorConfig {
    pub service_names: Vec<String>,
    pub top_processes: usize,
}

pub struct SnapshotCollector {
    sysinfo_repo: Arc<SysinfoRepo>,
    services: Arc<dyn ServiceStatusProvider>,
    containers: Arc<dyn ContainerStatusProvider>,
    identity: HostIdentity,
    rate_tracker: RateTracker,
    config: CollectorConfig,
}

impl SnapshotCollector {
    /// Reads host identity and seeds the rate tracker from a first real counter reading.
    pub fn new(deps: CollectorDeps, config: CollectorConfig) -> anyhow::Result<Self> {
        let CollectorDeps {
            sysinfo_repo,
            services,
            containers,
        } = deps;
        let identity = sysinfo_repo.host_identity();
        let rate_tracker = RateTracker::new(sysinfo_repo.net_counters()?);
        Ok(Self {
            sysinfo_repo,
            services,
            containers,
            identity,
            rate_tracker,
            config,
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        let repo = &self.sysinfo_repo;
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        let uptime_secs = repo.uptime_secs();

        let cpu_percent = match repo.cpu_percent().await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, operation = "cpu_percent", "CPU load failed");
                0.0
            }
        };
        let cpu_temperature = match repo.cpu_temperature().await {
            Ok(Ok(t)) => Some(t),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, operation = "cpu_temperature", "CPU temperature unavailable");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "cpu_temperature", "CPU temperature failed");
                None
            }
        };
        let (memory, swap) = match repo.memory().await {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, operation = "memory", "memory stats failed");
                (MemoryUsage::default(), MemoryUsage::default())
            }
        };
        let disks = match repo.disks().await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, operation = "disks", "disk stats failed");
                Vec::new()
            }
        };
        let network = self.network_info();
        let services = service_statuses(self.services.as_ref(), &self.config.service_names).await;
        let containers = container_statuses(self.containers.as_ref()).await;
        let top_processes = match repo.processes().await {
            Ok(all) => rank_processes(all, self.config.top_processes),
            Err(e) => {
                tracing::warn!(error = %e, operation = "processes", "process list failed");
                Vec::new()
            }
        };

        Snapshot {
            hostname: self.identity.hostname.clone(),
            system: self.identity.system.clone(),
            timestamp,
            uptime: format_uptime(uptime_secs),
            uptime_secs,
            cpu_percent,
            cpu_temperature,
            memory,
            swap,
            disks,
            network,
            services,
            containers,
            top_processes,
        }
    }

    fn network_info(&self) -> NetworkInfo {
        match self
            .rate_tracker
            .sample(|| self.sysinfo_repo.net_counters())
        {
            Ok(s) => {
                if s.counter_reset {
                    tracing::info!(operation = "net_rate", "network counter reset detected");
                }
                NetworkInfo {
                    up_rate: format_rate(s.up_bytes_per_sec),
                    down_rate: format_rate(s.down_bytes_per_sec),
                    sent: format_bytes(s.bytes_sent as f64),
                    recv: format_bytes(s.bytes_recv as f64),
                    counter_reset: s.counter_reset,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "net_rate", "network stats failed");
                NetworkInfo {
                    up_rate: format_rate(0.0),
                    down_rate: format_rate(0.0),
                    sent: format_bytes(0.0),
                    recv: format_bytes(0.0),
                    counter_reset: false,
                }
            }
        }
    }
}
