// Shared test helpers: fake external-tool providers and a wired-up router
#![allow(dead_code)]

use async_trait::async_trait;
use homedash::collector::{CollectorConfig, CollectorDeps, SnapshotCollector};
use homedash::config::AppConfig;
use homedash::error::ProbeError;
use homedash::models::{
    ContainerEntry, DiskEntry, MemoryUsage, NetworkInfo, ProcessEntry, ServiceEntry, Snapshot,
};
use homedash::probes::{ContainerStatusProvider, ServiceStatusProvider};
use homedash::sysinfo_repo::SysinfoRepo;
use homedash::weather::WeatherLocation;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Knows a fixed set of services; anything else fails like a missing unit.
pub struct FakeServices(pub HashMap<String, String>);

impl FakeServices {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

#[async_trait]
impl ServiceStatusProvider for FakeServices {
    async fn status(&self, service: &str) -> Result<String, ProbeError> {
        self.0
            .get(service)
            .cloned()
            .ok_or_else(|| ProbeError::ToolFailed {
                tool: "fake".into(),
                reason: format!("no such unit {}", service),
            })
    }
}

/// `None` behaves like an absent container runtime.
pub struct FakeContainers(pub Option<Vec<ContainerEntry>>);

#[async_trait]
impl ContainerStatusProvider for FakeContainers {
    async fn containers(&self) -> Result<Vec<ContainerEntry>, ProbeError> {
        self.0.clone().ok_or(ProbeError::ToolFailed {
            tool: "fake".into(),
            reason: "runtime missing".into(),
        })
    }
}

pub fn container(name: &str, status: &str) -> ContainerEntry {
    ContainerEntry {
        name: name.into(),
        status: status.into(),
    }
}

pub fn test_collector(service_names: &[&str]) -> Arc<SnapshotCollector> {
    let deps = CollectorDeps {
        sysinfo_repo: Arc::new(SysinfoRepo::new(Duration::from_millis(100))),
        services: Arc::new(FakeServices::with(&[("nginx", "active"), ("cron", "failed")])),
        containers: Arc::new(FakeContainers(Some(vec![container("db", "Up 2 hours")]))),
    };
    let config = CollectorConfig {
        service_names: service_names.iter().map(|s| s.to_string()).collect(),
        top_processes: 5,
    };
    Arc::new(SnapshotCollector::new(deps, config).expect("collector"))
}

pub fn test_weather() -> WeatherLocation {
    WeatherLocation {
        city: "Testville".into(),
        latitude: 10.0,
        longitude: 20.0,
    }
}

pub fn test_app(config: &AppConfig) -> axum::Router {
    homedash::routes::app(test_collector(&["nginx", "missing"]), test_weather(), config)
        .expect("router")
}

/// Fixed snapshot for serialization and rendering checks.
pub fn sample_snapshot(temp: Option<f64>) -> Snapshot {
    Snapshot {
        hostname: "box".into(),
        system: "Linux 6.1.0".into(),
        timestamp: "2026-01-02T03:04:05".into(),
        uptime: "1 day, 0:00:01".into(),
        uptime_secs: 86_401,
        cpu_percent: 12.5,
        cpu_temperature: temp,
        memory: MemoryUsage::from_used_total(512, 1024),
        swap: MemoryUsage::from_used_total(0, 0),
        disks: vec![DiskEntry {
            mount: "/".into(),
            total: 100,
            used: 25,
            percent: 25.0,
        }],
        network: NetworkInfo {
            up_rate: "1.0 KB/s".into(),
            down_rate: "2.0 KB/s".into(),
            sent: "3.0 MB".into(),
            recv: "4.0 MB".into(),
            counter_reset: false,
        },
        services: vec![ServiceEntry::unknown("nginx")],
        containers: vec![ContainerEntry {
            name: "db".into(),
            status: "Up 2 hours".into(),
        }],
        top_processes: vec![ProcessEntry {
            pid: 1,
            name: "init".into(),
            cpu_percent: 0.5,
            mem_percent: 0.1,
        }],
    }
}
