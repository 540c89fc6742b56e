use anyhow::Result;
use homedash::collector::{CollectorConfig, CollectorDeps, SnapshotCollector};
use homedash::config::{AppConfig, ContainerBackend};
use homedash::probes::{
    ContainerStatusProvider, DockerApiContainers, DockerCliContainers, SystemctlServices,
};
use homedash::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, operation = "load_config", "config unusable; falling back to defaults");
            AppConfig::from_env()?
        }
    };
    tracing::info!(
        version = version::VERSION,
        services = app_config.services.names.len(),
        auth = app_config.auth.token.is_some(),
        "starting {}",
        version::NAME
    );

    let probes = &app_config.probes;
    let command_timeout = Duration::from_millis(probes.command_timeout_ms);
    let sysinfo_repo = Arc::new(sysinfo_repo::SysinfoRepo::new(Duration::from_millis(
        probes.cpu_sample_ms,
    )));
    let services = Arc::new(SystemctlServices::new(
        probes.service_manager.clone(),
        command_timeout,
    ));
    let containers: Arc<dyn ContainerStatusProvider> = match probes.container_backend {
        ContainerBackend::Cli => Arc::new(DockerCliContainers::new(
            probes.container_runtime.clone(),
            command_timeout,
        )),
        ContainerBackend::Api => match DockerApiContainers::connect() {
            Ok(api) => Arc::new(api),
            Err(e) => {
                tracing::warn!(error = %e, "Docker API unavailable; using the CLI");
                Arc::new(DockerCliContainers::new(
                    probes.container_runtime.clone(),
                    command_timeout,
                ))
            }
        },
    };

    let collector = Arc::new(SnapshotCollector::new(
        CollectorDeps {
            sysinfo_repo,
            services,
            containers,
        },
        CollectorConfig {
            service_names: app_config.services.names.clone(),
            top_processes: probes.top_processes,
        },
    )?);
    let weather = weather::resolve(&app_config.weather).await;

    let app = routes::app(collector, weather, &app_config)?;
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
