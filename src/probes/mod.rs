// External-tool probes: service manager and container runtime

mod docker_api;
mod docker_cli;
mod systemctl;

pub use docker_api::{DockerApiContainers, summary_to_entry};
pub use docker_cli::{DockerCliContainers, FORMAT_DELIMITER, parse_container_lines};
pub use systemctl::{SystemctlServices, parse_service_status};

use crate::error::ProbeError;
use crate::models::{ContainerEntry, ServiceEntry};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Answers "is this service running?" for one configured service name.
#[async_trait]
pub trait ServiceStatusProvider: Send + Sync {
    async fn status(&self, service: &str) -> Result<String, ProbeError>;
}

/// Lists containers known to the runtime.
#[async_trait]
pub trait ContainerStatusProvider: Send + Sync {
    async fn containers(&self) -> Result<Vec<ContainerEntry>, ProbeError>;
}

/// Queries every service in configuration order; any failure becomes `"unknown"`.
pub async fn service_statuses(
    provider: &dyn ServiceStatusProvider,
    names: &[String],
) -> Vec<ServiceEntry> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let entry = match provider.status(name).await {
            Ok(status) => ServiceEntry {
                name: name.clone(),
                status,
            },
            Err(e) => {
                tracing::debug!(service = %name, error = %e, "service status unavailable");
                ServiceEntry::unknown(name.clone())
            }
        };
        out.push(entry);
    }
    out
}

/// Container list, or empty when the runtime cannot be queried.
pub async fn container_statuses(provider: &dyn ContainerStatusProvider) -> Vec<ContainerEntry> {
    match provider.containers().await {
        Ok(list) => list,
        Err(e) => {
            tracing::debug!(error = %e, "container status unavailable");
            Vec::new()
        }
    }
}

/// Captured result of one external command.
#[derive(Debug)]
pub(crate) struct ToolOutput {
    pub success: bool,
    pub stdout: String,
}

/// Runs `program args...` with stdin closed, stderr discarded and a hard timeout.
/// The child is killed if the timeout fires.
pub(crate) async fn run_tool(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<ToolOutput, ProbeError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        }),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ProbeError::PermissionDenied(program.to_string()))
        }
        Ok(Err(e)) => Err(ProbeError::ToolFailed {
            tool: program.to_string(),
            reason: e.to_string(),
        }),
        Err(_elapsed) => Err(ProbeError::Timeout {
            tool: program.to_string(),
            after: timeout,
        }),
    }
}
