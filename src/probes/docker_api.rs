// Container status via the Docker Engine API (bollard)

use super::ContainerStatusProvider;
use crate::error::ProbeError;
use crate::models::ContainerEntry;
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::ListContainersOptions;
use bollard::models::ContainerSummary;

pub struct DockerApiContainers {
    docker: Docker,
}

impl DockerApiContainers {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerStatusProvider for DockerApiContainers {
    async fn containers(&self) -> Result<Vec<ContainerEntry>, ProbeError> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|e| ProbeError::ToolFailed {
                tool: "docker api".into(),
                reason: e.to_string(),
            })?;

        Ok(containers.into_iter().filter_map(summary_to_entry).collect())
    }
}

/// First name without the API's leading `/`, else the container id. `None` when neither is set.
pub fn summary_to_entry(summary: ContainerSummary) -> Option<ContainerEntry> {
    let name = summary
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/'))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or(summary.id)?;
    Some(ContainerEntry {
        name,
        status: summary.status.unwrap_or_default(),
    })
}
