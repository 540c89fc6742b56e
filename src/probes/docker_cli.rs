// Container status via `docker ps`

use super::{ContainerStatusProvider, run_tool};
use crate::error::ProbeError;
use crate::models::ContainerEntry;
use async_trait::async_trait;
use std::time::Duration;

/// Separator between name and status in the requested `--format`.
pub const FORMAT_DELIMITER: char = '|';

pub struct DockerCliContainers {
    program: String,
    timeout: Duration,
}

impl DockerCliContainers {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ContainerStatusProvider for DockerCliContainers {
    async fn containers(&self) -> Result<Vec<ContainerEntry>, ProbeError> {
        let format = format!("{{{{.Names}}}}{}{{{{.Status}}}}", FORMAT_DELIMITER);
        let output = run_tool(
            &self.program,
            &["ps", "--all", "--format", &format],
            self.timeout,
        )
        .await?;
        if !output.success {
            return Err(ProbeError::ToolFailed {
                tool: self.program.clone(),
                reason: "non-zero exit".into(),
            });
        }
        Ok(parse_container_lines(&output.stdout))
    }
}

/// Parses `name|status` lines. Lines without the delimiter or with an empty name are skipped.
pub fn parse_container_lines(stdout: &str) -> Vec<ContainerEntry> {
    stdout
        .lines()
        .filter_map(|line| {
            let (name, status) = line.split_once(FORMAT_DELIMITER)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(ContainerEntry {
                name: name.to_string(),
                status: status.trim().to_string(),
            })
        })
        .collect()
}
