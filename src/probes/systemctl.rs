// Service status via `systemctl is-active`

use super::{ServiceStatusProvider, run_tool};
use crate::error::ProbeError;
use async_trait::async_trait;
use std::time::Duration;

pub struct SystemctlServices {
    program: String,
    timeout: Duration,
}

impl SystemctlServices {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ServiceStatusProvider for SystemctlServices {
    async fn status(&self, service: &str) -> Result<String, ProbeError> {
        // is-active exits non-zero for inactive/failed units but still prints the state
        let output = run_tool(&self.program, &["is-active", service], self.timeout).await?;
        parse_service_status(&output.stdout).ok_or_else(|| ProbeError::ToolFailed {
            tool: self.program.clone(),
            reason: format!("no status for {} (success={})", service, output.success),
        })
    }
}

/// First word of the tool's answer, e.g. `"active"`. `None` when there is nothing to parse.
pub fn parse_service_status(stdout: &str) -> Option<String> {
    stdout.split_whitespace().next().map(str::to_string)
}
