// Sub-probe failure taxonomy. Every variant collapses to a placeholder value at the
// snapshot boundary; none of them reaches an HTTP client.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("no known sensor among {0} readings")]
    SensorNotFound(usize),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("{tool} failed: {reason}")]
    ToolFailed { tool: String, reason: String },

    #[error("{tool} timed out after {after:?}")]
    Timeout { tool: String, after: Duration },
}
