// Service and container status models

use serde::{Deserialize, Serialize};

/// Status reported when the service manager could not be queried.
pub const UNKNOWN_STATUS: &str = "unknown";

/// One configured service and the service manager's single-word answer
/// (`"active"`, `"inactive"`, `"failed"`, ... or [`UNKNOWN_STATUS`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub status: String,
}

impl ServiceEntry {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: UNKNOWN_STATUS.into(),
        }
    }
}

/// One container as listed by the container runtime, e.g. status `"Up 3 hours (healthy)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEntry {
    pub name: String,
    pub status: String,
}
