// Disk usage model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskEntry {
    pub mount: String,
    pub total: u64,
    pub used: u64,
    pub percent: f64,
}
