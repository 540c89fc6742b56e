// Network throughput model

use serde::{Deserialize, Serialize};

/// Formatted throughput and cumulative totals across all interfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub up_rate: String,
    pub down_rate: String,
    pub sent: String,
    pub recv: String,
    #[serde(default)]
    pub counter_reset: bool,
}
