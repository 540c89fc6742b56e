// Domain models for one dashboard snapshot

mod container;
mod network;
mod process;
mod storage;
mod system;

pub use container::{ContainerEntry, ServiceEntry, UNKNOWN_STATUS};
pub use network::NetworkInfo;
pub use process::ProcessEntry;
pub use storage::DiskEntry;
pub use system::{MemoryUsage, Snapshot};
