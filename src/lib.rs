// Library for tests to access modules

pub mod collector;
pub mod config;
pub mod error;
pub mod log_tail;
pub mod models;
pub mod net_rate;
pub mod probes;
pub mod routes;
pub mod sysinfo_repo;
pub mod units;
pub mod version;
pub mod weather;
