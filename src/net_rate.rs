// Network throughput from successive cumulative counter readings

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Smallest elapsed time used for a rate; rapid repeated calls never divide by zero.
pub const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Cumulative interface counters (summed over all interfaces) at a point in time.
#[derive(Debug, Clone, Copy)]
pub struct CounterReading {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub at: Instant,
}

/// Result of one rate computation. Formatting is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    pub up_bytes_per_sec: f64,
    pub down_bytes_per_sec: f64,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    /// A counter went backwards (interface restart); the affected rate is reported as 0.
    pub counter_reset: bool,
}

/// Owns the previous reading. Reading the counters and swapping the stored reading happen
/// under one lock, so overlapping requests each see a consistent delta.
pub struct RateTracker {
    prev: Mutex<CounterReading>,
}

impl RateTracker {
    /// Seeds the tracker with a first real reading.
    pub fn new(seed: CounterReading) -> Self {
        Self {
            prev: Mutex::new(seed),
        }
    }

    /// Takes a reading with `read` while holding the lock, computes rates since the previous
    /// reading and stores the new one in its place.
    pub fn sample<F>(&self, read: F) -> anyhow::Result<RateSample>
    where
        F: FnOnce() -> anyhow::Result<CounterReading>,
    {
        let mut prev = self
            .prev
            .lock()
            .map_err(|e| anyhow::anyhow!("rate tracker lock poisoned: {}", e))?;
        let current = read()?;

        let dt = current
            .at
            .saturating_duration_since(prev.at)
            .max(MIN_ELAPSED)
            .as_secs_f64();
        let sent_delta = current.bytes_sent as f64 - prev.bytes_sent as f64;
        let recv_delta = current.bytes_recv as f64 - prev.bytes_recv as f64;
        let counter_reset = sent_delta < 0.0 || recv_delta < 0.0;

        *prev = current;

        Ok(RateSample {
            up_bytes_per_sec: sent_delta.max(0.0) / dt,
            down_bytes_per_sec: recv_delta.max(0.0) / dt,
            bytes_sent: current.bytes_sent,
            bytes_recv: current.bytes_recv,
            counter_reset,
        })
    }
}
