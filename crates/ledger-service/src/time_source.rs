//! Abstract wall-clock source, so `accept_ledger` is testable without
//! sleeping (spec §4.8: close time is assigned by the driver at close).
//!
//! Grounded on `qc-02-block-storage::ports::outbound::TimeSource` /
//! `SystemTimeSource` — a one-method trait plus a `SystemTime`-backed
//! default, generalized from Unix seconds to seconds since the ledger
//! epoch (spec §6).

use ledger_types::LEDGER_EPOCH_UNIX_OFFSET;

pub trait TimeSource: Send + Sync {
    /// Seconds since the ledger epoch (spec §6).
    fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        let unix_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        unix_secs.saturating_sub(LEDGER_EPOCH_UNIX_OFFSET)
    }
}

/// A fixed, manually-advanced clock for deterministic tests.
#[derive(Debug)]
pub struct FixedTimeSource {
    ticks: parking_lot::Mutex<u64>,
}

impl FixedTimeSource {
    pub fn new(start: u64) -> Self {
        FixedTimeSource {
            ticks: parking_lot::Mutex::new(start),
        }
    }

    /// Advances the clock by `seconds` and returns the new value.
    pub fn advance(&self, seconds: u64) -> u64 {
        let mut ticks = self.ticks.lock();
        *ticks += seconds;
        *ticks
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> u64 {
        *self.ticks.lock()
    }
}
