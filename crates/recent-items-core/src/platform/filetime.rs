//! Shell timestamps.
//!
//! The shell stores times as 100ns ticks since 1601-01-01 UTC.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Ticks between 1601-01-01 and 1970-01-01.
pub const UNIX_EPOCH_TICKS: u64 = 116_444_736_000_000_000;

fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_micros(ticks / 10) + Duration::from_nanos((ticks % 10) * 100)
}

fn duration_to_ticks(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos() / 100).unwrap_or(u64::MAX)
}

/// Convert a `SystemTime` to shell ticks, saturating at the 1601 epoch.
pub fn to_ticks(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => UNIX_EPOCH_TICKS.saturating_add(duration_to_ticks(after)),
        Err(before) => UNIX_EPOCH_TICKS.saturating_sub(duration_to_ticks(before.duration())),
    }
}

/// Convert shell ticks to a `SystemTime`.
pub fn from_ticks(ticks: u64) -> SystemTime {
    if ticks >= UNIX_EPOCH_TICKS {
        UNIX_EPOCH + ticks_to_duration(ticks - UNIX_EPOCH_TICKS)
    } else {
        UNIX_EPOCH
            .checked_sub(ticks_to_duration(UNIX_EPOCH_TICKS - ticks))
            .unwrap_or(UNIX_EPOCH)
    }
}
