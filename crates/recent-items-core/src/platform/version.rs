//! Host OS version.

use crate::error::{RecentError, Result};
use sysinfo::System;
use tracing::debug;

/// Major version of the running OS.
///
/// # Platform Behavior
/// - **Windows**: `11` on Windows 11, `10` on Windows 10; Windows 8.x has no
///   `CurrentMajorVersionNumber` and reports `0`, which selects the V8 API
/// - **Linux/macOS**: the distribution or release major number
pub fn os_major_version() -> Result<u32> {
    let version = System::os_version().ok_or_else(|| {
        RecentError::Unsupported("Could not determine the OS version".to_string())
    })?;
    debug!("OS version: {}", version);

    parse_major_version(&version).ok_or_else(|| RecentError::Config {
        message: format!("Unrecognized OS version: {version:?}"),
    })
}

/// Leading integer of a version string such as `"10 (19045)"` or `"6.3"`.
pub fn parse_major_version(version: &str) -> Option<u32> {
    let digits: String = version
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
