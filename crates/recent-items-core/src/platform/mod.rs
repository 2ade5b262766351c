//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live in this module rather
//! than being scattered through the jump list and catalog code.
//!
//! # Architecture
//!
//! - `paths` - Per-user Recent folder and settings location
//! - `version` - Host OS major version
//! - `filetime` - Conversion between `SystemTime` and shell timestamps
//! - `win` - Component runtime, shell interfaces and the Windows host
//!
//! # Supported Platforms
//!
//! - **Windows**: Full support
//! - **Linux/macOS**: Builds and runs against the in-memory host; the shell
//!   sources report `Unsupported`

pub mod filetime;
pub mod paths;
pub mod version;

#[cfg(windows)]
pub mod win;

pub use paths::{recent_dir, settings_path};
pub use version::{os_major_version, parse_major_version};

use crate::error::{RecentError, Result};
use crate::jumplist::ShellHost;
use crate::sources::RecentDocsStore;

/// Component-model runtime for the calling thread.
///
/// The embedding host creates one before touching the shell and keeps it
/// alive until it is done; dropping it tears the runtime down. On platforms
/// without a component runtime this is a no-op guard.
pub struct ComRuntime {
    #[cfg(windows)]
    _apartment: win::ComApartment,
}

impl ComRuntime {
    pub fn initialize() -> Result<Self> {
        #[cfg(windows)]
        {
            Ok(Self {
                _apartment: win::ComApartment::initialize()?,
            })
        }

        #[cfg(not(windows))]
        {
            Ok(Self {})
        }
    }
}

/// The shell host for the running platform.
///
/// # Platform Behavior
/// - **Windows**: the Automatic Destination List service via COM
/// - **Other**: `Unsupported`
pub fn default_shell_host() -> Result<Box<dyn ShellHost>> {
    #[cfg(windows)]
    {
        Ok(Box::new(win::WindowsShellHost))
    }

    #[cfg(not(windows))]
    {
        Err(RecentError::Unsupported(
            "The destination list service is only available on Windows".to_string(),
        ))
    }
}

/// The RecentDocs registry store for the running platform.
///
/// # Platform Behavior
/// - **Windows**: `HKCU\...\Explorer\RecentDocs`
/// - **Other**: `Unsupported`
pub fn default_recent_docs() -> Result<Box<dyn RecentDocsStore>> {
    #[cfg(windows)]
    {
        Ok(Box::new(crate::sources::RegistryRecentDocs::current_user()))
    }

    #[cfg(not(windows))]
    {
        Err(RecentError::Unsupported(
            "RecentDocs is only available on Windows".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_guard_initializes() {
        let runtime = ComRuntime::initialize();
        assert!(runtime.is_ok());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_shell_sources_unsupported_off_windows() {
        assert!(matches!(
            default_shell_host(),
            Err(RecentError::Unsupported(_))
        ));
        assert!(matches!(
            default_recent_docs(),
            Err(RecentError::Unsupported(_))
        ));
    }
}
