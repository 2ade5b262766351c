//! The Windows shell host.

use super::adapters::wrap;
use crate::com::{Guid, HResult, Interface};
use crate::error::{RecentError, Result};
use crate::jumplist::ShellHost;
use crate::platform::version;
use tracing::debug;
use windows::core::{IUnknown, GUID};
use windows::Win32::System::Com::{CoCreateInstance, CLSCTX_INPROC_SERVER};

/// Creates shell objects with `CoCreateInstance`.
///
/// The calling thread must hold a [`crate::platform::ComRuntime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsShellHost;

impl ShellHost for WindowsShellHost {
    fn os_major_version(&self) -> Result<u32> {
        version::os_major_version()
    }

    fn create_instance(&self, clsid: &Guid, iid: &Guid) -> Result<Interface> {
        let class = GUID::from_u128(clsid.to_u128());
        // SAFETY: `class` outlives the call and no outer object is passed.
        let unknown: IUnknown =
            unsafe { CoCreateInstance(&class, None::<&IUnknown>, CLSCTX_INPROC_SERVER) }
                .map_err(|e| RecentError::interop("CoCreateInstance", e.code().0))?;
        debug!("Created {} as {}", clsid, iid);
        wrap(&unknown, iid).ok_or(RecentError::interop(
            "CoCreateInstance",
            HResult::E_NOINTERFACE,
        ))
    }
}
