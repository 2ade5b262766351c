//! COM runtime lifetime.

use crate::error::{RecentError, Result};
use std::marker::PhantomData;
use tracing::debug;
use windows::Win32::System::Com::{
    CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE,
};

/// A single-threaded COM apartment on the current thread.
///
/// `CoUninitialize` runs on drop, so the guard must stay on the thread that
/// created it.
pub struct ComApartment {
    _not_send: PhantomData<*const ()>,
}

impl ComApartment {
    pub fn initialize() -> Result<Self> {
        // SAFETY: no reserved pointer is passed; a successful call (including
        // S_FALSE for an already-initialized thread) is balanced by the
        // CoUninitialize in Drop.
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) }
            .ok()
            .map_err(|e| RecentError::interop("CoInitializeEx", e.code().0))?;
        debug!("COM apartment initialized");
        Ok(Self {
            _not_send: PhantomData,
        })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        // SAFETY: paired with the successful CoInitializeEx in `initialize`
        // on this same thread.
        unsafe { CoUninitialize() };
        debug!("COM apartment released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apartment_nests_on_one_thread() {
        let outer = ComApartment::initialize().unwrap();
        // S_FALSE for an already-initialized thread still counts as success.
        let inner = ComApartment::initialize().unwrap();
        drop(inner);
        drop(outer);
    }
}
