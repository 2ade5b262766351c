//! Undocumented destination list interfaces.
//!
//! The vtable layouts are identical apart from `GetList`, which gained a
//! flags argument in Windows 10.

use std::ffi::c_void;
use windows::core::{interface, IUnknown, IUnknown_Vtbl, GUID, HRESULT, PCWSTR};
use windows::Win32::Foundation::{BOOL, FILETIME, HWND};

#[interface("bc10dce3-62f2-4bc6-af37-db46ed7873c4")]
pub unsafe trait IAutomaticDestinationList8: IUnknown {
    fn Initialize(&self, app_id: PCWSTR, reserved1: PCWSTR, reserved2: PCWSTR) -> HRESULT;
    fn HasList(&self, has_list: *mut BOOL) -> HRESULT;
    fn GetList(
        &self,
        list_type: i32,
        max_count: u32,
        riid: *const GUID,
        ppv: *mut *mut c_void,
    ) -> HRESULT;
    fn AddUsagePoint(&self, item: *mut c_void) -> HRESULT;
    fn PinItem(&self, item: *mut c_void, pin: BOOL) -> HRESULT;
    fn IsPinned(&self, item: *mut c_void, pinned: *mut BOOL) -> HRESULT;
    fn RemoveDestination(&self, item: *mut c_void) -> HRESULT;
    fn SetUsageData(
        &self,
        item: *mut c_void,
        access_count: *const f32,
        last_access: *const FILETIME,
    ) -> HRESULT;
    fn GetUsageData(
        &self,
        item: *mut c_void,
        access_count: *mut f32,
        last_access: *mut FILETIME,
    ) -> HRESULT;
    fn ResolveDestination(
        &self,
        hwnd: HWND,
        flags: u32,
        item: *mut c_void,
        riid: *const GUID,
        ppv: *mut *mut c_void,
    ) -> HRESULT;
    fn ClearList(&self, list_type: i32) -> HRESULT;
}

#[interface("e9c5ef8d-fd41-4f72-ba87-eb03bad5817c")]
pub unsafe trait IAutomaticDestinationList10: IUnknown {
    fn Initialize(&self, app_id: PCWSTR, reserved1: PCWSTR, reserved2: PCWSTR) -> HRESULT;
    fn HasList(&self, has_list: *mut BOOL) -> HRESULT;
    fn GetList(
        &self,
        list_type: i32,
        max_count: u32,
        flags: u32,
        riid: *const GUID,
        ppv: *mut *mut c_void,
    ) -> HRESULT;
    fn AddUsagePoint(&self, item: *mut c_void) -> HRESULT;
    fn PinItem(&self, item: *mut c_void, pin: BOOL) -> HRESULT;
    fn IsPinned(&self, item: *mut c_void, pinned: *mut BOOL) -> HRESULT;
    fn RemoveDestination(&self, item: *mut c_void) -> HRESULT;
    fn SetUsageData(
        &self,
        item: *mut c_void,
        access_count: *const f32,
        last_access: *const FILETIME,
    ) -> HRESULT;
    fn GetUsageData(
        &self,
        item: *mut c_void,
        access_count: *mut f32,
        last_access: *mut FILETIME,
    ) -> HRESULT;
    fn ResolveDestination(
        &self,
        hwnd: HWND,
        flags: u32,
        item: *mut c_void,
        riid: *const GUID,
        ppv: *mut *mut c_void,
    ) -> HRESULT;
    fn ClearList(&self, list_type: i32) -> HRESULT;
}
