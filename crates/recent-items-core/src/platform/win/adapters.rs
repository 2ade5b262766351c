//! COM interfaces behind the `com` and `jumplist` traits.

use super::interfaces::{IAutomaticDestinationList10, IAutomaticDestinationList8};
use crate::com::{
    Component, ComponentRef, DisplayForm, Guid, HResult, Interface, ObjectArray,
    ObjectCollection, ShellItem, IID_IAUTOMATICDESTINATIONLIST10, IID_IAUTOMATICDESTINATIONLIST8,
    IID_IOBJECTARRAY, IID_IOBJECTCOLLECTION, IID_ISHELLITEM, IID_IUNKNOWN,
};
use crate::error::{RecentError, Result};
use crate::jumplist::{
    DestinationList, DestinationList10, DestinationList8, GetListFlags, ListType, UsageData,
};
use crate::platform::filetime;
use std::any::Any;
use std::cmp::Ordering;
use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;
use windows::core::{Interface as ComInterface, IUnknown, GUID, HSTRING, PCWSTR};
use windows::Win32::Foundation::{BOOL, FILETIME, HWND};
use windows::Win32::System::Com::{CoTaskMemFree, IBindCtx};
use windows::Win32::System::SystemServices::SFGAO_FLAGS;
use windows::Win32::UI::Shell::Common::{IObjectArray, IObjectCollection};
use windows::Win32::UI::Shell::{IShellItem, SIGDN};

/// One owned COM reference of interface `I`.
pub(super) struct Com<I>(pub(super) I);

fn to_guid(iid: &Guid) -> GUID {
    GUID::from_u128(iid.to_u128())
}

fn interop(operation: &'static str) -> impl Fn(windows::core::Error) -> RecentError {
    move |e| RecentError::interop(operation, e.code().0)
}

/// Wrap `unknown` as capability `iid`, querying the object for it.
pub(super) fn wrap(unknown: &IUnknown, iid: &Guid) -> Option<Interface> {
    match *iid {
        IID_IUNKNOWN => Some(Interface::Unknown(Rc::new(Com(unknown.clone())))),
        IID_IOBJECTARRAY => unknown
            .cast::<IObjectArray>()
            .ok()
            .map(|i| Interface::ObjectArray(Rc::new(Com(i)))),
        IID_IOBJECTCOLLECTION => unknown
            .cast::<IObjectCollection>()
            .ok()
            .map(|i| Interface::ObjectCollection(Rc::new(Com(i)))),
        IID_ISHELLITEM => unknown
            .cast::<IShellItem>()
            .ok()
            .map(|i| Interface::ShellItem(Rc::new(Com(i)))),
        IID_IAUTOMATICDESTINATIONLIST8 => unknown
            .cast::<IAutomaticDestinationList8>()
            .ok()
            .map(|i| Interface::DestinationList8(Rc::new(Com(i)))),
        IID_IAUTOMATICDESTINATIONLIST10 => unknown
            .cast::<IAutomaticDestinationList10>()
            .ok()
            .map(|i| Interface::DestinationList10(Rc::new(Com(i)))),
        _ => None,
    }
}

fn native<I: ComInterface + 'static>(any: &dyn Any) -> Option<IUnknown> {
    any.downcast_ref::<Com<I>>().and_then(|c| c.0.cast().ok())
}

/// The COM reference behind a handle from this backend.
fn unknown_of(any: &dyn Any, operation: &'static str) -> Result<IUnknown> {
    native::<IUnknown>(any)
        .or_else(|| native::<IShellItem>(any))
        .or_else(|| native::<IObjectArray>(any))
        .or_else(|| native::<IObjectCollection>(any))
        .ok_or(RecentError::interop(operation, HResult::E_INVALIDARG))
}

/// Take ownership of an out-pointer filled by a successful COM call.
///
/// # Safety
/// `raw` must be null or an owned reference to a COM object.
unsafe fn take_unknown(raw: *mut c_void, operation: &'static str) -> Result<IUnknown> {
    if raw.is_null() {
        return Err(RecentError::interop(operation, HResult::E_POINTER));
    }
    // SAFETY: guaranteed by the caller; the reference is released on drop.
    Ok(unsafe { IUnknown::from_raw(raw) })
}

impl<I: ComInterface + 'static> Component for Com<I> {
    fn query(self: Rc<Self>, iid: &Guid) -> Option<Interface> {
        let unknown: IUnknown = self.0.cast().ok()?;
        wrap(&unknown, iid)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn array_count(array: &IObjectArray) -> Result<u32> {
    // SAFETY: `array` is a live interface pointer.
    unsafe { array.GetCount() }.map_err(interop("GetCount"))
}

fn array_get_at(array: &IObjectArray, index: u32, iid: &Guid) -> Result<Interface> {
    let riid = to_guid(iid);
    let mut raw = ptr::null_mut();
    // SAFETY: the vtable slot matches IObjectArray::GetAt; `riid` and `raw`
    // outlive the call.
    unsafe {
        (ComInterface::vtable(array).GetAt)(ComInterface::as_raw(array), index, &riid, &mut raw)
    }
    .ok()
    .map_err(interop("GetAt"))?;
    // SAFETY: on success GetAt hands back an owned reference.
    let unknown = unsafe { take_unknown(raw, "GetAt") }?;
    wrap(&unknown, iid).ok_or(RecentError::NoInterface { iid: *iid })
}

impl ObjectArray for Com<IObjectArray> {
    fn count(&self) -> Result<u32> {
        array_count(&self.0)
    }

    fn get_at(&self, index: u32, iid: &Guid) -> Result<Interface> {
        array_get_at(&self.0, index, iid)
    }
}

// IObjectCollection derefs to its IObjectArray base.
impl ObjectArray for Com<IObjectCollection> {
    fn count(&self) -> Result<u32> {
        array_count(&self.0)
    }

    fn get_at(&self, index: u32, iid: &Guid) -> Result<Interface> {
        array_get_at(&self.0, index, iid)
    }
}

impl ObjectCollection for Com<IObjectCollection> {
    fn add_object(&self, component: &ComponentRef) -> Result<()> {
        let unknown = unknown_of(component.as_any(), "AddObject")?;
        // SAFETY: both interface pointers are live for the call.
        unsafe { self.0.AddObject(&unknown) }.map_err(interop("AddObject"))
    }

    fn add_from_array(&self, source: &dyn ObjectArray) -> Result<()> {
        let array: IObjectArray = unknown_of(source.as_any(), "AddFromArray")?
            .cast()
            .map_err(interop("AddFromArray"))?;
        // SAFETY: both interface pointers are live for the call.
        unsafe { self.0.AddFromArray(&array) }.map_err(interop("AddFromArray"))
    }

    fn remove_object_at(&self, index: u32) -> Result<()> {
        // SAFETY: `self.0` is a live interface pointer.
        unsafe { self.0.RemoveObjectAt(index) }.map_err(interop("RemoveObjectAt"))
    }

    fn clear(&self) -> Result<()> {
        // SAFETY: `self.0` is a live interface pointer.
        unsafe { self.0.Clear() }.map_err(interop("Clear"))
    }
}

impl ShellItem for Com<IShellItem> {
    fn display_name(&self, form: DisplayForm) -> Result<String> {
        // SAFETY: `self.0` is a live interface pointer.
        let name = unsafe { self.0.GetDisplayName(SIGDN(form.as_raw())) }
            .map_err(interop("GetDisplayName"))?;
        // SAFETY: GetDisplayName returns a NUL-terminated string allocated
        // with CoTaskMemAlloc; it is read once and freed exactly once.
        let text = unsafe { name.to_string() };
        // SAFETY: `name` was allocated by the callee and is not used again.
        unsafe { CoTaskMemFree(Some(name.0 as *const c_void)) };
        text.map_err(|_| RecentError::interop("GetDisplayName", HResult::E_FAIL))
    }

    fn parent(&self) -> Result<Rc<dyn ShellItem>> {
        // SAFETY: `self.0` is a live interface pointer.
        let parent = unsafe { self.0.GetParent() }.map_err(interop("GetParent"))?;
        Ok(Rc::new(Com(parent)))
    }

    fn attributes(&self, mask: u32) -> Result<u32> {
        // SAFETY: `self.0` is a live interface pointer.
        unsafe { self.0.GetAttributes(SFGAO_FLAGS(mask)) }
            .map(|flags| flags.0)
            .map_err(interop("GetAttributes"))
    }

    fn compare(&self, other: &dyn ShellItem, hint: u32) -> Result<Ordering> {
        let other: IShellItem = unknown_of(other.as_any(), "Compare")?
            .cast()
            .map_err(interop("Compare"))?;
        // SAFETY: both interface pointers are live for the call.
        let order = unsafe { self.0.Compare(&other, hint) }.map_err(interop("Compare"))?;
        Ok(order.cmp(&0))
    }

    fn bind_to_handler(&self, bhid: &Guid, iid: &Guid) -> Result<Interface> {
        let bhid = to_guid(bhid);
        // SAFETY: `bhid` outlives the call; no bind context is passed.
        let unknown: IUnknown = unsafe { self.0.BindToHandler(None::<&IBindCtx>, &bhid) }
            .map_err(interop("BindToHandler"))?;
        wrap(&unknown, iid).ok_or(RecentError::NoInterface { iid: *iid })
    }
}

fn wide(text: Option<&str>) -> Option<HSTRING> {
    text.map(HSTRING::from)
}

fn pcwstr(text: &Option<HSTRING>) -> PCWSTR {
    text.as_ref().map_or(PCWSTR::null(), |h| PCWSTR(h.as_ptr()))
}

fn to_filetime(time: std::time::SystemTime) -> FILETIME {
    let ticks = filetime::to_ticks(time);
    FILETIME {
        dwLowDateTime: ticks as u32,
        dwHighDateTime: (ticks >> 32) as u32,
    }
}

fn from_filetime(time: FILETIME) -> std::time::SystemTime {
    filetime::from_ticks(((time.dwHighDateTime as u64) << 32) | time.dwLowDateTime as u64)
}

/// The surface both service generations share.
macro_rules! destination_list {
    ($iface:ty) => {
        impl DestinationList for Com<$iface> {
            fn initialize(
                &self,
                app_id: &str,
                reserved1: Option<&str>,
                reserved2: Option<&str>,
            ) -> Result<()> {
                let app_id = wide(Some(app_id));
                let reserved1 = wide(reserved1);
                let reserved2 = wide(reserved2);
                // SAFETY: the HSTRINGs are NUL-terminated and outlive the call.
                unsafe {
                    self.0
                        .Initialize(pcwstr(&app_id), pcwstr(&reserved1), pcwstr(&reserved2))
                }
                .ok()
                .map_err(interop("Initialize"))
            }

            fn has_list(&self) -> Result<bool> {
                let mut has_list = BOOL(0);
                // SAFETY: `has_list` is a valid out pointer.
                unsafe { self.0.HasList(&mut has_list) }
                    .ok()
                    .map_err(interop("HasList"))?;
                Ok(has_list.as_bool())
            }

            fn add_usage_point(&self, item: &ComponentRef) -> Result<()> {
                let item = unknown_of(item.as_any(), "AddUsagePoint")?;
                // SAFETY: `item` is a live interface pointer for the call.
                unsafe { self.0.AddUsagePoint(item.as_raw()) }
                    .ok()
                    .map_err(interop("AddUsagePoint"))
            }

            fn pin_item(&self, item: &ComponentRef, pin: bool) -> Result<()> {
                let item = unknown_of(item.as_any(), "PinItem")?;
                // SAFETY: `item` is a live interface pointer for the call.
                unsafe { self.0.PinItem(item.as_raw(), BOOL::from(pin)) }
                    .ok()
                    .map_err(interop("PinItem"))
            }

            fn is_pinned(&self, item: &ComponentRef) -> Result<bool> {
                let item = unknown_of(item.as_any(), "IsPinned")?;
                let mut pinned = BOOL(0);
                // SAFETY: `item` is live and `pinned` is a valid out pointer.
                unsafe { self.0.IsPinned(item.as_raw(), &mut pinned) }
                    .ok()
                    .map_err(interop("IsPinned"))?;
                Ok(pinned.as_bool())
            }

            fn remove_destination(&self, item: &ComponentRef) -> Result<()> {
                let item = unknown_of(item.as_any(), "RemoveDestination")?;
                // SAFETY: `item` is a live interface pointer for the call.
                unsafe { self.0.RemoveDestination(item.as_raw()) }
                    .ok()
                    .map_err(interop("RemoveDestination"))
            }

            fn set_usage_data(&self, item: &ComponentRef, usage: &UsageData) -> Result<()> {
                let item = unknown_of(item.as_any(), "SetUsageData")?;
                let access_count = usage.access_count;
                let last_access = to_filetime(usage.last_access);
                // SAFETY: `item` is live; both in pointers outlive the call.
                unsafe { self.0.SetUsageData(item.as_raw(), &access_count, &last_access) }
                    .ok()
                    .map_err(interop("SetUsageData"))
            }

            fn get_usage_data(&self, item: &ComponentRef) -> Result<UsageData> {
                let item = unknown_of(item.as_any(), "GetUsageData")?;
                let mut access_count = 0.0f32;
                let mut last_access = FILETIME::default();
                // SAFETY: `item` is live; both out pointers are valid.
                unsafe {
                    self.0
                        .GetUsageData(item.as_raw(), &mut access_count, &mut last_access)
                }
                .ok()
                .map_err(interop("GetUsageData"))?;
                Ok(UsageData {
                    access_count,
                    last_access: from_filetime(last_access),
                })
            }

            fn resolve_destination(
                &self,
                item: &ComponentRef,
                flags: u32,
                iid: &Guid,
            ) -> Result<Interface> {
                let item = unknown_of(item.as_any(), "ResolveDestination")?;
                let riid = to_guid(iid);
                let mut raw = ptr::null_mut();
                // SAFETY: `item` is live; `riid` and `raw` outlive the call.
                unsafe {
                    self.0.ResolveDestination(
                        HWND::default(),
                        flags,
                        item.as_raw(),
                        &riid,
                        &mut raw,
                    )
                }
                .ok()
                .map_err(interop("ResolveDestination"))?;
                // SAFETY: on success the service hands back an owned reference.
                let unknown = unsafe { take_unknown(raw, "ResolveDestination") }?;
                wrap(&unknown, iid).ok_or(RecentError::NoInterface { iid: *iid })
            }

            fn clear_list(&self, list_type: ListType) -> Result<()> {
                // SAFETY: `self.0` is a live interface pointer.
                unsafe { self.0.ClearList(list_type.as_raw()) }
                    .ok()
                    .map_err(interop("ClearList"))
            }
        }
    };
}

destination_list!(IAutomaticDestinationList8);
destination_list!(IAutomaticDestinationList10);

/// Take ownership of the collection `GetList` wrote to `raw`.
///
/// # Safety
/// `raw` must be null or an owned `IObjectCollection` reference.
unsafe fn take_collection(raw: *mut c_void) -> Result<Rc<dyn ObjectCollection>> {
    if raw.is_null() {
        return Err(RecentError::interop("GetList", HResult::E_POINTER));
    }
    // SAFETY: guaranteed by the caller; released when the wrapper drops.
    let collection = unsafe { IObjectCollection::from_raw(raw) };
    Ok(Rc::new(Com(collection)))
}

impl DestinationList8 for Com<IAutomaticDestinationList8> {
    fn get_list(
        &self,
        list_type: ListType,
        max_count: u32,
    ) -> Result<Rc<dyn ObjectCollection>> {
        let mut raw = ptr::null_mut();
        // SAFETY: the IID matches the out pointer type requested.
        unsafe {
            self.0
                .GetList(list_type.as_raw(), max_count, &IObjectCollection::IID, &mut raw)
        }
        .ok()
        .map_err(interop("GetList"))?;
        // SAFETY: GetList succeeded and wrote an IObjectCollection.
        unsafe { take_collection(raw) }
    }
}

impl DestinationList10 for Com<IAutomaticDestinationList10> {
    fn get_list(
        &self,
        list_type: ListType,
        max_count: u32,
        flags: GetListFlags,
    ) -> Result<Rc<dyn ObjectCollection>> {
        let mut raw = ptr::null_mut();
        // SAFETY: the IID matches the out pointer type requested.
        unsafe {
            self.0.GetList(
                list_type.as_raw(),
                max_count,
                flags.bits(),
                &IObjectCollection::IID,
                &mut raw,
            )
        }
        .ok()
        .map_err(interop("GetList"))?;
        // SAFETY: GetList succeeded and wrote an IObjectCollection.
        unsafe { take_collection(raw) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::win::{ComApartment, WindowsShellHost};
    use crate::{JumpList, ListType};

    #[test]
    fn test_identities_match_windows_metadata() {
        assert_eq!(to_guid(&IID_IUNKNOWN), IUnknown::IID);
        assert_eq!(to_guid(&IID_IOBJECTARRAY), IObjectArray::IID);
        assert_eq!(to_guid(&IID_IOBJECTCOLLECTION), IObjectCollection::IID);
        assert_eq!(to_guid(&IID_ISHELLITEM), IShellItem::IID);
        assert_eq!(
            to_guid(&IID_IAUTOMATICDESTINATIONLIST8),
            IAutomaticDestinationList8::IID
        );
        assert_eq!(
            to_guid(&IID_IAUTOMATICDESTINATIONLIST10),
            IAutomaticDestinationList10::IID
        );
    }

    #[test]
    fn test_filetime_conversion() {
        let time = filetime::from_ticks(133_000_000_000_000_000);
        let converted = to_filetime(time);
        assert_eq!(from_filetime(converted), time);
        assert_eq!(
            ((converted.dwHighDateTime as u64) << 32) | converted.dwLowDateTime as u64,
            133_000_000_000_000_000
        );
    }

    #[test]
    fn test_explorer_jump_list_reads() {
        let _apartment = ComApartment::initialize().unwrap();
        let jump_list = JumpList::new(&WindowsShellHost, "Microsoft.Windows.Explorer").unwrap();

        for list_type in ListType::ALL {
            let destinations = jump_list.get_list(list_type, 5);
            assert!(destinations.len() <= 5);
            for path in destinations.resolve_paths() {
                assert!(path.is_absolute(), "{} is not absolute", path.display());
            }
        }
    }

    #[test]
    fn test_wrappers_round_trip_through_com() {
        let _apartment = ComApartment::initialize().unwrap();
        let jump_list = JumpList::new(&WindowsShellHost, "Microsoft.Windows.Explorer").unwrap();
        let destinations = jump_list.get_list(ListType::Recent, 5);

        if let Some(item) = destinations.iter().next() {
            // A handle from this backend resolves back to its COM reference.
            assert!(unknown_of(item.as_any(), "test").is_ok());
            let Some(Interface::ShellItem(shell_item)) = item.clone().query(&IID_ISHELLITEM)
            else {
                panic!("destination should be a shell item");
            };
            assert!(shell_item.display_name(DisplayForm::NormalDisplay).is_ok());
            assert!(shell_item.parent().is_ok());
        }
    }
}
