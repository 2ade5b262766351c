//! Component handles and capability views.
//!
//! Every object the shell hands back is a [`ComponentRef`]: an `Rc` owned
//! handle that releases the underlying object when the last clone drops.
//! Typed views are obtained with [`try_as`], which asks the component for a
//! capability by identity and yields `None` when it is not supported.
//!
//! # Architecture
//!
//! - `guid` - Identities and host status codes
//! - `array` - Read-only and mutable component collections
//! - `shell_item` - Filesystem path resolution

pub mod array;
pub mod guid;
pub mod shell_item;

pub use array::{ObjectArray, ObjectArrayExt, ObjectCollection};
pub use guid::{
    Guid, HResult, CLSID_AUTOMATIC_DESTINATION_LIST, IID_IAUTOMATICDESTINATIONLIST10,
    IID_IAUTOMATICDESTINATIONLIST8, IID_IOBJECTARRAY, IID_IOBJECTCOLLECTION, IID_ISHELLITEM,
    IID_IUNKNOWN,
};
pub use shell_item::{DisplayForm, ShellItem, SFGAO_FILESYSTEM, SFGAO_FOLDER};

use crate::jumplist::{DestinationList10, DestinationList8};
use std::any::Any;
use std::rc::Rc;

/// Reference-counted handle to a host object.
pub type ComponentRef = Rc<dyn Component>;

/// The base capability every host object supports.
pub trait Component: 'static {
    /// Ask for the capability named by `iid`.
    ///
    /// Returns a new handle on success; `None` when the object does not
    /// implement it.
    fn query(self: Rc<Self>, iid: &Guid) -> Option<Interface>;

    /// Backend-specific view, used when a handle is passed back to the host.
    fn as_any(&self) -> &dyn Any;
}

/// A handle typed by the capability it was obtained as.
#[derive(Clone)]
pub enum Interface {
    Unknown(ComponentRef),
    ObjectArray(Rc<dyn ObjectArray>),
    ObjectCollection(Rc<dyn ObjectCollection>),
    ShellItem(Rc<dyn ShellItem>),
    DestinationList8(Rc<dyn DestinationList8>),
    DestinationList10(Rc<dyn DestinationList10>),
}

impl Interface {
    /// The identity this handle was obtained as.
    pub fn iid(&self) -> Guid {
        match self {
            Interface::Unknown(_) => IID_IUNKNOWN,
            Interface::ObjectArray(_) => IID_IOBJECTARRAY,
            Interface::ObjectCollection(_) => IID_IOBJECTCOLLECTION,
            Interface::ShellItem(_) => IID_ISHELLITEM,
            Interface::DestinationList8(_) => IID_IAUTOMATICDESTINATIONLIST8,
            Interface::DestinationList10(_) => IID_IAUTOMATICDESTINATIONLIST10,
        }
    }

    /// Drop the typed view and keep the base handle.
    pub fn into_component(self) -> ComponentRef {
        match self {
            Interface::Unknown(c) => c,
            Interface::ObjectArray(c) => c,
            Interface::ObjectCollection(c) => c,
            Interface::ShellItem(c) => c,
            Interface::DestinationList8(c) => c,
            Interface::DestinationList10(c) => c,
        }
    }
}

/// A capability that can be requested by identity.
pub trait Capability {
    const IID: Guid;

    /// Extract the typed handle if `iface` is this capability.
    fn narrow(iface: Interface) -> Option<Rc<Self>>;
}

impl Capability for dyn Component {
    const IID: Guid = IID_IUNKNOWN;

    fn narrow(iface: Interface) -> Option<Rc<Self>> {
        Some(iface.into_component())
    }
}

macro_rules! capability {
    ($trait:ident, $iid:expr) => {
        impl Capability for dyn $trait {
            const IID: Guid = $iid;

            fn narrow(iface: Interface) -> Option<Rc<Self>> {
                match iface {
                    Interface::$trait(handle) => Some(handle),
                    _ => None,
                }
            }
        }
    };
}

capability!(ObjectArray, IID_IOBJECTARRAY);
capability!(ObjectCollection, IID_IOBJECTCOLLECTION);
capability!(ShellItem, IID_ISHELLITEM);
capability!(DestinationList8, IID_IAUTOMATICDESTINATIONLIST8);
capability!(DestinationList10, IID_IAUTOMATICDESTINATIONLIST10);

/// Query `component` for capability `C`.
///
/// ```rust,ignore
/// if let Some(item) = try_as::<dyn ShellItem>(&component) {
///     let path = item.display_name(DisplayForm::FileSysPath)?;
/// }
/// ```
pub fn try_as<C: Capability + ?Sized>(component: &ComponentRef) -> Option<Rc<C>> {
    Rc::clone(component).query(&C::IID).and_then(C::narrow)
}
