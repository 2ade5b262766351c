//! Jump List access.
//!
//! The shell exposes Jump Lists through the Automatic Destination List
//! service, which comes in two incompatible generations. [`JumpList`] picks
//! the right one for the running OS, initializes it for an app id, and
//! hides the difference from callers.
//!
//! # Architecture
//!
//! - `facade` - Version dispatch and typed list access
//! - `memory` - In-process host used by tests and non-Windows builds

mod facade;
pub mod memory;

pub use facade::{resolve_path, Destinations, JumpList};

use crate::com::{
    Component, ComponentRef, Guid, Interface, ObjectCollection, IID_IAUTOMATICDESTINATIONLIST10,
    IID_IAUTOMATICDESTINATIONLIST8,
};
use crate::error::Result;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

/// Which sub-list of a Jump List to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Pinned = 0,
    Recent = 1,
    Frequent = 2,
}

impl ListType {
    pub const ALL: [ListType; 3] = [ListType::Pinned, ListType::Recent, ListType::Frequent];

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListType::Pinned => "pinned",
            ListType::Recent => "recent",
            ListType::Frequent => "frequent",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListType {
    type Err = crate::error::RecentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pinned" => Ok(ListType::Pinned),
            "recent" => Ok(ListType::Recent),
            "frequent" => Ok(ListType::Frequent),
            other => Err(crate::error::RecentError::Config {
                message: format!("Unknown list type: {other}"),
            }),
        }
    }
}

bitflags! {
    /// Filters accepted by the Windows 10 `GetList`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GetListFlags: u32 {
        /// Skip destinations the shell has no display label for.
        const EXCLUDE_UNNAMED_DESTINATIONS = 1;
    }
}

/// Destination list API generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Windows 8 and 8.1.
    V8,
    /// Windows 10 and later.
    V10,
}

impl Generation {
    /// OS major version from which the V10 interface is used.
    pub const V10_MAJOR_VERSION: u32 = 10;

    pub fn for_os_major(major: u32) -> Self {
        if major < Self::V10_MAJOR_VERSION {
            Generation::V8
        } else {
            Generation::V10
        }
    }

    /// Interface identity requested at creation time.
    pub fn iid(self) -> Guid {
        match self {
            Generation::V8 => IID_IAUTOMATICDESTINATIONLIST8,
            Generation::V10 => IID_IAUTOMATICDESTINATIONLIST10,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::V8 => f.write_str("Windows 8"),
            Generation::V10 => f.write_str("Windows 10"),
        }
    }
}

/// Usage statistics the shell keeps per destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageData {
    pub access_count: f32,
    pub last_access: SystemTime,
}

/// Operations shared by both generations of the destination list service.
///
/// `initialize` must be called exactly once before anything else.
pub trait DestinationList: Component {
    fn initialize(
        &self,
        app_id: &str,
        reserved1: Option<&str>,
        reserved2: Option<&str>,
    ) -> Result<()>;

    fn has_list(&self) -> Result<bool>;

    fn add_usage_point(&self, item: &ComponentRef) -> Result<()>;

    fn pin_item(&self, item: &ComponentRef, pin: bool) -> Result<()>;

    fn is_pinned(&self, item: &ComponentRef) -> Result<bool>;

    fn remove_destination(&self, item: &ComponentRef) -> Result<()>;

    fn set_usage_data(&self, item: &ComponentRef, usage: &UsageData) -> Result<()>;

    fn get_usage_data(&self, item: &ComponentRef) -> Result<UsageData>;

    /// Resolve a stored destination back to a live item as capability `iid`.
    fn resolve_destination(&self, item: &ComponentRef, flags: u32, iid: &Guid)
        -> Result<Interface>;

    fn clear_list(&self, list_type: ListType) -> Result<()>;
}

/// Destination list service, Windows 8 generation.
pub trait DestinationList8: DestinationList {
    fn get_list(&self, list_type: ListType, max_count: u32)
        -> Result<Rc<dyn ObjectCollection>>;
}

/// Destination list service, Windows 10 generation.
pub trait DestinationList10: DestinationList {
    fn get_list(
        &self,
        list_type: ListType,
        max_count: u32,
        flags: GetListFlags,
    ) -> Result<Rc<dyn ObjectCollection>>;
}

/// The platform side the facade talks to.
///
/// The component-model runtime must already be initialized on the calling
/// thread; the host reports a failure rather than crashing when it is not.
pub trait ShellHost {
    /// Major version of the running OS.
    fn os_major_version(&self) -> Result<u32>;

    /// Instantiate class `clsid` and return it as capability `iid`.
    fn create_instance(&self, clsid: &Guid, iid: &Guid) -> Result<Interface>;
}
