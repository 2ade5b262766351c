//! Component arrays and collections.

use super::{Capability, Component, ComponentRef, Guid, Interface};
use crate::error::{RecentError, Result};
use std::rc::Rc;

/// Read-only, indexed view over a host collection.
///
/// The count is owned by the host and may change between calls, so it is
/// never cached here.
pub trait ObjectArray: Component {
    /// Number of entries currently in the array.
    fn count(&self) -> Result<u32>;

    /// Entry `index` requested strictly as capability `iid`.
    ///
    /// Fails when `index >= count()` or when the entry does not support
    /// `iid`.
    fn get_at(&self, index: u32, iid: &Guid) -> Result<Interface>;
}

/// Mutable host collection. Only the read view is used by the jump list
/// path; the mutators exist so the handle matches what the host returns.
pub trait ObjectCollection: ObjectArray {
    fn add_object(&self, component: &ComponentRef) -> Result<()>;

    fn add_from_array(&self, source: &dyn ObjectArray) -> Result<()>;

    fn remove_object_at(&self, index: u32) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Typed access to array entries.
pub trait ObjectArrayExt: ObjectArray {
    /// Entry `index` as capability `C`.
    fn get_as<C: Capability + ?Sized>(&self, index: u32) -> Result<Rc<C>> {
        let iface = self.get_at(index, &C::IID)?;
        C::narrow(iface).ok_or(RecentError::NoInterface { iid: C::IID })
    }

    /// Every entry that supports `C`, in host order.
    ///
    /// Entries that fail are skipped rather than aborting the walk.
    fn collect_as<C: Capability + ?Sized>(&self) -> Vec<Rc<C>> {
        let count = self.count().unwrap_or(0);
        (0..count)
            .filter_map(|index| self.get_as::<C>(index).ok())
            .collect()
    }
}

impl<T: ObjectArray + ?Sized> ObjectArrayExt for T {}
