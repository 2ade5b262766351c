//! Version-dispatching Jump List facade.

use super::{
    DestinationList, DestinationList10, DestinationList8, Generation, GetListFlags, ListType,
    ShellHost,
};
use crate::com::{
    try_as, Capability, Component, ComponentRef, DisplayForm, HResult, ObjectArray,
    ObjectArrayExt, ObjectCollection, ShellItem, CLSID_AUTOMATIC_DESTINATION_LIST,
};
use crate::error::{RecentError, Result};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, trace};

/// The service generation chosen at construction.
enum Service {
    V8(Rc<dyn DestinationList8>),
    V10(Rc<dyn DestinationList10>),
}

/// An initialized destination list for one application id.
///
/// Construction selects the service generation from the OS version once;
/// callers never see which one is active.
pub struct JumpList {
    app_id: String,
    service: Service,
}

impl JumpList {
    /// Create and initialize the destination list service for `app_id`.
    ///
    /// Fails if the service cannot be created or rejects the app id. Neither
    /// is retried; the caller decides whether to disable Jump List scanning.
    pub fn new(host: &dyn ShellHost, app_id: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let major = host.os_major_version()?;
        let generation = Generation::for_os_major(major);
        debug!(
            "Creating destination list for {} (OS major {}, {})",
            app_id, major, generation
        );

        let instance = host
            .create_instance(&CLSID_AUTOMATIC_DESTINATION_LIST, &generation.iid())
            .map_err(|e| RecentError::ServiceCreation {
                generation,
                code: e.code().unwrap_or(HResult::E_FAIL),
            })?;

        let no_interface = RecentError::ServiceCreation {
            generation,
            code: HResult::E_NOINTERFACE,
        };
        let service = match generation {
            Generation::V8 => {
                Service::V8(<dyn DestinationList8>::narrow(instance).ok_or(no_interface)?)
            }
            Generation::V10 => {
                Service::V10(<dyn DestinationList10>::narrow(instance).ok_or(no_interface)?)
            }
        };

        let initialized = match &service {
            Service::V8(list) => list.initialize(&app_id, None, None),
            Service::V10(list) => list.initialize(&app_id, None, None),
        };
        initialized.map_err(|e| RecentError::Initialization {
            app_id: app_id.clone(),
            code: e.code().unwrap_or(HResult::E_FAIL),
        })?;

        Ok(Self { app_id, service })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn generation(&self) -> Generation {
        match self.service {
            Service::V8(_) => Generation::V8,
            Service::V10(_) => Generation::V10,
        }
    }

    /// Whether the shell has any list stored for this app id.
    pub fn has_list(&self) -> bool {
        let result = match &self.service {
            Service::V8(list) => list.has_list(),
            Service::V10(list) => list.has_list(),
        };
        result.unwrap_or_else(|e| {
            debug!("HasList failed for {}: {}", self.app_id, e);
            false
        })
    }

    /// Fetch at most `max_count` destinations of `list_type`.
    ///
    /// On Windows 10 and later unnamed destinations are excluded. A list that
    /// cannot be read is returned empty: new applications have no history.
    pub fn get_list(&self, list_type: ListType, max_count: u32) -> Destinations {
        let result = match &self.service {
            Service::V8(list) => list.get_list(list_type, max_count),
            Service::V10(list) => list.get_list(
                list_type,
                max_count,
                GetListFlags::EXCLUDE_UNNAMED_DESTINATIONS,
            ),
        };

        match result {
            Ok(collection) => Destinations::new(collection, max_count),
            Err(e) => {
                debug!("No {} list for {}: {}", list_type, self.app_id, e);
                Destinations::empty()
            }
        }
    }

    /// Filesystem paths of at most `max_count` destinations of `list_type`.
    pub fn paths(&self, list_type: ListType, max_count: u32) -> Vec<PathBuf> {
        self.get_list(list_type, max_count).resolve_paths()
    }
}

/// Destinations returned by [`JumpList::get_list`], in host order.
///
/// The count is re-queried on every call and clamped to the requested
/// maximum.
pub struct Destinations {
    collection: Option<Rc<dyn ObjectCollection>>,
    max_count: u32,
}

impl Destinations {
    fn new(collection: Rc<dyn ObjectCollection>, max_count: u32) -> Self {
        Self {
            collection: Some(collection),
            max_count,
        }
    }

    pub fn empty() -> Self {
        Self {
            collection: None,
            max_count: 0,
        }
    }

    /// The collection handle returned by the host, if any.
    pub fn collection(&self) -> Option<&Rc<dyn ObjectCollection>> {
        self.collection.as_ref()
    }

    pub fn len(&self) -> usize {
        let Some(collection) = &self.collection else {
            return 0;
        };
        match collection.count() {
            Ok(count) => count.min(self.max_count) as usize,
            Err(e) => {
                debug!("GetCount failed: {}", e);
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destination `index` as a base component handle.
    pub fn get(&self, index: usize) -> Result<ComponentRef> {
        self.get_as::<dyn Component>(index)
    }

    /// Destination `index` as capability `C`.
    pub fn get_as<C: Capability + ?Sized>(&self, index: usize) -> Result<Rc<C>> {
        let count = self.len();
        match &self.collection {
            Some(collection) if index < count => collection.get_as::<C>(index as u32),
            _ => Err(RecentError::IndexOutOfRange { index, count }),
        }
    }

    /// Every destination that could be fetched; failing entries are skipped.
    pub fn iter(&self) -> impl Iterator<Item = ComponentRef> + '_ {
        (0..self.len()).filter_map(move |index| match self.get(index) {
            Ok(component) => Some(component),
            Err(e) => {
                debug!("Skipping destination {}: {}", index, e);
                None
            }
        })
    }

    /// Filesystem paths of every destination that has one.
    pub fn resolve_paths(&self) -> Vec<PathBuf> {
        self.iter().filter_map(|c| resolve_path(&c)).collect()
    }
}

/// Resolve a destination to its absolute filesystem path.
///
/// Returns `None` when the component is not a shell item or has no
/// filesystem form (virtual items).
pub fn resolve_path(component: &ComponentRef) -> Option<PathBuf> {
    let Some(item) = try_as::<dyn ShellItem>(component) else {
        trace!("Destination is not a shell item");
        return None;
    };
    match item.display_name(DisplayForm::FileSysPath) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        Ok(_) => None,
        Err(e) => {
            trace!("Destination has no filesystem path: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jumplist::memory::{MemoryDestination, MemoryJumpList, MemoryShell};

    fn shell(os_major: u32) -> MemoryShell {
        MemoryShell::new(os_major).with_app(
            "App.One",
            MemoryJumpList::new()
                .recent(vec![
                    MemoryDestination::file("C:\\one.txt"),
                    MemoryDestination::virtual_item("Network"),
                    MemoryDestination::file("C:\\two.txt"),
                ])
                .pinned(vec![
                    MemoryDestination::file("C:\\pinned.txt"),
                    MemoryDestination::file("C:\\hidden.txt").unnamed(),
                ]),
        )
    }

    #[test]
    fn test_generation_follows_os_version() {
        assert_eq!(
            JumpList::new(&shell(6), "App.One").unwrap().generation(),
            Generation::V8
        );
        assert_eq!(
            JumpList::new(&shell(10), "App.One").unwrap().generation(),
            Generation::V10
        );
    }

    #[test]
    fn test_v10_excludes_unnamed() {
        let list = JumpList::new(&shell(10), "App.One").unwrap();
        assert_eq!(list.get_list(ListType::Pinned, 10).len(), 1);
    }

    #[test]
    fn test_v8_has_no_exclusion() {
        let list = JumpList::new(&shell(8), "App.One").unwrap();
        assert_eq!(list.get_list(ListType::Pinned, 10).len(), 2);
    }

    #[test]
    fn test_virtual_destinations_are_skipped_when_resolving() {
        let list = JumpList::new(&shell(10), "App.One").unwrap();
        let destinations = list.get_list(ListType::Recent, 10);
        assert_eq!(destinations.len(), 3);
        assert_eq!(
            destinations.resolve_paths(),
            vec![PathBuf::from("C:\\one.txt"), PathBuf::from("C:\\two.txt")]
        );
    }

    #[test]
    fn test_get_past_end_fails() {
        let list = JumpList::new(&shell(10), "App.One").unwrap();
        let destinations = list.get_list(ListType::Recent, 2);
        assert!(destinations.get(1).is_ok());
        assert!(matches!(
            destinations.get(2),
            Err(RecentError::IndexOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_empty_destinations() {
        let destinations = Destinations::empty();
        assert!(destinations.is_empty());
        assert!(destinations.collection().is_none());
        assert!(destinations.get(0).is_err());
        assert!(destinations.resolve_paths().is_empty());
    }

    #[test]
    fn test_has_list() {
        assert!(JumpList::new(&shell(10), "App.One").unwrap().has_list());
        assert!(!JumpList::new(&shell(10), "App.New").unwrap().has_list());
    }
}
