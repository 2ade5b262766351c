//! In-process shell host.
//!
//! Mirrors the behaviour of the Windows destination list service closely
//! enough to drive the facade without a shell: per-app fixture lists, the
//! generation split, the unnamed-destination filter, and the pin/usage
//! surface. Every handle it gives out is counted, so tests can check that
//! nothing is leaked.

use super::{
    DestinationList, DestinationList10, DestinationList8, Generation, GetListFlags, ListType,
    ShellHost, UsageData,
};
use crate::com::{
    Component, ComponentRef, DisplayForm, Guid, HResult, Interface, ObjectArray,
    ObjectCollection, ShellItem, CLSID_AUTOMATIC_DESTINATION_LIST, IID_IOBJECTARRAY,
    IID_IOBJECTCOLLECTION, IID_ISHELLITEM, IID_IUNKNOWN, SFGAO_FILESYSTEM, SFGAO_FOLDER,
};
use crate::error::{RecentError, Result};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::SystemTime;

/// Counts handles that are still alive.
#[derive(Clone, Default)]
struct HandleTracker(Rc<Cell<usize>>);

impl HandleTracker {
    fn lease(&self) -> Lease {
        self.0.set(self.0.get() + 1);
        Lease(Rc::clone(&self.0))
    }

    fn outstanding(&self) -> usize {
        self.0.get()
    }
}

struct Lease(Rc<Cell<usize>>);

impl Drop for Lease {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// A single fixture destination.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDestination {
    path: Option<String>,
    display: String,
    named: bool,
    folder: bool,
}

impl MemoryDestination {
    /// A file-backed destination.
    pub fn file(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            display: file_name(&path).to_string(),
            path: Some(path),
            named: true,
            folder: false,
        }
    }

    /// A folder-backed destination.
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            folder: true,
            ..Self::file(path)
        }
    }

    /// A namespace object with no filesystem form.
    pub fn virtual_item(display: impl Into<String>) -> Self {
        Self {
            path: None,
            display: display.into(),
            named: true,
            folder: false,
        }
    }

    /// Mark the destination as having no shell-assigned label.
    pub fn unnamed(mut self) -> Self {
        self.named = false;
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    /// A standalone shell item handle for this destination.
    pub fn into_component(self) -> ComponentRef {
        MemoryItem::new(self, &HandleTracker::default())
    }

    fn key(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.display)
    }
}

/// Fixture lists stored for one app id.
#[derive(Debug, Clone, Default)]
pub struct MemoryJumpList {
    pinned: Vec<MemoryDestination>,
    recent: Vec<MemoryDestination>,
    frequent: Vec<MemoryDestination>,
    usage: HashMap<String, UsageData>,
}

impl MemoryJumpList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned(mut self, destinations: Vec<MemoryDestination>) -> Self {
        self.pinned = destinations;
        self
    }

    pub fn recent(mut self, destinations: Vec<MemoryDestination>) -> Self {
        self.recent = destinations;
        self
    }

    pub fn frequent(mut self, destinations: Vec<MemoryDestination>) -> Self {
        self.frequent = destinations;
        self
    }

    /// Destinations of `list_type`, in stored order.
    pub fn list(&self, list_type: ListType) -> &[MemoryDestination] {
        match list_type {
            ListType::Pinned => &self.pinned,
            ListType::Recent => &self.recent,
            ListType::Frequent => &self.frequent,
        }
    }

    fn list_mut(&mut self, list_type: ListType) -> &mut Vec<MemoryDestination> {
        match list_type {
            ListType::Pinned => &mut self.pinned,
            ListType::Recent => &mut self.recent,
            ListType::Frequent => &mut self.frequent,
        }
    }

    fn is_empty(&self) -> bool {
        ListType::ALL.iter().all(|t| self.list(*t).is_empty())
    }
}

type Store = Rc<RefCell<HashMap<String, MemoryJumpList>>>;

/// In-memory [`ShellHost`].
pub struct MemoryShell {
    os_major: u32,
    store: Store,
    tracker: HandleTracker,
    creation_failure: Option<HResult>,
    initialization_failure: Option<HResult>,
}

impl MemoryShell {
    /// A host reporting OS major version `os_major`.
    pub fn new(os_major: u32) -> Self {
        Self {
            os_major,
            store: Rc::new(RefCell::new(HashMap::new())),
            tracker: HandleTracker::default(),
            creation_failure: None,
            initialization_failure: None,
        }
    }

    /// Store `list` for `app_id`.
    pub fn with_app(self, app_id: impl Into<String>, list: MemoryJumpList) -> Self {
        self.store.borrow_mut().insert(app_id.into(), list);
        self
    }

    /// Make service creation fail with `code`.
    pub fn failing_creation(mut self, code: HResult) -> Self {
        self.creation_failure = Some(code);
        self
    }

    /// Make `Initialize` fail with `code`.
    pub fn failing_initialization(mut self, code: HResult) -> Self {
        self.initialization_failure = Some(code);
        self
    }

    /// Snapshot of what is stored for `app_id`.
    pub fn jump_list(&self, app_id: &str) -> Option<MemoryJumpList> {
        self.store.borrow().get(app_id).cloned()
    }

    /// Handles given out by this host that have not been released.
    pub fn outstanding_handles(&self) -> usize {
        self.tracker.outstanding()
    }
}

impl ShellHost for MemoryShell {
    fn os_major_version(&self) -> Result<u32> {
        Ok(self.os_major)
    }

    fn create_instance(&self, clsid: &Guid, iid: &Guid) -> Result<Interface> {
        if *clsid != CLSID_AUTOMATIC_DESTINATION_LIST {
            return Err(RecentError::interop(
                "CoCreateInstance",
                HResult::REGDB_E_CLASSNOTREG,
            ));
        }
        if let Some(code) = self.creation_failure {
            return Err(RecentError::interop("CoCreateInstance", code));
        }

        let service = Rc::new(MemoryDestinationList {
            generation: Generation::for_os_major(self.os_major),
            store: Rc::clone(&self.store),
            tracker: self.tracker.clone(),
            app_id: RefCell::new(None),
            initialization_failure: self.initialization_failure,
            _lease: self.tracker.lease(),
        });
        service
            .query(iid)
            .ok_or(RecentError::interop("CoCreateInstance", HResult::E_NOINTERFACE))
    }
}

/// The destination list service object. Only the interface matching the
/// host's OS generation can be queried from it.
struct MemoryDestinationList {
    generation: Generation,
    store: Store,
    tracker: HandleTracker,
    app_id: RefCell<Option<String>>,
    initialization_failure: Option<HResult>,
    _lease: Lease,
}

impl MemoryDestinationList {
    fn app_id(&self, operation: &'static str) -> Result<String> {
        self.app_id
            .borrow()
            .clone()
            .ok_or(RecentError::interop(operation, HResult::E_UNEXPECTED))
    }

    fn with_list<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut MemoryJumpList) -> Result<T>,
    ) -> Result<T> {
        let app_id = self.app_id(operation)?;
        let mut store = self.store.borrow_mut();
        f(store.entry(app_id).or_default())
    }

    fn fetch(
        &self,
        list_type: ListType,
        max_count: u32,
        flags: GetListFlags,
    ) -> Result<Rc<dyn ObjectCollection>> {
        let app_id = self.app_id("GetList")?;
        let store = self.store.borrow();
        let list = store
            .get(&app_id)
            .ok_or(RecentError::interop("GetList", HResult::E_NOT_FOUND))?;

        let exclude_unnamed = flags.contains(GetListFlags::EXCLUDE_UNNAMED_DESTINATIONS);
        let destinations = list
            .list(list_type)
            .iter()
            .filter(|d| d.named || !exclude_unnamed)
            .take(max_count as usize)
            .cloned()
            .collect();

        Ok(MemoryCollection::new(destinations, &self.tracker))
    }
}

impl Component for MemoryDestinationList {
    fn query(self: Rc<Self>, iid: &Guid) -> Option<Interface> {
        match *iid {
            IID_IUNKNOWN => Some(Interface::Unknown(self)),
            iid if iid == Generation::V8.iid() && self.generation == Generation::V8 => {
                Some(Interface::DestinationList8(self))
            }
            iid if iid == Generation::V10.iid() && self.generation == Generation::V10 => {
                Some(Interface::DestinationList10(self))
            }
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl DestinationList for MemoryDestinationList {
    fn initialize(
        &self,
        app_id: &str,
        _reserved1: Option<&str>,
        _reserved2: Option<&str>,
    ) -> Result<()> {
        if self.app_id.borrow().is_some() {
            return Err(RecentError::interop("Initialize", HResult::E_UNEXPECTED));
        }
        if let Some(code) = self.initialization_failure {
            return Err(RecentError::interop("Initialize", code));
        }
        if app_id.is_empty() {
            return Err(RecentError::interop("Initialize", HResult::E_INVALIDARG));
        }
        *self.app_id.borrow_mut() = Some(app_id.to_string());
        Ok(())
    }

    fn has_list(&self) -> Result<bool> {
        let app_id = self.app_id("HasList")?;
        Ok(self
            .store
            .borrow()
            .get(&app_id)
            .is_some_and(|list| !list.is_empty()))
    }

    fn add_usage_point(&self, item: &ComponentRef) -> Result<()> {
        let destination = destination_of(item, "AddUsagePoint")?;
        self.with_list("AddUsagePoint", |list| {
            list.recent.retain(|d| d.key() != destination.key());
            let usage = list
                .usage
                .entry(destination.key().to_string())
                .or_insert(UsageData {
                    access_count: 0.0,
                    last_access: SystemTime::UNIX_EPOCH,
                });
            usage.access_count += 1.0;
            usage.last_access = SystemTime::now();
            list.recent.insert(0, destination);
            Ok(())
        })
    }

    fn pin_item(&self, item: &ComponentRef, pin: bool) -> Result<()> {
        let destination = destination_of(item, "PinItem")?;
        self.with_list("PinItem", |list| {
            let pinned = list.pinned.iter().any(|d| d.key() == destination.key());
            if pin && !pinned {
                list.pinned.push(destination);
            } else if !pin {
                list.pinned.retain(|d| d.key() != destination.key());
            }
            Ok(())
        })
    }

    fn is_pinned(&self, item: &ComponentRef) -> Result<bool> {
        let destination = destination_of(item, "IsPinned")?;
        self.with_list("IsPinned", |list| {
            Ok(list.pinned.iter().any(|d| d.key() == destination.key()))
        })
    }

    fn remove_destination(&self, item: &ComponentRef) -> Result<()> {
        let destination = destination_of(item, "RemoveDestination")?;
        self.with_list("RemoveDestination", |list| {
            for list_type in ListType::ALL {
                list.list_mut(list_type)
                    .retain(|d| d.key() != destination.key());
            }
            list.usage.remove(destination.key());
            Ok(())
        })
    }

    fn set_usage_data(&self, item: &ComponentRef, usage: &UsageData) -> Result<()> {
        let destination = destination_of(item, "SetUsageData")?;
        self.with_list("SetUsageData", |list| {
            list.usage.insert(destination.key().to_string(), *usage);
            Ok(())
        })
    }

    fn get_usage_data(&self, item: &ComponentRef) -> Result<UsageData> {
        let destination = destination_of(item, "GetUsageData")?;
        self.with_list("GetUsageData", |list| {
            list.usage
                .get(destination.key())
                .copied()
                .ok_or(RecentError::interop("GetUsageData", HResult::E_NOT_FOUND))
        })
    }

    fn resolve_destination(
        &self,
        item: &ComponentRef,
        _flags: u32,
        iid: &Guid,
    ) -> Result<Interface> {
        let destination = destination_of(item, "ResolveDestination")?;
        MemoryItem::new(destination, &self.tracker)
            .query(iid)
            .ok_or(RecentError::NoInterface { iid: *iid })
    }

    fn clear_list(&self, list_type: ListType) -> Result<()> {
        self.with_list("ClearList", |list| {
            list.list_mut(list_type).clear();
            Ok(())
        })
    }
}

impl DestinationList8 for MemoryDestinationList {
    fn get_list(
        &self,
        list_type: ListType,
        max_count: u32,
    ) -> Result<Rc<dyn ObjectCollection>> {
        self.fetch(list_type, max_count, GetListFlags::empty())
    }
}

impl DestinationList10 for MemoryDestinationList {
    fn get_list(
        &self,
        list_type: ListType,
        max_count: u32,
        flags: GetListFlags,
    ) -> Result<Rc<dyn ObjectCollection>> {
        self.fetch(list_type, max_count, flags)
    }
}

/// Collection returned by `GetList`.
pub struct MemoryCollection {
    items: RefCell<Vec<MemoryDestination>>,
    tracker: HandleTracker,
    _lease: Lease,
}

impl MemoryCollection {
    /// A standalone collection holding `destinations`.
    pub fn from_destinations(destinations: Vec<MemoryDestination>) -> Rc<Self> {
        let tracker = HandleTracker::default();
        Rc::new(Self {
            items: RefCell::new(destinations),
            _lease: tracker.lease(),
            tracker,
        })
    }

    fn new(destinations: Vec<MemoryDestination>, tracker: &HandleTracker) -> Rc<Self> {
        Rc::new(Self {
            items: RefCell::new(destinations),
            tracker: tracker.clone(),
            _lease: tracker.lease(),
        })
    }
}

impl Component for MemoryCollection {
    fn query(self: Rc<Self>, iid: &Guid) -> Option<Interface> {
        match *iid {
            IID_IUNKNOWN => Some(Interface::Unknown(self)),
            IID_IOBJECTARRAY => Some(Interface::ObjectArray(self)),
            IID_IOBJECTCOLLECTION => Some(Interface::ObjectCollection(self)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ObjectArray for MemoryCollection {
    fn count(&self) -> Result<u32> {
        Ok(self.items.borrow().len() as u32)
    }

    fn get_at(&self, index: u32, iid: &Guid) -> Result<Interface> {
        let items = self.items.borrow();
        let destination = items
            .get(index as usize)
            .cloned()
            .ok_or(RecentError::IndexOutOfRange {
                index: index as usize,
                count: items.len(),
            })?;
        MemoryItem::new(destination, &self.tracker)
            .query(iid)
            .ok_or(RecentError::NoInterface { iid: *iid })
    }
}

impl ObjectCollection for MemoryCollection {
    fn add_object(&self, component: &ComponentRef) -> Result<()> {
        let destination = destination_of(component, "AddObject")?;
        self.items.borrow_mut().push(destination);
        Ok(())
    }

    fn add_from_array(&self, source: &dyn ObjectArray) -> Result<()> {
        for index in 0..source.count()? {
            let component = source.get_at(index, &IID_IUNKNOWN)?.into_component();
            self.add_object(&component)?;
        }
        Ok(())
    }

    fn remove_object_at(&self, index: u32) -> Result<()> {
        let mut items = self.items.borrow_mut();
        if index as usize >= items.len() {
            return Err(RecentError::IndexOutOfRange {
                index: index as usize,
                count: items.len(),
            });
        }
        items.remove(index as usize);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

/// Shell item view of a destination.
struct MemoryItem {
    destination: MemoryDestination,
    tracker: HandleTracker,
    _lease: Lease,
}

impl MemoryItem {
    fn new(destination: MemoryDestination, tracker: &HandleTracker) -> Rc<Self> {
        Rc::new(Self {
            destination,
            tracker: tracker.clone(),
            _lease: tracker.lease(),
        })
    }

    fn no_path(operation: &'static str) -> RecentError {
        RecentError::interop(operation, HResult::E_INVALIDARG)
    }
}

impl Component for MemoryItem {
    fn query(self: Rc<Self>, iid: &Guid) -> Option<Interface> {
        match *iid {
            IID_IUNKNOWN => Some(Interface::Unknown(self)),
            IID_ISHELLITEM => Some(Interface::ShellItem(self)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ShellItem for MemoryItem {
    fn display_name(&self, form: DisplayForm) -> Result<String> {
        let d = &self.destination;
        match form {
            DisplayForm::NormalDisplay
            | DisplayForm::ParentRelativeParsing
            | DisplayForm::ParentRelativeEditing => Ok(d.display.clone()),
            DisplayForm::DesktopAbsoluteParsing | DisplayForm::DesktopAbsoluteEditing => {
                Ok(d.key().to_string())
            }
            DisplayForm::FileSysPath => d
                .path
                .clone()
                .ok_or_else(|| Self::no_path("GetDisplayName")),
            DisplayForm::Url => d
                .path
                .as_ref()
                .map(|p| format!("file:///{}", p.replace('\\', "/")))
                .ok_or_else(|| Self::no_path("GetDisplayName")),
        }
    }

    fn parent(&self) -> Result<Rc<dyn ShellItem>> {
        let parent = self
            .destination
            .path
            .as_deref()
            .and_then(parent_of)
            .ok_or(RecentError::interop("GetParent", HResult::E_FAIL))?;
        Ok(MemoryItem::new(
            MemoryDestination::folder(parent),
            &self.tracker,
        ))
    }

    fn attributes(&self, mask: u32) -> Result<u32> {
        let mut attributes = 0;
        if self.destination.path.is_some() {
            attributes |= SFGAO_FILESYSTEM;
        }
        if self.destination.folder {
            attributes |= SFGAO_FOLDER;
        }
        Ok(attributes & mask)
    }

    fn compare(&self, other: &dyn ShellItem, _hint: u32) -> Result<Ordering> {
        let mine = self.destination.key().to_lowercase();
        let theirs = other
            .display_name(DisplayForm::DesktopAbsoluteParsing)?
            .to_lowercase();
        Ok(mine.cmp(&theirs))
    }

    fn bind_to_handler(&self, _bhid: &Guid, _iid: &Guid) -> Result<Interface> {
        Err(RecentError::interop("BindToHandler", HResult::E_NOTIMPL))
    }
}

/// Recover the fixture behind a handle this host gave out.
fn destination_of(component: &ComponentRef, operation: &'static str) -> Result<MemoryDestination> {
    component
        .as_any()
        .downcast_ref::<MemoryItem>()
        .map(|item| item.destination.clone())
        .ok_or(RecentError::interop(operation, HResult::E_INVALIDARG))
}

fn file_name(path: &str) -> &str {
    path.rsplit(['\\', '/'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}

fn parent_of(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches(['\\', '/']);
    let cut = trimmed.rfind(['\\', '/'])?;
    let parent = &trimmed[..cut];
    if parent.is_empty() {
        return None;
    }
    if parent.ends_with(':') {
        return Some(format!("{parent}\\"));
    }
    Some(parent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::com::{try_as, ObjectArrayExt};

    fn service(shell: &MemoryShell) -> Rc<dyn DestinationList10> {
        let iface = shell
            .create_instance(&CLSID_AUTOMATIC_DESTINATION_LIST, &Generation::V10.iid())
            .unwrap();
        <dyn DestinationList10 as crate::com::Capability>::narrow(iface).unwrap()
    }

    fn item(path: &str) -> ComponentRef {
        MemoryDestination::file(path).into_component()
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(file_name("C:\\docs\\a.txt"), "a.txt");
        assert_eq!(file_name("/home/u/b.md"), "b.md");
        assert_eq!(parent_of("C:\\docs\\a.txt").as_deref(), Some("C:\\docs"));
        assert_eq!(parent_of("C:\\docs").as_deref(), Some("C:\\"));
        assert_eq!(parent_of("C:\\"), None);
    }

    #[test]
    fn test_unknown_class_is_not_registered() {
        let shell = MemoryShell::new(10);
        let err = shell
            .create_instance(&IID_ISHELLITEM, &Generation::V10.iid())
            .err()
            .unwrap();
        assert_eq!(err.code(), Some(HResult::REGDB_E_CLASSNOTREG));
    }

    #[test]
    fn test_only_matching_generation_is_exposed() {
        let shell = MemoryShell::new(10);
        assert!(shell
            .create_instance(&CLSID_AUTOMATIC_DESTINATION_LIST, &Generation::V8.iid())
            .is_err());

        let shell = MemoryShell::new(8);
        assert!(shell
            .create_instance(&CLSID_AUTOMATIC_DESTINATION_LIST, &Generation::V8.iid())
            .is_ok());
    }

    #[test]
    fn test_calls_before_initialize_fail_cleanly() {
        let shell = MemoryShell::new(10);
        let list = service(&shell);
        let err = list.has_list().err().unwrap();
        assert_eq!(err.code(), Some(HResult::E_UNEXPECTED));
        assert!(list
            .get_list(ListType::Recent, 10, GetListFlags::empty())
            .is_err());
    }

    #[test]
    fn test_initialize_only_once() {
        let shell = MemoryShell::new(10);
        let list = service(&shell);
        list.initialize("App", None, None).unwrap();
        assert!(list.initialize("App", None, None).is_err());
        assert!(service(&shell).initialize("", None, None).is_err());
    }

    #[test]
    fn test_pin_and_unpin() {
        let shell = MemoryShell::new(10);
        let list = service(&shell);
        list.initialize("App", None, None).unwrap();

        let report = item("C:\\report.txt");
        assert!(!list.is_pinned(&report).unwrap());
        list.pin_item(&report, true).unwrap();
        list.pin_item(&report, true).unwrap();
        assert!(list.is_pinned(&report).unwrap());
        assert_eq!(shell.jump_list("App").unwrap().list(ListType::Pinned).len(), 1);

        list.pin_item(&report, false).unwrap();
        assert!(!list.is_pinned(&report).unwrap());
    }

    #[test]
    fn test_usage_points_move_to_front_of_recent() {
        let shell = MemoryShell::new(10).with_app(
            "App",
            MemoryJumpList::new().recent(vec![
                MemoryDestination::file("C:\\a"),
                MemoryDestination::file("C:\\b"),
            ]),
        );
        let list = service(&shell);
        list.initialize("App", None, None).unwrap();

        list.add_usage_point(&item("C:\\b")).unwrap();
        list.add_usage_point(&item("C:\\b")).unwrap();

        let stored = shell.jump_list("App").unwrap();
        let recent: Vec<_> = stored
            .list(ListType::Recent)
            .iter()
            .map(|d| d.path().unwrap())
            .collect();
        assert_eq!(recent, vec!["C:\\b", "C:\\a"]);
        assert_eq!(list.get_usage_data(&item("C:\\b")).unwrap().access_count, 2.0);
        assert!(list.get_usage_data(&item("C:\\a")).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let shell = MemoryShell::new(10).with_app(
            "App",
            MemoryJumpList::new()
                .recent(vec![MemoryDestination::file("C:\\a")])
                .frequent(vec![
                    MemoryDestination::file("C:\\a"),
                    MemoryDestination::file("C:\\b"),
                ]),
        );
        let list = service(&shell);
        list.initialize("App", None, None).unwrap();

        list.remove_destination(&item("C:\\a")).unwrap();
        let stored = shell.jump_list("App").unwrap();
        assert!(stored.list(ListType::Recent).is_empty());
        assert_eq!(stored.list(ListType::Frequent).len(), 1);

        list.clear_list(ListType::Frequent).unwrap();
        assert!(!list.has_list().unwrap());
    }

    #[test]
    fn test_resolve_destination() {
        let shell = MemoryShell::new(10);
        let list = service(&shell);
        list.initialize("App", None, None).unwrap();

        let resolved = list
            .resolve_destination(&item("C:\\a"), 0, &IID_ISHELLITEM)
            .unwrap();
        assert_eq!(resolved.iid(), IID_ISHELLITEM);
        assert!(list
            .resolve_destination(&item("C:\\a"), 0, &IID_IOBJECTARRAY)
            .is_err());
    }

    #[test]
    fn test_foreign_handles_are_rejected() {
        let shell = MemoryShell::new(10);
        let list = service(&shell);
        list.initialize("App", None, None).unwrap();

        let collection: ComponentRef = MemoryCollection::from_destinations(vec![]);
        let err = list.pin_item(&collection, true).err().unwrap();
        assert_eq!(err.code(), Some(HResult::E_INVALIDARG));
    }

    #[test]
    fn test_handles_are_released() {
        let shell = MemoryShell::new(10).with_app(
            "App",
            MemoryJumpList::new().recent(vec![MemoryDestination::file("C:\\a")]),
        );
        {
            let list = service(&shell);
            list.initialize("App", None, None).unwrap();
            let collection = list
                .get_list(ListType::Recent, 10, GetListFlags::empty())
                .unwrap();
            let entry = collection.get_as::<dyn ShellItem>(0).unwrap();
            let _parent = entry.parent().unwrap();
            let base: ComponentRef = collection.get_as::<dyn Component>(0).unwrap();
            assert!(try_as::<dyn ShellItem>(&base).is_some());
            assert!(shell.outstanding_handles() >= 4);
        }
        assert_eq!(shell.outstanding_handles(), 0);
    }
}
