//! Shell item capability.

use super::{Component, Guid, Interface};
use crate::error::Result;
use std::cmp::Ordering;
use std::rc::Rc;

/// Item lives in the filesystem.
pub const SFGAO_FILESYSTEM: u32 = 0x4000_0000;
/// Item is a folder.
pub const SFGAO_FOLDER: u32 = 0x2000_0000;

/// Display name forms a shell item can be resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayForm {
    NormalDisplay,
    ParentRelativeParsing,
    DesktopAbsoluteParsing,
    ParentRelativeEditing,
    DesktopAbsoluteEditing,
    /// Absolute filesystem path. Fails for virtual items.
    FileSysPath,
    Url,
}

impl DisplayForm {
    /// The host's `SIGDN` value.
    pub fn as_raw(self) -> i32 {
        let raw: u32 = match self {
            DisplayForm::NormalDisplay => 0x0000_0000,
            DisplayForm::ParentRelativeParsing => 0x8001_8001,
            DisplayForm::DesktopAbsoluteParsing => 0x8002_8000,
            DisplayForm::ParentRelativeEditing => 0x8003_1001,
            DisplayForm::DesktopAbsoluteEditing => 0x8004_c000,
            DisplayForm::FileSysPath => 0x8005_8000,
            DisplayForm::Url => 0x8006_8000,
        };
        raw as i32
    }
}

/// A shell namespace object.
pub trait ShellItem: Component {
    /// Resolve the item to text in the given form.
    fn display_name(&self, form: DisplayForm) -> Result<String>;

    fn parent(&self) -> Result<Rc<dyn ShellItem>>;

    /// Attribute bits from `mask` that apply to this item.
    fn attributes(&self, mask: u32) -> Result<u32>;

    fn compare(&self, other: &dyn ShellItem, hint: u32) -> Result<Ordering>;

    /// Bind to handler `bhid`, returned as capability `iid`.
    fn bind_to_handler(&self, bhid: &Guid, iid: &Guid) -> Result<Interface>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::com::try_as;
    use crate::jumplist::memory::MemoryDestination;

    fn item(destination: MemoryDestination) -> Rc<dyn ShellItem> {
        try_as::<dyn ShellItem>(&destination.into_component()).unwrap()
    }

    #[test]
    fn test_filesys_path_raw_value() {
        assert_eq!(DisplayForm::FileSysPath.as_raw() as u32, 0x80058000);
        assert_eq!(DisplayForm::NormalDisplay.as_raw(), 0);
    }

    #[test]
    fn test_virtual_item_has_no_filesystem_path() {
        let virtual_item = item(MemoryDestination::virtual_item("Control Panel"));
        assert!(virtual_item.display_name(DisplayForm::FileSysPath).is_err());
        assert_eq!(
            virtual_item.display_name(DisplayForm::NormalDisplay).unwrap(),
            "Control Panel"
        );
        assert_eq!(virtual_item.attributes(SFGAO_FILESYSTEM).unwrap(), 0);
    }

    #[test]
    fn test_parent_and_compare() {
        let file = item(MemoryDestination::file("C:\\docs\\report.txt"));
        let parent = file.parent().unwrap();
        assert_eq!(
            parent.display_name(DisplayForm::FileSysPath).unwrap(),
            "C:\\docs"
        );
        assert_eq!(
            parent.attributes(SFGAO_FILESYSTEM | SFGAO_FOLDER).unwrap(),
            SFGAO_FILESYSTEM | SFGAO_FOLDER
        );

        let other = item(MemoryDestination::file("C:\\docs\\zeta.txt"));
        assert_eq!(file.compare(other.as_ref(), 0).unwrap(), Ordering::Less);
        assert_eq!(file.compare(file.as_ref(), 0).unwrap(), Ordering::Equal);
    }
}
