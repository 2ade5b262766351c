//! Recent Items Core - Headless access to Windows Jump Lists and recent items.
//!
//! This crate reads the per-application Jump Lists kept by the Windows shell
//! (pinned, recent and frequent destinations), the Recent shortcut folder and
//! the Explorer RecentDocs list, and turns them into a launcher catalog. It
//! can be used programmatically without the `recent-items` CLI.
//!
//! The shell is reached through a [`ShellHost`]. On Windows that is the
//! Automatic Destination List COM service; everywhere else (and in tests) the
//! in-memory host in [`jumplist::memory`] stands in for it.
//!
//! # Example
//!
//! ```rust,ignore
//! use recent_items::{platform, JumpList, ListType};
//!
//! fn main() -> recent_items::Result<()> {
//!     let _runtime = platform::ComRuntime::initialize()?;
//!     let host = platform::default_shell_host()?;
//!
//!     let jump_list = JumpList::new(host.as_ref(), "Microsoft.Windows.Explorer")?;
//!     for path in jump_list.paths(ListType::Recent, 10) {
//!         println!("{}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod com;
pub mod config;
pub mod error;
pub mod jumplist;
pub mod platform;
pub mod sources;

// Re-export commonly used types
pub use catalog::{CatalogBuilder, CatalogItem, ItemCategory, ItemSource};
pub use com::{try_as, Component, ComponentRef, Guid, HResult, Interface};
pub use config::{AppConfig, JumpListConfig, Settings};
pub use error::{RecentError, Result};
pub use jumplist::{
    resolve_path, Destinations, Generation, GetListFlags, JumpList, ListType, ShellHost,
};
pub use platform::ComRuntime;
pub use sources::{JumpListEntry, RecentDocsStore, RecentDocument};
