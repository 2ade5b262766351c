//! Data sources the catalog is built from.
//!
//! # Architecture
//!
//! - `recent_dir` - Shortcuts in the per-user Recent folder
//! - `recent_docs` - The Explorer RecentDocs registry list
//! - `jump_lists` - Destinations of configured application ids

pub mod jump_lists;
pub mod recent_dir;
pub mod recent_docs;

pub use jump_lists::{collect, JumpListEntry};
pub use recent_dir::scan_recent_directory;
pub use recent_docs::{
    decode_link_name, decode_recent_doc, parse_mru_list_ex, RecentDocsStore, RecentDocument,
};

#[cfg(windows)]
pub use recent_docs::RegistryRecentDocs;
