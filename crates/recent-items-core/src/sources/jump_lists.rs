//! Destinations of configured application ids.

use crate::jumplist::{JumpList, ListType, ShellHost};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One resolved Jump List destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpListEntry {
    pub app_id: String,
    pub list_type: ListType,
    pub path: PathBuf,
}

/// Read `list_types` of every app id, at most `max_count` entries per list.
///
/// An app id whose destination list cannot be created or initialized is
/// logged and skipped; the others are still read. Destinations without a
/// filesystem path are dropped.
pub fn collect(
    host: &dyn ShellHost,
    app_ids: &[String],
    list_types: &[ListType],
    max_count: u32,
) -> Vec<JumpListEntry> {
    let mut entries = Vec::new();

    for app_id in app_ids {
        let jump_list = match JumpList::new(host, app_id.as_str()) {
            Ok(jump_list) => jump_list,
            Err(e) => {
                warn!("Jump List disabled for {}: {}", app_id, e);
                continue;
            }
        };

        for &list_type in list_types {
            let paths = jump_list.paths(list_type, max_count);
            debug!("{} {} destination(s) for {}", paths.len(), list_type, app_id);
            entries.extend(paths.into_iter().map(|path| JumpListEntry {
                app_id: app_id.clone(),
                list_type,
                path,
            }));
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::com::HResult;
    use crate::jumplist::memory::{MemoryDestination, MemoryJumpList, MemoryShell};

    fn shell() -> MemoryShell {
        MemoryShell::new(10)
            .with_app(
                "Editor",
                MemoryJumpList::new()
                    .pinned(vec![MemoryDestination::file("C:\\notes\\todo.txt")])
                    .recent(vec![
                        MemoryDestination::file("C:\\notes\\a.txt"),
                        MemoryDestination::virtual_item("Control Panel"),
                        MemoryDestination::file("C:\\notes\\b.txt"),
                    ]),
            )
            .with_app(
                "Viewer",
                MemoryJumpList::new().recent(vec![MemoryDestination::file("D:\\photo.png")]),
            )
    }

    #[test]
    fn test_collect_reads_every_app_and_list() {
        let app_ids = vec!["Editor".to_string(), "Viewer".to_string()];
        let entries = collect(&shell(), &app_ids, &ListType::ALL, 20);

        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.app_id.as_str(), e.list_type, e.path.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Editor", ListType::Pinned, "C:\\notes\\todo.txt".to_string()),
                ("Editor", ListType::Recent, "C:\\notes\\a.txt".to_string()),
                ("Editor", ListType::Recent, "C:\\notes\\b.txt".to_string()),
                ("Viewer", ListType::Recent, "D:\\photo.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_collect_honours_max_count() {
        let app_ids = vec!["Editor".to_string()];
        let entries = collect(&shell(), &app_ids, &[ListType::Recent], 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("C:\\notes\\a.txt"));
    }

    #[test]
    fn test_unknown_app_contributes_nothing() {
        let app_ids = vec!["Missing".to_string(), "Viewer".to_string()];
        let entries = collect(&shell(), &app_ids, &ListType::ALL, 20);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].app_id, "Viewer");
    }

    #[test]
    fn test_failed_initialization_skips_app() {
        let host = shell().failing_initialization(HResult::E_INVALIDARG);
        let app_ids = vec!["Editor".to_string(), "Viewer".to_string()];
        assert!(collect(&host, &app_ids, &ListType::ALL, 20).is_empty());
    }
}
