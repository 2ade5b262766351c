//! Launcher catalog built from the recent item sources.

use crate::config::Settings;
use crate::jumplist::{ListType, ShellHost};
use crate::sources::{self, RecentDocsStore, RecentDocument};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Kind of object a catalog item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    File,
}

/// Where a catalog item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    RecentLink,
    JumpList { app_id: String, list_type: ListType },
    RecentDocument,
}

/// One launchable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub category: ItemCategory,
    pub label: String,
    pub short_desc: String,
    pub target: PathBuf,
    pub source: ItemSource,
}

impl CatalogItem {
    fn recent_link(link: PathBuf) -> Self {
        Self {
            category: ItemCategory::File,
            label: stem(&link),
            short_desc: format!("Recent link: {}", link.display()),
            target: link,
            source: ItemSource::RecentLink,
        }
    }

    fn jump_list(entry: sources::JumpListEntry) -> Self {
        let label = entry
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.path.display().to_string());
        Self {
            category: ItemCategory::File,
            label,
            short_desc: format!("Jump list ({}): {}", entry.list_type, entry.path.display()),
            target: entry.path,
            source: ItemSource::JumpList {
                app_id: entry.app_id,
                list_type: entry.list_type,
            },
        }
    }

    fn recent_document(document: RecentDocument, link: PathBuf) -> Self {
        Self {
            category: ItemCategory::File,
            label: document.name,
            short_desc: format!("Recent document: {}", link.display()),
            target: link,
            source: ItemSource::RecentDocument,
        }
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Builds the catalog from whichever sources the settings enable.
///
/// Sources that were not supplied are skipped. Items are de-duplicated by
/// target, first source wins, in the order: Recent folder, Jump Lists,
/// RecentDocs.
pub struct CatalogBuilder<'a> {
    settings: &'a Settings,
    recent_dir: Option<PathBuf>,
    shell_host: Option<&'a dyn ShellHost>,
    recent_docs: Option<&'a dyn RecentDocsStore>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            recent_dir: None,
            shell_host: None,
            recent_docs: None,
        }
    }

    /// The Recent shortcut folder; also used to locate RecentDocs links.
    pub fn with_recent_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.recent_dir = Some(dir.into());
        self
    }

    pub fn with_shell_host(mut self, host: &'a dyn ShellHost) -> Self {
        self.shell_host = Some(host);
        self
    }

    pub fn with_recent_docs(mut self, store: &'a dyn RecentDocsStore) -> Self {
        self.recent_docs = Some(store);
        self
    }

    pub fn build(&self) -> Vec<CatalogItem> {
        let mut catalog = Catalog::default();

        if self.settings.scan_recent_directory {
            let start = Instant::now();
            let count = self.add_recent_links(&mut catalog);
            log_catalog_duration(start, "link", count);
        }

        if self.settings.scan_jump_lists && !self.settings.jump_list_app_ids.is_empty() {
            let start = Instant::now();
            let count = self.add_jump_lists(&mut catalog);
            log_catalog_duration(start, "jump list destination", count);
        }

        if self.settings.scan_recent_docs {
            let start = Instant::now();
            let count = self.add_recent_documents(&mut catalog);
            log_catalog_duration(start, "recent document", count);
        }

        catalog.items
    }

    fn add_recent_links(&self, catalog: &mut Catalog) -> usize {
        let Some(dir) = &self.recent_dir else {
            debug!("No Recent folder to scan");
            return 0;
        };
        match sources::scan_recent_directory(dir) {
            Ok(links) => catalog.extend(links.into_iter().map(CatalogItem::recent_link)),
            Err(e) => {
                debug!("Skipping Recent folder: {}", e);
                0
            }
        }
    }

    fn add_jump_lists(&self, catalog: &mut Catalog) -> usize {
        let Some(host) = self.shell_host else {
            debug!("No shell host for Jump Lists");
            return 0;
        };
        let entries = sources::collect(
            host,
            &self.settings.jump_list_app_ids,
            &self.settings.jump_list_types,
            self.settings.max_jump_list_entries,
        );
        catalog.extend(entries.into_iter().map(CatalogItem::jump_list))
    }

    fn add_recent_documents(&self, catalog: &mut Catalog) -> usize {
        let (Some(store), Some(dir)) = (self.recent_docs, &self.recent_dir) else {
            debug!("No RecentDocs store or Recent folder");
            return 0;
        };
        let documents = match store.recent_docs() {
            Ok(documents) => documents,
            Err(e) => {
                debug!("Skipping RecentDocs: {}", e);
                return 0;
            }
        };

        let items = documents.into_iter().filter_map(|document| {
            let link = dir.join(document.link_file_name());
            if link.is_file() {
                Some(CatalogItem::recent_document(document, link))
            } else {
                debug!("No link for recent document {}", document.name);
                None
            }
        });
        catalog.extend(items)
    }
}

#[derive(Default)]
struct Catalog {
    items: Vec<CatalogItem>,
    targets: HashSet<String>,
}

impl Catalog {
    /// Add items with unseen targets; returns how many were added.
    fn extend(&mut self, items: impl IntoIterator<Item = CatalogItem>) -> usize {
        let before = self.items.len();
        for item in items {
            // Shell paths compare case-insensitively.
            let key = item.target.to_string_lossy().to_lowercase();
            if self.targets.insert(key) {
                self.items.push(item);
            } else {
                debug!("Duplicate target {}", item.target.display());
            }
        }
        self.items.len() - before
    }
}

fn log_catalog_duration(start: Instant, what: &str, count: usize) {
    let elapsed = start.elapsed().as_secs_f64();
    let plural = if count == 1 { "" } else { "s" };
    info!("Cataloged {} {}{} in {:.1} seconds", count, what, plural, elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::jumplist::memory::{MemoryDestination, MemoryJumpList, MemoryShell};
    use std::fs;
    use tempfile::TempDir;

    struct FixedDocs(Vec<RecentDocument>);

    impl RecentDocsStore for FixedDocs {
        fn recent_docs(&self) -> Result<Vec<RecentDocument>> {
            Ok(self.0.clone())
        }
    }

    fn recent_folder(names: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for name in names {
            fs::write(temp.path().join(name), b"").unwrap();
        }
        temp
    }

    #[test]
    fn test_recent_links() {
        let temp = recent_folder(&["report.docx.lnk", "notes.txt.lnk", "readme.md"]);
        let settings = Settings::default();

        let items = CatalogBuilder::new(&settings)
            .with_recent_dir(temp.path())
            .build();

        assert_eq!(items.len(), 2);
        let notes = &items[0];
        assert_eq!(notes.category, ItemCategory::File);
        assert_eq!(notes.label, "notes.txt");
        assert_eq!(notes.target, temp.path().join("notes.txt.lnk"));
        assert_eq!(
            notes.short_desc,
            format!("Recent link: {}", temp.path().join("notes.txt.lnk").display())
        );
        assert_eq!(notes.source, ItemSource::RecentLink);
    }

    #[test]
    fn test_disabled_recent_directory() {
        let temp = recent_folder(&["report.docx.lnk"]);
        let settings = Settings {
            scan_recent_directory: false,
            ..Settings::default()
        };

        let items = CatalogBuilder::new(&settings)
            .with_recent_dir(temp.path())
            .build();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missing_recent_directory_is_skipped() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::default();
        let items = CatalogBuilder::new(&settings)
            .with_recent_dir(temp.path().join("gone"))
            .build();
        assert!(items.is_empty());
    }

    #[test]
    fn test_jump_list_items() {
        let host = MemoryShell::new(10).with_app(
            "Editor",
            MemoryJumpList::new()
                .pinned(vec![MemoryDestination::file("C:\\work\\plan.txt")])
                .recent(vec![
                    MemoryDestination::file("C:\\work\\plan.txt"),
                    MemoryDestination::file("C:\\work\\log.txt"),
                ]),
        );
        let settings = Settings {
            scan_recent_directory: false,
            jump_list_app_ids: vec!["Editor".into()],
            ..Settings::default()
        };

        let items = CatalogBuilder::new(&settings).with_shell_host(&host).build();

        let descs: Vec<_> = items.iter().map(|i| i.short_desc.as_str()).collect();
        assert_eq!(
            descs,
            vec![
                "Jump list (pinned): C:\\work\\plan.txt",
                "Jump list (recent): C:\\work\\log.txt",
            ]
        );
        assert_eq!(
            items[0].source,
            ItemSource::JumpList {
                app_id: "Editor".into(),
                list_type: ListType::Pinned,
            }
        );
        assert_eq!(host.outstanding_handles(), 0);
    }

    #[test]
    fn test_recent_documents_map_to_links() {
        let temp = recent_folder(&["budget.xlsx.lnk"]);
        let docs = FixedDocs(vec![
            RecentDocument::new("budget.xlsx"),
            RecentDocument::new("deleted.txt"),
        ]);
        let settings = Settings {
            scan_recent_directory: false,
            scan_recent_docs: true,
            ..Settings::default()
        };

        let items = CatalogBuilder::new(&settings)
            .with_recent_dir(temp.path())
            .with_recent_docs(&docs)
            .build();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "budget.xlsx");
        assert_eq!(items[0].source, ItemSource::RecentDocument);
        assert!(items[0].short_desc.starts_with("Recent document: "));
    }

    #[test]
    fn test_recent_documents_use_recorded_link_name() {
        let temp = recent_folder(&["report (2).docx.lnk"]);
        let docs = FixedDocs(vec![
            RecentDocument::new("report.docx").with_link_name("report (2).docx.lnk"),
        ]);
        let settings = Settings {
            scan_recent_directory: false,
            scan_recent_docs: true,
            ..Settings::default()
        };

        let items = CatalogBuilder::new(&settings)
            .with_recent_dir(temp.path())
            .with_recent_docs(&docs)
            .build();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "report.docx");
        assert_eq!(items[0].target, temp.path().join("report (2).docx.lnk"));
    }

    #[test]
    fn test_duplicates_keep_first_source() {
        let temp = recent_folder(&["budget.xlsx.lnk"]);
        let docs = FixedDocs(vec![RecentDocument::new("BUDGET.xlsx")]);
        let settings = Settings {
            scan_recent_docs: true,
            ..Settings::default()
        };

        let items = CatalogBuilder::new(&settings)
            .with_recent_dir(temp.path())
            .with_recent_docs(&docs)
            .build();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, ItemSource::RecentLink);
    }

    #[test]
    fn test_catalog_item_serializes() {
        let item = CatalogItem::jump_list(sources::JumpListEntry {
            app_id: "Editor".into(),
            list_type: ListType::Frequent,
            path: PathBuf::from("/tmp/a.txt"),
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "file");
        assert_eq!(json["label"], "a.txt");
        assert_eq!(json["source"]["kind"], "jump_list");
        assert_eq!(json["source"]["list_type"], "frequent");
    }
}
