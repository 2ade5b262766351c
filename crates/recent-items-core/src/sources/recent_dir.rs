//! Shortcuts in the per-user Recent folder.

use crate::config::JumpListConfig;
use crate::error::{RecentError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List the `*.lnk` files directly inside `dir`, sorted by file name.
///
/// Subfolders are not descended into. A missing or unreadable folder is an
/// error; unreadable entries inside it are skipped.
pub fn scan_recent_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(dir).map_err(|e| RecentError::io_with_path(e, dir))?;
    if !metadata.is_dir() {
        return Err(RecentError::io_with_path(
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            dir,
        ));
    }

    let links: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_link(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    debug!("Found {} link(s) in {}", links.len(), dir.display());
    Ok(links)
}

fn is_link(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JumpListConfig::RECENT_LINK_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_finds_links_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt.lnk"), b"").unwrap();
        fs::write(temp.path().join("a.docx.LNK"), b"").unwrap();
        fs::write(temp.path().join("notes.txt"), b"").unwrap();

        let links = scan_recent_directory(temp.path()).unwrap();
        let names: Vec<_> = links
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.docx.LNK", "b.txt.lnk"]);
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("AutomaticDestinations");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.lnk"), b"").unwrap();
        fs::create_dir(temp.path().join("folder.lnk")).unwrap();

        assert!(scan_recent_directory(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        match scan_recent_directory(&missing) {
            Err(RecentError::Io { path, .. }) => assert_eq!(path, Some(missing)),
            other => panic!("expected Io error, got {:?}", other.map(|v| v.len())),
        }
    }
}
