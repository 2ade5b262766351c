//! The Explorer RecentDocs list.
//!
//! Explorer records recently opened documents under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\RecentDocs`, once
//! in the key itself and once per extension subkey. Each numbered value starts
//! with the document name as a NUL-terminated UTF-16 string, followed by the
//! shell item of its shortcut in the Recent folder; `MRUListEx` holds the value
//! numbers, most recent first.

use crate::config::JumpListConfig;
use crate::error::Result;

/// Name of the value holding the most-recently-used order.
pub const MRU_LIST_VALUE: &str = "MRUListEx";

/// One RecentDocs entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentDocument {
    /// Document file name, e.g. `report.docx`.
    pub name: String,
    /// File name of its shortcut in the Recent folder, when the value
    /// records one. Explorer appends ` (2)` and so on when names clash.
    pub link_name: Option<String>,
}

impl RecentDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link_name: None,
        }
    }

    pub fn with_link_name(mut self, link_name: impl Into<String>) -> Self {
        self.link_name = Some(link_name.into());
        self
    }

    /// The shortcut file name, falling back to `<name>.lnk`.
    pub fn link_file_name(&self) -> String {
        match &self.link_name {
            Some(link_name) => link_name.clone(),
            None => format!("{}.{}", self.name, JumpListConfig::RECENT_LINK_EXTENSION),
        }
    }
}

/// Something that can list recently opened documents.
pub trait RecentDocsStore {
    /// Documents, most recent first, without duplicate names.
    fn recent_docs(&self) -> Result<Vec<RecentDocument>>;
}

fn utf16_units(data: &[u8]) -> impl Iterator<Item = u16> + '_ {
    data.chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
}

/// Decode a RecentDocs value: the leading NUL-terminated UTF-16LE document
/// name and, if present, the shortcut name stored after it.
///
/// Returns `None` for empty or malformed data.
pub fn decode_recent_doc(data: &[u8]) -> Option<RecentDocument> {
    let units: Vec<u16> = utf16_units(data).take_while(|&unit| unit != 0).collect();
    if units.is_empty() {
        return None;
    }
    let name = String::from_utf16(&units).ok()?;
    let tail = data.get((units.len() + 1) * 2..).unwrap_or_default();
    Some(RecentDocument {
        name,
        link_name: decode_link_name(tail),
    })
}

/// The last UTF-16LE string ending in `.lnk` inside the shell item data.
///
/// The shell item mixes byte-sized fields with UTF-16 text, so the name is
/// found by its suffix rather than at a fixed offset.
pub fn decode_link_name(tail: &[u8]) -> Option<String> {
    let suffix: Vec<u8> = format!(".{}", JumpListConfig::RECENT_LINK_EXTENSION)
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    let end = tail
        .windows(suffix.len())
        .rposition(|window| window.eq_ignore_ascii_case(&suffix))?
        + suffix.len();

    // Walk back to the first unit after a NUL or control character.
    let mut start = end - suffix.len();
    while start >= 2 && u16::from_le_bytes([tail[start - 2], tail[start - 1]]) >= 0x20 {
        start -= 2;
    }

    let units: Vec<u16> = utf16_units(&tail[start..end]).collect();
    let link_name = String::from_utf16(&units).ok()?;
    (units.len() * 2 > suffix.len()).then_some(link_name)
}

/// Parse an `MRUListEx` value: little-endian `u32` value numbers ending at
/// `0xFFFFFFFF`.
pub fn parse_mru_list_ex(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(4)
        .map(|quad| u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]))
        .take_while(|&index| index != u32::MAX)
        .collect()
}

/// Order the raw values of one key and decode them.
///
/// Values listed in `MRUListEx` come first in that order; numbered values it
/// does not mention follow in enumeration order.
pub fn ordered_documents(values: &[(String, Vec<u8>)]) -> Vec<RecentDocument> {
    let order = values
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(MRU_LIST_VALUE))
        .map(|(_, data)| parse_mru_list_ex(data))
        .unwrap_or_default();

    let numbered = |name: &str| name.parse::<u32>().ok();
    let listed = order.iter().filter_map(|index| {
        values
            .iter()
            .find(|(name, _)| numbered(name) == Some(*index))
    });
    let unlisted = values.iter().filter(|(name, _)| {
        numbered(name).is_some_and(|index| !order.contains(&index))
    });

    listed
        .chain(unlisted)
        .filter_map(|(_, data)| decode_recent_doc(data))
        .collect()
}

/// Append `documents` to `out`, skipping names already present.
pub(crate) fn merge_unique(out: &mut Vec<RecentDocument>, documents: Vec<RecentDocument>) {
    for document in documents {
        if !out.iter().any(|d| d.name.eq_ignore_ascii_case(&document.name)) {
            out.push(document);
        }
    }
}

#[cfg(windows)]
pub use registry::RegistryRecentDocs;

#[cfg(windows)]
mod registry {
    // Registry FFI. Each unsafe block carries a `SAFETY:` note.
    #![allow(unsafe_code)]

    use super::{merge_unique, ordered_documents, RecentDocsStore, RecentDocument};
    use crate::com::HResult;
    use crate::config::JumpListConfig;
    use crate::error::{RecentError, Result};
    use std::ptr;
    use tracing::debug;
    use windows_sys::Win32::Foundation::{
        ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS,
    };
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegEnumKeyExW, RegEnumValueW, RegOpenKeyExW, HKEY, HKEY_CURRENT_USER,
        KEY_READ,
    };

    const MAX_NAME_LEN: usize = 16_384;
    const INITIAL_DATA_LEN: usize = 1024;

    fn win32(operation: &'static str, code: u32) -> RecentError {
        RecentError::interop(operation, HResult::from_win32(code))
    }

    fn wide(text: &str) -> Vec<u16> {
        text.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// An open registry key, closed on drop.
    struct RegKey(HKEY);

    impl RegKey {
        /// Open `path` below `parent` for reading; `None` if it does not exist.
        fn open(parent: HKEY, path: &str) -> Result<Option<Self>> {
            let path = wide(path);
            let mut handle: HKEY = ptr::null_mut();
            // SAFETY: `path` is NUL-terminated and `handle` is a valid out pointer.
            let status =
                unsafe { RegOpenKeyExW(parent, path.as_ptr(), 0, KEY_READ, &mut handle) };
            match status {
                ERROR_SUCCESS => Ok(Some(Self(handle))),
                ERROR_FILE_NOT_FOUND => Ok(None),
                code => Err(win32("RegOpenKeyExW", code)),
            }
        }

        fn subkeys(&self) -> Result<Vec<String>> {
            let mut names = Vec::new();
            let mut name = vec![0u16; MAX_NAME_LEN];
            for index in 0.. {
                let mut len = name.len() as u32;
                // SAFETY: `name` holds `len` units; the optional class and
                // timestamp outputs are not requested.
                let status = unsafe {
                    RegEnumKeyExW(
                        self.0,
                        index,
                        name.as_mut_ptr(),
                        &mut len,
                        ptr::null(),
                        ptr::null_mut(),
                        ptr::null_mut(),
                        ptr::null_mut(),
                    )
                };
                match status {
                    ERROR_SUCCESS => {
                        names.push(String::from_utf16_lossy(&name[..len as usize]))
                    }
                    ERROR_NO_MORE_ITEMS => break,
                    code => return Err(win32("RegEnumKeyExW", code)),
                }
            }
            Ok(names)
        }

        fn values(&self) -> Result<Vec<(String, Vec<u8>)>> {
            let mut values = Vec::new();
            let mut name = vec![0u16; MAX_NAME_LEN];
            let mut data = vec![0u8; INITIAL_DATA_LEN];
            let mut index = 0;
            loop {
                let mut name_len = name.len() as u32;
                let mut data_len = data.len() as u32;
                // SAFETY: both buffers hold the lengths passed alongside them;
                // the value type is not requested.
                let status = unsafe {
                    RegEnumValueW(
                        self.0,
                        index,
                        name.as_mut_ptr(),
                        &mut name_len,
                        ptr::null(),
                        ptr::null_mut(),
                        data.as_mut_ptr(),
                        &mut data_len,
                    )
                };
                match status {
                    ERROR_SUCCESS => {
                        values.push((
                            String::from_utf16_lossy(&name[..name_len as usize]),
                            data[..data_len as usize].to_vec(),
                        ));
                        index += 1;
                    }
                    // Retry the same index with the size the call reported.
                    ERROR_MORE_DATA => data.resize(data_len as usize, 0),
                    ERROR_NO_MORE_ITEMS => break,
                    code => return Err(win32("RegEnumValueW", code)),
                }
            }
            Ok(values)
        }
    }

    impl Drop for RegKey {
        fn drop(&mut self) {
            // SAFETY: the handle came from a successful RegOpenKeyExW.
            unsafe { RegCloseKey(self.0) };
        }
    }

    /// RecentDocs of the current user, read from the registry.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RegistryRecentDocs;

    impl RegistryRecentDocs {
        pub fn current_user() -> Self {
            Self
        }
    }

    impl RecentDocsStore for RegistryRecentDocs {
        fn recent_docs(&self) -> Result<Vec<RecentDocument>> {
            let Some(root) = RegKey::open(HKEY_CURRENT_USER, JumpListConfig::RECENT_DOCS_KEY)?
            else {
                debug!("No RecentDocs key for the current user");
                return Ok(Vec::new());
            };

            let mut documents = Vec::new();
            merge_unique(&mut documents, ordered_documents(&root.values()?));
            for subkey in root.subkeys()? {
                match RegKey::open(root.0, &subkey)? {
                    Some(key) => merge_unique(&mut documents, ordered_documents(&key.values()?)),
                    None => debug!("RecentDocs subkey {} disappeared", subkey),
                }
            }
            Ok(documents)
        }
    }
}
