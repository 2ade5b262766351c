//! Interface and class identities, and host status codes.

use crate::error::RecentError;
use std::fmt;
use std::str::FromStr;

/// A 128-bit interface or class identity.
///
/// The layout matches the host's `GUID::from_u128`, so the hex literal reads
/// the same as the registry form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(u128);

impl Guid {
    pub const fn from_u128(value: u128) -> Self {
        Guid(value)
    }

    pub const fn to_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:04X}-{:012X}}}",
            (v >> 96) as u32,
            ((v >> 80) & 0xFFFF) as u16,
            ((v >> 64) & 0xFFFF) as u16,
            ((v >> 48) & 0xFFFF) as u16,
            v & 0xFFFF_FFFF_FFFF
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Guid {
    type Err = RecentError;

    /// Parse the hyphenated form, with or without braces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecentError::Config {
            message: format!("Invalid GUID: {s:?}"),
        };

        let trimmed = s.trim();
        let inner = match (trimmed.strip_prefix('{'), trimmed.strip_suffix('}')) {
            (Some(_), Some(_)) => &trimmed[1..trimmed.len() - 1],
            (None, None) => trimmed,
            _ => return Err(invalid()),
        };

        let groups: Vec<&str> = inner.split('-').collect();
        let lengths = [8, 4, 4, 4, 12];
        if groups.len() != lengths.len()
            || groups
                .iter()
                .zip(lengths)
                .any(|(g, len)| g.len() != len || !g.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        u128::from_str_radix(&groups.concat(), 16)
            .map(Guid)
            .map_err(|_| invalid())
    }
}

/// Base capability every component supports.
pub const IID_IUNKNOWN: Guid = Guid::from_u128(0x00000000_0000_0000_c000_000000000046);

/// Read-only indexed collection of components.
pub const IID_IOBJECTARRAY: Guid = Guid::from_u128(0x92ca9dcd_5622_4bba_a805_5e9f541bd8c9);

/// Mutable collection of components.
pub const IID_IOBJECTCOLLECTION: Guid = Guid::from_u128(0x5632b1a4_e38a_400a_928a_d4cd63230295);

/// Shell item with display name resolution.
pub const IID_ISHELLITEM: Guid = Guid::from_u128(0x43826d1e_e718_42ee_bc55_a1e261c37bfe);

/// Destination list service, Windows 8 through 8.1.
pub const IID_IAUTOMATICDESTINATIONLIST8: Guid =
    Guid::from_u128(0xbc10dce3_62f2_4bc6_af37_db46ed7873c4);

/// Destination list service, Windows 10 and later.
pub const IID_IAUTOMATICDESTINATIONLIST10: Guid =
    Guid::from_u128(0xe9c5ef8d_fd41_4f72_ba87_eb03bad5817c);

/// The creatable Automatic Destination List service.
pub const CLSID_AUTOMATIC_DESTINATION_LIST: Guid =
    Guid::from_u128(0xf0ae1542_f497_484b_a175_a20db09144ba);

/// Status code returned by a host call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HResult(pub i32);

impl HResult {
    pub const S_OK: HResult = HResult(0);
    pub const E_NOTIMPL: HResult = HResult(0x8000_4001_u32 as i32);
    pub const E_NOINTERFACE: HResult = HResult(0x8000_4002_u32 as i32);
    pub const E_POINTER: HResult = HResult(0x8000_4003_u32 as i32);
    pub const E_FAIL: HResult = HResult(0x8000_4005_u32 as i32);
    pub const E_UNEXPECTED: HResult = HResult(0x8000_FFFF_u32 as i32);
    pub const E_INVALIDARG: HResult = HResult(0x8007_0057_u32 as i32);
    pub const REGDB_E_CLASSNOTREG: HResult = HResult(0x8004_0154_u32 as i32);
    pub const CO_E_NOTINITIALIZED: HResult = HResult(0x8004_01F0_u32 as i32);
    /// `HRESULT_FROM_WIN32(ERROR_NOT_FOUND)`
    pub const E_NOT_FOUND: HResult = HResult(0x8007_0490_u32 as i32);

    /// `HRESULT_FROM_WIN32`: wrap a Win32 error code.
    pub const fn from_win32(code: u32) -> HResult {
        if code == 0 {
            HResult::S_OK
        } else {
            HResult(((code & 0xFFFF) | 0x8007_0000) as i32)
        }
    }

    pub fn is_ok(self) -> bool {
        self.0 >= 0
    }

    pub fn is_err(self) -> bool {
        !self.is_ok()
    }
}

impl From<i32> for HResult {
    fn from(code: i32) -> Self {
        HResult(code)
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

impl fmt::Debug for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HResult({self})")
    }
}
