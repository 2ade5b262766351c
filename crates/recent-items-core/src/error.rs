//! Error types for the recent items library.
//!
//! Interop failures carry the host status code so callers can tell an absent
//! list apart from a broken service.

use crate::com::{Guid, HResult};
use crate::jumplist::Generation;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the recent items library.
#[derive(Debug, Error)]
pub enum RecentError {
    // Component model errors
    #[error("{operation} failed: {code}")]
    Interop {
        operation: &'static str,
        code: HResult,
    },

    #[error("Could not create the {generation} destination list service: {code}")]
    ServiceCreation { generation: Generation, code: HResult },

    #[error("Destination list rejected app id {app_id:?}: {code}")]
    Initialization { app_id: String, code: HResult },

    #[error("Component does not support interface {iid}")]
    NoInterface { iid: Guid },

    #[error("Index {index} is out of range for a collection of {count}")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Not supported on this platform: {0}")]
    Unsupported(String),

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for recent items operations.
pub type Result<T> = std::result::Result<T, RecentError>;

impl From<std::io::Error> for RecentError {
    fn from(err: std::io::Error) -> Self {
        RecentError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for RecentError {
    fn from(err: serde_json::Error) -> Self {
        RecentError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl RecentError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        RecentError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an interop error for a failed host call.
    pub fn interop(operation: &'static str, code: impl Into<HResult>) -> Self {
        RecentError::Interop {
            operation,
            code: code.into(),
        }
    }

    /// The host status code behind this error, if it came from a host call.
    pub fn code(&self) -> Option<HResult> {
        match self {
            RecentError::Interop { code, .. }
            | RecentError::ServiceCreation { code, .. }
            | RecentError::Initialization { code, .. } => Some(*code),
            RecentError::NoInterface { .. } => Some(HResult::E_NOINTERFACE),
            RecentError::IndexOutOfRange { .. } => Some(HResult::E_INVALIDARG),
            _ => None,
        }
    }

    /// Whether the failure only affects a single request or entry.
    ///
    /// Service creation and initialization failures disable the facade for
    /// the session; everything the iteration path can hit is recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RecentError::Interop { .. }
                | RecentError::NoInterface { .. }
                | RecentError::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::com::IID_ISHELLITEM;

    #[test]
    fn test_error_display() {
        let err = RecentError::NoInterface {
            iid: IID_ISHELLITEM,
        };
        assert_eq!(
            err.to_string(),
            "Component does not support interface {43826D1E-E718-42EE-BC55-A1E261C37BFE}"
        );
    }

    #[test]
    fn test_error_codes() {
        let err = RecentError::interop("GetCount", HResult::E_FAIL);
        assert_eq!(err.code(), Some(HResult::E_FAIL));
        assert_eq!(err.to_string(), "GetCount failed: 0x80004005");

        let err = RecentError::IndexOutOfRange { index: 3, count: 3 };
        assert_eq!(err.code(), Some(HResult::E_INVALIDARG));

        assert_eq!(RecentError::Unsupported("x".into()).code(), None);
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(RecentError::interop("GetAt", HResult::E_FAIL).is_recoverable());
        assert!(!RecentError::ServiceCreation {
            generation: Generation::V10,
            code: HResult::REGDB_E_CLASSNOTREG,
        }
        .is_recoverable());
        assert!(!RecentError::Initialization {
            app_id: "App".into(),
            code: HResult::E_INVALIDARG,
        }
        .is_recoverable());
    }
}
