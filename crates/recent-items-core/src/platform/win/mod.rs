//! Windows shell backend.
//!
//! Wraps the `windows` crate's COM interfaces in the [`crate::com`] traits so
//! the facade can drive the real Automatic Destination List service. Every
//! wrapper owns one COM reference and releases it on drop.

// This module owns the COM FFI boundary. Each unsafe block carries a
// `SAFETY:` note.
#![allow(unsafe_code)]

mod adapters;
mod host;
mod interfaces;
mod runtime;

pub use host::WindowsShellHost;
pub use runtime::ComApartment;
