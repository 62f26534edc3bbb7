//! Shared types, the override adapter trait, and error types for scopecfg.
//!
//! This crate is shared by the resolution engine and every store adapter.
//! Keeping it small lets adapter crates compile without pulling in the
//! engine itself.

#![forbid(unsafe_code)]

pub mod error;
pub mod override_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
