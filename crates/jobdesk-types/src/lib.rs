//! Shared types, the store adapter trait, and error types for the jobdesk backend.
//!
//! This crate contains the foundational types shared between the operations
//! crate and all store adapter implementations. Keeping them in a separate
//! crate lets adapter crates compile independently of the operations layer.

pub mod error;
pub mod perm;
pub mod prelude;
pub mod store_adapter;
pub mod types;

// vim: ts=4
