//! Jobdesk is a job-listing management backend.
//!
//! # Features
//!
//! - Role-based access control
//!     - roles, permissions and per-role grants
//!     - flat permission keys, checked on every operation
//! - Account management
//!     - bcrypt credentials, activation flag
//!     - first-run provisioning of the admin account
//! - Job listings
//!     - locations, salary ranges, categories and companies as references
//!     - audit columns on every table, stamped from the authenticated caller
//! - Pluggable storage
//!     - everything behind one `StoreAdapter` trait
//!
//! The crate is a library: the embedding web layer owns routing and
//! sessions and calls the guarded operations here with an `AuthCtx`.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and the adapter trait from jobdesk-types
pub use jobdesk_types::error;
pub use jobdesk_types::perm;
pub use jobdesk_types::store_adapter;
pub use jobdesk_types::types;

// Local modules
pub mod app;
pub mod auth;
pub mod authz;
pub mod bootstrap;
pub mod catalog;
pub mod company;
pub mod job;
pub mod permission;
pub mod prelude;
pub mod role;
pub mod user;

pub use crate::app::{App, AppBuilder, AppState, VERSION};

// vim: ts=4
