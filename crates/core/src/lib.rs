//! # Ward Core
//!
//! Core business logic for the ward operations dashboard.
//!
//! This crate contains the shared clinical-workflow status model:
//! - lifecycle rules for every entity with a status, and the transition function applying them
//! - search, filter and grouping rules that views derive their subsets from
//! - the role/tab navigation table and state
//! - the in-memory store, its forms, and the values derived from it
//!
//! **No presentation concerns**: command parsing and text rendering belong in `ward-cli`.

pub mod actor;
pub mod config;
pub mod constants;
pub mod derived;
pub mod error;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod lifecycle;
pub mod navigation;
pub mod store;
pub mod transition;

pub use actor::{Actor, Stamp};
pub use config::WardConfig;
pub use error::{WardError, WardResult};
pub use lifecycle::{EntityKind, Lifecycle, Record};
pub use navigation::{FormKind, Navigation, RoleProfile, Tab, WorkflowAction};
pub use store::{ActionOutcome, Collection, WardStore};
pub use transition::{transition, try_transition, Transitioned};

// Re-export the catalog so binaries need only one core dependency for record types.
pub use ward_catalog as catalog;
