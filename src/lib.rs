//! taskdeck: client core for the Tareas task-management backend.
//!
//! The backend owns all business logic; this crate is the device-side
//! layer between it and a UI:
//!
//! - `api`: reqwest clients for the task, user, and AI endpoints
//! - `store`: local identity cache with watch-observable state
//! - `session`: orchestration components the presentation layer drives
//! - `validation`: client-side field checks
//! - `deps`: the one-per-process dependency container

pub mod api;
pub mod config;
pub mod deps;
pub mod error;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil;
