//! HTTP clients for the remote Tareas backend.
//!
//! All three clients follow the same contract: a 2xx status yields the
//! typed payload (or `true` for write operations). Anything else, whether
//! a non-2xx status, a transport error, or an undecodable body, is logged
//! at debug level and collapsed to the falsy value (`false`, `None`).
//! Clients never return an error type; turning failures into user-visible
//! messages is the session layer's job.
//!
//! Each client is fronted by a trait so the session layer can be exercised
//! with in-memory fakes.

pub mod assistant;
pub mod tasks;
pub mod users;

pub use assistant::{AssistantService, HttpAssistantService};
pub use tasks::{HttpTaskService, TaskService};
pub use users::{HttpUserService, UserService};

/// Shared reqwest client. No timeouts beyond the transport defaults are
/// configured; every call is attempted exactly once.
pub(crate) fn build_http_client() -> reqwest::Client {
    reqwest::Client::new()
}
