//! Session orchestration.
//!
//! Each screen-facing component owns its observable state (watch channels)
//! and coordinates remote calls against the service clients. Components
//! are independent of each other; the cross-cutting cases (bulk task
//! deletion, account deletion) are announced on a broadcast bus so the
//! task session can react without the profile session reaching into it.

pub mod assistant;
pub mod auth;
pub mod profile;
pub mod tasks;

pub use assistant::{AssistantSession, ChatMessage};
pub use auth::AuthSession;
pub use profile::ProfileSession;
pub use tasks::TaskSession;

use tokio::sync::broadcast;

/// State machine for a single remote operation.
///
/// `Success` and `Error` are terminal and sticky: they persist until the
/// consumer acknowledges them with a reset, and a new operation moves the
/// slot straight back to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl OperationState {
    /// Terminal means Success or Error, as opposed to Idle/Loading.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Success | OperationState::Error(_))
    }
}

/// Logout only ever reports success; clearing local state cannot fail in
/// a way the user could act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutState {
    #[default]
    Idle,
    Success,
}

/// Cross-component notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Profile session bulk-deleted every task; list holders must drop
    /// their in-memory copies.
    AllTasksDeleted,
    /// The account (and the cached identity) is gone.
    AccountDeleted,
}

/// Buffer for the session event bus. Events are tiny and rare; a small
/// buffer only matters if a receiver stalls for a long time.
pub(crate) const EVENT_BUS_CAPACITY: usize = 16;

/// Create the session event bus.
pub fn event_bus() -> broadcast::Sender<SessionEvent> {
    broadcast::channel(EVENT_BUS_CAPACITY).0
}
