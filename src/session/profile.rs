//! Profile orchestration: the destructive account-level operations.
//!
//! Account deletion clears the identity cache on success; bulk task
//! deletion announces itself on the event bus so the task session drops
//! its in-memory list instead of silently going stale.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::api::{TaskService, UserService};
use crate::deps::Deps;
use crate::session::{OperationState, SessionEvent};
use crate::store::IdentityStore;

const USER_NOT_FOUND: &str = "User not found.";

pub struct ProfileSession {
    store: Arc<IdentityStore>,
    users: Arc<dyn UserService>,
    tasks: Arc<dyn TaskService>,
    events: broadcast::Sender<SessionEvent>,
    account_deletion: watch::Sender<OperationState>,
    tasks_deletion: watch::Sender<OperationState>,
}

impl ProfileSession {
    pub fn new(deps: &Deps) -> Self {
        Self {
            store: deps.store.clone(),
            users: deps.users.clone(),
            tasks: deps.tasks.clone(),
            events: deps.events.clone(),
            account_deletion: watch::channel(OperationState::Idle).0,
            tasks_deletion: watch::channel(OperationState::Idle).0,
        }
    }

    /// Permanently delete the current account. On success the cached
    /// identity is cleared; on failure it stays intact so the user can
    /// retry.
    pub async fn delete_current_user(&self) {
        self.account_deletion.send_replace(OperationState::Loading);

        let Some(user) = self.store.current_user() else {
            self.account_deletion
                .send_replace(OperationState::Error(USER_NOT_FOUND.to_string()));
            return;
        };

        if self.users.delete_user(user.id).await {
            if let Err(e) = self.store.clear_data() {
                log::warn!("Account deleted but cache clear failed: {}", e);
            }
            let _ = self.events.send(SessionEvent::AccountDeleted);
            self.account_deletion.send_replace(OperationState::Success);
        } else {
            self.account_deletion.send_replace(OperationState::Error(
                "Failed to delete the account.".to_string(),
            ));
        }
    }

    /// Delete every task the current user owns.
    pub async fn delete_all_user_tasks(&self) {
        self.tasks_deletion.send_replace(OperationState::Loading);

        let Some(user) = self.store.current_user() else {
            self.tasks_deletion
                .send_replace(OperationState::Error(USER_NOT_FOUND.to_string()));
            return;
        };

        if self.tasks.delete_all_tasks(user.id).await {
            let _ = self.events.send(SessionEvent::AllTasksDeleted);
            self.tasks_deletion.send_replace(OperationState::Success);
        } else {
            self.tasks_deletion.send_replace(OperationState::Error(
                "Failed to delete all tasks.".to_string(),
            ));
        }
    }

    pub fn account_deletion_state(&self) -> watch::Receiver<OperationState> {
        self.account_deletion.subscribe()
    }

    pub fn tasks_deletion_state(&self) -> watch::Receiver<OperationState> {
        self.tasks_deletion.subscribe()
    }

    /// Acknowledge terminal deletion states. Idempotent.
    pub fn reset_states(&self) {
        self.account_deletion.send_replace(OperationState::Idle);
        self.tasks_deletion.send_replace(OperationState::Idle);
    }
}
