//! Task orchestration core.
//!
//! Owns the authoritative in-memory task list for the current session and
//! keeps it synchronized with the remote task service. State is exposed
//! through watch channels (list, loading flag, error slot, operation
//! state, logout state) that the presentation layer observes.
//!
//! All operations funnel through one mpsc command queue drained by a
//! worker task, so list mutations apply strictly in issue order and two
//! rapid-fire deletes cannot race each other's reconciliation.
//! Dropping the session aborts the worker, which also cancels whatever
//! remote call was in flight; a dismissed screen cannot produce a stale
//! write.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::api::TaskService;
use crate::deps::Deps;
use crate::session::{LogoutState, OperationState, SessionEvent};
use crate::store::IdentityStore;
use crate::types::{NewTask, Task, TaskUpdate, User};
use crate::validation::validate_task_fields;

const MISSING_ID_ON_LOAD: &str = "User ID not found. Please log in again.";
const MISSING_ID: &str = "User ID not found.";

/// One queued mutation or query against the session.
enum Command {
    Load,
    Create {
        title: String,
        description: String,
        reminder: String,
    },
    Update {
        id: i64,
        title: String,
        description: String,
        reminder: Option<String>,
        completed: bool,
    },
    SetStatus {
        task: Task,
        completed: bool,
    },
    Delete {
        task: Task,
    },
    Logout,
    /// Barrier: acknowledged once every previously queued command has
    /// been processed. Used by the CLI and tests to await quiescence.
    Flush(oneshot::Sender<()>),
}

/// Observable session state. Senders live here so `clear_error` and
/// `reset_operation_state` can act without going through the queue;
/// they touch slots the worker only writes at command boundaries.
struct Shared {
    tasks: watch::Sender<Vec<Task>>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    operation: watch::Sender<OperationState>,
    logout: watch::Sender<LogoutState>,
}

/// The task orchestration core. One instance per signed-in session;
/// discarded wholesale on logout.
pub struct TaskSession {
    commands: mpsc::UnboundedSender<Command>,
    shared: Arc<Shared>,
    store: Arc<IdentityStore>,
    worker: JoinHandle<()>,
}

impl TaskSession {
    pub fn new(deps: &Deps) -> Self {
        let shared = Arc::new(Shared {
            tasks: watch::channel(Vec::new()).0,
            loading: watch::channel(false).0,
            error: watch::channel(None).0,
            operation: watch::channel(OperationState::Idle).0,
            logout: watch::channel(LogoutState::Idle).0,
        });

        let (commands, queue) = mpsc::unbounded_channel();
        let worker = Worker {
            store: deps.store.clone(),
            service: deps.tasks.clone(),
            shared: shared.clone(),
        };
        let events = deps.events.subscribe();
        let handle = tokio::spawn(worker.run(queue, events));

        Self {
            commands,
            shared,
            store: deps.store.clone(),
            worker: handle,
        }
    }

    // ------------------------------------------------------------------
    // Operations (fire-and-forget; results land in the watch channels)
    // ------------------------------------------------------------------

    /// Replace the in-memory list with the server's view.
    pub fn load_tasks(&self) {
        let _ = self.commands.send(Command::Load);
    }

    /// Create a task. New tasks always start pending; the completion
    /// flag is forced to false here, not by the caller.
    pub fn create_task(&self, title: &str, description: &str, reminder: &str) {
        let _ = self.commands.send(Command::Create {
            title: title.to_string(),
            description: description.to_string(),
            reminder: reminder.to_string(),
        });
    }

    /// Full-field update of an existing task. The id never changes.
    pub fn update_task(
        &self,
        id: i64,
        title: &str,
        description: &str,
        reminder: Option<&str>,
        completed: bool,
    ) {
        let _ = self.commands.send(Command::Update {
            id,
            title: title.to_string(),
            description: description.to_string(),
            reminder: reminder.map(str::to_string),
            completed,
        });
    }

    /// Toggle just the completion flag, keeping every other field.
    pub fn update_task_status(&self, task: &Task, completed: bool) {
        let _ = self.commands.send(Command::SetStatus {
            task: task.clone(),
            completed,
        });
    }

    /// Delete one task.
    pub fn delete_task(&self, task: &Task) {
        let _ = self.commands.send(Command::Delete { task: task.clone() });
    }

    /// Clear the identity cache and report logout. The in-memory list is
    /// not touched; the caller discards the whole session afterwards.
    pub fn logout(&self) {
        let _ = self.commands.send(Command::Logout);
    }

    /// Acknowledge a displayed error. Idempotent.
    pub fn clear_error(&self) {
        self.shared.error.send_replace(None);
    }

    /// Acknowledge a terminal operation state. Idempotent.
    pub fn reset_operation_state(&self) {
        self.shared.operation.send_replace(OperationState::Idle);
    }

    /// Wait until every operation issued before this call has finished.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.commands.send(Command::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    pub fn tasks(&self) -> watch::Receiver<Vec<Task>> {
        self.shared.tasks.subscribe()
    }

    pub fn loading(&self) -> watch::Receiver<bool> {
        self.shared.loading.subscribe()
    }

    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.shared.error.subscribe()
    }

    pub fn operation_state(&self) -> watch::Receiver<OperationState> {
        self.shared.operation.subscribe()
    }

    pub fn logout_state(&self) -> watch::Receiver<LogoutState> {
        self.shared.logout.subscribe()
    }

    /// The cached identity, as the store observes it.
    pub fn user(&self) -> watch::Receiver<Option<User>> {
        self.store.user()
    }
}

impl Drop for TaskSession {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Single-writer owner of the task list.
struct Worker {
    store: Arc<IdentityStore>,
    service: Arc<dyn TaskService>,
    shared: Arc<Shared>,
}

impl Worker {
    async fn run(
        self,
        mut queue: mpsc::UnboundedReceiver<Command>,
        mut events: broadcast::Receiver<SessionEvent>,
    ) {
        let mut events_open = true;
        loop {
            tokio::select! {
                command = queue.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                event = events.recv(), if events_open => match event {
                    Ok(SessionEvent::AllTasksDeleted) => {
                        log::debug!("All tasks deleted elsewhere; clearing list");
                        self.shared.tasks.send_replace(Vec::new());
                    }
                    Ok(SessionEvent::AccountDeleted) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!("Session event bus lagged, skipped {}", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        events_open = false;
                    }
                },
            }
        }
    }

    async fn handle(&self, command: Command) {
        match command {
            Command::Load => self.load().await,
            Command::Create {
                title,
                description,
                reminder,
            } => self.create(title, description, reminder).await,
            Command::Update {
                id,
                title,
                description,
                reminder,
                completed,
            } => {
                self.update(id, title, description, reminder, completed)
                    .await
            }
            Command::SetStatus { task, completed } => self.set_status(task, completed).await,
            Command::Delete { task } => self.delete(task).await,
            Command::Logout => self.logout(),
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    async fn load(&self) {
        self.shared.loading.send_replace(true);
        self.shared.error.send_replace(None);

        match self.user_id() {
            Some(user_id) => match self.service.list_tasks(user_id).await {
                Some(tasks) => {
                    log::debug!("Loaded {} tasks", tasks.len());
                    self.shared.tasks.send_replace(tasks);
                }
                None => {
                    // Keep the previous list; stale beats empty on a blip
                    self.set_error("Failed to load tasks.");
                }
            },
            None => self.set_error(MISSING_ID_ON_LOAD),
        }

        self.shared.loading.send_replace(false);
    }

    async fn create(&self, title: String, description: String, reminder: String) {
        self.shared.operation.send_replace(OperationState::Loading);

        if let Err(e) = validate_task_fields(&title, &description) {
            self.shared
                .operation
                .send_replace(OperationState::Error(e.to_string()));
            return;
        }

        let Some(user_id) = self.user_id() else {
            self.shared
                .operation
                .send_replace(OperationState::Error(MISSING_ID.to_string()));
            return;
        };

        let request = NewTask {
            title,
            description,
            reminder,
            completed: false,
        };

        match self.service.create_task(user_id, &request).await {
            Some(task) => {
                self.shared.tasks.send_modify(|tasks| tasks.push(task));
                self.shared.operation.send_replace(OperationState::Success);
            }
            None => {
                self.shared
                    .operation
                    .send_replace(OperationState::Error("Failed to create task.".to_string()));
            }
        }
    }

    async fn update(
        &self,
        id: i64,
        title: String,
        description: String,
        reminder: Option<String>,
        completed: bool,
    ) {
        self.shared.operation.send_replace(OperationState::Loading);

        let Some(user_id) = self.user_id() else {
            self.shared
                .operation
                .send_replace(OperationState::Error(MISSING_ID.to_string()));
            return;
        };

        let request = TaskUpdate {
            title: title.clone(),
            description: description.clone(),
            reminder: reminder.clone(),
            completed,
        };

        if self.service.update_task(user_id, id, &request).await {
            self.shared.tasks.send_modify(|tasks| {
                if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                    task.title = title;
                    task.description = description;
                    task.reminder = reminder;
                    task.completed = completed;
                }
            });
            self.shared.operation.send_replace(OperationState::Success);
        } else {
            self.shared
                .operation
                .send_replace(OperationState::Error("Failed to update task.".to_string()));
        }
    }

    async fn set_status(&self, task: Task, completed: bool) {
        let Some(user_id) = self.user_id() else {
            self.set_error(MISSING_ID);
            return;
        };

        let request = TaskUpdate {
            title: task.title.clone(),
            description: task.description.clone(),
            reminder: task.reminder.clone(),
            completed,
        };

        if self.service.update_task(user_id, task.id, &request).await {
            self.shared.tasks.send_modify(|tasks| {
                if let Some(t) = tasks.iter_mut().find(|t| t.id == task.id) {
                    t.completed = completed;
                }
            });
        } else {
            self.set_error("Failed to update task status.");
        }
    }

    async fn delete(&self, task: Task) {
        let Some(user_id) = self.user_id() else {
            self.set_error(MISSING_ID);
            return;
        };

        if self.service.delete_task(user_id, task.id).await {
            self.shared
                .tasks
                .send_modify(|tasks| tasks.retain(|t| t.id != task.id));
        } else {
            self.set_error("Failed to delete task.");
        }
    }

    fn logout(&self) {
        if let Err(e) = self.store.clear_data() {
            log::warn!("Failed to clear identity cache on logout: {}", e);
        }
        self.shared.logout.send_replace(LogoutState::Success);
    }

    fn user_id(&self) -> Option<i64> {
        self.store.current_user().map(|user| user.id)
    }

    fn set_error(&self, message: &str) {
        self.shared.error.send_replace(Some(message.to_string()));
    }
}
