//! In-memory fakes and fixtures shared by the session tests.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{AssistantService, TaskService, UserService};
use crate::types::{Credentials, NewTask, Registration, Task, TaskUpdate, User, UserProfile};

pub fn sample_user() -> User {
    User {
        id: 42,
        name: "Ana".into(),
        email: "ana@example.com".into(),
        whatsapp: "+51999888777".into(),
        date: "2024-11-02".into(),
    }
}

pub fn sample_task(id: i64) -> Task {
    Task {
        id,
        title: format!("task {}", id),
        description: "desc".into(),
        reminder: Some("2025-06-01 09:00".into()),
        completed: false,
        notified: Some(false),
    }
}

fn sample_profile() -> UserProfile {
    UserProfile {
        id: 42,
        name: "Ana".into(),
        email: "ana@example.com".into(),
        whatsapp: "+51999888777".into(),
        date: "2024-11-02".into(),
        tasks: None,
    }
}

/// Fake backend task store. `fail_next` makes exactly the next call
/// report failure, the way the HTTP client collapses any error.
#[derive(Default)]
pub struct FakeTaskService {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

impl FakeTaskService {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            tasks: Mutex::new(tasks),
            next_id: AtomicI64::new(next_id),
            fail_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fail_next.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskService for FakeTaskService {
    async fn list_tasks(&self, _user_id: i64) -> Option<Vec<Task>> {
        if self.record_call() {
            return None;
        }
        Some(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, _user_id: i64, task: &NewTask) -> Option<Task> {
        if self.record_call() {
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).max(1);
        let created = Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            reminder: Some(task.reminder.clone()),
            completed: task.completed,
            notified: Some(false),
        };
        self.tasks.lock().unwrap().push(created.clone());
        Some(created)
    }

    async fn update_task(&self, _user_id: i64, task_id: i64, update: &TaskUpdate) -> bool {
        if self.record_call() {
            return false;
        }
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.title = update.title.clone();
                task.description = update.description.clone();
                task.reminder = update.reminder.clone();
                task.completed = update.completed;
                true
            }
            None => false,
        }
    }

    async fn delete_task(&self, _user_id: i64, task_id: i64) -> bool {
        if self.record_call() {
            return false;
        }
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        tasks.len() < before
    }

    async fn delete_all_tasks(&self, _user_id: i64) -> bool {
        if self.record_call() {
            return false;
        }
        self.tasks.lock().unwrap().clear();
        true
    }
}

/// Fake account backend: accepts any credentials unless told to fail.
pub struct FakeUserService {
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

impl Default for FakeUserService {
    fn default() -> Self {
        Self {
            fail_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeUserService {
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fail_next.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl UserService for FakeUserService {
    async fn login(&self, _credentials: &Credentials) -> Option<UserProfile> {
        if self.record_call() {
            return None;
        }
        Some(sample_profile())
    }

    async fn register(&self, registration: &Registration) -> Option<UserProfile> {
        if self.record_call() {
            return None;
        }
        let mut profile = sample_profile();
        profile.name = registration.name.clone();
        profile.email = registration.email.clone();
        Some(profile)
    }

    async fn delete_user(&self, _user_id: i64) -> bool {
        !self.record_call()
    }
}

/// Fake assistant: echoes the prompt.
#[derive(Default)]
pub struct FakeAssistantService {
    fail_next: AtomicBool,
}

impl FakeAssistantService {
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssistantService for FakeAssistantService {
    async fn ask(&self, _user_id: i64, text: &str) -> String {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return "Error: assistant unavailable".to_string();
        }
        format!("echo: {}", text)
    }
}
