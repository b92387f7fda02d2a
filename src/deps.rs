//! Dependency container.
//!
//! One `Deps` is built at process start and handed by reference to every
//! session constructor. It replaces any notion of a global service
//! registry: the identity store, the three HTTP clients, and the session
//! event bus are constructed exactly once, and tests swap the service
//! fields for fakes.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::{
    AssistantService, HttpAssistantService, HttpTaskService, HttpUserService, TaskService,
    UserService,
};
use crate::config::Config;
use crate::error::StoreError;
use crate::session::{event_bus, SessionEvent};
use crate::store::IdentityStore;

/// Shared collaborators for all session components.
pub struct Deps {
    pub store: Arc<IdentityStore>,
    pub tasks: Arc<dyn TaskService>,
    pub users: Arc<dyn UserService>,
    pub assistant: Arc<dyn AssistantService>,
    pub events: broadcast::Sender<SessionEvent>,
}

impl Deps {
    /// Build the real wiring from a config.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        Ok(Self {
            store: Arc::new(IdentityStore::open(&config.data_dir)?),
            tasks: Arc::new(HttpTaskService::new(&config.base_url)),
            users: Arc::new(HttpUserService::new(&config.base_url)),
            assistant: Arc::new(HttpAssistantService::new(&config.base_url)),
            events: event_bus(),
        })
    }
}

#[cfg(test)]
impl Deps {
    pub(crate) fn for_tests(data_dir: &std::path::Path, tasks: Arc<dyn TaskService>) -> Self {
        Self::for_tests_with(
            data_dir,
            tasks,
            Arc::new(crate::testutil::FakeUserService::default()),
            Arc::new(crate::testutil::FakeAssistantService::default()),
        )
    }

    pub(crate) fn for_tests_with(
        data_dir: &std::path::Path,
        tasks: Arc<dyn TaskService>,
        users: Arc<dyn UserService>,
        assistant: Arc<dyn AssistantService>,
    ) -> Self {
        Self {
            store: Arc::new(IdentityStore::open(data_dir).unwrap()),
            tasks,
            users,
            assistant,
            events: event_bus(),
        }
    }
}
