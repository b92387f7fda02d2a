//! Login and registration orchestration.
//!
//! Field checks run before any network call; a successful login writes
//! the returned profile into the identity cache. Registration does not
//! auto-login; the user signs in afterwards with the account they just
//! created.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::UserService;
use crate::deps::Deps;
use crate::session::OperationState;
use crate::store::IdentityStore;
use crate::types::{Credentials, Registration, User};
use crate::validation::{validate_credentials, validate_registration};

pub struct AuthSession {
    store: Arc<IdentityStore>,
    users: Arc<dyn UserService>,
    login_state: watch::Sender<OperationState>,
    register_state: watch::Sender<OperationState>,
}

impl AuthSession {
    pub fn new(deps: &Deps) -> Self {
        Self {
            store: deps.store.clone(),
            users: deps.users.clone(),
            login_state: watch::channel(OperationState::Idle).0,
            register_state: watch::channel(OperationState::Idle).0,
        }
    }

    /// Authenticate and cache the returned identity.
    pub async fn login(&self, email: &str, password: &str) {
        if let Err(e) = validate_credentials(email, password) {
            self.login_state
                .send_replace(OperationState::Error(e.to_string()));
            return;
        }

        self.login_state.send_replace(OperationState::Loading);

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.users.login(&credentials).await {
            Some(profile) => {
                let user = User::from(profile);
                log::debug!("Login ok, caching user id {}", user.id);
                if let Err(e) = self.store.save_user(&user) {
                    self.login_state
                        .send_replace(OperationState::Error(e.to_string()));
                    return;
                }
                self.login_state.send_replace(OperationState::Success);
            }
            None => {
                self.login_state
                    .send_replace(OperationState::Error("Invalid credentials".to_string()));
            }
        }
    }

    /// Create an account. The password confirmation check is the one
    /// validation the server cannot do for us.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        whatsapp: &str,
        password: &str,
        confirmation: &str,
    ) {
        if let Err(e) = validate_registration(name, email, whatsapp, password, confirmation) {
            self.register_state
                .send_replace(OperationState::Error(e.to_string()));
            return;
        }

        self.register_state.send_replace(OperationState::Loading);

        let registration = Registration {
            name: name.to_string(),
            email: email.to_string(),
            whatsapp: whatsapp.to_string(),
            password: password.to_string(),
        };

        match self.users.register(&registration).await {
            Some(_) => self.register_state.send_replace(OperationState::Success),
            None => self
                .register_state
                .send_replace(OperationState::Error("Registration failed".to_string())),
        };
    }

    pub fn login_state(&self) -> watch::Receiver<OperationState> {
        self.login_state.subscribe()
    }

    pub fn register_state(&self) -> watch::Receiver<OperationState> {
        self.register_state.subscribe()
    }

    /// Acknowledge a terminal login state. Idempotent.
    pub fn reset_login_state(&self) {
        self.login_state.send_replace(OperationState::Idle);
    }

    /// Acknowledge a terminal registration state. Idempotent.
    pub fn reset_register_state(&self) {
        self.register_state.send_replace(OperationState::Idle);
    }
}
