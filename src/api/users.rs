//! Remote User Service client.
//!
//! Wraps the account endpoints:
//! - `POST   /api/usuarios/login`
//! - `POST   /api/usuarios/crearUsuario`
//! - `DELETE /api/usuarios/eliminarUsuario/{userId}`

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::types::{Credentials, Registration, UserProfile};

/// Account operations against the remote backend.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Authenticate. `None` covers both bad credentials and transport
    /// failure; the caller cannot tell them apart.
    async fn login(&self, credentials: &Credentials) -> Option<UserProfile>;

    /// Register a new account.
    async fn register(&self, registration: &Registration) -> Option<UserProfile>;

    /// Permanently delete the account.
    async fn delete_user(&self, user_id: i64) -> bool;
}

/// reqwest-backed implementation of [`UserService`].
pub struct HttpUserService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::build_http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/usuarios/{}", self.base_url, path)
    }

    async fn post_for_profile<T: serde::Serialize>(
        &self,
        url: String,
        body: &T,
        created_ok: bool,
    ) -> Option<UserProfile> {
        let response = match self.client.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("User request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        log::debug!("User response status: {}", status);
        let accepted = status == StatusCode::OK || (created_ok && status == StatusCode::CREATED);
        if !accepted {
            return None;
        }

        match response.json::<UserProfile>().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::debug!("User response body undecodable: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn login(&self, credentials: &Credentials) -> Option<UserProfile> {
        self.post_for_profile(self.url("login"), credentials, false)
            .await
    }

    async fn register(&self, registration: &Registration) -> Option<UserProfile> {
        self.post_for_profile(self.url("crearUsuario"), registration, true)
            .await
    }

    async fn delete_user(&self, user_id: i64) -> bool {
        let url = self.url(&format!("eliminarUsuario/{}", user_id));

        match self.client.delete(&url).send().await {
            Ok(response) => {
                log::debug!("User delete status: {}", response.status());
                response.status() == StatusCode::OK
            }
            Err(e) => {
                log::debug!("User delete request failed: {}", e);
                false
            }
        }
    }
}
