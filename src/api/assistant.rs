//! AI suggestion client.
//!
//! Single endpoint, `GET /api/ia/{userId}`, which unusually carries a JSON
//! body with the prompt. Unlike the other clients this one reports its
//! failures inline: the return value is always a displayable string, with
//! errors rendered as `"Error: …"` text. The chat screen renders whatever
//! it gets.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::types::{SuggestionRequest, SuggestionResponse};

/// The chat-style suggestion endpoint.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Ask the assistant; the reply (or an inline error message) is
    /// always renderable as-is.
    async fn ask(&self, user_id: i64, text: &str) -> String;
}

/// reqwest-backed implementation of [`AssistantService`].
pub struct HttpAssistantService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssistantService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::build_http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AssistantService for HttpAssistantService {
    async fn ask(&self, user_id: i64, text: &str) -> String {
        let url = format!("{}/api/ia/{}", self.base_url, user_id);
        let body = SuggestionRequest {
            text: text.to_string(),
        };

        let response = match self.client.get(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Suggestion request failed: {}", e);
                return format!("Error: could not reach the assistant. {}", e);
            }
        };

        let status = response.status();
        log::debug!("Suggestion status: {}", status);
        if status != StatusCode::OK {
            return format!("Error: {}", status);
        }

        match response.json::<SuggestionResponse>().await {
            Ok(reply) => reply.answer,
            Err(e) => {
                log::debug!("Suggestion body undecodable: {}", e);
                format!("Error: could not read the assistant's reply. {}", e)
            }
        }
    }
}
