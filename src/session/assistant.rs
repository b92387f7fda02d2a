//! Chat wrapper around the AI suggestion endpoint.
//!
//! Holds the conversation transcript and a thinking indicator. The user's
//! message is appended before the remote call so the transcript reacts
//! instantly; the reply (or inline error text) follows when the call
//! completes.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::AssistantService;
use crate::deps::Deps;
use crate::store::IdentityStore;

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub from_user: bool,
}

pub struct AssistantSession {
    store: Arc<IdentityStore>,
    assistant: Arc<dyn AssistantService>,
    messages: watch::Sender<Vec<ChatMessage>>,
    loading: watch::Sender<bool>,
}

impl AssistantSession {
    pub fn new(deps: &Deps) -> Self {
        Self {
            store: deps.store.clone(),
            assistant: deps.assistant.clone(),
            messages: watch::channel(Vec::new()).0,
            loading: watch::channel(false).0,
        }
    }

    /// Send a prompt and append the reply. Blank prompts are ignored.
    pub async fn send(&self, prompt: &str) {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return;
        }

        self.push(ChatMessage {
            text: prompt.to_string(),
            from_user: true,
        });
        self.loading.send_replace(true);

        let reply = match self.store.current_user() {
            Some(user) => self.assistant.ask(user.id, prompt).await,
            None => "Error: no signed-in user.".to_string(),
        };

        self.push(ChatMessage {
            text: reply,
            from_user: false,
        });
        self.loading.send_replace(false);
    }

    /// Screen-dismissed semantics: drop the transcript and stop the
    /// thinking indicator.
    pub fn reset(&self) {
        self.messages.send_replace(Vec::new());
        self.loading.send_replace(false);
    }

    pub fn messages(&self) -> watch::Receiver<Vec<ChatMessage>> {
        self.messages.subscribe()
    }

    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    fn push(&self, message: ChatMessage) {
        self.messages.send_modify(|messages| messages.push(message));
    }
}
