//! Core data model shared across the service clients, the identity store,
//! and the session layer.
//!
//! Wire field names are Spanish: the backend is a fixed Spring Boot
//! service and its JSON contract (`titulo`, `estadoTarea`, `contraseña`, …)
//! must be preserved exactly. Rust-side names stay English; serde renames
//! bridge the two.

use serde::{Deserialize, Serialize};

/// A user-owned to-do item as the backend represents it.
///
/// `id` is server-assigned on creation and immutable afterwards.
/// `notified` is server-controlled (reminder dispatch bookkeeping) and is
/// never written by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "recordatorio", default)]
    pub reminder: Option<String>,
    #[serde(rename = "estadoTarea")]
    pub completed: bool,
    #[serde(rename = "notificado", default)]
    pub notified: Option<bool>,
}

/// Creation request body for `POST /api/tareas/crearTarea/{userId}`.
///
/// The session layer forces `completed` to false: creation is the only
/// path that introduces a new task id, and new tasks always start pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "recordatorio")]
    pub reminder: String,
    #[serde(rename = "estadoTarea")]
    pub completed: bool,
}

/// Full-record update body for `PUT /api/tareas/actualizarTarea/{userId}/{taskId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "recordatorio")]
    pub reminder: Option<String>,
    #[serde(rename = "estadoTarea")]
    pub completed: bool,
}

/// The locally cached identity of the signed-in user.
///
/// At most one `User` exists at a time; it is created on successful
/// login/registration and destroyed on logout or account deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub date: String,
}

/// Login request body for `POST /api/usuarios/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// Registration request body for `POST /api/usuarios/crearUsuario`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "numeroWhatsapp")]
    pub whatsapp: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// User record returned by the login and registration endpoints.
///
/// The backend may embed the user's task list under `tareas`; the session
/// layer ignores it and always fetches tasks through the task endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "numeroWhatsapp")]
    pub whatsapp: String,
    pub date: String,
    #[serde(rename = "tareas", default)]
    pub tasks: Option<Vec<Task>>,
}

impl From<UserProfile> for User {
    fn from(profile: UserProfile) -> Self {
        User {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            whatsapp: profile.whatsapp,
            date: profile.date,
        }
    }
}

/// Request body for the AI suggestion endpoint `GET /api/ia/{userId}`.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionRequest {
    #[serde(rename = "texto")]
    pub text: String,
}

/// Response body from the AI suggestion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionResponse {
    #[serde(rename = "pregunta", default)]
    pub question: String,
    #[serde(rename = "respuesta")]
    pub answer: String,
}
