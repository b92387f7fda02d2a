//! Contract tests for the HTTP service clients, against a mock backend.
//!
//! These pin down the wire-level contract: Spanish field names, the exact
//! endpoint paths, and which status codes each operation accepts.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck::api::{
    AssistantService, HttpAssistantService, HttpTaskService, HttpUserService, TaskService,
    UserService,
};
use taskdeck::types::{Credentials, NewTask, Registration, TaskUpdate};

fn task_json(id: i64, title: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "titulo": title,
        "descripcion": "something",
        "recordatorio": "2025-01-01 09:00",
        "estadoTarea": completed,
        "notificado": false
    })
}

// ----------------------------------------------------------------------
// Task endpoints
// ----------------------------------------------------------------------

#[tokio::test]
async fn list_tasks_parses_spanish_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tareas/listaTareas/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json(1, "Buy milk", false),
            task_json(2, "Call mom", true),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    let tasks = client.list_tasks(42).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Buy milk");
    assert!(!tasks[0].completed);
    assert!(tasks[1].completed);
    assert_eq!(tasks[0].reminder.as_deref(), Some("2025-01-01 09:00"));
    assert_eq!(tasks[0].notified, Some(false));
}

#[tokio::test]
async fn list_tasks_empty_is_success_not_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tareas/listaTareas/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    assert_eq!(client.list_tasks(42).await, Some(vec![]));
}

#[tokio::test]
async fn list_tasks_server_error_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tareas/listaTareas/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    assert_eq!(client.list_tasks(42).await, None);
}

#[tokio::test]
async fn create_task_sends_spanish_body_and_accepts_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tareas/crearTarea/42"))
        .and(body_partial_json(json!({
            "titulo": "Buy milk",
            "descripcion": "2% milk",
            "recordatorio": "2025-01-01 09:00",
            "estadoTarea": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(7, "Buy milk", false)))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    let request = NewTask {
        title: "Buy milk".into(),
        description: "2% milk".into(),
        reminder: "2025-01-01 09:00".into(),
        completed: false,
    };

    let created = client.create_task(42, &request).await.unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.title, "Buy milk");
}

#[tokio::test]
async fn create_task_accepts_200_as_well() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tareas/crearTarea/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(7, "t", false)))
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    let request = NewTask {
        title: "t".into(),
        description: "d".into(),
        reminder: String::new(),
        completed: false,
    };
    assert!(client.create_task(42, &request).await.is_some());
}

#[tokio::test]
async fn create_task_rejection_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tareas/crearTarea/42"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    let request = NewTask {
        title: "t".into(),
        description: "d".into(),
        reminder: String::new(),
        completed: false,
    };
    assert!(client.create_task(42, &request).await.is_none());
}

#[tokio::test]
async fn update_task_puts_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tareas/actualizarTarea/42/7"))
        .and(body_partial_json(json!({
            "titulo": "new",
            "estadoTarea": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    let update = TaskUpdate {
        title: "new".into(),
        description: "d".into(),
        reminder: None,
        completed: true,
    };
    assert!(client.update_task(42, 7, &update).await);
}

#[tokio::test]
async fn update_task_missing_record_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tareas/actualizarTarea/42/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    let update = TaskUpdate {
        title: "t".into(),
        description: "d".into(),
        reminder: None,
        completed: false,
    };
    assert!(!client.update_task(42, 7, &update).await);
}

#[tokio::test]
async fn delete_task_accepts_200_and_204() {
    for status in [200u16, 204] {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tareas/eliminarTarea/42/7"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = HttpTaskService::new(&server.uri());
        assert!(client.delete_task(42, 7).await, "status {}", status);
    }
}

#[tokio::test]
async fn delete_task_server_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tareas/eliminarTarea/42/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    assert!(!client.delete_task(42, 7).await);
}

#[tokio::test]
async fn delete_all_tasks_hits_bulk_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tareas/eliminarTodo/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&server.uri());
    assert!(client.delete_all_tasks(42).await);
}

#[tokio::test]
async fn base_url_trailing_slash_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tareas/listaTareas/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTaskService::new(&format!("{}/", server.uri()));
    assert!(client.list_tasks(1).await.is_some());
}

// ----------------------------------------------------------------------
// User endpoints
// ----------------------------------------------------------------------

#[tokio::test]
async fn login_sends_credentials_and_parses_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/usuarios/login"))
        .and(body_partial_json(json!({
            "email": "ana@example.com",
            "contraseña": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "nombre": "Ana",
            "email": "ana@example.com",
            "numeroWhatsapp": "+51999888777",
            "date": "2024-11-02",
            "tareas": [task_json(1, "t", false)],
            "unexpectedField": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpUserService::new(&server.uri());
    let credentials = Credentials {
        email: "ana@example.com".into(),
        password: "secret".into(),
    };

    let profile = client.login(&credentials).await.unwrap();
    assert_eq!(profile.id, 3);
    assert_eq!(profile.name, "Ana");
    assert_eq!(profile.whatsapp, "+51999888777");
    assert_eq!(profile.tasks.map(|t| t.len()), Some(1));
}

#[tokio::test]
async fn login_rejection_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/usuarios/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = HttpUserService::new(&server.uri());
    let credentials = Credentials {
        email: "ana@example.com".into(),
        password: "wrong".into(),
    };
    assert!(client.login(&credentials).await.is_none());
}

#[tokio::test]
async fn register_sends_spanish_body_and_accepts_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/usuarios/crearUsuario"))
        .and(body_partial_json(json!({
            "nombre": "Ana",
            "email": "ana@example.com",
            "numeroWhatsapp": "+51999888777",
            "contraseña": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "nombre": "Ana",
            "email": "ana@example.com",
            "numeroWhatsapp": "+51999888777",
            "date": "2025-08-29"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpUserService::new(&server.uri());
    let registration = Registration {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        whatsapp: "+51999888777".into(),
        password: "secret".into(),
    };

    let profile = client.register(&registration).await.unwrap();
    assert_eq!(profile.id, 9);
    assert_eq!(profile.tasks, None);
}

#[tokio::test]
async fn register_conflict_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/usuarios/crearUsuario"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let client = HttpUserService::new(&server.uri());
    let registration = Registration {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        whatsapp: "+51999888777".into(),
        password: "secret".into(),
    };
    assert!(client.register(&registration).await.is_none());
}

#[tokio::test]
async fn delete_user_requires_exactly_200() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/usuarios/eliminarUsuario/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpUserService::new(&server.uri());
    assert!(client.delete_user(3).await);
}

#[tokio::test]
async fn delete_user_server_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/usuarios/eliminarUsuario/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpUserService::new(&server.uri());
    assert!(!client.delete_user(3).await);
}

// ----------------------------------------------------------------------
// Assistant endpoint
// ----------------------------------------------------------------------

#[tokio::test]
async fn assistant_get_carries_json_body_and_returns_answer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ia/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pregunta": "What should I do today?",
            "respuesta": "Start with the oldest pending task."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAssistantService::new(&server.uri());
    let reply = client.ask(42, "What should I do today?").await;
    assert_eq!(reply, "Start with the oldest pending task.");
}

#[tokio::test]
async fn assistant_failure_reports_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ia/42"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HttpAssistantService::new(&server.uri());
    let reply = client.ask(42, "hello").await;
    assert!(reply.starts_with("Error:"), "got: {}", reply);
}

#[tokio::test]
async fn assistant_garbled_body_reports_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ia/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpAssistantService::new(&server.uri());
    let reply = client.ask(42, "hello").await;
    assert!(reply.starts_with("Error:"), "got: {}", reply);
}
