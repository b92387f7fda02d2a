//! Remote Task Service client.
//!
//! Wraps the five task endpoints:
//! - `GET    /api/tareas/listaTareas/{userId}`
//! - `POST   /api/tareas/crearTarea/{userId}`
//! - `PUT    /api/tareas/actualizarTarea/{userId}/{taskId}`
//! - `DELETE /api/tareas/eliminarTarea/{userId}/{taskId}`
//! - `DELETE /api/tareas/eliminarTodo/{userId}`

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::types::{NewTask, Task, TaskUpdate};

/// Task operations against the remote backend.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Fetch the user's full task list. `None` signals failure; `Some`
    /// with an empty vec is a user who simply has no tasks.
    async fn list_tasks(&self, user_id: i64) -> Option<Vec<Task>>;

    /// Create a task; returns the server record with its assigned id.
    async fn create_task(&self, user_id: i64, task: &NewTask) -> Option<Task>;

    /// Full-record update of an existing task.
    async fn update_task(&self, user_id: i64, task_id: i64, update: &TaskUpdate) -> bool;

    /// Delete one task by id.
    async fn delete_task(&self, user_id: i64, task_id: i64) -> bool;

    /// Delete every task the user owns.
    async fn delete_all_tasks(&self, user_id: i64) -> bool;
}

/// reqwest-backed implementation of [`TaskService`].
pub struct HttpTaskService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::build_http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/tareas/{}", self.base_url, path)
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self, user_id: i64) -> Option<Vec<Task>> {
        let url = self.url(&format!("listaTareas/{}", user_id));

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Task list request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        log::debug!("Task list status: {}", status);
        if status != StatusCode::OK {
            return None;
        }

        match response.json::<Vec<Task>>().await {
            Ok(tasks) => Some(tasks),
            Err(e) => {
                log::debug!("Task list body undecodable: {}", e);
                None
            }
        }
    }

    async fn create_task(&self, user_id: i64, task: &NewTask) -> Option<Task> {
        let url = self.url(&format!("crearTarea/{}", user_id));

        let response = match self.client.post(&url).json(task).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Task create request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        log::debug!("Task create status: {}", status);
        if status != StatusCode::CREATED && status != StatusCode::OK {
            return None;
        }

        match response.json::<Task>().await {
            Ok(task) => Some(task),
            Err(e) => {
                log::debug!("Task create body undecodable: {}", e);
                None
            }
        }
    }

    async fn update_task(&self, user_id: i64, task_id: i64, update: &TaskUpdate) -> bool {
        let url = self.url(&format!("actualizarTarea/{}/{}", user_id, task_id));

        match self.client.put(&url).json(update).send().await {
            Ok(response) => {
                log::debug!("Task update status: {}", response.status());
                response.status() == StatusCode::OK
            }
            Err(e) => {
                log::debug!("Task update request failed: {}", e);
                false
            }
        }
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> bool {
        let url = self.url(&format!("eliminarTarea/{}/{}", user_id, task_id));

        match self.client.delete(&url).send().await {
            Ok(response) => {
                let status = response.status();
                log::debug!("Task delete status: {}", status);
                // The backend answers 200 or 204 depending on the route version
                status == StatusCode::OK || status == StatusCode::NO_CONTENT
            }
            Err(e) => {
                log::debug!("Task delete request failed: {}", e);
                false
            }
        }
    }

    async fn delete_all_tasks(&self, user_id: i64) -> bool {
        let url = self.url(&format!("eliminarTodo/{}", user_id));

        match self.client.delete(&url).send().await {
            Ok(response) => {
                let status = response.status();
                log::debug!("Bulk task delete status: {}", status);
                status == StatusCode::OK || status == StatusCode::NO_CONTENT
            }
            Err(e) => {
                log::debug!("Bulk task delete request failed: {}", e);
                false
            }
        }
    }
}
