//! Task API endpoints
//!
//! RESTful API over the task repository.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use todo_core::task::{filter_tasks, Task, TasksFilterType, WriteOutcome};
use todo_core::Error;

use super::{error_response, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    #[serde(default)]
    pub force_update: bool,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTaskQuery {
    #[serde(default)]
    pub force_update: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub title_for_list: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            title_for_list: task.title_for_list().to_string(),
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskWriteResponse {
    pub task: TaskResponse,
    pub write: WriteOutcome,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub write: WriteOutcome,
}

fn empty_task_error() -> ApiError {
    error_response(Error::InvalidInput(
        "Tasks cannot be empty".to_string(),
    ))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List tasks, optionally filtered
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let filter = match query.filter.as_deref() {
        Some(raw) => raw.parse::<TasksFilterType>().map_err(error_response)?,
        None => TasksFilterType::All,
    };

    let tasks = state
        .repository()
        .get_tasks(query.force_update)
        .await
        .map_err(error_response)?;

    Ok(Json(
        filter_tasks(&tasks, filter)
            .into_iter()
            .map(TaskResponse::from)
            .collect(),
    ))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskWriteResponse>), ApiError> {
    let task = Task::new(req.title, req.description);
    if task.is_empty() {
        return Err(empty_task_error());
    }

    let write = state.repository().save_task(task.clone()).await;

    Ok((
        StatusCode::CREATED,
        Json(TaskWriteResponse {
            task: TaskResponse::from(task),
            write,
        }),
    ))
}

/// GET /api/tasks/:id - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<GetTaskQuery>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state
        .repository()
        .get_task(&id, query.force_update)
        .await
        .map_err(error_response)?;

    Ok(Json(TaskResponse::from(task)))
}

/// PATCH /api/tasks/:id - Edit title and/or description
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskWriteResponse>, ApiError> {
    let mut task = state
        .repository()
        .get_task(&id, false)
        .await
        .map_err(error_response)?;

    if let Some(title) = req.title {
        task.title = title;
    }
    if let Some(description) = req.description {
        task.description = description;
    }
    if task.is_empty() {
        return Err(empty_task_error());
    }

    let write = state.repository().save_task(task.clone()).await;

    Ok(Json(TaskWriteResponse {
        task: TaskResponse::from(task),
        write,
    }))
}

/// POST /api/tasks/:id/complete - Mark a task as completed
async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskWriteResponse>, ApiError> {
    let task = state
        .repository()
        .get_task(&id, false)
        .await
        .map_err(error_response)?;

    let write = state.repository().complete_task(&task).await;

    Ok(Json(TaskWriteResponse {
        task: TaskResponse::from(task.completed()),
        write,
    }))
}

/// POST /api/tasks/:id/activate - Mark a task as active
async fn activate_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskWriteResponse>, ApiError> {
    let task = state
        .repository()
        .get_task(&id, false)
        .await
        .map_err(error_response)?;

    let write = state.repository().activate_task(&task).await;

    Ok(Json(TaskWriteResponse {
        task: TaskResponse::from(task.activated()),
        write,
    }))
}

/// DELETE /api/tasks/:id - Delete a task
async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Json<WriteResponse> {
    let write = state.repository().delete_task(&id).await;
    Json(WriteResponse { write })
}

/// DELETE /api/tasks - Delete every task
async fn delete_all_tasks(State(state): State<AppState>) -> Json<WriteResponse> {
    let write = state.repository().delete_all_tasks().await;
    Json(WriteResponse { write })
}

/// POST /api/tasks/clear-completed - Delete every completed task
async fn clear_completed_tasks(State(state): State<AppState>) -> Json<WriteResponse> {
    let write = state.repository().clear_completed_tasks().await;
    Json(WriteResponse { write })
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks).post(create_task).delete(delete_all_tasks),
        )
        .route("/api/tasks/clear-completed", post(clear_completed_tasks))
        .route(
            "/api/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/complete", post(complete_task))
        .route("/api/tasks/{id}/activate", post(activate_task))
}
