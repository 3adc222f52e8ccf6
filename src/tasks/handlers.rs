use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::dto::MessageResponse,
    auth::jwt::AuthUser,
    error::ApiError,
    extract::AppJson,
    state::AppState,
    tasks::dto::{CreateTaskRequest, TaskView, UpdateTaskRequest},
    tasks::repo::Task,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/tasks", get(list_tasks))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", post(create_task))
        .route("/tasks/:id", put(update_task).delete(delete_task))
        .route("/tasks/:id/complete", put(complete_task))
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    let tasks = Task::list_by_user(&state.db, user_id).await?;
    Ok(Json(tasks.into_iter().map(TaskView::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }

    let task = Task::create(&state.db, user_id, title, payload.description.as_deref()).await?;

    info!(task_id = %task.id, user_id = %user_id, "task created");
    Ok((StatusCode::CREATED, Json(task.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateTaskRequest>,
) -> Result<Json<TaskView>, ApiError> {
    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("Title is required".into()));
        }
    }

    // A task owned by someone else is indistinguishable from a missing one.
    let task = Task::update_partial(
        &state.db,
        user_id,
        id,
        payload.title.as_deref().map(str::trim),
        payload.description.as_deref(),
        payload.completed,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;

    info!(task_id = %task.id, user_id = %user_id, "task updated");
    Ok(Json(task.into()))
}

#[instrument(skip(state))]
pub async fn complete_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskView>, ApiError> {
    let task = Task::complete(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;

    info!(task_id = %task.id, user_id = %user_id, "task completed");
    Ok(Json(task.into()))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !Task::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Task not found".into()));
    }

    info!(task_id = %id, user_id = %user_id, "task deleted");
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
