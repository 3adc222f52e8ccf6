use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Task record in the database. `user_id` is the single owner; every query
/// that touches a task filters on it.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
