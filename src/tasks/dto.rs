use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tasks::repo::Task;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update: only the provided fields change.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Task> for TaskView {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn create_request_description_is_optional() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title":"t1"}"#).unwrap();
        assert_eq!(req.title, "t1");
        assert!(req.description.is_none());
    }

    #[test]
    fn create_request_rejects_unknown_fields() {
        let res: Result<CreateTaskRequest, _> =
            serde_json::from_str(r#"{"title":"t1","owner":"someone-else"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn update_request_all_fields_optional() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.title.is_none());
        assert!(req.description.is_none());
        assert!(req.completed.is_none());

        let req: UpdateTaskRequest = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(req.completed, Some(true));
    }

    #[test]
    fn task_view_uses_camel_case_timestamps() {
        let view = TaskView::from(Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "t1".into(),
            description: None,
            completed: false,
            created_at: datetime!(2024-05-01 12:00 UTC),
            updated_at: datetime!(2024-05-01 12:00 UTC),
        });
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
        assert!(json.contains("userId"));
        assert!(json.contains(r#""completed":false"#));
        assert!(json.contains("2024-05-01T12:00:00"));
    }
}
