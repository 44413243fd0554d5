//! The completion event that triggers an evaluation run.
//!
//! Payload shape (JSON):
//!
//! ```json
//! {"taskId": "t-1", "userId": "u-1", "teamId": "core", "projectId": "p-1"}
//! ```
//!
//! There is deliberately no timestamp: the consumer reads its own clock.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::{IdError, ProjectId, TaskId, TeamId, UserId};
use crate::error::ErrorCode;

/// A work item was approved for `user_id` in `team_id`/`project_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub team_id: TeamId,
    pub project_id: ProjectId,
}

/// Errors raised while decoding a completion payload.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("completion payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("completion payload is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("completion payload has an invalid id: {0}")]
    InvalidId(#[from] IdError),
}

impl EventError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Json(_) | Self::MissingField(_) => ErrorCode::MalformedEvent,
            Self::InvalidId(_) => ErrorCode::InvalidId,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    task_id: Option<String>,
    user_id: Option<String>,
    team_id: Option<String>,
    project_id: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, EventError> {
    value.ok_or(EventError::MissingField(field))
}

impl CompletionEvent {
    /// Decode and validate a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when the payload is not JSON, lacks one of the
    /// four ids, or carries a blank id.
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        let raw: RawPayload = serde_json::from_str(payload)?;
        Ok(Self {
            task_id: TaskId::parse(required(raw.task_id, "taskId")?)?,
            user_id: UserId::parse(required(raw.user_id, "userId")?)?,
            team_id: TeamId::parse(required(raw.team_id, "teamId")?)?,
            project_id: ProjectId::parse(required(raw.project_id, "projectId")?)?,
        })
    }
}

impl fmt::Display for CompletionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task {} (user {}, team {}, project {})",
            self.task_id, self.user_id, self.team_id, self.project_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionEvent, EventError};
    use crate::error::ErrorCode;

    #[test]
    fn parses_well_formed_payload() {
        let event = CompletionEvent::from_json(
            r#"{"taskId":"t-9","userId":"u-1","teamId":"core","projectId":"p-1"}"#,
        )
        .expect("valid payload");
        assert_eq!(event.task_id.as_str(), "t-9");
        assert_eq!(event.project_id.as_str(), "p-1");
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let err = CompletionEvent::from_json(r#"{"taskId":"t-9","userId":"u-1","teamId":"core"}"#)
            .expect_err("projectId missing");
        assert!(matches!(err, EventError::MissingField("projectId")));
        assert_eq!(err.code(), ErrorCode::MalformedEvent);
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = CompletionEvent::from_json(
            r#"{"taskId":" ","userId":"u-1","teamId":"core","projectId":"p-1"}"#,
        )
        .expect_err("blank task id");
        assert_eq!(err.code(), ErrorCode::InvalidId);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = CompletionEvent::from_json("not json").expect_err("garbage");
        assert_eq!(err.code(), ErrorCode::MalformedEvent);
    }
}
