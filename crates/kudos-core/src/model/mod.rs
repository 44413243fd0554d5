//! Domain types consumed by the rule evaluator.

pub mod event;
pub mod id;
pub mod snapshot;

pub use event::{CompletionEvent, EventError};
pub use id::{IdError, ProjectId, TaskId, TeamId, UserId};
pub use snapshot::{ParseEnumError, Priority, TaskSnapshot};
