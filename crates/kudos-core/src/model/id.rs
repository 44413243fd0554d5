//! Opaque identifiers for tasks, users, teams, and projects.
//!
//! Identifiers are assigned by the task-management backend and never
//! interpreted here beyond equality and ordering. The only validation is
//! that an id must not be blank.

use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ErrorCode;

/// Error returned when an identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must not be blank")]
pub struct IdError {
    pub kind: &'static str,
}

impl IdError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::InvalidId
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse and validate an identifier.
            ///
            /// # Errors
            ///
            /// Returns [`IdError`] when the input is empty or whitespace-only.
            pub fn parse(raw: impl Into<String>) -> Result<Self, IdError> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(IdError { kind: $kind });
                }
                if trimmed.len() == raw.len() {
                    Ok(Self(raw))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            /// Borrow the raw identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a single work item.
    TaskId,
    "task"
);
opaque_id!(
    /// Identifier of the user a work item is assigned to.
    UserId,
    "user"
);
opaque_id!(
    /// Identifier of the team a work item belongs to.
    TeamId,
    "team"
);
opaque_id!(
    /// Identifier of the project that owns the team.
    ProjectId,
    "project"
);
