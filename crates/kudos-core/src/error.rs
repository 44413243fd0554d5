use std::fmt;

/// Machine-readable error codes shared by every kudos crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedEvent,
    InvalidId,
    InvalidEnumValue,
    SourceUnavailable,
    SourceQueryFailed,
    CorruptSnapshot,
    AwardForwardFailed,
    WorkerPoolClosed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedEvent => "E2001",
            Self::InvalidId => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::SourceUnavailable => "E3001",
            Self::SourceQueryFailed => "E3002",
            Self::CorruptSnapshot => "E3003",
            Self::AwardForwardFailed => "E4001",
            Self::WorkerPoolClosed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedEvent => "Malformed completion event",
            Self::InvalidId => "Invalid identifier",
            Self::InvalidEnumValue => "Invalid priority value",
            Self::SourceUnavailable => "Snapshot source unavailable",
            Self::SourceQueryFailed => "Snapshot source query failed",
            Self::CorruptSnapshot => "Corrupt task snapshot row",
            Self::AwardForwardFailed => "Award forwarding failed",
            Self::WorkerPoolClosed => "Worker pool closed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedEvent => {
                Some("Send taskId, userId, teamId and projectId as non-empty strings.")
            }
            Self::InvalidId => Some("Identifiers must contain at least one non-space character."),
            Self::InvalidEnumValue => Some("Use one of: low, medium, high, critical."),
            Self::SourceUnavailable | Self::AwardForwardFailed => {
                Some("The event is retried automatically; check the collaborator's health.")
            }
            Self::SourceQueryFailed => Some("Check the task store schema and permissions."),
            Self::CorruptSnapshot => Some("Repair the task row; timestamps must be microseconds."),
            Self::WorkerPoolClosed => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
