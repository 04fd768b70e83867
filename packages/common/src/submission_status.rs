#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a submission during the evaluation lifecycle.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Waiting for the evaluation task to run.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
    /// All test cases passed.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "accepted"))]
    Accepted,
    /// One or more test cases failed.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "rejected"))]
    Rejected,
    /// Evaluation crashed or could not run the submission.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "error"))]
    Error,
    /// Exceeded the time limit.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "time_limit_exceeded"))]
    TimeLimitExceeded,
    /// Exceeded the memory limit.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "memory_limit_exceeded"))]
    MemoryLimitExceeded,
}

impl SubmissionStatus {
    /// Returns true once evaluation is complete (anything but `Pending`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if this is a successful verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Error,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
    ];

    /// All terminal statuses.
    pub const TERMINAL: &'static [SubmissionStatus] = &[
        Self::Accepted,
        Self::Rejected,
        Self::Error,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
    ];

    /// Returns the string representation (snake_case, as stored and serialized).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Error => "error",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status '{invalid}'")]
pub struct ParseStatusError {
    invalid: String,
}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "error" => Ok(Self::Error),
            "time_limit_exceeded" => Ok(Self::TimeLimitExceeded),
            "memory_limit_exceeded" => Ok(Self::MemoryLimitExceeded),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
