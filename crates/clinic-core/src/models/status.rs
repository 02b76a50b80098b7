//! Registration lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle tag for registry records. Records are never deleted, only
/// switched to `Inactive`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    /// Record is in use
    #[default]
    Active,
    /// Record was soft-deleted
    Inactive,
}

impl RecordStatus {
    /// Textual form stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "ACTIVE",
            RecordStatus::Inactive => "INACTIVE",
        }
    }

    /// Boolean form used at the API boundary (`ACTIVE` ↔ `true`).
    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}

impl From<bool> for RecordStatus {
    fn from(active: bool) -> Self {
        if active {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown record status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RecordStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(RecordStatus::Active),
            "INACTIVE" => Ok(RecordStatus::Inactive),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
