//! # Submission Status
//!
//! Lifecycle of a contract's declaration as recorded locally.
//!
//! # State Machine
//!
//! ```text
//! None ─→ Pending ─→ Submitted ─→ Completed
//!   │        │          │   └───→ Cancelled
//!   └────────┴──→ Error ←┘
//!                  │
//!                  └──→ Pending | Submitted | Completed | Cancelled (retry)
//! ```
//!
//! # Examples
//!
//! ```
//! use aade_digital_client::domain::value_objects::SubmissionStatus;
//!
//! assert!(SubmissionStatus::Pending.can_transition_to(SubmissionStatus::Submitted));
//! assert!(!SubmissionStatus::Completed.can_transition_to(SubmissionStatus::Error));
//! ```

use crate::domain::value_objects::enums::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Local submission state of a declaration.
///
/// # Terminal States
///
/// - [`Completed`](SubmissionStatus::Completed)
/// - [`Cancelled`](SubmissionStatus::Cancelled)
///
/// [`Error`](SubmissionStatus::Error) is recoverable: any retry may leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SubmissionStatus {
    /// No submission has been attempted.
    #[default]
    None = 0,
    /// A submission attempt has started but has no outcome yet.
    Pending = 1,
    /// The authority accepted the declaration and assigned a remote id.
    Submitted = 2,
    /// The declaration was closed out with its final amount (terminal).
    Completed = 3,
    /// The declaration was cancelled at the authority (terminal).
    Cancelled = 4,
    /// The last remote operation failed.
    Error = 5,
}

impl SubmissionStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Pending,
        Self::Submitted,
        Self::Completed,
        Self::Cancelled,
        Self::Error,
    ];

    /// Statuses picked up by a pending resync.
    pub const RESYNCABLE: [Self; 2] = [Self::None, Self::Pending];

    /// Returns true if this is a terminal state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if this state can transition to the target state.
    ///
    /// Rules:
    /// - None → Pending, Submitted, Error
    /// - Pending → Pending, Submitted, Error
    /// - Submitted → Completed, Cancelled, Error
    /// - Error → Pending, Submitted, Completed, Cancelled, Error
    /// - Terminal states → (none)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::None, Self::Pending)
                | (Self::None, Self::Submitted)
                | (Self::None, Self::Error)
                | (Self::Pending, Self::Pending)
                | (Self::Pending, Self::Submitted)
                | (Self::Pending, Self::Error)
                | (Self::Submitted, Self::Completed)
                | (Self::Submitted, Self::Cancelled)
                | (Self::Submitted, Self::Error)
                | (Self::Error, Self::Pending)
                | (Self::Error, Self::Submitted)
                | (Self::Error, Self::Completed)
                | (Self::Error, Self::Cancelled)
                | (Self::Error, Self::Error)
        )
    }

    /// Returns the valid next states from this state.
    #[must_use]
    pub fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(*target))
            .collect()
    }

    /// Returns the lowercase storage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "pending" => Ok(Self::Pending),
            "submitted" => Ok(Self::Submitted),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "error" => Ok(Self::Error),
            _ => Err(ParseEnumError::InvalidValue("SubmissionStatus", s.to_string())),
        }
    }
}
