//! Training Value Objects

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TrainingError;

/// Lifecycle state of a training session
///
/// `Completed` and `Abandoned` are absorbing: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Active)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = TrainingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            "abandoned" => Ok(SessionStatus::Abandoned),
            other => Err(TrainingError::Internal(format!(
                "unknown session status: {other}"
            ))),
        }
    }
}

/// Terminal state a session can be closed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Abandoned,
}

impl SessionOutcome {
    pub const fn status(&self) -> SessionStatus {
        match self {
            SessionOutcome::Completed => SessionStatus::Completed,
            SessionOutcome::Abandoned => SessionStatus::Abandoned,
        }
    }

    /// Audit action name
    pub const fn action(&self) -> &'static str {
        self.status().as_str()
    }
}

/// Whether a set was performed or skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetStatus {
    Completed,
    Skipped,
}

impl SetStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SetStatus::Completed => "completed",
            SetStatus::Skipped => "skipped",
        }
    }

    /// Parse client input; anything else is a validation failure
    pub fn parse(s: &str) -> Result<Self, TrainingError> {
        match s {
            "completed" => Ok(SetStatus::Completed),
            "skipped" => Ok(SetStatus::Skipped),
            _ => Err(TrainingError::MalformedParameters(
                "Status must be either completed or skipped".to_string(),
            )),
        }
    }
}

impl fmt::Display for SetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated numeric part of a set
///
/// Weight is stored in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMeasurement {
    pub set_number: i32,
    pub weight_grams: i32,
    pub reps: i32,
}

impl SetMeasurement {
    pub fn new(set_number: i64, weight_grams: i64, reps: i64) -> Result<Self, TrainingError> {
        let set_number = in_range(set_number, 1, "Set number must be at least 1")?;
        let weight_grams = in_range(weight_grams, 0, "Weight must not be negative")?;
        let reps = in_range(reps, 0, "Reps must not be negative")?;

        Ok(Self {
            set_number,
            weight_grams,
            reps,
        })
    }
}

fn in_range(value: i64, min: i64, message: &str) -> Result<i32, TrainingError> {
    if value < min {
        return Err(TrainingError::MalformedParameters(message.to_string()));
    }
    i32::try_from(value)
        .map_err(|_| TrainingError::MalformedParameters(format!("{value} is out of range")))
}
