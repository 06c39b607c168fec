use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Execution policy for [`Chain::run`](crate::core::chain::Chain::run)
///
/// * **StopOnFailure**: halt at the first failed result and call that filter's
///   `on_failure` hook (default)
/// * **IgnoreFailure**: visit every filter regardless of results, never call
///   `on_failure`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ChainBehavior {
    #[default]
    StopOnFailure,
    IgnoreFailure,
}

impl ChainBehavior {
    /// Whether the run may go on after a filter produced a result with the given flag
    pub fn should_continue(self, success: bool) -> bool {
        match self {
            ChainBehavior::StopOnFailure => success,
            ChainBehavior::IgnoreFailure => true,
        }
    }
}

/// Error returned when parsing an unknown behavior name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBehaviorError {
    #[error("Unknown chain behavior: {0:?}")]
    Unknown(String),
}

impl FromStr for ChainBehavior {
    type Err = ParseBehaviorError;

    /// Accepts `STOP_ON_FAILURE` / `IGNORE_FAILURE` in any case, with `-` or
    /// `_` separators, and the short forms `stop` / `ignore`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "stop_on_failure" | "stop" => Ok(ChainBehavior::StopOnFailure),
            "ignore_failure" | "ignore" => Ok(ChainBehavior::IgnoreFailure),
            _ => Err(ParseBehaviorError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for ChainBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainBehavior::StopOnFailure => write!(f, "STOP_ON_FAILURE"),
            ChainBehavior::IgnoreFailure => write!(f, "IGNORE_FAILURE"),
        }
    }
}
