use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimal contract a filter's `apply` step must produce
///
/// The chain only ever asks whether a step succeeded. Implementations are free
/// to carry richer payloads (error details, counters, produced data) on top.
pub trait FilterResult {
    fn is_success(&self) -> bool;

    fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

/// Default result type for filters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterOutcome {
    Success,
    Failure(String),
}

impl FilterOutcome {
    pub fn success() -> Self {
        FilterOutcome::Success
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        FilterOutcome::Failure(reason.into())
    }

    /// Build an outcome from a plain flag, using a generic reason on failure
    pub fn from_bool(success: bool) -> Self {
        if success {
            FilterOutcome::Success
        } else {
            FilterOutcome::Failure("filter reported failure".to_string())
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FilterOutcome::Success => None,
            FilterOutcome::Failure(reason) => Some(reason),
        }
    }
}

impl FilterResult for FilterOutcome {
    fn is_success(&self) -> bool {
        matches!(self, FilterOutcome::Success)
    }
}

impl From<bool> for FilterOutcome {
    fn from(success: bool) -> Self {
        Self::from_bool(success)
    }
}

impl fmt::Display for FilterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOutcome::Success => write!(f, "SUCCESS"),
            FilterOutcome::Failure(reason) => write!(f, "FAILURE: {}", reason),
        }
    }
}

impl FilterResult for bool {
    fn is_success(&self) -> bool {
        *self
    }
}

impl<T, E> FilterResult for Result<T, E> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_flags() {
        assert!(FilterOutcome::success().is_success());
        assert!(!FilterOutcome::success().is_failure());

        let failed = FilterOutcome::failure("disk full");
        assert!(failed.is_failure());
        assert_eq!(failed.reason(), Some("disk full"));
        assert_eq!(failed.to_string(), "FAILURE: disk full");
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(FilterOutcome::from(true), FilterOutcome::Success);
        assert!(FilterOutcome::from(false).is_failure());
    }

    #[test]
    fn test_foreign_results() {
        assert!(true.is_success());
        assert!(false.is_failure());

        let ok: Result<u32, String> = Ok(3);
        let err: Result<u32, String> = Err("nope".to_string());
        assert!(ok.is_success());
        assert!(err.is_failure());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_outcome_serde() {
        let json = serde_json::to_string(&FilterOutcome::failure("late")).unwrap();
        assert_eq!(json, r#"{"Failure":"late"}"#);
        let back: FilterOutcome = serde_json::from_str(r#""Success""#).unwrap();
        assert_eq!(back, FilterOutcome::Success);
    }
}
