use std::fmt;

/// How a single run of a chain ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every filter was visited
    Completed,
    /// A filter's result halted the run and its `on_failure` hook was called
    Stopped,
    /// No behavior was supplied, nothing was visited
    Skipped,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "COMPLETED"),
            RunStatus::Stopped => write!(f, "STOPPED"),
            RunStatus::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// Report returned by [`Chain::run`](crate::core::chain::Chain::run)
///
/// `visited` counts filters whose `apply` was called, which is also the number
/// of filters the run removed from the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub status: RunStatus,
    pub visited: usize,
    pub stopped_at: Option<String>,
}

impl RunSummary {
    pub fn completed(visited: usize) -> Self {
        Self {
            status: RunStatus::Completed,
            visited,
            stopped_at: None,
        }
    }

    pub fn stopped(visited: usize, filter_name: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Stopped,
            visited,
            stopped_at: Some(filter_name.into()),
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: RunStatus::Skipped,
            visited: 0,
            stopped_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn is_stopped(&self) -> bool {
        self.status == RunStatus::Stopped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stopped_at {
            Some(name) => write!(f, "{} at {} after {} filter(s)", self.status, name, self.visited),
            None => write!(f, "{} after {} filter(s)", self.status, self.visited),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(RunSummary::completed(3).to_string(), "COMPLETED after 3 filter(s)");
        assert_eq!(
            RunSummary::stopped(2, "Validate").to_string(),
            "STOPPED at Validate after 2 filter(s)"
        );
        assert_eq!(RunSummary::skipped().to_string(), "SKIPPED after 0 filter(s)");
    }

    #[test]
    fn test_status_helpers() {
        assert!(RunSummary::completed(0).is_completed());
        assert!(RunSummary::stopped(1, "A").is_stopped());
        assert!(!RunSummary::skipped().is_completed());
    }
}
