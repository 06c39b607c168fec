use crate::core::filter_result::FilterResult;
use crate::filters::filter::Filter;

/// Logging levels for the decorator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Filter decorator that logs each execution through `tracing`
///
/// Start of `apply` is logged at the configured level, successes at the
/// configured level, failures at `Warn` (or `Error` if configured higher), and
/// `on_failure` hooks at `Warn`.
///
/// # Example
///
/// ```ignore
/// use filter_chains::middleware::logging::{Logged, LogLevel};
///
/// let chain = Chain::new()
///     .filter(Arc::new(Logged::new(Validate).with_level(LogLevel::Debug)))
///     .filter(Arc::new(Logged::errors_only(Charge)));
/// ```
pub struct Logged<F> {
    inner: F,
    level: LogLevel,
    log_success: bool,
    log_failure: bool,
}

impl<F> Logged<F> {
    /// Wrap a filter, logging at info level
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
            log_success: true,
            log_failure: true,
        }
    }

    /// Only log failures
    pub fn errors_only(inner: F) -> Self {
        Self {
            inner,
            level: LogLevel::Error,
            log_success: false,
            log_failure: true,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Configure whether to log successful executions
    pub fn with_success_logging(mut self, enabled: bool) -> Self {
        self.log_success = enabled;
        self
    }

    /// Configure whether to log failures
    pub fn with_failure_logging(mut self, enabled: bool) -> Self {
        self.log_failure = enabled;
        self
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn failure_level(&self) -> LogLevel {
        self.level.max(LogLevel::Warn)
    }
}

fn emit(level: LogLevel, filter: &str, message: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(filter, "{}", message),
        LogLevel::Debug => tracing::debug!(filter, "{}", message),
        LogLevel::Info => tracing::info!(filter, "{}", message),
        LogLevel::Warn => tracing::warn!(filter, "{}", message),
        LogLevel::Error => tracing::error!(filter, "{}", message),
    }
}

impl<I, R, F> Filter<I, R> for Logged<F>
where
    F: Filter<I, R>,
    R: FilterResult,
{
    fn apply(&self, input: &mut I) -> R {
        let name = self.inner.name();
        if self.log_success {
            emit(self.level, name, "starting filter");
        }

        let result = self.inner.apply(input);

        if result.is_success() {
            if self.log_success {
                emit(self.level, name, "filter succeeded");
            }
        } else if self.log_failure {
            emit(self.failure_level(), name, "filter failed");
        }

        result
    }

    fn on_failure(&self, input: &mut I) {
        if self.log_failure {
            emit(self.failure_level(), self.inner.name(), "running failure hook");
        }
        self.inner.on_failure(input);
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::Chain;
    use crate::core::chain_behavior::ChainBehavior;
    use crate::core::filter_result::FilterOutcome;
    use std::sync::Arc;

    struct Fail;

    impl Filter<u32> for Fail {
        fn apply(&self, _input: &mut u32) -> FilterOutcome {
            FilterOutcome::failure("always")
        }

        fn on_failure(&self, input: &mut u32) {
            *input = 99;
        }

        fn name(&self) -> &str {
            "Fail"
        }
    }

    #[test]
    fn test_failure_level_is_at_least_warn() {
        assert_eq!(Logged::new(Fail).failure_level(), LogLevel::Warn);
        assert_eq!(Logged::errors_only(Fail).failure_level(), LogLevel::Error);
    }

    #[test]
    fn test_forwards_to_inner() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let logged = Logged::new(Fail).with_level(LogLevel::Debug);
        assert_eq!(<Logged<Fail> as Filter<u32>>::name(&logged), "Fail");

        let mut chain: Chain<u32> = Chain::new();
        chain.add(Arc::new(logged));
        let mut value = 0;
        let summary = chain.run(ChainBehavior::StopOnFailure, &mut value);

        assert!(summary.is_stopped());
        assert_eq!(summary.stopped_at.as_deref(), Some("Fail"));
        assert_eq!(value, 99);
    }
}
