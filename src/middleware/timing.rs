use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::filters::filter::Filter;

/// Filter decorator that measures `apply` and logs the elapsed time
///
/// # Example
///
/// ```ignore
/// use filter_chains::middleware::timing::Timed;
/// use std::time::Duration;
///
/// // Log every execution
/// let chain = Chain::new().filter(Arc::new(Timed::new(Resize)));
///
/// // Only log slow executions (> 100ms)
/// let chain = Chain::new()
///     .filter(Arc::new(Timed::new(Resize).with_threshold(Duration::from_millis(100))));
/// ```
pub struct Timed<F> {
    inner: F,
    threshold: Option<Duration>,
    last: Mutex<Option<Duration>>,
}

impl<F> Timed<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            threshold: None,
            last: Mutex::new(None),
        }
    }

    /// Only log executions that take at least `threshold`
    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Duration of the most recent `apply`, if any
    pub fn last_duration(&self) -> Option<Duration> {
        self.last.lock().ok().and_then(|last| *last)
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn should_log(&self, duration: Duration) -> bool {
        match self.threshold {
            Some(threshold) => duration >= threshold,
            None => true,
        }
    }

    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();
        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}

impl<I, R, F> Filter<I, R> for Timed<F>
where
    F: Filter<I, R>,
{
    fn apply(&self, input: &mut I) -> R {
        let start = Instant::now();
        let result = self.inner.apply(input);
        let duration = start.elapsed();

        if self.should_log(duration) {
            tracing::info!(
                filter = self.inner.name(),
                elapsed = %Self::format_duration(duration),
                "filter timing"
            );
        }

        if let Ok(mut last) = self.last.lock() {
            *last = Some(duration);
        }

        result
    }

    fn on_failure(&self, input: &mut I) {
        self.inner.on_failure(input);
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sleepy(Duration);

    impl Filter<(), bool> for Sleepy {
        fn apply(&self, _input: &mut ()) -> bool {
            std::thread::sleep(self.0);
            true
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(Timed::<()>::format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(Timed::<()>::format_duration(Duration::from_micros(1_500)), "1.50ms");
        assert_eq!(Timed::<()>::format_duration(Duration::from_millis(2_250)), "2.25s");
    }

    #[test]
    fn test_threshold() {
        let timed = Timed::new(()).with_threshold(Duration::from_millis(10));
        assert!(!timed.should_log(Duration::from_millis(9)));
        assert!(timed.should_log(Duration::from_millis(10)));
        assert!(Timed::new(()).should_log(Duration::ZERO));
    }

    #[test]
    fn test_records_last_duration() {
        let timed = Timed::new(Sleepy(Duration::from_millis(2)));
        assert_eq!(timed.last_duration(), None);

        assert!(<Timed<Sleepy> as Filter<(), bool>>::apply(&timed, &mut ()));

        let last = timed.last_duration().unwrap();
        assert!(last >= Duration::from_millis(2));
    }
}
