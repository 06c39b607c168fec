use std::sync::{Arc, Mutex};
use std::time::Instant;

use hashbrown::HashMap;

use crate::core::filter_result::FilterResult;
use crate::filters::filter::Filter;

/// Statistics for a single filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStats {
    pub filter_name: String,
    pub total_executions: u64,
    pub successful_executions: u64,
    pub failed_executions: u64,
    pub failure_hooks: u64,
    pub total_duration_micros: u64,
    pub min_duration_micros: u64,
    pub max_duration_micros: u64,
}

impl FilterStats {
    fn new(filter_name: String) -> Self {
        Self {
            filter_name,
            total_executions: 0,
            successful_executions: 0,
            failed_executions: 0,
            failure_hooks: 0,
            total_duration_micros: 0,
            min_duration_micros: u64::MAX,
            max_duration_micros: 0,
        }
    }

    fn record(&mut self, duration_micros: u64, success: bool) {
        self.total_executions += 1;
        if success {
            self.successful_executions += 1;
        } else {
            self.failed_executions += 1;
        }

        self.total_duration_micros += duration_micros;
        self.min_duration_micros = self.min_duration_micros.min(duration_micros);
        self.max_duration_micros = self.max_duration_micros.max(duration_micros);
    }

    /// Get the average execution time in microseconds
    pub fn avg_duration_micros(&self) -> u64 {
        if self.total_executions == 0 {
            0
        } else {
            self.total_duration_micros / self.total_executions
        }
    }

    /// Get the success rate as a percentage (0.0 - 100.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_executions == 0 {
            0.0
        } else {
            (self.successful_executions as f64 / self.total_executions as f64) * 100.0
        }
    }
}

/// Shared registry of per-filter statistics, keyed by filter name
///
/// Cloning the registry shares the underlying storage, so one handle can be
/// given to several [`Metered`] filters and another kept for reading.
///
/// # Example
///
/// ```ignore
/// use filter_chains::middleware::metrics::{FilterMetrics, Metered};
///
/// let metrics = FilterMetrics::new();
///
/// let mut chain = Chain::new()
///     .filter(Arc::new(Metered::new(Validate, &metrics)))
///     .filter(Arc::new(Metered::new(Charge, &metrics)));
///
/// chain.run(ChainBehavior::IgnoreFailure, &mut order);
///
/// metrics.log_summary();
/// let charge = metrics.get("Charge");
/// ```
#[derive(Clone, Default)]
pub struct FilterMetrics {
    stats: Arc<Mutex<HashMap<String, FilterStats>>>,
}

impl FilterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get statistics for a specific filter
    pub fn get(&self, filter_name: &str) -> Option<FilterStats> {
        self.stats.lock().ok()?.get(filter_name).cloned()
    }

    /// Get all collected statistics, sorted by filter name
    pub fn all(&self) -> Vec<FilterStats> {
        let mut all: Vec<FilterStats> = self
            .stats
            .lock()
            .ok()
            .map(|s| s.values().cloned().collect())
            .unwrap_or_default();
        all.sort_by(|a, b| a.filter_name.cmp(&b.filter_name));
        all
    }

    pub fn reset(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.clear();
        }
    }

    /// Emit one `info` event per filter
    pub fn log_summary(&self) {
        for stats in self.all() {
            tracing::info!(
                filter = %stats.filter_name,
                total = stats.total_executions,
                succeeded = stats.successful_executions,
                failed = stats.failed_executions,
                failure_hooks = stats.failure_hooks,
                avg_micros = stats.avg_duration_micros(),
                min_micros = stats.min_duration_micros,
                max_micros = stats.max_duration_micros,
                success_rate = stats.success_rate(),
                "filter metrics"
            );
        }
    }

    fn update(&self, filter_name: &str, update: impl FnOnce(&mut FilterStats)) {
        match self.stats.lock() {
            Ok(mut stats) => {
                let entry = stats
                    .entry(filter_name.to_string())
                    .or_insert_with(|| FilterStats::new(filter_name.to_string()));
                update(entry);
            }
            Err(_) => tracing::warn!(filter = filter_name, "metrics lock poisoned, sample dropped"),
        }
    }
}

/// Filter decorator that records executions into a [`FilterMetrics`] registry
pub struct Metered<F> {
    inner: F,
    metrics: FilterMetrics,
}

impl<F> Metered<F> {
    pub fn new(inner: F, metrics: &FilterMetrics) -> Self {
        Self {
            inner,
            metrics: metrics.clone(),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<I, R, F> Filter<I, R> for Metered<F>
where
    F: Filter<I, R>,
    R: FilterResult,
{
    fn apply(&self, input: &mut I) -> R {
        let start = Instant::now();
        let result = self.inner.apply(input);
        let micros = start.elapsed().as_micros() as u64;

        let success = result.is_success();
        self.metrics
            .update(self.inner.name(), |stats| stats.record(micros, success));

        result
    }

    fn on_failure(&self, input: &mut I) {
        self.metrics
            .update(self.inner.name(), |stats| stats.failure_hooks += 1);
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

    struct Step {
        name: &'static str,
        succeed: bool,
    }

    impl Filter<u32> for Step {
        fn apply(&self, input: &mut u32) -> FilterOutcome {
            *input += 1;
            FilterOutcome::from_bool(self.succeed)
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn metered(name: &'static str, succeed: bool, metrics: &FilterMetrics) -> Arc<Metered<Step>> {
        Arc::new(Metered::new(Step { name, succeed }, metrics))
    }

    #[test]
    fn test_records_per_filter() {
        let metrics = FilterMetrics::new();
        let mut value = 0;

        let mut chain: Chain<u32> = Chain::new();
        chain
            .add(metered("ok", true, &metrics))
            .add(metered("bad", false, &metrics))
            .add(metered("ok", true, &metrics));
        chain.run(ChainBehavior::IgnoreFailure, &mut value);

        assert_eq!(value, 3);

        let ok = metrics.get("ok").unwrap();
        assert_eq!(ok.total_executions, 2);
        assert_eq!(ok.successful_executions, 2);
        assert_eq!(ok.success_rate(), 100.0);

        let bad = metrics.get("bad").unwrap();
        assert_eq!(bad.failed_executions, 1);
        assert_eq!(bad.failure_hooks, 0);

        let names: Vec<String> = metrics.all().into_iter().map(|s| s.filter_name).collect();
        assert_eq!(names, ["bad", "ok"]);
    }

    #[test]
    fn test_counts_failure_hooks() {
        let metrics = FilterMetrics::new();
        let mut value = 0;

        let mut chain: Chain<u32> = Chain::new();
        chain
            .add(metered("bad", false, &metrics))
            .add(metered("never", true, &metrics));
        chain.run(ChainBehavior::StopOnFailure, &mut value);

        assert_eq!(metrics.get("bad").unwrap().failure_hooks, 1);
        assert!(metrics.get("never").is_none());

        metrics.reset();
        assert!(metrics.all().is_empty());
    }

    #[test]
    fn test_empty_stats() {
        let stats = FilterStats::new("idle".to_string());
        assert_eq!(stats.avg_duration_micros(), 0);
        assert_eq!(stats.success_rate(), 0.0);
    }
}
