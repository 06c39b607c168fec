use std::collections::VecDeque;
use std::fmt;

use crate::core::chain_behavior::ChainBehavior;
use crate::core::filter_result::{FilterOutcome, FilterResult};
use crate::core::run_summary::RunSummary;
use crate::filters::filter::{same_filter, Filter, SharedFilter};

/// Ordered chain of filters
///
/// Holds a caller-controlled sequence of [`SharedFilter`]s and runs them
/// against a single input under a [`ChainBehavior`].
///
/// # Structural operations never fail
///
/// * `add_before` / `add_after` with a reference that is not in the chain
///   append at the end instead
/// * `remove_first` / `remove_last` on an empty chain do nothing
/// * `remove` with an out-of-range index does nothing
///
/// # Runs consume the chain
///
/// [`run`](Self::run) removes every filter it visits. A chain that completed
/// is empty afterwards; a chain that stopped keeps only the filters it never
/// reached. Clone the chain first to keep a reusable template.
///
/// # Example
///
/// ```ignore
/// let validate: SharedFilter<Order> = Arc::new(Validate);
///
/// let mut chain = Chain::new()
///     .filter(validate.clone())
///     .filter(Arc::new(Reserve))
///     .filter(Arc::new(Charge));
///
/// chain.add_before(Arc::new(Normalize), &validate);
///
/// let summary = chain.run(ChainBehavior::StopOnFailure, &mut order);
/// ```
pub struct Chain<I, R = FilterOutcome> {
    filters: VecDeque<SharedFilter<I, R>>,
}

impl<I, R> Chain<I, R> {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self {
            filters: VecDeque::new(),
        }
    }

    /// Append a filter (fluent API - consumes self)
    pub fn filter(mut self, filter: SharedFilter<I, R>) -> Self {
        self.filters.push_back(filter);
        self
    }

    /// Append a filter at the end of the chain
    pub fn add(&mut self, filter: SharedFilter<I, R>) -> &mut Self {
        self.add_last(filter)
    }

    pub fn add_first(&mut self, filter: SharedFilter<I, R>) -> &mut Self {
        self.filters.push_front(filter);
        self
    }

    pub fn add_last(&mut self, filter: SharedFilter<I, R>) -> &mut Self {
        self.filters.push_back(filter);
        self
    }

    /// Insert `filter` right before the first occurrence of `reference`
    ///
    /// Appends at the end when `reference` is not part of the chain.
    pub fn add_before(
        &mut self,
        filter: SharedFilter<I, R>,
        reference: &SharedFilter<I, R>,
    ) -> &mut Self {
        match self.position(reference) {
            Some(index) => self.filters.insert(index, filter),
            None => {
                tracing::debug!(
                    filter = filter.name(),
                    reference = reference.name(),
                    "reference filter not in chain, appending"
                );
                self.filters.push_back(filter);
            }
        }
        self
    }

    /// Insert `filter` right after the first occurrence of `reference`
    ///
    /// Appends at the end when `reference` is not part of the chain.
    pub fn add_after(
        &mut self,
        filter: SharedFilter<I, R>,
        reference: &SharedFilter<I, R>,
    ) -> &mut Self {
        match self.position(reference) {
            Some(index) => self.filters.insert(index + 1, filter),
            None => {
                tracing::debug!(
                    filter = filter.name(),
                    reference = reference.name(),
                    "reference filter not in chain, appending"
                );
                self.filters.push_back(filter);
            }
        }
        self
    }

    pub fn remove_first(&mut self) -> &mut Self {
        self.filters.pop_front();
        self
    }

    pub fn remove_last(&mut self) -> &mut Self {
        self.filters.pop_back();
        self
    }

    /// Remove the filter at `index`, shifting later filters left
    ///
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> &mut Self {
        if self.filters.remove(index).is_none() {
            tracing::trace!(index, len = self.filters.len(), "remove index out of range");
        }
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    /// Snapshot of the current sequence, in order
    ///
    /// The returned `Vec` is detached: changing it does not change the chain.
    pub fn to_list(&self) -> Vec<SharedFilter<I, R>> {
        self.filters.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedFilter<I, R>> {
        self.filters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SharedFilter<I, R>> {
        self.filters.get(index)
    }

    /// Index of the first occurrence of `filter`, compared by identity
    pub fn position(&self, filter: &SharedFilter<I, R>) -> Option<usize> {
        self.filters.iter().position(|f| same_filter(f, filter))
    }

    pub fn contains(&self, filter: &SharedFilter<I, R>) -> bool {
        self.position(filter).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<I, R: FilterResult> Chain<I, R> {
    /// Run the chain against `input`, draining it as it goes
    ///
    /// Filters are popped from the front one at a time, then applied. After
    /// each result the behavior decides whether to go on:
    ///
    /// * [`ChainBehavior::IgnoreFailure`]: always continue
    /// * [`ChainBehavior::StopOnFailure`]: continue only on success; on failure
    ///   call the filter's `on_failure` and return, leaving the unvisited
    ///   filters in the chain
    ///
    /// Passing `None` does nothing and leaves the chain untouched, which is how
    /// an unparseable configured behavior (`"...".parse().ok()`) is handled.
    ///
    /// A panic in `apply` or `on_failure` is not caught. The panicking filter,
    /// and every filter before it, are already gone from the chain.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let summary = chain.run(ChainBehavior::StopOnFailure, &mut input);
    ///
    /// match summary.status {
    ///     RunStatus::Completed => println!("all filters passed"),
    ///     RunStatus::Stopped => println!("halted at {:?}", summary.stopped_at),
    ///     RunStatus::Skipped => println!("no behavior"),
    /// }
    /// ```
    pub fn run(&mut self, behavior: impl Into<Option<ChainBehavior>>, input: &mut I) -> RunSummary {
        let Some(behavior) = behavior.into() else {
            tracing::debug!(pending = self.filters.len(), "no chain behavior, skipping run");
            return RunSummary::skipped();
        };

        tracing::debug!(%behavior, pending = self.filters.len(), "running chain");

        let summary = match behavior {
            ChainBehavior::IgnoreFailure => self.drain_while(input, |_| true),
            ChainBehavior::StopOnFailure => self.drain_while(input, R::is_success),
        };

        tracing::debug!(
            status = %summary.status,
            visited = summary.visited,
            remaining = self.filters.len(),
            "chain run finished"
        );
        summary
    }

    fn drain_while(&mut self, input: &mut I, proceed: impl Fn(&R) -> bool) -> RunSummary {
        let mut visited = 0;

        while let Some(filter) = self.filters.pop_front() {
            visited += 1;
            tracing::trace!(filter = filter.name(), position = visited, "applying filter");

            let result = filter.apply(input);

            if !proceed(&result) {
                tracing::debug!(filter = filter.name(), "filter failed, stopping chain");
                filter.on_failure(input);
                return RunSummary::stopped(visited, filter.name());
            }
        }

        RunSummary::completed(visited)
    }
}

impl<I, R> Default for Chain<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, R> Clone for Chain<I, R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
        }
    }
}

impl<I, R> fmt::Debug for Chain<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("filters", &self.names())
            .finish()
    }
}

impl<I, R> FromIterator<SharedFilter<I, R>> for Chain<I, R> {
    fn from_iter<T: IntoIterator<Item = SharedFilter<I, R>>>(iter: T) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl<I, R> Extend<SharedFilter<I, R>> for Chain<I, R> {
    fn extend<T: IntoIterator<Item = SharedFilter<I, R>>>(&mut self, iter: T) {
        self.filters.extend(iter);
    }
}
