use std::sync::Arc;

use crate::core::filter_result::FilterOutcome;

/// A single unit of work in a [`Chain`](crate::core::chain::Chain)
///
/// `apply` performs the step and signals success or failure through its
/// result. Expected failures must be reported through `R`, not by panicking;
/// a panic is treated as a defect and unwinds straight through the chain.
///
/// `on_failure` is called at most once per run, and only when the chain
/// decides to stop because of this filter's result. Use it for cleanup or
/// compensation.
///
/// # Example
///
/// ```ignore
/// struct Validate;
///
/// impl Filter<Order> for Validate {
///     fn apply(&self, order: &mut Order) -> FilterOutcome {
///         if order.lines.is_empty() {
///             FilterOutcome::failure("order has no lines")
///         } else {
///             FilterOutcome::success()
///         }
///     }
///
///     fn name(&self) -> &str { "Validate" }
/// }
/// ```
pub trait Filter<I, R = FilterOutcome> {
    fn apply(&self, input: &mut I) -> R;

    fn on_failure(&self, _input: &mut I) {}

    /// Name used in logs, `Debug` output and metrics keys
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Filters are shared, not owned, by chains
///
/// The same `Arc` may be added to several chains, or several times to one
/// chain. Reference lookups compare the allocation, not the value.
pub type SharedFilter<I, R = FilterOutcome> = Arc<dyn Filter<I, R>>;

/// Whether two shared filters are the same instance
pub fn same_filter<I, R>(a: &SharedFilter<I, R>, b: &SharedFilter<I, R>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter_result::FilterResult;

    struct Double;

    impl Filter<u32> for Double {
        fn apply(&self, input: &mut u32) -> FilterOutcome {
            *input *= 2;
            FilterOutcome::success()
        }
    }

    struct Named;

    impl Filter<u32, bool> for Named {
        fn apply(&self, _input: &mut u32) -> bool {
            false
        }

        fn name(&self) -> &str {
            "Named"
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(<Double as Filter<u32>>::name(&Double).ends_with("Double"));
        assert_eq!(<Named as Filter<u32, bool>>::name(&Named), "Named");
    }

    #[test]
    fn test_identity_not_value() {
        let a: SharedFilter<u32> = Arc::new(Double);
        let b: SharedFilter<u32> = Arc::new(Double);

        assert!(same_filter(&a, &a.clone()));
        assert!(!same_filter(&a, &b));
    }

    #[test]
    fn test_shared_filter_applies() {
        let shared: SharedFilter<u32> = Arc::new(Double);
        let mut value = 4;
        assert!(shared.apply(&mut value).is_success());
        assert_eq!(value, 8);
    }
}
