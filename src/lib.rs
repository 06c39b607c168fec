//! Filter Chains - ordered processing chains with failure policies
//!
//! A [`Chain`] holds an ordered sequence of shared [`Filter`]s and runs them
//! against one input under a [`ChainBehavior`]:
//!
//! * **StopOnFailure**: halt at the first failed result, call that filter's
//!   `on_failure` hook
//! * **IgnoreFailure**: visit every filter, never call `on_failure`
//!
//! Running a chain drains it: visited filters are removed, so a stopped chain
//! still holds only the filters it did not reach. Clone a chain to reuse it.
//!
//! # Quick Start
//!
//! ```ignore
//! use filter_chains::{Chain, ChainBehavior, Filter, FilterOutcome, SharedFilter};
//! use std::sync::Arc;
//!
//! let validate: SharedFilter<Order> = Arc::new(Validate);
//!
//! let mut chain = Chain::new()
//!     .filter(validate.clone())
//!     .filter(Arc::new(Charge));
//! chain.add_before(Arc::new(Normalize), &validate);
//!
//! let summary = chain.run(ChainBehavior::StopOnFailure, &mut order);
//! ```

pub mod core;
pub mod filters;
pub mod middleware;

// Convenience re-exports
pub use crate::core::chain::Chain;
pub use crate::core::chain_behavior::{ChainBehavior, ParseBehaviorError};
pub use crate::core::chain_input::ChainInput;
pub use crate::core::filter_result::{FilterOutcome, FilterResult};
pub use crate::core::run_summary::{RunStatus, RunSummary};
pub use crate::filters::filter::{Filter, SharedFilter, same_filter};
