/// Ordered filter container and its execution engine
pub mod chain;

/// Execution policies
pub mod chain_behavior;

/// Input wrapper carrying messages from filters
pub mod chain_input;

/// Success/failure contract for filter results
pub mod filter_result;

/// Report of a single run
pub mod run_summary;
