/// Logging decorator for filter execution
#[cfg(feature = "logging")]
pub mod logging;

/// Timing/performance measurement decorator
#[cfg(feature = "timing")]
pub mod timing;

/// Metrics collection decorator
#[cfg(feature = "metrics")]
pub mod metrics;
