//! Logging facilities for Horizon Binding.
//!
//! Horizon Binding uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every subsystem logs under one of the [`targets`], so filtering with a
//! directive such as `horizon_binding::adapter=trace` isolates a single layer.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_binding_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_binding_core::signal";
    /// Item definition registry and view-type table.
    pub const REGISTRY: &str = "horizon_binding::registry";
    /// View binding adapter lifecycle, creation and binding.
    pub const ADAPTER: &str = "horizon_binding::adapter";
    /// Click and long-click dispatch.
    pub const CLICK: &str = "horizon_binding::click";
    /// Data source mutations and selection.
    pub const DATA_SOURCE: &str = "horizon_binding::data_source";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of operations such as a full rebind.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_binding::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with consistent target
/// naming.
#[macro_export]
macro_rules! binding_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_binding_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! binding_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_binding_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! binding_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_binding_core", $($arg)*)
    };
}
