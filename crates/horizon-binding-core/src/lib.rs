//! Core systems for Horizon Binding.
//!
//! This crate provides the foundational pieces shared by the binding layer:
//!
//! - **Signal/Slot System**: Type-safe change notification between data
//!   sources, adapters and the host list widget
//! - **Logging**: `tracing` target names, helper macros and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_binding_core::Signal;
//!
//! // Create a signal that notifies when an item range changes
//! let range_changed = Signal::<(usize, usize)>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = range_changed.connect(|(start, count)| {
//!     println!("{} items changed starting at {}", count, start);
//! });
//!
//! // Emit the signal
//! range_changed.emit((4, 2));
//!
//! // Disconnect when done
//! range_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
