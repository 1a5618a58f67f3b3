//! Data sources and selection for bound lists.
//!
//! # Core Types
//!
//! - `DataSource`: Ordered, indexable items plus change signals
//! - `SelectableDataSource`: A data source that tracks per-position selection
//! - `DataSourceSignals`: Signals for change notifications
//! - `SelectionState`: Per-event selection access handed to click handlers
//!
//! # Implementations
//!
//! - `ListDataSource`: Plain list of heterogeneous items
//! - `SelectableListDataSource`: List with selection that follows its items
//!
//! ```text
//! ┌──────────────┐  get(position)   ┌─────────────────────┐
//! │  DataSource  │<─────────────────│ ViewBindingAdapter  │
//! │              │─────signals─────>│                     │
//! └──────────────┘                  └─────────────────────┘
//!        ^                                    │ click
//!        │ select / deselect                  v
//!        └───────────────────────────── SelectionState
//! ```

mod list_source;
mod selection;
mod traits;

pub use list_source::{ListDataSource, SelectableListDataSource, empty_data_source};
pub use selection::SelectionState;
pub use traits::{DataSource, DataSourceSignals, SelectableDataSource};
