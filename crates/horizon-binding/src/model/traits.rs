//! Core traits for data sources.
//!
//! A data source is the ordered, indexable collection an adapter binds. The
//! binding layer only reads from it; mutations and their change notifications
//! belong to the data source itself.

use std::sync::Arc;

use horizon_binding_core::Signal;

use crate::item::Item;

/// The collection an adapter binds, in display order.
///
/// # Implementation Requirements
///
/// - [`size`](DataSource::size) and [`get`](DataSource::get) must agree:
///   `get(p)` is `Some` exactly when `p < size()`.
/// - Every mutation must be announced through [`signals`](DataSource::signals)
///   after the new state is visible.
/// - Selection-capable sources override
///   [`as_selectable`](DataSource::as_selectable).
pub trait DataSource: Send + Sync {
    /// Number of items.
    fn size(&self) -> usize;

    /// The item at `position`, or `None` if out of range.
    fn get(&self, position: usize) -> Option<Item>;

    /// Change notifications for this source.
    fn signals(&self) -> &DataSourceSignals;

    /// Returns `true` if the source has no items.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns this source as a selection-capable source, if it is one.
    fn as_selectable(&self) -> Option<&dyn SelectableDataSource> {
        None
    }
}

/// A data source that tracks per-position selection.
///
/// Mutating methods return `true` when the selection state actually changed
/// and emit the source's change notifications in that case only.
pub trait SelectableDataSource: DataSource {
    /// Returns `true` if the item at `position` is selected.
    fn is_selected_at(&self, position: usize) -> bool;

    /// Selects the item at `position`.
    fn select_at(&self, position: usize) -> bool;

    /// Deselects the item at `position`.
    fn deselect_at(&self, position: usize) -> bool;

    /// Flips the selection of the item at `position`.
    fn toggle_selection_at(&self, position: usize) -> bool {
        if self.is_selected_at(position) {
            self.deselect_at(position)
        } else {
            self.select_at(position)
        }
    }

    /// Number of selected items.
    fn selected_count(&self) -> usize;

    /// Returns `true` if at least one item is selected.
    fn has_selection(&self) -> bool {
        self.selected_count() > 0
    }
}

/// Signals emitted by data sources.
///
/// Each signal is reference counted so observers can hold scoped connections
/// (see [`Signal::connect_scoped`]) that never keep the source alive.
pub struct DataSourceSignals {
    /// Emitted after items were inserted. Args: (start, count)
    pub items_inserted: Arc<Signal<(usize, usize)>>,

    /// Emitted after items were removed. Args: (start, count)
    pub items_removed: Arc<Signal<(usize, usize)>>,

    /// Emitted after the item at a position changed, including its selection.
    pub item_changed: Arc<Signal<usize>>,

    /// Emitted after the whole content was replaced.
    pub reset: Arc<Signal<()>>,

    /// Emitted after the selection changed. Args: selected count
    pub selection_changed: Arc<Signal<usize>>,
}

impl Default for DataSourceSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DataSourceSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceSignals").finish_non_exhaustive()
    }
}

impl DataSourceSignals {
    /// Creates a set of signals with no connections.
    pub fn new() -> Self {
        Self {
            items_inserted: Arc::new(Signal::new()),
            items_removed: Arc::new(Signal::new()),
            item_changed: Arc::new(Signal::new()),
            reset: Arc::new(Signal::new()),
            selection_changed: Arc::new(Signal::new()),
        }
    }

    /// Blocks or unblocks every signal at once.
    pub fn set_blocked(&self, blocked: bool) {
        self.items_inserted.set_blocked(blocked);
        self.items_removed.set_blocked(blocked);
        self.item_changed.set_blocked(blocked);
        self.reset.set_blocked(blocked);
        self.selection_changed.set_blocked(blocked);
    }
}
