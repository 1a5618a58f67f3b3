//! In-memory data sources.
//!
//! [`ListDataSource`] is a plain ordered list of items. [`SelectableListDataSource`]
//! adds per-position selection that follows its items through inserts and
//! removals.
//!
//! # Example
//!
//! ```
//! use horizon_binding::{data_source, selectable_data_source};
//! use horizon_binding::model::{DataSource, SelectableDataSource};
//!
//! struct Header;
//! struct Row(&'static str);
//!
//! let plain = data_source![Header, Row("a"), Row("b")];
//! assert_eq!(plain.size(), 3);
//!
//! let selectable = selectable_data_source![Row("a"), Row("b")];
//! selectable.select_at(1);
//! assert!(selectable.is_selected_at(1));
//! ```

use std::collections::BTreeSet;

use horizon_binding_core::logging::targets;
use parking_lot::RwLock;

use super::traits::{DataSource, DataSourceSignals, SelectableDataSource};
use crate::item::Item;

/// Builds a [`ListDataSource`] from item values of any types.
#[macro_export]
macro_rules! data_source {
    ($($item:expr),* $(,)?) => {
        $crate::model::ListDataSource::from_items(vec![$($crate::Item::new($item)),*])
    };
}

/// Builds a [`SelectableListDataSource`] from item values of any types.
#[macro_export]
macro_rules! selectable_data_source {
    ($($item:expr),* $(,)?) => {
        $crate::model::SelectableListDataSource::from_items(vec![$($crate::Item::new($item)),*])
    };
}

/// Returns a data source with no items.
pub fn empty_data_source() -> ListDataSource {
    ListDataSource::new()
}

/// An ordered list of heterogeneous items.
pub struct ListDataSource {
    items: RwLock<Vec<Item>>,
    signals: DataSourceSignals,
}

impl Default for ListDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListDataSource")
            .field("items", &*self.items.read())
            .finish_non_exhaustive()
    }
}

impl ListDataSource {
    /// Creates an empty data source.
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    /// Creates a data source with the given items.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().collect()),
            signals: DataSourceSignals::new(),
        }
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: Item) {
        let position = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.signals.items_inserted.emit((position, 1));
    }

    /// Inserts an item at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position > size()`.
    pub fn insert(&self, position: usize, item: Item) {
        self.items.write().insert(position, item);
        self.signals.items_inserted.emit((position, 1));
    }

    /// Removes and returns the item at `position`, if there is one.
    pub fn remove(&self, position: usize) -> Option<Item> {
        let removed = {
            let mut items = self.items.write();
            (position < items.len()).then(|| items.remove(position))
        };
        if removed.is_some() {
            self.signals.items_removed.emit((position, 1));
        }
        removed
    }

    /// Replaces the item at `position`, returning the previous one.
    pub fn set(&self, position: usize, item: Item) -> Option<Item> {
        let previous = {
            let mut items = self.items.write();
            items
                .get_mut(position)
                .map(|slot| std::mem::replace(slot, item))
        };
        if previous.is_some() {
            self.signals.item_changed.emit(position);
        }
        previous
    }

    /// Swaps two items. Out-of-range positions are ignored.
    pub fn swap(&self, a: usize, b: usize) {
        {
            let mut items = self.items.write();
            if a >= items.len() || b >= items.len() {
                return;
            }
            items.swap(a, b);
        }
        self.signals.item_changed.emit(a);
        self.signals.item_changed.emit(b);
    }

    /// Replaces all items.
    pub fn set_items(&self, items: impl IntoIterator<Item = Item>) {
        *self.items.write() = items.into_iter().collect();
        self.signals.reset.emit(());
    }

    /// Removes all items.
    pub fn clear(&self) {
        self.items.write().clear();
        self.signals.reset.emit(());
    }

    /// Returns `true` if `position` holds an item.
    pub fn contains_position(&self, position: usize) -> bool {
        position < self.items.read().len()
    }

    /// A snapshot of all items.
    pub fn to_vec(&self) -> Vec<Item> {
        self.items.read().clone()
    }
}

impl DataSource for ListDataSource {
    fn size(&self) -> usize {
        self.items.read().len()
    }

    fn get(&self, position: usize) -> Option<Item> {
        self.items.read().get(position).cloned()
    }

    fn signals(&self) -> &DataSourceSignals {
        &self.signals
    }
}

/// A [`ListDataSource`] with per-position selection.
///
/// Selection is stored by position and shifted when items are inserted or
/// removed in front of selected positions, so it stays with its items.
pub struct SelectableListDataSource {
    list: ListDataSource,
    selected: RwLock<BTreeSet<usize>>,
}

impl Default for SelectableListDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectableListDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectableListDataSource")
            .field("items", &*self.list.items.read())
            .field("selected", &*self.selected.read())
            .finish_non_exhaustive()
    }
}

impl SelectableListDataSource {
    /// Creates an empty selectable data source.
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    /// Creates a selectable data source with the given items, none selected.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            list: ListDataSource::from_items(items),
            selected: RwLock::new(BTreeSet::new()),
        }
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: Item) {
        self.list.push(item);
    }

    /// Inserts an item at `position`, shifting later selections.
    ///
    /// # Panics
    ///
    /// Panics if `position > size()`.
    pub fn insert(&self, position: usize, item: Item) {
        self.list.items.write().insert(position, item);
        {
            let mut selected = self.selected.write();
            let shifted: BTreeSet<usize> = selected
                .iter()
                .map(|&p| if p >= position { p + 1 } else { p })
                .collect();
            *selected = shifted;
        }
        self.list.signals.items_inserted.emit((position, 1));
    }

    /// Removes and returns the item at `position`, dropping its selection.
    pub fn remove(&self, position: usize) -> Option<Item> {
        let removed = {
            let mut items = self.list.items.write();
            (position < items.len()).then(|| items.remove(position))
        };
        if removed.is_none() {
            return None;
        }

        let was_selected = {
            let mut selected = self.selected.write();
            let was_selected = selected.remove(&position);
            let shifted: BTreeSet<usize> = selected
                .iter()
                .map(|&p| if p > position { p - 1 } else { p })
                .collect();
            *selected = shifted;
            was_selected
        };

        self.list.signals.items_removed.emit((position, 1));
        if was_selected {
            self.list.signals.selection_changed.emit(self.selected_count());
        }
        removed
    }

    /// Replaces the item at `position`, keeping its selection.
    pub fn set(&self, position: usize, item: Item) -> Option<Item> {
        self.list.set(position, item)
    }

    /// Replaces all items and clears the selection.
    pub fn set_items(&self, items: impl IntoIterator<Item = Item>) {
        *self.list.items.write() = items.into_iter().collect();
        let had_selection = !std::mem::take(&mut *self.selected.write()).is_empty();
        self.list.signals.reset.emit(());
        if had_selection {
            self.list.signals.selection_changed.emit(0);
        }
    }

    /// Removes all items and clears the selection.
    pub fn clear(&self) {
        self.set_items(Vec::new());
    }

    /// Selects every item.
    pub fn select_all(&self) {
        let size = self.size();
        let newly_selected: Vec<usize> = {
            let mut selected = self.selected.write();
            (0..size).filter(|&p| selected.insert(p)).collect()
        };
        self.notify_selection(&newly_selected);
    }

    /// Deselects every item.
    pub fn deselect_all(&self) {
        let deselected: Vec<usize> = std::mem::take(&mut *self.selected.write())
            .into_iter()
            .collect();
        self.notify_selection(&deselected);
    }

    /// Selected positions in ascending order.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.selected.read().iter().copied().collect()
    }

    /// Selected items in position order.
    pub fn selected_items(&self) -> Vec<Item> {
        let items = self.list.items.read();
        self.selected
            .read()
            .iter()
            .filter_map(|&p| items.get(p).cloned())
            .collect()
    }

    fn notify_selection(&self, changed: &[usize]) {
        if changed.is_empty() {
            return;
        }
        for &position in changed {
            self.list.signals.item_changed.emit(position);
        }
        let count = self.selected_count();
        tracing::trace!(target: targets::DATA_SOURCE, changed = changed.len(), selected = count, "selection changed");
        self.list.signals.selection_changed.emit(count);
    }
}

impl DataSource for SelectableListDataSource {
    fn size(&self) -> usize {
        self.list.size()
    }

    fn get(&self, position: usize) -> Option<Item> {
        self.list.get(position)
    }

    fn signals(&self) -> &DataSourceSignals {
        self.list.signals()
    }

    fn as_selectable(&self) -> Option<&dyn SelectableDataSource> {
        Some(self)
    }
}

impl SelectableDataSource for SelectableListDataSource {
    fn is_selected_at(&self, position: usize) -> bool {
        self.selected.read().contains(&position)
    }

    fn select_at(&self, position: usize) -> bool {
        if !self.list.contains_position(position) {
            return false;
        }
        let changed = self.selected.write().insert(position);
        if changed {
            self.notify_selection(&[position]);
        }
        changed
    }

    fn deselect_at(&self, position: usize) -> bool {
        let changed = self.selected.write().remove(&position);
        if changed {
            self.notify_selection(&[position]);
        }
        changed
    }

    fn selected_count(&self) -> usize {
        self.selected.read().len()
    }
}
