//! Selection access for click handlers.
//!
//! A [`SelectionState`] is created for a single click or long-click event and
//! scoped to the clicked position. It borrows the data source for the length
//! of the event, so handlers cannot keep it once they return.
//!
//! # Example
//!
//! ```
//! use horizon_binding::selectable_data_source;
//! use horizon_binding::model::{SelectionState, SelectableDataSource};
//!
//! struct Row(&'static str);
//!
//! let source = selectable_data_source![Row("a"), Row("b")];
//! let state = SelectionState::for_source(&source, 1);
//! state.toggle_selection();
//! assert!(state.is_selected());
//! assert!(source.is_selected_at(1));
//! ```

use std::fmt;

use super::traits::{DataSource, SelectableDataSource};

/// Where selection calls go.
#[derive(Clone, Copy)]
enum Backend<'a> {
    Real(&'a dyn SelectableDataSource),
    NoOp,
}

/// Position-scoped selection access handed to click handlers.
///
/// Backed by the data source when it supports selection. Otherwise every
/// mutation is inert and [`is_selected`](Self::is_selected) is always `false`,
/// so handlers can be written the same way for both kinds of source.
#[derive(Clone, Copy)]
pub struct SelectionState<'a> {
    position: usize,
    backend: Backend<'a>,
}

impl<'a> SelectionState<'a> {
    /// Selection for `position`, real if `source` is selection-capable.
    pub fn for_source(source: &'a dyn DataSource, position: usize) -> Self {
        match source.as_selectable() {
            Some(selectable) => Self::real(selectable, position),
            None => Self::no_op(position),
        }
    }

    /// Selection backed by `source` at `position`.
    pub fn real(source: &'a dyn SelectableDataSource, position: usize) -> Self {
        Self {
            position,
            backend: Backend::Real(source),
        }
    }

    /// Inert selection for `position`.
    pub fn no_op(position: usize) -> Self {
        Self {
            position,
            backend: Backend::NoOp,
        }
    }

    /// The position this state is scoped to.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` if selection calls reach a data source.
    pub fn is_selectable(&self) -> bool {
        matches!(self.backend, Backend::Real(_))
    }

    /// Returns `true` if the item at this position is selected.
    pub fn is_selected(&self) -> bool {
        match self.backend {
            Backend::Real(source) => source.is_selected_at(self.position),
            Backend::NoOp => false,
        }
    }

    /// Selects the item at this position. Returns `true` if that changed anything.
    pub fn select(&self) -> bool {
        match self.backend {
            Backend::Real(source) => source.select_at(self.position),
            Backend::NoOp => false,
        }
    }

    /// Deselects the item at this position. Returns `true` if that changed anything.
    pub fn deselect(&self) -> bool {
        match self.backend {
            Backend::Real(source) => source.deselect_at(self.position),
            Backend::NoOp => false,
        }
    }

    /// Flips the selection of the item at this position.
    pub fn toggle_selection(&self) -> bool {
        match self.backend {
            Backend::Real(source) => source.toggle_selection_at(self.position),
            Backend::NoOp => false,
        }
    }

    /// Number of selected items in the whole data source.
    pub fn selected_count(&self) -> usize {
        match self.backend {
            Backend::Real(source) => source.selected_count(),
            Backend::NoOp => 0,
        }
    }

    /// Returns `true` if anything in the data source is selected.
    pub fn has_selection(&self) -> bool {
        self.selected_count() > 0
    }
}

impl fmt::Debug for SelectionState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("position", &self.position)
            .field("selectable", &self.is_selectable())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data_source, selectable_data_source};

    struct Row;

    #[test]
    fn test_real_state_delegates() {
        let source = selectable_data_source![Row, Row, Row];
        let state = SelectionState::for_source(&source, 2);

        assert!(state.is_selectable());
        assert_eq!(state.position(), 2);
        assert!(!state.is_selected());

        assert!(state.select());
        assert!(state.is_selected());
        assert_eq!(state.selected_count(), 1);
        assert!(source.is_selected_at(2));
        assert!(!source.is_selected_at(1));

        assert!(state.deselect());
        assert!(!state.has_selection());
    }

    #[test]
    fn test_no_op_state_is_inert() {
        let source = data_source![Row, Row];
        for position in 0..source.size() {
            let state = SelectionState::for_source(&source, position);
            assert!(!state.is_selectable());
            assert!(!state.select());
            assert!(!state.is_selected());
            assert!(!state.toggle_selection());
            assert!(!state.is_selected());
            assert_eq!(state.selected_count(), 0);
        }
    }

    #[test]
    fn test_copies_observe_same_state() {
        let source = selectable_data_source![Row, Row];
        let state = SelectionState::for_source(&source, 0);
        let other = state;

        state.toggle_selection();
        assert!(other.is_selected());
    }
}
