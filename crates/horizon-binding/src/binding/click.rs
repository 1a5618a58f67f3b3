//! Click and long-click dispatch.
//!
//! A [`ClickDispatcher`] is an ordered list of handlers for one event: the
//! item definition's handler first, then the setup-wide one. Every handler in
//! the chain receives the same [`SelectionState`], so a handler later in the
//! chain observes what an earlier one selected.

use std::fmt;
use std::sync::Arc;

use horizon_binding_core::logging::targets;

use super::definition::ItemDefinition;
use crate::error::Result;
use crate::item::Item;
use crate::model::{DataSource, SelectionState};

/// An erased click handler: `(selection, position, item)`.
pub type ClickHandler = Arc<dyn Fn(&SelectionState<'_>, usize, &Item) -> Result<()> + Send + Sync>;

/// The two pointer events the binding layer dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickKind {
    /// A regular click (tap).
    Click,
    /// A long press. Always reported back to the widget as consumed.
    LongClick,
}

impl fmt::Display for ClickKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => f.write_str("click"),
            Self::LongClick => f.write_str("long-click"),
        }
    }
}

/// Ordered chain of handlers for a single event.
#[derive(Default, Clone)]
pub struct ClickDispatcher {
    handlers: Vec<ClickHandler>,
}

impl ClickDispatcher {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain for `kind` on items of `definition`: item handler, then
    /// `global`.
    pub fn for_event(
        definition: &ItemDefinition,
        global: Option<&ClickHandler>,
        kind: ClickKind,
    ) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.extend(definition.handler(kind).cloned());
        dispatcher.extend(global.cloned());
        dispatcher
    }

    /// Appends a handler to the end of the chain.
    pub fn push(&mut self, handler: ClickHandler) {
        self.handlers.push(handler);
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the chain for `item` at `position` of `source`.
    ///
    /// One selection state is created for the event and dropped when the
    /// last handler returns. A failing handler stops the chain.
    #[tracing::instrument(skip(self, source, item), target = "horizon_binding::click", level = "trace")]
    pub fn dispatch(&self, source: &dyn DataSource, position: usize, item: &Item) -> Result<()> {
        let selection = SelectionState::for_source(source, position);
        tracing::trace!(
            target: targets::CLICK,
            handlers = self.handlers.len(),
            selectable = selection.is_selectable(),
            item_type = %item.item_type(),
            "dispatching"
        );
        for handler in &self.handlers {
            handler(&selection, position, item)?;
        }
        Ok(())
    }
}

impl Extend<ClickHandler> for ClickDispatcher {
    fn extend<I: IntoIterator<Item = ClickHandler>>(&mut self, iter: I) {
        self.handlers.extend(iter);
    }
}

impl fmt::Debug for ClickDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
