//! Setup surface and the frozen binding handle.
//!
//! [`BindingSetup`] collects item definitions, global click handlers and the
//! data source. [`BindingSetup::build`] consumes it and produces the shared
//! [`BindingHandle`] adapters attach to, so nothing can be registered once an
//! adapter is attached.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_binding::{BindingSetup, ItemContainer, ViewBindingAdapter, selectable_data_source};
//!
//! struct Header;
//! struct Row(&'static str);
//!
//! #[derive(Default)]
//! struct RowHolder {
//!     title: String,
//! }
//!
//! let mut setup = BindingSetup::new();
//! setup.register::<Header, (), _>(|_| ())?;
//! setup
//!     .register::<Row, RowHolder, _>(|_| RowHolder::default())?
//!     .bind(|holder, _position, row| holder.title = row.0.to_string())
//!     .on_click(|selection, _position, _row| {
//!         selection.toggle_selection();
//!     });
//! setup.set_data_source(Arc::new(selectable_data_source![Header, Row("a")]));
//!
//! let mut adapter = ViewBindingAdapter::new();
//! adapter.attach(setup.build());
//!
//! let view_type = adapter.view_type_at(1)?;
//! let mut holder = adapter.create_view_holder(view_type, &ItemContainer::new())?;
//! adapter.bind_view_holder(&mut holder, 1)?;
//! assert_eq!(holder.content::<RowHolder>().unwrap().title, "a");
//! # Ok::<(), horizon_binding::BindError>(())
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use horizon_binding_core::{binding_debug, binding_trace, binding_warn};
use parking_lot::RwLock;

use super::click::{ClickHandler, ClickKind};
use super::definition::{ItemDefinition, ItemDefinitionBuilder};
use super::holder::{ItemContainer, ViewType};
use super::registry::ItemDefinitionRegistry;
use crate::error::Result;
use crate::item::{Item, ItemType};
use crate::model::{DataSource, SelectionState};

/// Setup-wide handlers, run after the item definition's own.
#[derive(Default, Clone)]
struct GlobalHandlers {
    on_click: Option<ClickHandler>,
    on_long_click: Option<ClickHandler>,
}

impl GlobalHandlers {
    fn get(&self, kind: ClickKind) -> Option<&ClickHandler> {
        match kind {
            ClickKind::Click => self.on_click.as_ref(),
            ClickKind::LongClick => self.on_long_click.as_ref(),
        }
    }

    fn set(&mut self, kind: ClickKind, handler: ClickHandler) {
        let slot = match kind {
            ClickKind::Click => &mut self.on_click,
            ClickKind::LongClick => &mut self.on_long_click,
        };
        if slot.replace(handler).is_some() {
            binding_warn!(%kind, "replaced global handler");
        }
    }
}

/// Builder for a [`BindingHandle`].
#[derive(Default)]
pub struct BindingSetup {
    registry: ItemDefinitionRegistry,
    globals: GlobalHandlers,
    data_source: Option<Arc<dyn DataSource>>,
}

impl BindingSetup {
    /// An empty setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers items of type `T`, whose views are built by `creator`.
    ///
    /// Returns a builder to add the bind function and click handlers. Fails
    /// with a configuration error if `T` is already registered.
    pub fn register<T, H, F>(&mut self, creator: F) -> Result<ItemDefinitionBuilder<'_, T, H>>
    where
        T: Any + Send + Sync,
        H: Any + Send,
        F: Fn(&ItemContainer) -> H + Send + Sync + 'static,
    {
        let definition = self
            .registry
            .register(ItemDefinition::with_creator::<T, H, F>(creator))?;
        Ok(ItemDefinitionBuilder::new(definition))
    }

    /// Registers a prebuilt definition.
    ///
    /// See [`ItemDefinition::configure`] for adding a bind function and
    /// click handlers before registering.
    pub fn define(&mut self, definition: ItemDefinition) -> Result<()> {
        binding_trace!(
            item_type = %definition.item_type(),
            binder = definition.has_binder(),
            "defining prebuilt item definition"
        );
        self.registry.register(definition).map(|_| ())
    }

    /// Sets the handler run after every item-level click handler.
    pub fn on_click<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SelectionState<'_>, usize, &Item) + Send + Sync + 'static,
    {
        self.globals.set(ClickKind::Click, global_handler(handler));
        self
    }

    /// Sets the handler run after every item-level long-click handler.
    pub fn on_long_click<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&SelectionState<'_>, usize, &Item) + Send + Sync + 'static,
    {
        self.globals.set(ClickKind::LongClick, global_handler(handler));
        self
    }

    /// Sets the data source adapters bind.
    pub fn set_data_source(&mut self, data_source: Arc<dyn DataSource>) -> &mut Self {
        self.data_source = Some(data_source);
        self
    }

    /// The definitions registered so far.
    pub fn registry(&self) -> &ItemDefinitionRegistry {
        &self.registry
    }

    /// Freezes the setup into a shareable handle.
    pub fn build(self) -> Arc<BindingHandle> {
        binding_debug!(definitions = self.registry.len(), "binding setup built");
        Arc::new(BindingHandle {
            registry: self.registry,
            globals: self.globals,
            data_source: RwLock::new(self.data_source),
        })
    }
}

impl fmt::Debug for BindingSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSetup")
            .field("registry", &self.registry)
            .field("has_data_source", &self.data_source.is_some())
            .finish_non_exhaustive()
    }
}

fn global_handler<F>(handler: F) -> ClickHandler
where
    F: Fn(&SelectionState<'_>, usize, &Item) + Send + Sync + 'static,
{
    Arc::new(move |selection: &SelectionState<'_>, position: usize, item: &Item| {
        handler(selection, position, item);
        Ok(())
    })
}

/// A built setup: definitions, view types, global handlers and the current
/// data source.
pub struct BindingHandle {
    registry: ItemDefinitionRegistry,
    globals: GlobalHandlers,
    data_source: RwLock<Option<Arc<dyn DataSource>>>,
}

static_assertions::assert_impl_all!(BindingHandle: Send, Sync);

impl BindingHandle {
    /// The current data source.
    pub fn data_source(&self) -> Option<Arc<dyn DataSource>> {
        self.data_source.read().clone()
    }

    /// Replaces the data source. Attached adapters keep the one they captured
    /// until they are attached again.
    pub fn set_data_source(&self, data_source: Option<Arc<dyn DataSource>>) {
        *self.data_source.write() = data_source;
    }

    /// The definition registry.
    pub fn registry(&self) -> &ItemDefinitionRegistry {
        &self.registry
    }

    /// See [`ItemDefinitionRegistry::view_type_for_item`].
    pub fn view_type_for_item(&self, item_type: ItemType) -> Result<ViewType> {
        self.registry.view_type_for_item(item_type)
    }

    /// See [`ItemDefinitionRegistry::definition_for_type`].
    pub fn definition_for_type(&self, item_type: ItemType) -> Result<&ItemDefinition> {
        self.registry.definition_for_type(item_type)
    }

    /// See [`ItemDefinitionRegistry::definition_for_view_type`].
    pub fn definition_for_view_type(&self, view_type: ViewType) -> Result<&ItemDefinition> {
        self.registry.definition_for_view_type(view_type)
    }

    /// The global handler for `kind`, if one is set.
    pub fn global_handler(&self, kind: ClickKind) -> Option<&ClickHandler> {
        self.globals.get(kind)
    }
}

impl fmt::Debug for BindingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingHandle")
            .field("registry", &self.registry)
            .field("has_data_source", &self.data_source.read().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source;
    use crate::error::BindError;

    struct Row(u32);
    struct Other;

    #[test]
    fn test_register_twice_fails() {
        let mut setup = BindingSetup::new();
        setup.register::<Row, (), _>(|_| ()).unwrap();
        let err = setup.register::<Row, u8, _>(|_| 0).err().unwrap();

        assert!(matches!(err, BindError::DuplicateDefinition { .. }));
        assert_eq!(setup.registry().len(), 1);
        assert_eq!(
            setup
                .registry()
                .definition_for_type(ItemType::of::<Row>())
                .unwrap()
                .holder_type(),
            "()"
        );
    }

    #[test]
    fn test_define_prebuilt() {
        let mut setup = BindingSetup::new();
        setup.define(ItemDefinition::new::<Other>()).unwrap();
        assert!(setup.define(ItemDefinition::new::<Other>()).is_err());

        let handle = setup.build();
        assert!(!handle.definition_for_type(ItemType::of::<Other>()).unwrap().has_creator());
    }

    #[test]
    fn test_handle_lookups() {
        let mut setup = BindingSetup::new();
        setup.register::<Row, (), _>(|_| ()).unwrap();
        setup.on_long_click(|_, _, _| {});
        let handle = setup.build();

        let view_type = handle.view_type_for_item(ItemType::of::<Row>()).unwrap();
        assert_eq!(view_type, ViewType::new(0));
        assert!(handle.definition_for_view_type(view_type).is_ok());
        assert!(handle.global_handler(ClickKind::Click).is_none());
        assert!(handle.global_handler(ClickKind::LongClick).is_some());
        assert!(handle.data_source().is_none());
    }

    #[test]
    fn test_swap_data_source() {
        let mut setup = BindingSetup::new();
        setup.set_data_source(Arc::new(data_source![Row(1)]));
        let handle = setup.build();
        assert_eq!(handle.data_source().unwrap().size(), 1);

        handle.set_data_source(Some(Arc::new(data_source![Row(1), Row(2)])));
        assert_eq!(handle.data_source().unwrap().size(), 2);

        handle.set_data_source(None);
        assert!(handle.data_source().is_none());
    }

    #[test]
    fn test_replacing_global_handler_keeps_last() {
        let calls = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let mut setup = BindingSetup::new();
        let first = calls.clone();
        let second = calls.clone();
        setup
            .on_click(move |_, _, _| first.lock().push("first"))
            .on_click(move |_, _, _| second.lock().push("second"));
        let handle = setup.build();

        let handler = handle.global_handler(ClickKind::Click).unwrap();
        handler(&SelectionState::no_op(0), 0, &Item::new(Row(0))).unwrap();
        assert_eq!(*calls.lock(), vec!["second"]);
    }

    #[test]
    fn test_define_configured_definition() {
        let mut definition = ItemDefinition::with_creator::<Row, u32, _>(|_| 0);
        definition
            .configure::<Row, u32>()
            .unwrap()
            .bind(|holder, _, row| *holder = row.0)
            .on_click(|_, _, _| {});

        let mut setup = BindingSetup::new();
        setup.define(definition).unwrap();
        let definition = setup.registry().definition_for_type(ItemType::of::<Row>()).unwrap();
        assert!(definition.has_binder());
        assert!(definition.handler(ClickKind::Click).is_some());
    }
}
