//! Item definitions: how one item type is turned into a bound view.
//!
//! An [`ItemDefinition`] stores its closures type-erased so definitions for
//! different item and holder types can live in one registry. The typed
//! closures a caller registers are wrapped once, here, and every downcast they
//! need happens at the point of dispatch with an explicit [`BindError`] when
//! the types do not line up.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::click::{ClickHandler, ClickKind};
use super::holder::{ItemContainer, ItemView, ViewHolder, ViewType};
use crate::error::{BindError, Result};
use crate::item::{Item, ItemType};
use crate::model::SelectionState;

/// Erased creation function.
type CreateFn = Arc<dyn Fn(&ItemContainer) -> Box<dyn Any + Send> + Send + Sync>;

/// Erased bind function.
type BindFn = Arc<dyn Fn(&mut (dyn Any + Send), usize, &Item) -> Result<()> + Send + Sync>;

/// The registered binding of one item type.
///
/// Identified by the item type it binds. Immutable once the setup that owns it
/// is built.
pub struct ItemDefinition {
    item_type: ItemType,
    holder_type: &'static str,
    holder_id: Option<TypeId>,
    creator: Option<CreateFn>,
    binder: Option<BindFn>,
    on_click: Option<ClickHandler>,
    on_long_click: Option<ClickHandler>,
}

impl ItemDefinition {
    /// A definition for `T` with no creation function yet.
    ///
    /// Creating a view holder from it fails until a creator is set, see
    /// [`with_creator`](Self::with_creator).
    pub fn new<T: Any + Send + Sync>() -> Self {
        Self {
            item_type: ItemType::of::<T>(),
            holder_type: "<none>",
            holder_id: None,
            creator: None,
            binder: None,
            on_click: None,
            on_long_click: None,
        }
    }

    /// A definition for `T` whose views are created by `creator`.
    pub fn with_creator<T, H, F>(creator: F) -> Self
    where
        T: Any + Send + Sync,
        H: Any + Send,
        F: Fn(&ItemContainer) -> H + Send + Sync + 'static,
    {
        let mut definition = Self::new::<T>();
        definition.holder_type = type_name::<H>();
        definition.holder_id = Some(TypeId::of::<H>());
        definition.creator = Some(Arc::new(move |container: &ItemContainer| {
            Box::new(creator(container)) as Box<dyn Any + Send>
        }));
        definition
    }

    /// The item type this definition binds.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Type name of the view holder value the creator produces.
    pub fn holder_type(&self) -> &'static str {
        self.holder_type
    }

    /// Returns `true` if a creation function is set.
    pub fn has_creator(&self) -> bool {
        self.creator.is_some()
    }

    /// Returns `true` if a bind function is set.
    pub fn has_binder(&self) -> bool {
        self.binder.is_some()
    }

    /// The item-level handler for `kind`, if any.
    pub fn handler(&self, kind: ClickKind) -> Option<&ClickHandler> {
        match kind {
            ClickKind::Click => self.on_click.as_ref(),
            ClickKind::LongClick => self.on_long_click.as_ref(),
        }
    }

    /// Typed access to the bind function and click handlers.
    ///
    /// `T` must be the item type of this definition and `H` the holder type
    /// its creator produces. A definition without a creator accepts any `H`.
    ///
    /// ```
    /// use horizon_binding::{BindingSetup, ItemDefinition};
    ///
    /// struct Song(&'static str);
    ///
    /// let mut definition = ItemDefinition::with_creator::<Song, String, _>(|_| String::new());
    /// definition
    ///     .configure::<Song, String>()?
    ///     .bind(|label, _, song| *label = song.0.to_string());
    ///
    /// let mut setup = BindingSetup::new();
    /// setup.define(definition)?;
    /// # Ok::<(), horizon_binding::BindError>(())
    /// ```
    pub fn configure<T, H>(&mut self) -> Result<ItemDefinitionBuilder<'_, T, H>>
    where
        T: Any + Send + Sync,
        H: Any + Send,
    {
        if !self.item_type.is::<T>() {
            return Err(BindError::ItemTypeMismatch {
                expected: self.item_type.name(),
                actual: type_name::<T>(),
            });
        }
        if self.holder_id.is_some_and(|id| id != TypeId::of::<H>()) {
            return Err(BindError::HolderTypeMismatch {
                item_type: self.item_type.name(),
                expected: self.holder_type,
            });
        }
        Ok(ItemDefinitionBuilder::new(self))
    }

    /// Builds a view holder and installs listeners on its root view.
    ///
    /// A listener for `kind` is installed when this definition has a handler
    /// for it or `has_global(kind)` says a setup-wide handler exists.
    pub(crate) fn create_view_holder(
        &self,
        view_type: ViewType,
        container: &ItemContainer,
        has_global: impl Fn(ClickKind) -> bool,
    ) -> Result<ViewHolder> {
        let creator = self.creator.as_ref().ok_or(BindError::MissingCreator {
            item_type: self.item_type.name(),
        })?;

        let mut root = ItemView::default();
        for kind in [ClickKind::Click, ClickKind::LongClick] {
            if self.handler(kind).is_some() || has_global(kind) {
                root.install_listener(kind);
            }
        }

        Ok(ViewHolder::new(view_type, root, self.holder_type, creator(container)))
    }

    /// Runs the bind function, if any, for `item` at `position`.
    pub(crate) fn bind(&self, holder: &mut ViewHolder, position: usize, item: &Item) -> Result<()> {
        match &self.binder {
            Some(binder) => binder(holder.content_any_mut(), position, item),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ItemDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDefinition")
            .field("item_type", &self.item_type)
            .field("holder_type", &self.holder_type)
            .field("creator", &self.creator.is_some())
            .field("binder", &self.binder.is_some())
            .field("on_click", &self.on_click.is_some())
            .field("on_long_click", &self.on_long_click.is_some())
            .finish()
    }
}

/// Typed configuration of a registered definition.
///
/// Returned by [`BindingSetup::register`](super::BindingSetup::register) and
/// [`ItemDefinition::configure`]; every method configures the definition in place and returns the builder
/// for chaining.
pub struct ItemDefinitionBuilder<'a, T, H> {
    definition: &'a mut ItemDefinition,
    _marker: PhantomData<fn(&T, &mut H)>,
}

impl<'a, T, H> ItemDefinitionBuilder<'a, T, H>
where
    T: Any + Send + Sync,
    H: Any + Send,
{
    pub(crate) fn new(definition: &'a mut ItemDefinition) -> Self {
        Self {
            definition,
            _marker: PhantomData,
        }
    }

    /// Sets the function that populates a holder from an item.
    pub fn bind<F>(self, binder: F) -> Self
    where
        F: Fn(&mut H, usize, &T) + Send + Sync + 'static,
    {
        let item_type = self.definition.item_type;
        self.definition.binder = Some(Arc::new(
            move |content: &mut (dyn Any + Send), position: usize, item: &Item| {
                let holder = content.downcast_mut::<H>().ok_or(BindError::HolderTypeMismatch {
                    item_type: item_type.name(),
                    expected: type_name::<H>(),
                })?;
                let value = item.downcast_ref::<T>().ok_or(BindError::ItemTypeMismatch {
                    expected: item_type.name(),
                    actual: item.item_type().name(),
                })?;
                binder(holder, position, value);
                Ok(())
            },
        ));
        self
    }

    /// Sets the item-level click handler.
    pub fn on_click<F>(self, handler: F) -> Self
    where
        F: Fn(&SelectionState<'_>, usize, &T) + Send + Sync + 'static,
    {
        self.definition.on_click = Some(typed_handler(handler));
        self
    }

    /// Sets the item-level long-click handler.
    pub fn on_long_click<F>(self, handler: F) -> Self
    where
        F: Fn(&SelectionState<'_>, usize, &T) + Send + Sync + 'static,
    {
        self.definition.on_long_click = Some(typed_handler(handler));
        self
    }

    /// The definition being configured.
    pub fn definition(&self) -> &ItemDefinition {
        self.definition
    }
}

/// Wraps a handler for `T` items as an erased handler.
fn typed_handler<T, F>(handler: F) -> ClickHandler
where
    T: Any + Send + Sync,
    F: Fn(&SelectionState<'_>, usize, &T) + Send + Sync + 'static,
{
    let expected = ItemType::of::<T>();
    Arc::new(move |selection: &SelectionState<'_>, position: usize, item: &Item| {
        let value = item.downcast_ref::<T>().ok_or(BindError::ItemTypeMismatch {
            expected: expected.name(),
            actual: item.item_type().name(),
        })?;
        handler(selection, position, value);
        Ok(())
    })
}
