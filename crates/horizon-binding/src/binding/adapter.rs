//! The adapter a virtualized list widget drives.
//!
//! [`ViewBindingAdapter`] answers the widget's per-position queries (item
//! count, view type, holder creation, binding) and receives the click events
//! delivered to item views. Everything it needs lives in an attached session
//! created by [`attach`](ViewBindingAdapter::attach) and dropped by
//! [`detach`](ViewBindingAdapter::detach); no query works outside of one.
//!
//! # Bind stamps
//!
//! Binding a holder records the bound position in a side table keyed by
//! [`HolderId`]. Click dispatch reads the position from there and the data
//! source from the session. The data-source reference written next to the
//! position during binding is cleared before `bind_view_holder` returns, so a
//! recycled holder never keeps a data source alive.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use horizon_binding_core::PerfSpan;
use horizon_binding_core::logging::targets;
use horizon_binding_core::{ConnectionGuard, Signal};

use super::click::{ClickDispatcher, ClickKind};
use super::holder::{HolderId, ItemContainer, ViewHolder, ViewType};
use super::setup::BindingHandle;
use crate::error::{BindError, Result};
use crate::item::Item;
use crate::model::{DataSource, DataSourceSignals};

/// Change notifications for the host widget.
///
/// While attached, the adapter re-emits its data source's signals here.
pub struct AdapterSignals {
    /// Everything may have changed.
    pub data_set_changed: Arc<Signal<()>>,
    /// Items changed in place. Args: (start, count)
    pub item_range_changed: Arc<Signal<(usize, usize)>>,
    /// Items were inserted. Args: (start, count)
    pub item_range_inserted: Arc<Signal<(usize, usize)>>,
    /// Items were removed. Args: (start, count)
    pub item_range_removed: Arc<Signal<(usize, usize)>>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    /// Creates a set of signals with no connections.
    pub fn new() -> Self {
        Self {
            data_set_changed: Arc::new(Signal::new()),
            item_range_changed: Arc::new(Signal::new()),
            item_range_inserted: Arc::new(Signal::new()),
            item_range_removed: Arc::new(Signal::new()),
        }
    }
}

/// Connections that forward data-source signals to the adapter signals.
struct SignalForwarding {
    _inserted: ConnectionGuard<(usize, usize)>,
    _removed: ConnectionGuard<(usize, usize)>,
    _changed: ConnectionGuard<usize>,
    _reset: ConnectionGuard<()>,
}

impl SignalForwarding {
    fn connect(source: &DataSourceSignals, adapter: &AdapterSignals) -> Self {
        let inserted = adapter.item_range_inserted.clone();
        let removed = adapter.item_range_removed.clone();
        let changed = adapter.item_range_changed.clone();
        let reset = adapter.data_set_changed.clone();

        Self {
            _inserted: source
                .items_inserted
                .connect_scoped(move |&range| inserted.emit(range)),
            _removed: source
                .items_removed
                .connect_scoped(move |&range| removed.emit(range)),
            _changed: source
                .item_changed
                .connect_scoped(move |&position| changed.emit((position, 1))),
            _reset: source.reset.connect_scoped(move |_| reset.emit(())),
        }
    }
}

/// Per-holder state written at bind time.
struct BindStamp {
    position: usize,
    /// Present only while the bind function runs.
    data_source: Option<Arc<dyn DataSource>>,
}

/// The live link between an adapter and a handle.
struct AttachedSession {
    handle: Arc<BindingHandle>,
    data_source: Option<Arc<dyn DataSource>>,
    stamps: HashMap<HolderId, BindStamp>,
    _forwarding: Option<SignalForwarding>,
}

impl AttachedSession {
    fn data_source(&self) -> Result<&Arc<dyn DataSource>> {
        self.data_source.as_ref().ok_or(BindError::NoDataSource)
    }

    fn item_at(&self, position: usize) -> Result<(&Arc<dyn DataSource>, Item)> {
        let source = self.data_source()?;
        let item = source.get(position).ok_or(BindError::PositionOutOfRange {
            position,
            size: source.size(),
        })?;
        Ok((source, item))
    }
}

/// Adapter between a virtualized list widget and a [`BindingHandle`].
///
/// Starts detached. Every widget callback fails with
/// [`BindError::NotAttached`] until [`attach`](Self::attach) is called.
#[derive(Default)]
pub struct ViewBindingAdapter {
    session: Option<AttachedSession>,
    signals: AdapterSignals,
}

impl ViewBindingAdapter {
    /// A detached adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches to `handle`, capturing its current data source.
    ///
    /// Attaching while attached replaces the previous session.
    pub fn attach(&mut self, handle: Arc<BindingHandle>) {
        let _span = PerfSpan::new("attach");
        self.detach();

        let data_source = handle.data_source();
        let forwarding = data_source
            .as_ref()
            .map(|source| SignalForwarding::connect(source.signals(), &self.signals));
        tracing::debug!(
            target: targets::ADAPTER,
            has_data_source = data_source.is_some(),
            definitions = handle.registry().len(),
            "adapter attached"
        );

        self.session = Some(AttachedSession {
            handle,
            data_source,
            stamps: HashMap::new(),
            _forwarding: forwarding,
        });
    }

    /// Drops the session: handle, data source, stamps and signal forwarding.
    ///
    /// Safe to call at any time, including when never attached.
    pub fn detach(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!(target: targets::ADAPTER, "adapter detached");
        }
    }

    /// Returns `true` while attached.
    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    /// Change notifications for the host widget.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    fn session(&self) -> Result<&AttachedSession> {
        self.session.as_ref().ok_or(BindError::NotAttached)
    }

    /// Number of items, or 0 when the handle had no data source.
    pub fn item_count(&self) -> Result<usize> {
        let session = self.session()?;
        Ok(session.data_source.as_ref().map_or(0, |source| source.size()))
    }

    /// View type of the item at `position`.
    #[tracing::instrument(skip(self), target = "horizon_binding::adapter", level = "trace")]
    pub fn view_type_at(&self, position: usize) -> Result<ViewType> {
        let session = self.session()?;
        let (_, item) = session.item_at(position)?;
        session.handle.view_type_for_item(item.item_type())
    }

    /// Creates a holder for `view_type` in `container`.
    #[tracing::instrument(skip(self, container), target = "horizon_binding::adapter", level = "trace")]
    pub fn create_view_holder(
        &self,
        view_type: ViewType,
        container: &ItemContainer,
    ) -> Result<ViewHolder> {
        let session = self.session()?;
        let handle = &session.handle;
        let definition = handle.definition_for_view_type(view_type)?;
        let holder = definition.create_view_holder(view_type, container, |kind| {
            handle.global_handler(kind).is_some()
        })?;
        tracing::trace!(
            target: targets::ADAPTER,
            holder = %holder.id(),
            item_type = %definition.item_type(),
            "created view holder"
        );
        Ok(holder)
    }

    /// Binds the item at `position` into `holder`.
    ///
    /// The item must resolve to the view type the holder was created for.
    /// When binding fails the holder keeps the position it was last bound to.
    #[tracing::instrument(skip(self, holder), fields(holder = %holder.id()), target = "horizon_binding::adapter", level = "trace")]
    pub fn bind_view_holder(&mut self, holder: &mut ViewHolder, position: usize) -> Result<()> {
        let session = self.session.as_mut().ok_or(BindError::NotAttached)?;
        let (source, item) = session.item_at(position)?;
        let source = Arc::clone(source);
        let view_type = session.handle.view_type_for_item(item.item_type())?;
        if view_type != holder.view_type() {
            return Err(BindError::ViewTypeMismatch {
                item_type: item.item_type().name(),
                expected: holder.view_type(),
                actual: view_type,
            });
        }
        let definition = session.handle.definition_for_view_type(view_type)?;

        let previous = session.stamps.insert(
            holder.id(),
            BindStamp {
                position,
                data_source: Some(source),
            },
        );

        let result = definition.bind(holder, position, &item);

        match &result {
            Ok(()) => {
                if let Some(stamp) = session.stamps.get_mut(&holder.id()) {
                    stamp.data_source = None;
                }
            }
            Err(err) => {
                tracing::warn!(target: targets::ADAPTER, position, %err, "bind failed");
                match previous {
                    Some(stamp) => {
                        session.stamps.insert(holder.id(), stamp);
                    }
                    None => {
                        session.stamps.remove(&holder.id());
                    }
                }
            }
        }
        result
    }

    /// Forgets the bind state of a holder going back to the recycled pool.
    pub fn view_recycled(&mut self, holder: &ViewHolder) {
        if let Some(session) = self.session.as_mut() {
            session.stamps.remove(&holder.id());
        }
    }

    /// The position `holder` was last bound to, if any.
    pub fn bound_position(&self, holder: &ViewHolder) -> Option<usize> {
        self.session
            .as_ref()?
            .stamps
            .get(&holder.id())
            .map(|stamp| stamp.position)
    }

    /// Delivers a click on `holder`'s root view.
    ///
    /// Returns `Ok(false)` when the view has no click listener.
    pub fn perform_click(&self, holder: &ViewHolder) -> Result<bool> {
        self.dispatch(holder, ClickKind::Click)
    }

    /// Delivers a long-click on `holder`'s root view.
    ///
    /// Returns `Ok(true)`, consumed, whenever a long-click listener is installed.
    pub fn perform_long_click(&self, holder: &ViewHolder) -> Result<bool> {
        self.dispatch(holder, ClickKind::LongClick)
    }

    #[tracing::instrument(skip(self, holder), fields(holder = %holder.id()), target = "horizon_binding::click", level = "trace")]
    fn dispatch(&self, holder: &ViewHolder, kind: ClickKind) -> Result<bool> {
        let session = self.session()?;
        if !holder.root().has_listener(kind) {
            return Ok(false);
        }

        let position = session
            .stamps
            .get(&holder.id())
            .map(|stamp| stamp.position)
            .ok_or(BindError::MissingPosition { holder: holder.id() })?;
        let (source, item) = session.item_at(position)?;
        let definition = session.handle.definition_for_view_type(holder.view_type())?;

        ClickDispatcher::for_event(definition, session.handle.global_handler(kind), kind)
            .dispatch(&**source, position, &item)?;
        Ok(true)
    }
}

impl fmt::Debug for ViewBindingAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBindingAdapter")
            .field("attached", &self.is_attached())
            .field(
                "stamps",
                &self.session.as_ref().map_or(0, |session| session.stamps.len()),
            )
            .finish()
    }
}
