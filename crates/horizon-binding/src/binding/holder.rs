//! View holders and the identifiers the host widget sees.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::click::ClickKind;

/// Dense identifier of a recycled-view pool.
///
/// Allocated by the registry, starting at 0, the first time an item type is
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewType(usize);

impl ViewType {
    /// Wraps a raw view-type id.
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// The raw id.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identity of a view holder, used to key per-holder bind state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HolderId(u64);

impl HolderId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The parent container a view holder is created for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContainer {
    name: Option<String>,
}

impl ItemContainer {
    /// An anonymous container.
    pub fn new() -> Self {
        Self::default()
    }

    /// A container with a name, for diagnostics.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The container name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// The root view of an item: which listeners are installed and whether the
/// background shows a pressed/selected affordance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemView {
    click_listener: bool,
    long_click_listener: bool,
    selectable_background: bool,
}

impl ItemView {
    /// Returns `true` if clicks on this view are dispatched.
    pub fn has_click_listener(&self) -> bool {
        self.click_listener
    }

    /// Returns `true` if long-clicks on this view are dispatched.
    pub fn has_long_click_listener(&self) -> bool {
        self.long_click_listener
    }

    /// Returns `true` if the view was given a selectable background.
    pub fn has_selectable_background(&self) -> bool {
        self.selectable_background
    }

    pub(crate) fn has_listener(&self, kind: ClickKind) -> bool {
        match kind {
            ClickKind::Click => self.click_listener,
            ClickKind::LongClick => self.long_click_listener,
        }
    }

    pub(crate) fn install_listener(&mut self, kind: ClickKind) {
        match kind {
            ClickKind::Click => self.click_listener = true,
            ClickKind::LongClick => self.long_click_listener = true,
        }
        self.make_background_selectable();
    }

    /// Visual affordance hook. Rendering is up to the host widget.
    fn make_background_selectable(&mut self) {
        self.selectable_background = true;
    }
}

/// A reusable item view plus the user's holder value.
///
/// Created by the adapter, owned and recycled by the host widget.
pub struct ViewHolder {
    id: HolderId,
    view_type: ViewType,
    root: ItemView,
    content_type: &'static str,
    content: Box<dyn Any + Send>,
}

impl ViewHolder {
    pub(crate) fn new(
        view_type: ViewType,
        root: ItemView,
        content_type: &'static str,
        content: Box<dyn Any + Send>,
    ) -> Self {
        Self {
            id: HolderId::next(),
            view_type,
            root,
            content_type,
            content,
        }
    }

    /// Identity of this holder.
    pub fn id(&self) -> HolderId {
        self.id
    }

    /// The view type this holder was created for.
    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// The root item view.
    pub fn root(&self) -> &ItemView {
        &self.root
    }

    /// Type name of the holder value.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// The holder value as `H`, if that is its type.
    pub fn content<H: Any>(&self) -> Option<&H> {
        self.content.downcast_ref::<H>()
    }

    /// The holder value as `&mut H`, if that is its type.
    pub fn content_mut<H: Any>(&mut self) -> Option<&mut H> {
        self.content.downcast_mut::<H>()
    }

    pub(crate) fn content_any_mut(&mut self) -> &mut (dyn Any + Send) {
        self.content.as_mut()
    }
}

impl fmt::Debug for ViewHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHolder")
            .field("id", &self.id)
            .field("view_type", &self.view_type)
            .field("root", &self.root)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
