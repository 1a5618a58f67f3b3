//! Horizon Binding - type-indexed view binding for virtualized lists.
//!
//! A list widget recycles a small pool of item views while the user scrolls
//! through a much larger data set. This crate sits between the widget and the
//! data: each item type is registered once with a function that creates its
//! view holder, a function that binds an item into a holder, and optional
//! click handlers. The widget then drives a [`ViewBindingAdapter`] with plain
//! positions and view-type ids.
//!
//! Click handlers receive a [`SelectionState`](model::SelectionState) scoped
//! to the clicked position. It mutates the data source's selection when the
//! source supports one and does nothing otherwise.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_binding::model::SelectableDataSource;
//! use horizon_binding::{BindingSetup, ItemContainer, ViewBindingAdapter, selectable_data_source};
//!
//! struct Song(&'static str);
//!
//! let source = Arc::new(selectable_data_source![Song("Intro"), Song("Outro")]);
//!
//! let mut setup = BindingSetup::new();
//! setup
//!     .register::<Song, String, _>(|_| String::new())?
//!     .bind(|label, _, song| *label = song.0.to_string())
//!     .on_click(|selection, _, _| {
//!         selection.toggle_selection();
//!     });
//! setup.set_data_source(source.clone());
//!
//! let mut adapter = ViewBindingAdapter::new();
//! adapter.attach(setup.build());
//!
//! let view_type = adapter.view_type_at(1)?;
//! let mut holder = adapter.create_view_holder(view_type, &ItemContainer::new())?;
//! adapter.bind_view_holder(&mut holder, 1)?;
//! assert!(adapter.perform_click(&holder)?);
//! assert!(source.is_selected_at(1));
//! # Ok::<(), horizon_binding::BindError>(())
//! ```

pub mod binding;
pub mod error;
pub mod item;
pub mod model;

pub use binding::{
    AdapterSignals, BindingHandle, BindingSetup, ClickDispatcher, ClickHandler, ClickKind,
    HolderId, ItemContainer, ItemDefinition, ItemDefinitionBuilder, ItemDefinitionRegistry,
    ItemView, ViewBindingAdapter, ViewHolder, ViewType,
};
pub use error::{BindError, ErrorKind, Result};
pub use item::{Item, ItemType};
pub use horizon_binding_core::{ConnectionGuard, ConnectionId, Signal};
