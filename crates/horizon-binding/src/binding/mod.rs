//! The binding layer: definitions, view types, holders, clicks and the adapter.
//!
//! # Core Types
//!
//! - `ItemDefinition`: creation, bind and click functions for one item type
//! - `ItemDefinitionRegistry`: item type to definition and view type
//! - `BindingSetup` / `BindingHandle`: configuration and its frozen result
//! - `ViewBindingAdapter`: what a virtualized list widget talks to
//! - `ClickDispatcher`: ordered handler chain for one click event

mod adapter;
mod click;
mod definition;
mod holder;
mod registry;
mod setup;

pub use adapter::{AdapterSignals, ViewBindingAdapter};
pub use click::{ClickDispatcher, ClickHandler, ClickKind};
pub use definition::{ItemDefinition, ItemDefinitionBuilder};
pub use holder::{HolderId, ItemContainer, ItemView, ViewHolder, ViewType};
pub use registry::ItemDefinitionRegistry;
pub use setup::{BindingHandle, BindingSetup};
