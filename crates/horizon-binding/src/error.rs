//! Error types for the binding layer.

use crate::binding::{HolderId, ViewType};

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, BindError>;

/// Broad category of a [`BindError`].
///
/// None of these are transient: every failure points at a setup mismatch or a
/// misuse by the caller, so nothing in the binding layer retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid setup, surfaced at registration or first use.
    Configuration,
    /// Unknown item type, view type or position.
    Lookup,
    /// Operation invoked in a state where it is not allowed.
    IllegalState,
}

/// Errors that can occur while registering, resolving or binding items.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// An item type was registered twice in the same setup.
    #[error("An item definition for '{item_type}' is already registered")]
    DuplicateDefinition { item_type: &'static str },

    /// A definition reached view-holder creation without a creation function.
    #[error("View holder creator not provided for item definition '{item_type}'")]
    MissingCreator { item_type: &'static str },

    /// No definition is registered for the item type.
    #[error("No item definition registered for '{item_type}'")]
    UnknownItemType { item_type: &'static str },

    /// The view type was never allocated by the registry.
    #[error("Unknown view type {view_type}")]
    UnknownViewType { view_type: ViewType },

    /// The data source has no item at the position.
    #[error("Position {position} is out of range for a data source of size {size}")]
    PositionOutOfRange { position: usize, size: usize },

    /// The adapter is not attached to a handle.
    #[error("Adapter is not attached")]
    NotAttached,

    /// A click reached a holder that was never bound through this adapter.
    #[error("Didn't find a bound position for view holder {holder}")]
    MissingPosition { holder: HolderId },

    /// A data source was required but none is set.
    #[error("No data source available")]
    NoDataSource,

    /// The holder content is not the type the definition created.
    #[error("View holder for '{item_type}' does not contain a '{expected}'")]
    HolderTypeMismatch {
        item_type: &'static str,
        expected: &'static str,
    },

    /// The item at the bound position resolves to a different view type than
    /// the holder was created for.
    #[error("Item of type '{item_type}' has view type {actual}, but the view holder was created for view type {expected}")]
    ViewTypeMismatch {
        item_type: &'static str,
        expected: ViewType,
        actual: ViewType,
    },

    /// The item handed to a definition is not the type it binds.
    #[error("Item of type '{actual}' dispatched to the definition for '{expected}'")]
    ItemTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl BindError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateDefinition { .. } | Self::MissingCreator { .. } => {
                ErrorKind::Configuration
            }
            Self::UnknownItemType { .. }
            | Self::UnknownViewType { .. }
            | Self::PositionOutOfRange { .. } => ErrorKind::Lookup,
            Self::NotAttached
            | Self::MissingPosition { .. }
            | Self::NoDataSource
            | Self::HolderTypeMismatch { .. }
            | Self::ViewTypeMismatch { .. }
            | Self::ItemTypeMismatch { .. } => ErrorKind::IllegalState,
        }
    }

    /// Returns `true` for setup errors.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Returns `true` for lookup errors.
    pub fn is_lookup(&self) -> bool {
        self.kind() == ErrorKind::Lookup
    }

    /// Returns `true` for illegal-state errors.
    pub fn is_illegal_state(&self) -> bool {
        self.kind() == ErrorKind::IllegalState
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(BindError::DuplicateDefinition { item_type: "a::Row" }.is_configuration());
        assert!(BindError::UnknownViewType { view_type: ViewType::new(7) }.is_lookup());
        assert!(BindError::NotAttached.is_illegal_state());
        assert_eq!(
            BindError::PositionOutOfRange { position: 3, size: 1 }.kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_messages_name_the_type() {
        let err = BindError::MissingCreator { item_type: "app::Header" };
        assert_eq!(
            err.to_string(),
            "View holder creator not provided for item definition 'app::Header'"
        );
    }
}
