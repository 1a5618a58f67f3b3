//! Item definition registry and view-type table.
//!
//! The registry owns every [`ItemDefinition`] of a setup and hands out dense
//! [`ViewType`] ids lazily, the first time an item type is resolved. Ids are
//! never reused or reassigned, so a host widget can key its recycled-view pools
//! on them for the lifetime of the setup.

use std::collections::HashMap;

use horizon_binding_core::logging::targets;
use parking_lot::RwLock;

use super::definition::ItemDefinition;
use super::holder::ViewType;
use crate::error::{BindError, Result};
use crate::item::ItemType;

/// Bidirectional view type ↔ definition mapping.
#[derive(Debug, Default)]
struct ViewTypeTable {
    /// Item type to its allocated view type.
    by_item_type: HashMap<ItemType, ViewType>,
    /// Indexed by view type: position of the definition in the registry.
    definitions: Vec<usize>,
}

/// Maps item types to their definitions and view types.
///
/// Registration needs `&mut self` and happens during setup. Resolution works
/// through `&self`; the view-type table grows behind an internal lock.
#[derive(Debug, Default)]
pub struct ItemDefinitionRegistry {
    /// Definitions in registration order.
    definitions: Vec<ItemDefinition>,
    /// Item type to its definition's position.
    by_type: HashMap<ItemType, usize>,
    view_types: RwLock<ViewTypeTable>,
}

impl ItemDefinitionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` for its item type.
    ///
    /// Fails with [`BindError::DuplicateDefinition`] if the type already has a
    /// definition; the existing one stays in effect.
    pub fn register(&mut self, definition: ItemDefinition) -> Result<&mut ItemDefinition> {
        let item_type = definition.item_type();
        if self.by_type.contains_key(&item_type) {
            tracing::warn!(target: targets::REGISTRY, %item_type, "duplicate item definition rejected");
            return Err(BindError::DuplicateDefinition {
                item_type: item_type.name(),
            });
        }

        let index = self.definitions.len();
        self.definitions.push(definition);
        self.by_type.insert(item_type, index);
        tracing::debug!(target: targets::REGISTRY, %item_type, "registered item definition");
        Ok(&mut self.definitions[index])
    }

    /// The definition registered for `item_type`.
    pub fn definition_for_type(&self, item_type: ItemType) -> Result<&ItemDefinition> {
        self.by_type
            .get(&item_type)
            .map(|&index| &self.definitions[index])
            .ok_or(BindError::UnknownItemType {
                item_type: item_type.name(),
            })
    }

    /// The view type of `item_type`, allocating the next free id on first use.
    ///
    /// Only registered item types get a view type; anything else fails with
    /// [`BindError::UnknownItemType`] and allocates nothing.
    pub fn view_type_for_item(&self, item_type: ItemType) -> Result<ViewType> {
        let existing = self.view_types.read().by_item_type.get(&item_type).copied();
        if let Some(view_type) = existing {
            return Ok(view_type);
        }

        let index = *self
            .by_type
            .get(&item_type)
            .ok_or(BindError::UnknownItemType {
                item_type: item_type.name(),
            })?;

        let mut table = self.view_types.write();
        if let Some(&view_type) = table.by_item_type.get(&item_type) {
            return Ok(view_type);
        }
        let view_type = ViewType::new(table.definitions.len());
        table.definitions.push(index);
        table.by_item_type.insert(item_type, view_type);
        tracing::trace!(target: targets::REGISTRY, %item_type, %view_type, "allocated view type");
        Ok(view_type)
    }

    /// The definition behind an allocated view type.
    pub fn definition_for_view_type(&self, view_type: ViewType) -> Result<&ItemDefinition> {
        let index = self
            .view_types
            .read()
            .definitions
            .get(view_type.get())
            .copied()
            .ok_or(BindError::UnknownViewType { view_type })?;
        Ok(&self.definitions[index])
    }

    /// Returns `true` if `item_type` has a definition.
    pub fn contains(&self, item_type: ItemType) -> bool {
        self.by_type.contains_key(&item_type)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Number of view types allocated so far.
    pub fn view_type_count(&self) -> usize {
        self.view_types.read().definitions.len()
    }

    /// Registered item types, in registration order.
    pub fn item_types(&self) -> impl Iterator<Item = ItemType> + '_ {
        self.definitions.iter().map(ItemDefinition::item_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::holder::ItemContainer;

    struct Header;
    struct Row;
    struct Footer;
    struct Unregistered;

    fn registry() -> ItemDefinitionRegistry {
        let mut registry = ItemDefinitionRegistry::new();
        registry
            .register(ItemDefinition::with_creator::<Header, (), _>(|_| ()))
            .unwrap();
        registry
            .register(ItemDefinition::with_creator::<Row, String, _>(|_| String::new()))
            .unwrap();
        registry.register(ItemDefinition::new::<Footer>()).unwrap();
        registry
    }

    #[test]
    fn test_view_types_are_dense_stable_and_unique() {
        let registry = registry();
        assert_eq!(registry.view_type_count(), 0);

        let row = registry.view_type_for_item(ItemType::of::<Row>()).unwrap();
        let header = registry.view_type_for_item(ItemType::of::<Header>()).unwrap();
        let footer = registry.view_type_for_item(ItemType::of::<Footer>()).unwrap();

        assert_eq!(row, ViewType::new(0));
        assert_eq!(header, ViewType::new(1));
        assert_eq!(footer, ViewType::new(2));

        for _ in 0..3 {
            assert_eq!(registry.view_type_for_item(ItemType::of::<Row>()).unwrap(), row);
            assert_eq!(registry.view_type_for_item(ItemType::of::<Header>()).unwrap(), header);
        }
        assert_eq!(registry.view_type_count(), 3);
    }

    #[test]
    fn test_definition_round_trip_through_view_type() {
        let registry = registry();
        for item_type in registry.item_types().collect::<Vec<_>>() {
            let view_type = registry.view_type_for_item(item_type).unwrap();
            let definition = registry.definition_for_view_type(view_type).unwrap();
            assert_eq!(definition.item_type(), item_type);
            assert!(std::ptr::eq(
                definition,
                registry.definition_for_type(item_type).unwrap()
            ));
        }
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = registry();
        let err = registry
            .register(ItemDefinition::new::<Row>())
            .unwrap_err();
        assert!(matches!(err, BindError::DuplicateDefinition { .. }));
        assert!(err.is_configuration());
        assert_eq!(registry.len(), 3);

        let kept = registry.definition_for_type(ItemType::of::<Row>()).unwrap();
        assert!(kept.has_creator());
        assert!(
            kept.create_view_holder(ViewType::new(0), &ItemContainer::new(), |_| false)
                .is_ok()
        );
    }

    #[test]
    fn test_unknown_lookups() {
        let registry = registry();

        let err = registry
            .definition_for_type(ItemType::of::<Unregistered>())
            .unwrap_err();
        assert!(err.is_lookup());

        let err = registry
            .view_type_for_item(ItemType::of::<Unregistered>())
            .unwrap_err();
        assert!(matches!(err, BindError::UnknownItemType { .. }));
        assert_eq!(registry.view_type_count(), 0);

        let err = registry.definition_for_view_type(ViewType::new(0)).unwrap_err();
        assert!(matches!(err, BindError::UnknownViewType { .. }));
    }

    #[test]
    fn test_contains_and_order() {
        let registry = registry();
        assert!(registry.contains(ItemType::of::<Header>()));
        assert!(!registry.contains(ItemType::of::<Unregistered>()));
        assert!(!registry.is_empty());

        let order: Vec<_> = registry.item_types().collect();
        assert_eq!(
            order,
            vec![ItemType::of::<Header>(), ItemType::of::<Row>(), ItemType::of::<Footer>()]
        );
    }
}
