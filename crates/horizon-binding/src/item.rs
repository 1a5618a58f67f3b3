//! Item typing for heterogeneous lists.
//!
//! Data sources hold their entries as [`Item`]s: a shared, type-erased value
//! tagged with the [`ItemType`] it was created from. The tag is recorded once,
//! when the item is wrapped, so resolving an entry to its item definition never
//! needs reflection and downcasting happens at a single dispatch point.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of an item type: its `TypeId` plus its fully-qualified name.
///
/// Equality and hashing use the `TypeId` only. The name is carried for error
/// messages and logs.
#[derive(Clone, Copy)]
pub struct ItemType {
    id: TypeId,
    name: &'static str,
}

impl ItemType {
    /// Returns the identity of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` of the item type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully-qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the identity of `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ItemType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ItemType {}

impl Hash for ItemType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-tagged, shared list entry.
///
/// Cloning an `Item` is cheap: it clones the inner `Arc`.
#[derive(Clone)]
pub struct Item {
    item_type: ItemType,
    value: Arc<dyn Any + Send + Sync>,
}

impl Item {
    /// Wraps `value` as a list entry.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value as a list entry.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            item_type: ItemType::of::<T>(),
            value,
        }
    }

    /// The type this entry was created from.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Returns the entry as `T` if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns `true` if the entry's type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.item_type.is::<T>()
    }

    /// Returns `true` if both entries share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item<{}>", self.item_type)
    }
}
