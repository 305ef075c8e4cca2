use std::any::Any;
use std::fmt;

use crate::storage::Storage;

/// Types that can be attached to entities.
///
/// The storage layout is part of the declaration: use [`row_component!`] for
/// record-per-entity storage or [`columnar_component!`] for column-per-field
/// storage.
///
/// [`row_component!`]: crate::row_component
/// [`columnar_component!`]: crate::columnar_component
pub trait Component: Sized + Send + Sync + 'static {
    type Storage: Storage<Item = Self>;
}

/// Shared view of a `C` attached to one entity.
pub type Ref<'a, C> = <<C as Component>::Storage as Storage>::Ref<'a>;

/// Exclusive view of a `C` attached to one entity.
pub type Mut<'a, C> = <<C as Component>::Storage as Storage>::Mut<'a>;

/// Declare one or more types as row-layout components.
///
/// ```ignore
/// row_component!(Player, Health);
/// ```
#[macro_export]
macro_rules! row_component {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Component for $ty {
                type Storage = $crate::RowStorage<$ty>;
            }
        )+
    };
}

/// Registration slot of a component type within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u8);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Set of component types attached to one entity, one bit per [`ComponentId`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature(u64);

impl Signature {
    /// Largest number of component types a signature can describe.
    pub const MAX_COMPONENTS: usize = u64::BITS as usize;

    pub const EMPTY: Self = Self(0);

    pub fn from_ids(ids: &[ComponentId]) -> Self {
        ids.iter().fold(Self::EMPTY, |mut sig, &id| {
            sig.insert(id);
            sig
        })
    }

    pub fn insert(&mut self, id: ComponentId) {
        self.0 |= 1u64 << id.0;
    }

    pub fn remove(&mut self, id: ComponentId) {
        self.0 &= !(1u64 << id.0);
    }

    pub fn contains(self, id: ComponentId) -> bool {
        self.0 & (1u64 << id.0) != 0
    }

    /// Whether every component in `other` is also in `self`.
    pub fn contains_all(self, other: Signature) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Component ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ComponentId> {
        (0..u64::BITS as u8)
            .filter(move |&bit| self.0 & (1u64 << bit) != 0)
            .map(ComponentId)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#b})", self.0)
    }
}

/// Type-erased component storage interface.
///
/// Method names differ from [`Storage`] so calls on a concrete store are
/// never ambiguous.
pub(crate) trait ErasedStorage: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn detach_erased(&mut self, index: u32) -> bool;
    fn has_erased(&self, index: u32) -> bool;
}

impl<S: Storage> ErasedStorage for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn detach_erased(&mut self, index: u32) -> bool {
        Storage::detach(self, index)
    }

    fn has_erased(&self, index: u32) -> bool {
        Storage::has(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_membership() {
        let mut sig = Signature::EMPTY;
        assert!(sig.is_empty());
        sig.insert(ComponentId(5));
        sig.insert(ComponentId(63));
        assert!(sig.contains(ComponentId(5)));
        assert!(sig.contains(ComponentId(63)));
        assert!(!sig.contains(ComponentId(0)));
        assert_eq!(sig.len(), 2);

        sig.remove(ComponentId(5));
        assert!(!sig.contains(ComponentId(5)));
    }

    #[test]
    fn signature_superset() {
        let entity = Signature::from_ids(&[ComponentId(0), ComponentId(2), ComponentId(3)]);
        let query = Signature::from_ids(&[ComponentId(0), ComponentId(3)]);
        assert!(entity.contains_all(query));
        assert!(!query.contains_all(entity));
        assert_eq!(
            entity.iter().collect::<Vec<_>>(),
            vec![ComponentId(0), ComponentId(2), ComponentId(3)]
        );
    }
}
