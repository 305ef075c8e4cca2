use std::any::{type_name, TypeId};
use std::iter::Copied;
use std::slice;

use crate::component::Component;
use crate::entity::Entity;

/// A statically known set of component types to select on.
///
/// Implemented for tuples of one to eight [`Component`] types.
pub trait ComponentSet {
    /// `(TypeId, type name)` of every member, in declaration order.
    fn members() -> Vec<(TypeId, &'static str)>;
}

macro_rules! impl_component_set_tuple {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn members() -> Vec<(TypeId, &'static str)> {
                vec![$((TypeId::of::<$name>(), type_name::<$name>()),)+]
            }
        }
    };
}

impl_component_set_tuple!(A);
impl_component_set_tuple!(A, B);
impl_component_set_tuple!(A, B, C);
impl_component_set_tuple!(A, B, C, D);
impl_component_set_tuple!(A, B, C, D, E);
impl_component_set_tuple!(A, B, C, D, E, F);
impl_component_set_tuple!(A, B, C, D, E, F, G);
impl_component_set_tuple!(A, B, C, D, E, F, G, H);

/// The entities matched by a query, captured when the query ran.
///
/// Entities are listed in ascending index order. The list does not follow
/// later changes to the world: an entity destroyed after the query still
/// appears (its handle is simply no longer live), and entities created after
/// the query never do. Iterating the selection while destroying or creating
/// entities is therefore always safe, and iteration can be restarted freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entities: Vec<Entity>,
}

impl Selection {
    pub(crate) fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn iter(&self) -> Copied<slice::Iter<'_, Entity>> {
        self.entities.iter().copied()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.binary_search(&entity).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl IntoIterator for Selection {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'s> IntoIterator for &'s Selection {
    type Item = Entity;
    type IntoIter = Copied<slice::Iter<'s, Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
