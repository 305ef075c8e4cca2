//! Component storage layouts.
//!
//! Every store maps entity indices to slots through [`Slots`] and keeps its
//! data in one or more vectors addressed by slot: a single vector of whole
//! records for [`RowStorage`], one vector per field for stores generated by
//! [`columnar_component!`](crate::columnar_component).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::component::Component;

/// How a component store maps entity indices to storage slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Indexing {
    /// Slot == entity index. Arrays are pre-sized to `reserve` slots and grow
    /// when a higher index is attached.
    Dense { reserve: usize },
    /// Hash map from entity index to a packed slot; detach swap-removes.
    Sparse,
}

impl Default for Indexing {
    fn default() -> Self {
        Indexing::Sparse
    }
}

/// Uniform contract shared by every storage layout.
pub trait Storage: Send + Sync + 'static {
    /// The record type stored per entity.
    type Item;
    /// Shared view of one entity's data.
    type Ref<'a>
    where
        Self: 'a;
    /// Exclusive view of one entity's data.
    type Mut<'a>
    where
        Self: 'a;

    fn with_indexing(indexing: Indexing) -> Self
    where
        Self: Sized;

    /// Store `value` for `index`, overwriting any previous value.
    fn attach(&mut self, index: u32, value: Self::Item);

    /// Clear the slot for `index`. Returns `false` if nothing was attached.
    fn detach(&mut self, index: u32) -> bool;

    fn has(&self, index: u32) -> bool;

    fn get(&self, index: u32) -> Option<Self::Ref<'_>>;

    fn get_mut(&mut self, index: u32) -> Option<Self::Mut<'_>>;

    /// Number of attached entities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn indexing(&self) -> Indexing;
}

/// Where a value goes after [`Slots::place`].
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Overwrite (or, for dense arrays, fill) an existing slot.
    At(usize),
    /// Push onto the end of the packed arrays.
    Append,
}

/// What to do with the data after [`Slots::vacate`].
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vacancy {
    /// Reset the slot to its default value.
    Clear(usize),
    /// Swap the last slot into this one and shrink.
    SwapRemove(usize),
}

/// Attachment bookkeeping for one component store.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub enum Slots {
    Dense {
        present: Vec<bool>,
        reserve: usize,
        count: usize,
    },
    Sparse {
        slots: HashMap<u32, usize>,
        owners: Vec<u32>,
    },
}

impl Slots {
    pub fn new(indexing: Indexing) -> Self {
        match indexing {
            Indexing::Dense { reserve } => Slots::Dense {
                present: vec![false; reserve],
                reserve,
                count: 0,
            },
            Indexing::Sparse => Slots::Sparse {
                slots: HashMap::new(),
                owners: Vec::new(),
            },
        }
    }

    pub fn indexing(&self) -> Indexing {
        match self {
            Slots::Dense { reserve, .. } => Indexing::Dense { reserve: *reserve },
            Slots::Sparse { .. } => Indexing::Sparse,
        }
    }

    /// Number of slots data arrays should be pre-sized to.
    pub fn reserved(&self) -> usize {
        match self {
            Slots::Dense { reserve, .. } => *reserve,
            Slots::Sparse { .. } => 0,
        }
    }

    pub fn slot(&self, index: u32) -> Option<usize> {
        match self {
            Slots::Dense { present, .. } => present
                .get(index as usize)
                .copied()
                .unwrap_or(false)
                .then_some(index as usize),
            Slots::Sparse { slots, .. } => slots.get(&index).copied(),
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.slot(index).is_some()
    }

    /// Mark `index` as attached and say where its data belongs.
    pub fn place(&mut self, index: u32) -> Placement {
        match self {
            Slots::Dense { present, count, .. } => {
                let idx = index as usize;
                if idx >= present.len() {
                    present.resize(idx + 1, false);
                }
                if !present[idx] {
                    present[idx] = true;
                    *count += 1;
                }
                Placement::At(idx)
            }
            Slots::Sparse { slots, owners } => {
                if let Some(&slot) = slots.get(&index) {
                    return Placement::At(slot);
                }
                slots.insert(index, owners.len());
                owners.push(index);
                Placement::Append
            }
        }
    }

    /// Mark `index` as detached. `None` if it was not attached.
    pub fn vacate(&mut self, index: u32) -> Option<Vacancy> {
        match self {
            Slots::Dense { present, count, .. } => {
                let flag = present.get_mut(index as usize)?;
                if !*flag {
                    return None;
                }
                *flag = false;
                *count -= 1;
                Some(Vacancy::Clear(index as usize))
            }
            Slots::Sparse { slots, owners } => {
                let slot = slots.remove(&index)?;
                owners.swap_remove(slot);
                if let Some(&moved) = owners.get(slot) {
                    slots.insert(moved, slot);
                }
                Some(Vacancy::SwapRemove(slot))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Slots::Dense { count, .. } => *count,
            Slots::Sparse { owners, .. } => owners.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write `value` into `column` as directed by a [`Placement`].
#[doc(hidden)]
pub fn put<T: Default>(column: &mut Vec<T>, placement: Placement, value: T) {
    match placement {
        Placement::At(slot) => {
            if slot >= column.len() {
                column.resize_with(slot + 1, T::default);
            }
            column[slot] = value;
        }
        Placement::Append => column.push(value),
    }
}

/// Release a slot of `column` as directed by a [`Vacancy`].
#[doc(hidden)]
pub fn vacate<T: Default>(column: &mut Vec<T>, vacancy: Vacancy) {
    match vacancy {
        Vacancy::Clear(slot) => {
            if let Some(value) = column.get_mut(slot) {
                *value = T::default();
            }
        }
        Vacancy::SwapRemove(slot) => {
            column.swap_remove(slot);
        }
    }
}

/// Row layout: one vector of whole records.
///
/// Suits components whose fields are read and written together.
pub struct RowStorage<T> {
    slots: Slots,
    rows: Vec<Option<T>>,
}

impl<T: Component> Storage for RowStorage<T> {
    type Item = T;
    type Ref<'a> = &'a T where Self: 'a;
    type Mut<'a> = &'a mut T where Self: 'a;

    fn with_indexing(indexing: Indexing) -> Self {
        let slots = Slots::new(indexing);
        let mut rows = Vec::new();
        rows.resize_with(slots.reserved(), || None);
        Self { slots, rows }
    }

    fn attach(&mut self, index: u32, value: T) {
        let placement = self.slots.place(index);
        put(&mut self.rows, placement, Some(value));
    }

    fn detach(&mut self, index: u32) -> bool {
        let Some(vacancy) = self.slots.vacate(index) else {
            return false;
        };
        vacate(&mut self.rows, vacancy);
        true
    }

    fn has(&self, index: u32) -> bool {
        self.slots.contains(index)
    }

    fn get(&self, index: u32) -> Option<&T> {
        let slot = self.slots.slot(index)?;
        self.rows.get(slot)?.as_ref()
    }

    fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        let slot = self.slots.slot(index)?;
        self.rows.get_mut(slot)?.as_mut()
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn indexing(&self) -> Indexing {
        self.slots.indexing()
    }
}

impl<T: Component> RowStorage<T> {
    /// Iterate over all (entity_index, &record) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        (0..self.high_index()).filter_map(move |index| self.get(index).map(|row| (index, row)))
    }

    fn high_index(&self) -> u32 {
        match &self.slots {
            Slots::Dense { present, .. } => present.len() as u32,
            Slots::Sparse { owners, .. } => owners.iter().max().map_or(0, |max| max + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag(&'static str);
    crate::row_component!(Tag);

    fn both_layouts() -> [RowStorage<Tag>; 2] {
        [
            RowStorage::with_indexing(Indexing::Dense { reserve: 4 }),
            RowStorage::with_indexing(Indexing::Sparse),
        ]
    }

    #[test]
    fn attach_and_get() {
        for mut store in both_layouts() {
            store.attach(5, Tag("five"));
            assert_eq!(store.get(5), Some(&Tag("five")));
            assert_eq!(store.get(0), None);
            assert!(store.has(5));
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn reattach_overwrites() {
        for mut store in both_layouts() {
            store.attach(0, Tag("a"));
            store.attach(0, Tag("b"));
            assert_eq!(store.get(0), Some(&Tag("b")));
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn detach_keeps_other_slots_intact() {
        for mut store in both_layouts() {
            store.attach(0, Tag("a"));
            store.attach(1, Tag("b"));
            store.attach(2, Tag("c"));
            assert!(store.detach(0));
            assert!(!store.detach(0));
            assert_eq!(store.get(0), None);
            assert_eq!(store.get(1), Some(&Tag("b")));
            assert_eq!(store.get(2), Some(&Tag("c")));
            assert_eq!(store.len(), 2);
        }
    }

    #[test]
    fn dense_grows_past_reserve() {
        let mut store = RowStorage::with_indexing(Indexing::Dense { reserve: 2 });
        store.attach(10, Tag("far"));
        assert_eq!(store.get(10), Some(&Tag("far")));
        assert_eq!(store.indexing(), Indexing::Dense { reserve: 2 });
    }

    #[test]
    fn iteration_in_index_order() {
        for mut store in both_layouts() {
            store.attach(3, Tag("c"));
            store.attach(1, Tag("a"));
            let items: Vec<_> = store.iter().collect();
            assert_eq!(items, vec![(1, &Tag("a")), (3, &Tag("c"))]);
        }
    }

    #[test]
    fn sparse_swap_remove_relinks_moved_owner() {
        let mut slots = Slots::new(Indexing::Sparse);
        assert_eq!(slots.place(7), Placement::Append);
        assert_eq!(slots.place(8), Placement::Append);
        assert_eq!(slots.place(9), Placement::Append);
        assert_eq!(slots.vacate(7), Some(Vacancy::SwapRemove(0)));
        assert_eq!(slots.slot(9), Some(0));
        assert_eq!(slots.slot(8), Some(1));
        assert_eq!(slots.place(8), Placement::At(1));
    }
}
