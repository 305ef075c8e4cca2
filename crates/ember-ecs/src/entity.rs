use std::fmt;

use crate::error::EcsError;

/// Default upper bound on simultaneously live entities.
pub const DEFAULT_MAX_ENTITIES: u32 = 100_000;

/// A generational entity handle.
///
/// The index addresses component storage and is recycled after the entity is
/// destroyed; the generation is bumped on every destroy so that a handle kept
/// across a reuse no longer refers to a live entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Create an entity from raw parts (mainly for testing).
    pub fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The identifier slot of this entity.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// How many times this slot has been recycled.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Issues entity identifiers and recycles them after destroy.
///
/// Freed indices are reused before fresh ones are minted, which keeps the live
/// index range (and therefore dense component arrays) as small as possible.
pub struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    len: usize,
    max_entities: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTITIES)
    }

    /// An allocator that refuses to hand out more than `max_entities` indices.
    pub fn with_capacity(max_entities: u32) -> Self {
        Self {
            generations: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            max_entities,
        }
    }

    /// Allocate an entity, reusing a freed slot if available.
    pub fn allocate(&mut self) -> Result<Entity, EcsError> {
        if let Some(index) = self.free_list.pop() {
            self.alive[index as usize] = true;
            self.len += 1;
            return Ok(Entity {
                index,
                generation: self.generations[index as usize],
            });
        }

        let next_fresh = self.generations.len() as u32;
        if next_fresh >= self.max_entities {
            return Err(EcsError::Capacity {
                max: self.max_entities,
            });
        }
        self.generations.push(0);
        self.alive.push(true);
        self.len += 1;
        Ok(Entity {
            index: next_fresh,
            generation: 0,
        })
    }

    /// Release an entity's index for reuse.
    pub fn deallocate(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::InvalidReference(entity));
        }
        let idx = entity.index as usize;
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_list.push(entity.index);
        self.len -= 1;
        Ok(())
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.alive.len() && self.alive[idx] && self.generations[idx] == entity.generation
    }

    /// Handle of the live entity occupying `index`, if any.
    pub fn live_at(&self, index: u32) -> Option<Entity> {
        let idx = index as usize;
        if self.alive.get(idx).copied().unwrap_or(false) {
            Some(Entity {
                index,
                generation: self.generations[idx],
            })
        } else {
            None
        }
    }

    /// Live entities in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .zip(&self.generations)
            .enumerate()
            .filter(|(_, (alive, _))| **alive)
            .map(|(index, (_, &generation))| Entity {
                index: index as u32,
                generation,
            })
    }

    /// One past the highest index ever handed out.
    pub fn high_water_mark(&self) -> u32 {
        self.generations.len() as u32
    }

    /// Maximum number of simultaneously live entities.
    pub fn capacity(&self) -> u32 {
        self.max_entities
    }

    /// Number of currently alive entities.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no alive entities.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
