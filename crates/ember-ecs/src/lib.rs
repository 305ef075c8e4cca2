//! Ember ECS - Entity Component System
//!
//! Entities are generational indices. Component types are declared up front
//! when the [`World`] is built, each with its own storage layout (row or
//! columnar) and indexing strategy (dense or sparse). Queries select the
//! entities that carry every requested component type.

mod columnar;
mod component;
mod entity;
mod error;
mod query;
mod resource;
mod storage;
mod system;
mod world;

pub use component::{Component, ComponentId, Mut, Ref, Signature};
pub use entity::{Entity, EntityAllocator, DEFAULT_MAX_ENTITIES};
pub use error::EcsError;
pub use query::{ComponentSet, Selection};
pub use resource::Resources;
pub use storage::{Indexing, RowStorage, Storage};
pub use system::{System, SystemSchedule};
pub use world::{World, WorldBuilder};

/// Items used by code generated from [`columnar_component!`]. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::storage::{put, vacate, Placement, Slots, Vacancy};
}
