//! Reference components and the world layout they are registered with.

use ember_core::Clock;
use ember_ecs::{columnar_component, row_component, EcsError, Indexing, World};
use serde::{Deserialize, Serialize};

columnar_component! {
    /// Location in world units.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Position {
        pub x: f32,
        pub y: f32,
    }
    storage = PositionColumns;
    view = PositionRef;
    view_mut = PositionMut;
}

columnar_component! {
    /// World units per clock unit, per axis.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Velocity {
        pub x: f32,
        pub y: f32,
    }
    storage = VelocityColumns;
    view = VelocityRef;
    view_mut = VelocityMut;
}

/// Experience and level of a player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub level: u32,
    /// Progress towards the next level, in experience points.
    pub experience: f64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            experience: 0.0,
        }
    }
}

/// Vitality. An entity whose health reaches zero is removed by the cull system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health(pub f32);

row_component!(Player, Health);

/// Indexing strategy per reference component, chosen at world construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub max_entities: u32,
    pub position: Indexing,
    pub velocity: Indexing,
    pub player: Indexing,
    pub health: Indexing,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            max_entities: ember_ecs::DEFAULT_MAX_ENTITIES,
            position: Indexing::Sparse,
            velocity: Indexing::Dense {
                reserve: ember_ecs::DEFAULT_MAX_ENTITIES as usize,
            },
            player: Indexing::Sparse,
            health: Indexing::Sparse,
        }
    }
}

impl WorldLayout {
    /// Build a world with every reference component registered.
    pub fn build(&self, clock: Clock) -> Result<World, EcsError> {
        World::builder()
            .max_entities(self.max_entities)
            .clock(clock)
            .register::<Position>(self.fitted(self.position))
            .register::<Velocity>(self.fitted(self.velocity))
            .register::<Player>(self.fitted(self.player))
            .register::<Health>(self.fitted(self.health))
            .build()
    }

    /// Entity indices never reach `max_entities`, so dense stores are
    /// pre-sized to at most that many slots.
    fn fitted(&self, indexing: Indexing) -> Indexing {
        match indexing {
            Indexing::Dense { reserve } => Indexing::Dense {
                reserve: reserve.min(self.max_entities as usize),
            },
            Indexing::Sparse => Indexing::Sparse,
        }
    }
}
