//! The reference systems, in the order they run each tick:
//! movement, progression, cull.

use ember_ecs::{EcsError, Entity, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::components::{Health, Player, Position, Velocity};

/// Tuning for the progression system, stored as a world resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    /// Experience needed to gain a level.
    pub threshold: f64,
    /// Clock milliseconds per experience point.
    pub millis_per_point: f64,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            millis_per_point: 1000.0,
        }
    }
}

/// A system touched an entity its own query handed it and the world refused.
fn contract_violation(system: &'static str, err: EcsError) {
    if cfg!(debug_assertions) {
        panic!("{system} system broke a world contract: {err}");
    }
    error!(system, %err, "world contract broken, entity skipped");
}

/// `position += velocity * delta` for every entity with both.
pub fn movement(world: &mut World) {
    let selection = match world.select::<(Position, Velocity)>() {
        Ok(selection) => selection,
        Err(err) => return contract_violation("movement", err),
    };
    let delta = world.clock().delta() as f32;

    for entity in &selection {
        if let Err(err) = move_entity(world, entity, delta) {
            contract_violation("movement", err);
        }
    }
}

fn move_entity(world: &mut World, entity: Entity, delta: f32) -> Result<(), EcsError> {
    let velocity = world.get::<Velocity>(entity)?.load();
    let mut position = world.get_mut::<Position>(entity)?;
    *position.x += velocity.x * delta;
    *position.y += velocity.y * delta;
    Ok(())
}

/// Accumulate experience from elapsed time and level players up.
///
/// Reaching the threshold resets experience to zero; any excess is dropped.
pub fn progression(world: &mut World) {
    let selection = match world.select::<(Player,)>() {
        Ok(selection) => selection,
        Err(err) => return contract_violation("progression", err),
    };
    let rules = world
        .resource::<ProgressionRules>()
        .cloned()
        .unwrap_or_default();
    let gained = world.clock().delta() / rules.millis_per_point;

    for entity in &selection {
        if let Err(err) = progress(world, entity, gained, &rules) {
            contract_violation("progression", err);
        }
    }
}

fn progress(
    world: &mut World,
    entity: Entity,
    gained: f64,
    rules: &ProgressionRules,
) -> Result<(), EcsError> {
    let player = world.get_mut::<Player>(entity)?;
    player.experience += gained;
    if player.experience >= rules.threshold {
        player.level += 1;
        player.experience = 0.0;
        debug!(%entity, name = %player.name, level = player.level, "level up");
    }
    Ok(())
}

/// Destroy every entity whose health has dropped to zero or below.
pub fn cull(world: &mut World) {
    let selection = match world.select::<(Health,)>() {
        Ok(selection) => selection,
        Err(err) => return contract_violation("cull", err),
    };

    for entity in &selection {
        let result = world.get::<Health>(entity).map(|health| health.0 <= 0.0);
        match result {
            Ok(true) => match world.destroy(entity) {
                Ok(()) => debug!(%entity, "culled"),
                Err(err) => contract_violation("cull", err),
            },
            Ok(false) => {}
            Err(err) => contract_violation("cull", err),
        }
    }
}
