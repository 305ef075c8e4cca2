//! The demo population: one hero plus a crowd of seeded random wanderers.

use anyhow::{Context, Result};
use ember_ecs::{Entity, World};
use ember_sim::{Health, Player, Position, SimulationConfig, Velocity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

pub fn populate(world: &mut World, config: &SimulationConfig) -> Result<Entity> {
    let hero = world.create().context("Failed to create the hero")?;
    world.attach(hero, Position { x: 0.0, y: 0.0 })?;
    world.attach(hero, Velocity { x: 1.23, y: 1.23 })?;
    world.attach(hero, Player::new("Hero"))?;
    world.attach(hero, Health(100.0))?;

    let mut rng = StdRng::seed_from_u64(config.demo.seed);
    for _ in 0..config.demo.wanderers {
        let wanderer = world.create().context("Failed to create a wanderer")?;
        world.attach(
            wanderer,
            Position {
                x: rng.gen_range(-100.0..100.0),
                y: rng.gen_range(-100.0..100.0),
            },
        )?;
        world.attach(
            wanderer,
            Velocity {
                x: rng.gen_range(-0.05..0.05),
                y: rng.gen_range(-0.05..0.05),
            },
        )?;
        // Some wanderers start depleted and are culled on the first tick.
        world.attach(wanderer, Health(rng.gen_range(-10.0f32..50.0).max(0.0)))?;
    }

    info!(
        entities = world.entity_count(),
        wanderers = config.demo.wanderers,
        "Demo world populated"
    );
    Ok(hero)
}

/// Log where the hero and the surviving wanderers ended up.
pub fn report(world: &World, hero: Entity) {
    let clock = world.clock();
    info!(
        ticks = clock.ticks(),
        elapsed_ms = clock.elapsed(),
        live = world.entity_count(),
        "Simulation finished"
    );

    match (world.get::<Player>(hero), world.get::<Position>(hero)) {
        (Ok(player), Ok(position)) => info!(
            name = %player.name,
            level = player.level,
            experience = player.experience,
            x = *position.x,
            y = *position.y,
            "Hero"
        ),
        _ => info!("Hero did not survive"),
    }
}
