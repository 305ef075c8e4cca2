use std::sync::Arc;

use ember_core::Timestamp;
use ember_ecs::{SystemSchedule, World};
use parking_lot::Mutex;
use tracing::trace;

use crate::systems;

/// A simulation shared between a driver and anything inspecting it.
///
/// Whoever holds the lock has exclusive access to the world, so a tick never
/// overlaps another tick or an outside read.
pub type SharedSimulation = Arc<Mutex<Simulation>>;

/// A world plus the ordered systems that advance it.
pub struct Simulation {
    world: World,
    schedule: SystemSchedule,
}

impl Simulation {
    pub fn new(world: World, schedule: SystemSchedule) -> Self {
        Self { world, schedule }
    }

    /// Movement, then progression, then cull.
    pub fn reference_schedule() -> SystemSchedule {
        let mut schedule = SystemSchedule::new();
        schedule
            .add_named_system("movement", systems::movement)
            .add_named_system("progression", systems::progression)
            .add_named_system("cull", systems::cull);
        schedule
    }

    pub fn with_reference_systems(world: World) -> Self {
        Self::new(world, Self::reference_schedule())
    }

    /// One tick: advance the clock to `now`, then run every system in order.
    pub fn tick(&mut self, now: Timestamp) {
        self.world.clock_mut().tick(now);
        trace!(
            tick = self.world.clock().ticks(),
            delta = self.world.clock().delta(),
            "tick"
        );
        self.schedule.run_all(&mut self.world);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn schedule(&self) -> &SystemSchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut SystemSchedule {
        &mut self.schedule
    }

    pub fn into_shared(self) -> SharedSimulation {
        Arc::new(Mutex::new(self))
    }
}
