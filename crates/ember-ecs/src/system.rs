use std::any::type_name;

use tracing::trace_span;

use crate::world::World;

/// A system that operates on the world each tick.
pub trait System: Send + Sync {
    fn run(&mut self, world: &mut World);
}

/// Blanket implementation so closures and plain functions can be used as systems.
impl<F: FnMut(&mut World) + Send + Sync> System for F {
    fn run(&mut self, world: &mut World) {
        (self)(world);
    }
}

struct ScheduledSystem {
    name: &'static str,
    system: Box<dyn System>,
}

/// An ordered list of systems to run each tick.
///
/// Systems run one after another in the order they were added; a system never
/// starts before the previous one has returned.
#[derive(Default)]
pub struct SystemSchedule {
    systems: Vec<ScheduledSystem>,
}

impl SystemSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system to the end of the schedule, named after its type.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> &mut Self {
        self.add_named_system(type_name::<S>(), system)
    }

    /// Add a system to the end of the schedule under an explicit name.
    pub fn add_named_system<S: System + 'static>(
        &mut self,
        name: &'static str,
        system: S,
    ) -> &mut Self {
        self.systems.push(ScheduledSystem {
            name,
            system: Box::new(system),
        });
        self
    }

    /// Run all systems in order on the given world.
    pub fn run_all(&mut self, world: &mut World) {
        for scheduled in &mut self.systems {
            let _span = trace_span!("system", name = scheduled.name).entered();
            scheduled.system.run(world);
        }
    }

    /// System names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|s| s.name)
    }

    /// Number of systems in the schedule.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
