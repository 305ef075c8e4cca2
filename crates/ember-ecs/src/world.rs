use std::any::{type_name, TypeId};
use std::collections::HashMap;

use ember_core::Clock;
use tracing::{trace, warn};

use crate::component::{Component, ComponentId, ErasedStorage, Mut, Ref, Signature};
use crate::entity::{Entity, EntityAllocator, DEFAULT_MAX_ENTITIES};
use crate::error::EcsError;
use crate::query::{ComponentSet, Selection};
use crate::resource::Resources;
use crate::storage::{Indexing, Storage};

struct ComponentColumn {
    name: &'static str,
    storage: Box<dyn ErasedStorage>,
}

/// Declares the component types of a [`World`] before it is built.
///
/// The set of component types is fixed once [`WorldBuilder::build`] returns.
pub struct WorldBuilder {
    max_entities: u32,
    clock: Clock,
    columns: Vec<(TypeId, ComponentColumn)>,
    resources: Resources,
}

impl WorldBuilder {
    /// Upper bound on simultaneously live entities.
    pub fn max_entities(mut self, max_entities: u32) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Initial clock state.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Declare component type `C` with the given indexing strategy.
    pub fn register<C: Component>(mut self, indexing: Indexing) -> Self {
        self.columns.push((
            TypeId::of::<C>(),
            ComponentColumn {
                name: type_name::<C>(),
                storage: Box::new(C::Storage::with_indexing(indexing)),
            },
        ));
        self
    }

    /// Seed a resource.
    pub fn resource<T: 'static + Send + Sync>(mut self, value: T) -> Self {
        self.resources.insert(value);
        self
    }

    pub fn build(self) -> Result<World, EcsError> {
        if self.columns.len() > Signature::MAX_COMPONENTS {
            return Err(EcsError::TooManyComponentTypes {
                max: Signature::MAX_COMPONENTS,
            });
        }

        let mut registry = HashMap::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());
        for (slot, (type_id, column)) in self.columns.into_iter().enumerate() {
            if registry.insert(type_id, ComponentId(slot as u8)).is_some() {
                return Err(EcsError::DuplicateComponent(column.name));
            }
            columns.push(column);
        }

        Ok(World {
            entities: EntityAllocator::with_capacity(self.max_entities),
            signatures: Vec::new(),
            registry,
            columns,
            clock: self.clock,
            resources: self.resources,
        })
    }
}

/// The central container. Owns all entities, components, the clock, and resources.
pub struct World {
    entities: EntityAllocator,
    /// Attached component types per entity index.
    signatures: Vec<Signature>,
    registry: HashMap<TypeId, ComponentId>,
    columns: Vec<ComponentColumn>,
    clock: Clock,
    resources: Resources,
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder {
            max_entities: DEFAULT_MAX_ENTITIES,
            clock: Clock::default(),
            columns: Vec::new(),
            resources: Resources::new(),
        }
    }

    // ---- Entity management ----

    /// Create a new entity with no components.
    pub fn create(&mut self) -> Result<Entity, EcsError> {
        let entity = self.entities.allocate()?;
        let idx = entity.index as usize;
        if idx >= self.signatures.len() {
            self.signatures.resize(idx + 1, Signature::EMPTY);
        }
        debug_assert!(self.signatures[idx].is_empty());
        trace!(%entity, "entity created");
        Ok(entity)
    }

    /// Destroy an entity, detaching all its components.
    ///
    /// Destroying a dead or never-created entity leaves the world untouched
    /// and reports [`EcsError::InvalidReference`].
    pub fn destroy(&mut self, entity: Entity) -> Result<(), EcsError> {
        if let Err(err) = self.entities.deallocate(entity) {
            warn!(%entity, "ignoring destroy of an entity that is not alive");
            return Err(err);
        }
        let signature = std::mem::take(&mut self.signatures[entity.index as usize]);
        for id in signature.iter() {
            self.columns[id.index()].storage.detach_erased(entity.index);
        }
        trace!(%entity, "entity destroyed");
        Ok(())
    }

    /// Check whether an entity is alive.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entities in ascending index order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    pub fn max_entities(&self) -> u32 {
        self.entities.capacity()
    }

    // ---- Component management ----

    /// The id `C` was registered under.
    pub fn component_id<C: Component>(&self) -> Result<ComponentId, EcsError> {
        self.registry
            .get(&TypeId::of::<C>())
            .copied()
            .ok_or(EcsError::UnregisteredComponent(type_name::<C>()))
    }

    /// Number of registered component types.
    pub fn component_count(&self) -> usize {
        self.columns.len()
    }

    /// Registered type name behind `id`.
    pub fn component_name(&self, id: ComponentId) -> Option<&'static str> {
        self.columns.get(id.index()).map(|c| c.name)
    }

    /// Typed access to the whole store of `C`.
    pub fn storage<C: Component>(&self) -> Result<&C::Storage, EcsError> {
        let id = self.component_id::<C>()?;
        self.columns[id.index()]
            .storage
            .as_any()
            .downcast_ref::<C::Storage>()
            .ok_or(EcsError::UnregisteredComponent(type_name::<C>()))
    }

    fn storage_mut<C: Component>(&mut self) -> Result<(ComponentId, &mut C::Storage), EcsError> {
        let id = self.component_id::<C>()?;
        self.columns[id.index()]
            .storage
            .as_any_mut()
            .downcast_mut::<C::Storage>()
            .map(|storage| (id, storage))
            .ok_or(EcsError::UnregisteredComponent(type_name::<C>()))
    }

    fn ensure_live(&self, entity: Entity) -> Result<(), EcsError> {
        if self.entities.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::InvalidReference(entity))
        }
    }

    /// Attach a component to an entity. Replaces any existing component of the same type.
    pub fn attach<C: Component>(&mut self, entity: Entity, component: C) -> Result<(), EcsError> {
        self.ensure_live(entity)?;
        let (id, storage) = self.storage_mut::<C>()?;
        storage.attach(entity.index, component);
        self.signatures[entity.index as usize].insert(id);
        Ok(())
    }

    /// Detach a component from an entity. Returns `true` if it was present.
    pub fn detach<C: Component>(&mut self, entity: Entity) -> Result<bool, EcsError> {
        self.ensure_live(entity)?;
        let (id, storage) = self.storage_mut::<C>()?;
        let was_attached = storage.detach(entity.index);
        self.signatures[entity.index as usize].remove(id);
        Ok(was_attached)
    }

    /// Check whether a live entity has a component of the given type.
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        match self.component_id::<C>() {
            Ok(id) => {
                self.entities.is_alive(entity)
                    && self.signatures[entity.index as usize].contains(id)
            }
            Err(_) => false,
        }
    }

    /// Get a shared view of a component on an entity.
    pub fn get<C: Component>(&self, entity: Entity) -> Result<Ref<'_, C>, EcsError> {
        self.ensure_live(entity)?;
        self.storage::<C>()?
            .get(entity.index)
            .ok_or(EcsError::NotAttached {
                entity,
                component: type_name::<C>(),
            })
    }

    /// Get an exclusive view of a component on an entity.
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Result<Mut<'_, C>, EcsError> {
        self.ensure_live(entity)?;
        let (_, storage) = self.storage_mut::<C>()?;
        storage.get_mut(entity.index).ok_or(EcsError::NotAttached {
            entity,
            component: type_name::<C>(),
        })
    }

    /// Attached component types of a live entity.
    pub fn signature(&self, entity: Entity) -> Option<Signature> {
        self.entities
            .is_alive(entity)
            .then(|| self.signatures[entity.index as usize])
    }

    // ---- Queries ----

    /// Select every live entity that has all of the components in `Q`.
    ///
    /// # Example
    /// ```ignore
    /// for entity in &world.select::<(Position, Velocity)>()? {
    ///     // ...
    /// }
    /// ```
    pub fn select<Q: ComponentSet>(&self) -> Result<Selection, EcsError> {
        let ids = Q::members()
            .into_iter()
            .map(|(type_id, name)| {
                self.registry
                    .get(&type_id)
                    .copied()
                    .ok_or(EcsError::UnregisteredComponent(name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.select_ids(&ids)
    }

    /// Select every live entity that has all of the given component types.
    ///
    /// The result lists entities in ascending index order; see [`Selection`]
    /// for how it relates to later changes to the world.
    pub fn select_ids(&self, ids: &[ComponentId]) -> Result<Selection, EcsError> {
        if ids.is_empty() {
            return Err(EcsError::InvalidQuery("a query needs at least one component type"));
        }
        if ids.iter().any(|id| id.index() >= self.columns.len()) {
            return Err(EcsError::InvalidQuery("component id not registered with this world"));
        }

        let required = Signature::from_ids(ids);
        let matches = self
            .entities
            .iter()
            .filter(|entity| self.signatures[entity.index as usize].contains_all(required))
            .inspect(|entity| {
                debug_assert!(
                    ids.iter()
                        .all(|id| self.columns[id.index()].storage.has_erased(entity.index)),
                    "signature of {entity} disagrees with component storage"
                );
            })
            .collect();
        Ok(Selection::new(matches))
    }

    // ---- Clock ----

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    // ---- Resources ----

    /// Insert a singleton resource.
    pub fn insert_resource<T: 'static + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.resources.insert(value)
    }

    /// Get an immutable reference to a resource.
    pub fn resource<T: 'static + Send + Sync>(&self) -> Option<&T> {
        self.resources.get::<T>()
    }

    /// Get a mutable reference to a resource.
    pub fn resource_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut T> {
        self.resources.get_mut::<T>()
    }

    /// Get a resource, inserting its default value if absent.
    pub fn resource_or_default<T: 'static + Send + Sync + Default>(&mut self) -> &mut T {
        self.resources.get_or_insert_with(T::default)
    }

    /// Remove a resource.
    pub fn remove_resource<T: 'static + Send + Sync>(&mut self) -> Option<T> {
        self.resources.remove::<T>()
    }
}

impl Default for World {
    /// An empty world with no component types.
    fn default() -> Self {
        World {
            entities: EntityAllocator::new(),
            signatures: Vec::new(),
            registry: HashMap::new(),
            columns: Vec::new(),
            clock: Clock::default(),
            resources: Resources::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use ember_core::Timestamp;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    crate::columnar_component! {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        struct Position {
            x: f32,
            y: f32,
        }
        storage = PositionColumns;
        view = PositionRef;
        view_mut = PositionMut;
    }

    crate::columnar_component! {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        struct Velocity {
            dx: f32,
            dy: f32,
        }
        storage = VelocityColumns;
        view = VelocityRef;
        view_mut = VelocityMut;
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Name(String);

    #[derive(Debug, Clone, PartialEq)]
    struct Health(f32);

    crate::row_component!(Name, Health);

    fn world() -> World {
        World::builder()
            .register::<Position>(Indexing::Sparse)
            .register::<Velocity>(Indexing::Dense { reserve: 64 })
            .register::<Name>(Indexing::Sparse)
            .register::<Health>(Indexing::Dense { reserve: 64 })
            .build()
            .unwrap()
    }

    #[test]
    fn create_and_destroy() {
        let mut world = world();
        let e = world.create().unwrap();
        assert!(world.is_live(e));
        assert_eq!(world.entity_count(), 1);
        world.destroy(e).unwrap();
        assert!(!world.is_live(e));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn new_entity_has_no_components() {
        let mut world = world();
        let e = world.create().unwrap();
        assert!(!world.has::<Position>(e));
        assert!(!world.has::<Velocity>(e));
        assert!(!world.has::<Name>(e));
        assert!(!world.has::<Health>(e));
        assert_eq!(world.signature(e), Some(Signature::EMPTY));
    }

    #[test]
    fn attach_get_detach_component() {
        let mut world = world();
        let e = world.create().unwrap();
        world.attach(e, Position { x: 1.0, y: 2.0 }).unwrap();
        world.attach(e, Name("one".to_string())).unwrap();

        assert_eq!(world.get::<Position>(e).unwrap().load(), Position { x: 1.0, y: 2.0 });
        assert_eq!(world.get::<Name>(e).unwrap(), &Name("one".to_string()));
        assert!(world.has::<Position>(e));
        assert!(world.detach::<Position>(e).unwrap());
        assert!(!world.detach::<Position>(e).unwrap());
        assert!(!world.has::<Position>(e));
        assert!(matches!(
            world.get::<Position>(e),
            Err(EcsError::NotAttached { .. })
        ));
    }

    #[test]
    fn component_mutation() {
        let mut world = world();
        let e = world.create().unwrap();
        world.attach(e, Position { x: 0.0, y: 0.0 }).unwrap();
        world.attach(e, Health(10.0)).unwrap();

        *world.get_mut::<Position>(e).unwrap().x = 5.0;
        world.get_mut::<Health>(e).unwrap().0 -= 4.0;

        assert_eq!(*world.get::<Position>(e).unwrap().x, 5.0);
        assert_eq!(world.get::<Health>(e).unwrap(), &Health(6.0));
    }

    #[test]
    fn reattach_overwrites() {
        let mut world = world();
        let e = world.create().unwrap();
        world.attach(e, Health(1.0)).unwrap();
        world.attach(e, Health(2.0)).unwrap();
        assert_eq!(world.get::<Health>(e).unwrap(), &Health(2.0));
        assert_eq!(world.storage::<Health>().unwrap().len(), 1);
    }

    #[test]
    fn destroy_detaches_everything() {
        let mut world = world();
        let e = world.create().unwrap();
        world.attach(e, Position { x: 1.0, y: 0.0 }).unwrap();
        world.attach(e, Velocity { dx: 1.0, dy: 0.0 }).unwrap();
        world.attach(e, Health(3.0)).unwrap();
        world.destroy(e).unwrap();

        assert!(!world.has::<Position>(e));
        assert!(!world.has::<Velocity>(e));
        assert!(!world.has::<Health>(e));
        assert!(world.storage::<Position>().unwrap().is_empty());
        assert!(world.storage::<Velocity>().unwrap().is_empty());
        assert!(world.select::<(Position,)>().unwrap().is_empty());
    }

    #[test]
    fn reused_identifier_sees_no_stale_data() {
        let mut world = world();
        let e1 = world.create().unwrap();
        world.attach(e1, Position { x: 1.0, y: 0.0 }).unwrap();
        world.attach(e1, Name("old".to_string())).unwrap();
        world.destroy(e1).unwrap();

        let e2 = world.create().unwrap();
        assert_eq!(e2.index(), e1.index());
        assert_ne!(e1, e2);
        assert!(!world.has::<Position>(e2));
        assert!(!world.has::<Name>(e2));
        assert!(matches!(world.get::<Position>(e2), Err(EcsError::NotAttached { .. })));
        assert_eq!(world.get::<Position>(e1).err(), Some(EcsError::InvalidReference(e1)));
    }

    #[test]
    fn destroy_dead_entity_is_reported_not_fatal() {
        let mut world = world();
        let e = world.create().unwrap();
        world.destroy(e).unwrap();
        assert_eq!(world.destroy(e), Err(EcsError::InvalidReference(e)));

        let never = Entity::from_raw(99, 0);
        assert_eq!(world.destroy(never), Err(EcsError::InvalidReference(never)));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn operations_on_dead_entities_fail() {
        let mut world = world();
        let e = world.create().unwrap();
        world.destroy(e).unwrap();
        assert_eq!(
            world.attach(e, Health(1.0)),
            Err(EcsError::InvalidReference(e))
        );
        assert_eq!(world.detach::<Health>(e), Err(EcsError::InvalidReference(e)));
        assert!(world.get_mut::<Health>(e).is_err());
    }

    #[test]
    fn capacity_is_reported() {
        let mut world = World::builder().max_entities(1).build().unwrap();
        world.create().unwrap();
        assert_eq!(world.create(), Err(EcsError::Capacity { max: 1 }));
    }

    #[test]
    fn unregistered_and_duplicate_components() {
        let mut world = World::builder()
            .register::<Health>(Indexing::Sparse)
            .build()
            .unwrap();
        let e = world.create().unwrap();
        assert!(matches!(
            world.attach(e, Name("x".into())),
            Err(EcsError::UnregisteredComponent(_))
        ));
        assert!(!world.has::<Name>(e));
        assert!(matches!(
            world.select::<(Name,)>(),
            Err(EcsError::UnregisteredComponent(_))
        ));

        let duplicate = World::builder()
            .register::<Health>(Indexing::Sparse)
            .register::<Health>(Indexing::Dense { reserve: 1 })
            .build();
        assert!(matches!(duplicate, Err(EcsError::DuplicateComponent(_))));
    }

    #[test]
    fn query_single_component() {
        let mut world = world();
        let e1 = world.create().unwrap();
        let e2 = world.create().unwrap();
        world.attach(e1, Position { x: 1.0, y: 0.0 }).unwrap();
        world.attach(e2, Position { x: 2.0, y: 0.0 }).unwrap();

        let results = world.select::<(Position,)>().unwrap();
        assert_eq!(results.as_slice(), &[e1, e2]);
    }

    #[test]
    fn query_is_an_intersection() {
        let mut world = world();
        let e1 = world.create().unwrap();
        let e2 = world.create().unwrap();
        let e3 = world.create().unwrap();
        world.attach(e1, Position { x: 1.0, y: 0.0 }).unwrap();
        world.attach(e1, Velocity { dx: 1.0, dy: 0.0 }).unwrap();
        world.attach(e2, Position { x: 2.0, y: 0.0 }).unwrap();
        world.attach(e3, Velocity { dx: 3.0, dy: 0.0 }).unwrap();

        let results = world.select::<(Position, Velocity)>().unwrap();
        assert_eq!(results.as_slice(), &[e1]);
    }

    #[test]
    fn empty_query_is_invalid() {
        let world = world();
        assert!(matches!(world.select_ids(&[]), Err(EcsError::InvalidQuery(_))));
        assert!(matches!(
            world.select_ids(&[ComponentId(40)]),
            Err(EcsError::InvalidQuery(_))
        ));
    }

    #[test]
    fn query_order_is_stable() {
        let mut world = world();
        let entities: Vec<_> = (0..8).map(|_| world.create().unwrap()).collect();
        for &e in entities.iter().rev() {
            world.attach(e, Health(1.0)).unwrap();
        }
        let first = world.select::<(Health,)>().unwrap();
        let second = world.select::<(Health,)>().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_slice(), entities.as_slice());
        assert_eq!(first.iter().count(), first.iter().count());
    }

    #[test]
    fn destroying_during_traversal_is_safe() {
        let mut world = world();
        let entities: Vec<_> = (0..6).map(|_| world.create().unwrap()).collect();
        for &e in &entities {
            world.attach(e, Health(1.0)).unwrap();
        }

        let selection = world.select::<(Health,)>().unwrap();
        let mut visited = Vec::new();
        for entity in &selection {
            visited.push(entity);
            // Destroy this entity and one that has not been visited yet.
            let _ = world.destroy(entity);
            if entity.index() == 1 {
                world.destroy(entities[4]).unwrap();
            }
            // Entities created mid-traversal are not part of the snapshot.
            let spawned = world.create().unwrap();
            world.attach(spawned, Health(1.0)).unwrap();
        }

        assert_eq!(visited, entities);
        assert!(!world.is_live(entities[4]));
        assert!(selection.iter().all(|e| !world.is_live(e)));
    }

    #[test]
    fn randomized_query_matches_brute_force_intersection() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut world = world();
        let mut live: Vec<Entity> = Vec::new();
        // Attached [Position, Velocity, Health], tracked outside the world.
        let mut model: HashMap<Entity, [bool; 3]> = HashMap::new();

        for _ in 0..2_000 {
            match rng.gen_range(0..10) {
                0..=1 => {
                    let e = world.create().unwrap();
                    live.push(e);
                    model.insert(e, [false; 3]);
                }
                2 if !live.is_empty() => {
                    let e = live.swap_remove(rng.gen_range(0..live.len()));
                    world.destroy(e).unwrap();
                    model.remove(&e);
                }
                3..=5 if !live.is_empty() => {
                    let e = live[rng.gen_range(0..live.len())];
                    let kind = rng.gen_range(0..3);
                    match kind {
                        0 => world.attach(e, Position::default()).unwrap(),
                        1 => world.attach(e, Velocity::default()).unwrap(),
                        _ => world.attach(e, Health(1.0)).unwrap(),
                    }
                    model.get_mut(&e).unwrap()[kind] = true;
                }
                6..=7 if !live.is_empty() => {
                    let e = live[rng.gen_range(0..live.len())];
                    let kind = rng.gen_range(0..3);
                    let was_attached = match kind {
                        0 => world.detach::<Position>(e).unwrap(),
                        1 => world.detach::<Velocity>(e).unwrap(),
                        _ => world.detach::<Health>(e).unwrap(),
                    };
                    let slot = &mut model.get_mut(&e).unwrap()[kind];
                    assert_eq!(was_attached, *slot);
                    *slot = false;
                }
                _ => {}
            }

            for (&e, &[position, velocity, health]) in &model {
                assert_eq!(world.has::<Position>(e), position);
                assert_eq!(world.has::<Velocity>(e), velocity);
                assert_eq!(world.has::<Health>(e), health);
                assert_eq!(world.storage::<Position>().unwrap().has(e.index), position);
                assert_eq!(world.storage::<Velocity>().unwrap().has(e.index), velocity);
                assert_eq!(world.storage::<Health>().unwrap().has(e.index), health);
            }

            let expected: BTreeSet<Entity> = model
                .iter()
                .filter(|(_, attached)| attached[0] && attached[1])
                .map(|(&e, _)| e)
                .collect();
            let selected: BTreeSet<Entity> =
                world.select::<(Position, Velocity)>().unwrap().into_iter().collect();
            assert_eq!(selected, expected);

            let expected3: BTreeSet<Entity> = model
                .iter()
                .filter(|(_, attached)| attached.iter().all(|&a| a))
                .map(|(&e, _)| e)
                .collect();
            let selected3: BTreeSet<Entity> = world
                .select::<(Position, Velocity, Health)>()
                .unwrap()
                .into_iter()
                .collect();
            assert_eq!(selected3, expected3);
            assert_eq!(world.entity_count(), model.len());
        }
    }

    #[test]
    fn world_owns_the_clock() {
        let mut world = world();
        world.clock_mut().tick(Timestamp::from_millis(5.0));
        world.clock_mut().tick(Timestamp::from_millis(21.0));
        assert_eq!(world.clock().delta(), 16.0);
        assert_eq!(world.clock().elapsed(), 16.0);
    }

    #[test]
    fn resource_insert_get() {
        let mut world = World::builder().resource(42u32).build().unwrap();
        assert_eq!(world.resource::<u32>(), Some(&42));
        *world.resource_mut::<u32>().unwrap() = 100;
        assert_eq!(world.resource::<u32>(), Some(&100));
        assert_eq!(*world.resource_or_default::<u64>(), 0);

        assert_eq!(world.remove_resource::<u32>(), Some(100));
        assert_eq!(world.resource::<u32>(), None);
        assert_eq!(world.remove_resource::<u32>(), None);
    }

    #[test]
    fn selection_membership_and_live_listing() {
        let mut world = world();
        let a = world.create().unwrap();
        let b = world.create().unwrap();
        let c = world.create().unwrap();
        world.attach(a, Health(1.0)).unwrap();
        world.attach(c, Health(1.0)).unwrap();
        world.destroy(b).unwrap();
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![a, c]);

        let selection = world.select::<(Health,)>().unwrap();
        assert!(selection.contains(a));
        assert!(!selection.contains(b));
        assert!(selection.contains(c));

        let reused = world.create().unwrap();
        assert_eq!(reused.index(), b.index());
        assert!(!selection.contains(reused));
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![a, reused, c]);
    }

    #[test]
    fn component_names_follow_registration() {
        let world = world();
        let id = world.component_id::<Health>().unwrap();
        assert!(world.component_name(id).unwrap().ends_with("Health"));
        assert_eq!(world.component_name(ComponentId(40)), None);
    }
}
