use barrage_core::components::*;
use barrage_core::types::EntityId;

use super::entity::EntityAllocator;
use super::family::{Family, FamilyCursor};
use super::pool::{Pool, PoolStats, Poolable};

/// A component type the world knows how to store.
pub trait Component: Poolable + 'static {
    const FAMILY: Family;

    fn pool(world: &World) -> &Pool<Self>;
    fn pool_mut(world: &mut World) -> &mut Pool<Self>;
}

macro_rules! component {
    ($ty:ty, $field:ident, $family:ident) => {
        impl Component for $ty {
            const FAMILY: Family = Family::$family;

            fn pool(world: &World) -> &Pool<Self> {
                &world.$field
            }

            fn pool_mut(world: &mut World) -> &mut Pool<Self> {
                &mut world.$field
            }
        }
    };
}

component!(Transform, transforms, TRANSFORM);
component!(Movement, movements, MOVEMENT);
component!(Collider, colliders, COLLIDER);
component!(Health, healths, HEALTH);
component!(Bullet, bullets, BULLET);
component!(Ai, ais, AI);
component!(Spawner, spawners, SPAWNER);
component!(Lifetime, lifetimes, LIFETIME);
component!(Sprite, sprites, SPRITE);
component!(Player, players, PLAYER);
component!(Reward, rewards, REWARD);
component!(Marker, markers, MARKER);

/// Entity counts and per-pool occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub live: usize,
    pub created: u64,
    pub removed: u64,
    pub pools: Vec<PoolStats>,
}

/// Pooled ECS world.
/// Each component type has its own slot pool; each entity has a family
/// signature listing the component types attached to it.
#[derive(Debug)]
pub struct World {
    allocator: EntityAllocator,
    signatures: Vec<Family>,
    alive: Vec<bool>,
    live: usize,
    created: u64,
    removed: u64,

    // Component storage, one pool per component type
    transforms: Pool<Transform>,
    movements: Pool<Movement>,
    colliders: Pool<Collider>,
    healths: Pool<Health>,
    bullets: Pool<Bullet>,
    ais: Pool<Ai>,
    spawners: Pool<Spawner>,
    lifetimes: Pool<Lifetime>,
    sprites: Pool<Sprite>,
    players: Pool<Player>,
    rewards: Pool<Reward>,
    markers: Pool<Marker>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            signatures: Vec::new(),
            alive: Vec::new(),
            live: 0,
            created: 0,
            removed: 0,
            transforms: Pool::new("transform"),
            movements: Pool::new("movement"),
            colliders: Pool::new("collider"),
            healths: Pool::new("health"),
            bullets: Pool::new("bullet"),
            ais: Pool::new("ai"),
            spawners: Pool::new("spawner"),
            lifetimes: Pool::new("lifetime"),
            sprites: Pool::new("sprite"),
            players: Pool::new("player"),
            rewards: Pool::new("reward"),
            markers: Pool::new("marker"),
        }
    }

    /// Create an entity with no components.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        let idx = id.index as usize;
        if self.alive.len() <= idx {
            self.alive.resize(idx + 1, false);
            self.signatures.resize(idx + 1, Family::EMPTY);
        }
        self.alive[idx] = true;
        self.signatures[idx] = Family::EMPTY;
        self.live += 1;
        self.created += 1;
        id
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.allocator.is_alive(id) && self.alive.get(id.index as usize).copied().unwrap_or(false)
    }

    /// Attach `value`, replacing an existing component of the same type.
    /// Returns `false` for a dead handle.
    pub fn attach<T: Component>(&mut self, id: EntityId, value: T) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        T::pool_mut(self).insert(id.index, value);
        self.signatures[id.index as usize] = self.signatures[id.index as usize] | T::FAMILY;
        true
    }

    /// Attach a component built in place from a pooled slot, reusing any
    /// buffers a previous owner left behind.
    pub fn attach_with<T: Component>(&mut self, id: EntityId, init: impl FnOnce(&mut T)) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        T::pool_mut(self).insert_with(id.index, init);
        self.signatures[id.index as usize] = self.signatures[id.index as usize] | T::FAMILY;
        true
    }

    /// Remove one component, returning its slot to the pool.
    pub fn detach<T: Component>(&mut self, id: EntityId) -> bool {
        if !self.has::<T>(id) {
            return false;
        }
        T::pool_mut(self).release(id.index);
        let idx = id.index as usize;
        self.signatures[idx] = self.signatures[idx].without(T::FAMILY);
        true
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        if !self.is_alive(id) {
            return None;
        }
        T::pool(self).get(id.index)
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        if !self.is_alive(id) {
            return None;
        }
        T::pool_mut(self).get_mut(id.index)
    }

    /// Component a system's family guarantees. Panics when it is missing,
    /// which means the system is iterating the wrong family.
    #[track_caller]
    pub fn component<T: Component>(&self, id: EntityId) -> &T {
        match self.get::<T>(id) {
            Some(value) => value,
            None => panic!(
                "entity {id} has no {} component",
                std::any::type_name::<T>()
            ),
        }
    }

    #[track_caller]
    pub fn component_mut<T: Component>(&mut self, id: EntityId) -> &mut T {
        match self.get_mut::<T>(id) {
            Some(value) => value,
            None => panic!(
                "entity {id} has no {} component",
                std::any::type_name::<T>()
            ),
        }
    }

    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        self.matches(id, T::FAMILY)
    }

    /// Whether `id` is alive and carries every component in `family`.
    pub fn matches(&self, id: EntityId, family: Family) -> bool {
        self.is_alive(id) && self.signatures[id.index as usize].contains(family)
    }

    pub fn signature(&self, id: EntityId) -> Option<Family> {
        self.is_alive(id).then(|| self.signatures[id.index as usize])
    }

    /// Remove an entity immediately. Every component goes back to its pool
    /// reset, and the handle stops resolving. Returns `false` for a handle
    /// that was already dead.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index as usize;
        let sig = self.signatures[idx];
        let index = id.index;

        if sig.contains(Family::TRANSFORM) {
            self.transforms.release(index);
        }
        if sig.contains(Family::MOVEMENT) {
            self.movements.release(index);
        }
        if sig.contains(Family::COLLIDER) {
            self.colliders.release(index);
        }
        if sig.contains(Family::HEALTH) {
            self.healths.release(index);
        }
        if sig.contains(Family::BULLET) {
            self.bullets.release(index);
        }
        if sig.contains(Family::AI) {
            self.ais.release(index);
        }
        if sig.contains(Family::SPAWNER) {
            self.spawners.release(index);
        }
        if sig.contains(Family::LIFETIME) {
            self.lifetimes.release(index);
        }
        if sig.contains(Family::SPRITE) {
            self.sprites.release(index);
        }
        if sig.contains(Family::PLAYER) {
            self.players.release(index);
        }
        if sig.contains(Family::REWARD) {
            self.rewards.release(index);
        }
        if sig.contains(Family::MARKER) {
            self.markers.release(index);
        }

        self.signatures[idx] = Family::EMPTY;
        self.alive[idx] = false;
        self.allocator.deallocate(id);
        self.live -= 1;
        self.removed += 1;
        true
    }

    /// Cursor over every entity currently matching `family`.
    pub fn query(&self, family: Family) -> FamilyCursor {
        FamilyCursor::new(family, self.matching(family).collect())
    }

    /// First entity matching `family`, in index order.
    pub fn first(&self, family: Family) -> Option<EntityId> {
        self.matching(family).next()
    }

    fn matching(&self, family: Family) -> impl Iterator<Item = EntityId> + '_ {
        self.signatures
            .iter()
            .enumerate()
            .filter(move |(i, sig)| self.alive[*i] && sig.contains(family))
            .filter_map(|(i, _)| {
                let index = i as u32;
                self.allocator
                    .generation_of(index)
                    .map(|generation| EntityId::new(index, generation))
            })
    }

    pub fn entity_count(&self) -> usize {
        self.live
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            live: self.live,
            created: self.created,
            removed: self.removed,
            pools: vec![
                self.transforms.stats(),
                self.movements.stats(),
                self.colliders.stats(),
                self.healths.stats(),
                self.bullets.stats(),
                self.ais.stats(),
                self.spawners.stats(),
                self.lifetimes.stats(),
                self.sprites.stats(),
                self.players.stats(),
                self.rewards.stats(),
                self.markers.stats(),
            ],
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::types::Vec2;

    fn mover(world: &mut World, x: f32) -> EntityId {
        let e = world.create_entity();
        world.attach(e, Transform::centered(Vec2::new(x, 0.0), Vec2::ONE));
        world.attach(e, Movement::new(Vec2::X, 1.0));
        e
    }

    #[test]
    fn create_and_remove() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(world.is_alive(e));
        assert_eq!(world.entity_count(), 1);

        assert!(world.remove_entity(e));
        assert!(!world.is_alive(e));
        assert_eq!(world.entity_count(), 0);
        assert!(!world.remove_entity(e));
    }

    #[test]
    fn stale_handle_resolves_to_nothing() {
        let mut world = World::new();
        let old = mover(&mut world, 1.0);
        world.remove_entity(old);
        let new = mover(&mut world, 2.0);
        assert_eq!(old.index, new.index);

        assert!(world.get::<Transform>(old).is_none());
        assert!(!world.attach(old, Lifetime { timer: 1.0 }));
        assert_eq!(
            world.get::<Transform>(new).map(|t| t.center()),
            Some(Vec2::new(2.0, 0.0))
        );
    }

    #[test]
    fn removal_returns_components_to_pools() {
        let mut world = World::new();
        let e = mover(&mut world, 0.0);
        world.remove_entity(e);
        let stats = world.stats();
        let transforms = stats.pools.iter().find(|p| p.name == "transform");
        assert_eq!(transforms.map(|p| (p.live, p.free)), Some((0, 1)));

        mover(&mut world, 0.0);
        let stats = world.stats();
        let transforms = stats.pools.iter().find(|p| p.name == "transform");
        assert_eq!(transforms.map(|p| p.recycled), Some(1));
        assert_eq!(stats.created, 2);
        assert_eq!(stats.removed, 1);
    }

    #[test]
    fn detach_updates_family() {
        let mut world = World::new();
        let e = mover(&mut world, 0.0);
        let family = Family::TRANSFORM | Family::MOVEMENT;
        assert!(world.matches(e, family));
        assert!(world.detach::<Movement>(e));
        assert!(!world.matches(e, family));
        assert!(world.has::<Transform>(e));
        assert!(!world.detach::<Movement>(e));
    }

    #[test]
    fn cursor_skips_removed_and_ignores_created() {
        let mut world = World::new();
        let ids: Vec<EntityId> = (0..5).map(|i| mover(&mut world, i as f32)).collect();

        let mut cursor = world.query(Family::TRANSFORM | Family::MOVEMENT);
        let mut visited = Vec::new();
        while let Some(id) = cursor.next(&world) {
            visited.push(id);
            if id == ids[1] {
                // Remove a later entity and create two new ones mid-pass.
                world.remove_entity(ids[3]);
                mover(&mut world, 10.0);
                mover(&mut world, 11.0);
            }
        }
        assert_eq!(visited, vec![ids[0], ids[1], ids[2], ids[4]]);
        assert_eq!(world.query(Family::MOVEMENT).len(), 6);
    }

    #[test]
    fn cursor_skips_reused_index() {
        let mut world = World::new();
        let a = mover(&mut world, 0.0);
        let b = mover(&mut world, 1.0);

        let mut cursor = world.query(Family::TRANSFORM);
        let mut visited = Vec::new();
        while let Some(id) = cursor.next(&world) {
            visited.push(id);
            if id == a {
                world.remove_entity(b);
                // Reuses b's index with a new generation.
                let c = mover(&mut world, 5.0);
                assert_eq!(c.index, b.index);
            }
        }
        assert_eq!(visited, vec![a]);
    }

    #[test]
    #[should_panic(expected = "has no")]
    fn missing_component_panics() {
        let mut world = World::new();
        let e = world.create_entity();
        world.component::<Health>(e);
    }
}
