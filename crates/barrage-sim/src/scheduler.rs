//! Fixed-order system scheduler.
//!
//! Each registered system runs exactly once per tick, in registration
//! order, over the family of entities it declares.

use crate::context::SimContext;
use crate::ecs::Family;
use crate::systems;

/// Signature shared by every system.
pub type SystemFn = fn(&mut SimContext, Family);

#[derive(Clone, Copy)]
pub struct SystemEntry {
    pub name: &'static str,
    /// Components an entity needs to be visited.
    pub family: Family,
    run: SystemFn,
}

#[derive(Clone, Default)]
pub struct Scheduler {
    systems: Vec<SystemEntry>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stage pipeline:
    /// 1. Player control
    /// 2. Spawners
    /// 3. Bullets
    /// 4. Movement
    /// 5. Collision
    /// 6. Boss AI
    /// 7. Health
    /// 8. Lifetime
    pub fn stage() -> Self {
        let mut scheduler = Self::new();
        scheduler
            .register(
                "player_control",
                Family::PLAYER | Family::TRANSFORM | Family::MOVEMENT,
                systems::player_control::run,
            )
            .register("spawner", Family::SPAWNER, systems::spawner::run)
            .register(
                "bullet",
                Family::BULLET | Family::TRANSFORM,
                systems::bullet::run,
            )
            .register(
                "movement",
                Family::TRANSFORM | Family::MOVEMENT,
                systems::movement::run,
            )
            .register(
                "collision",
                Family::TRANSFORM | Family::COLLIDER,
                systems::collision::run,
            )
            .register("boss_ai", Family::AI | Family::TRANSFORM, systems::boss_ai::run)
            .register("health", Family::HEALTH, systems::health::run)
            .register("lifetime", Family::LIFETIME, systems::lifetime::run);
        scheduler
    }

    pub fn register(&mut self, name: &'static str, family: Family, run: SystemFn) -> &mut Self {
        self.systems.push(SystemEntry { name, family, run });
        self
    }

    /// Run every system once, in order.
    pub fn run(&self, ctx: &mut SimContext) {
        for system in &self.systems {
            let _span = tracing::trace_span!("system", name = system.name).entered();
            (system.run)(ctx, system.family);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|s| s.name)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
