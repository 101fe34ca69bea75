//! Shared mutable state handed to every system.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_collision::Quadtree;
use barrage_core::components::{Health, Player, Transform};
use barrage_core::events::SimEvent;
use barrage_core::types::{EntityId, Rect, SimTime, Vec2};

use crate::ecs::World;
use crate::engine::SimConfig;

/// Everything a system may read or mutate during a tick. Owned by the
/// engine; systems receive it by `&mut` in registration order.
#[derive(Debug)]
pub struct SimContext {
    pub world: World,
    /// Broad-phase index, rebuilt by the collision system every tick.
    pub index: Quadtree<EntityId>,
    pub rng: ChaCha8Rng,
    /// Playfield bounds.
    pub arena: Rect,
    /// Seconds in the current tick.
    pub dt: f32,
    pub time: SimTime,
    pub score: u64,
    pub events: Vec<SimEvent>,
    pub player: Option<EntityId>,
    /// Set by the health system when the last life is lost.
    pub game_over: bool,
    /// Reusable broad-phase candidate buffer.
    pub candidates: Vec<EntityId>,
}

impl SimContext {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            world: World::new(),
            index: Quadtree::new(config.arena, config.quadtree_depth, config.quadtree_capacity),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            arena: config.arena,
            dt: 0.0,
            time: SimTime::default(),
            score: 0,
            events: Vec::new(),
            player: None,
            game_over: false,
            candidates: Vec::new(),
        }
    }

    /// Center of the player while it is alive and on the field.
    pub fn player_center(&self) -> Option<Vec2> {
        let id = self.player?;
        if self
            .world
            .get::<Health>(id)
            .is_some_and(|h| h.is_respawning())
        {
            return None;
        }
        self.world.get::<Transform>(id).map(Transform::center)
    }

    /// The player component, if the player is alive.
    pub fn player_state(&self) -> Option<&Player> {
        self.world.get::<Player>(self.player?)
    }

    /// Remove an entity, forgetting the player handle if it was the player.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if self.player == Some(id) {
            self.player = None;
        }
        self.world.remove_entity(id)
    }
}
