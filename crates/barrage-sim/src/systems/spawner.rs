//! Spawner system: fires expired spawner timers.
//!
//! `timer -= dt`; on expiry the spawner kind produces blueprints, they are
//! built immediately, and the timer resets to a uniform random value in
//! `[min_interval, max_interval]`. Spawners with a firing budget remove
//! their own entity once it runs out.

use rand::Rng;

use barrage_core::components::{Spawner, Transform};

use crate::behaviors::spawners::{self, SpawnContext};
use crate::context::SimContext;
use crate::ecs::Family;
use crate::factories;

pub fn run(ctx: &mut SimContext, family: Family) {
    let dt = ctx.dt;
    let mut spawned = Vec::new();
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let mut spawner = *ctx.world.component::<Spawner>(id);
        spawner.timer -= dt;
        if spawner.timer > 0.0 {
            *ctx.world.component_mut::<Spawner>(id) = spawner;
            continue;
        }

        let spawn_ctx = SpawnContext {
            origin: ctx
                .world
                .get::<Transform>(id)
                .map_or(ctx.arena.center(), Transform::center),
            player: ctx.player_center(),
            arena: ctx.arena,
        };
        spawners::fire(&spawner.kind, &spawn_ctx, &mut ctx.rng, &mut spawned);
        tracing::debug!(entity = %id, kind = ?spawner.kind, count = spawned.len(), "spawner fired");
        factories::build_all(ctx, &mut spawned);

        spawner.timer = next_interval(&mut ctx.rng, spawner.min_interval, spawner.max_interval);
        if let Some(remaining) = spawner.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                ctx.remove(id);
                continue;
            }
        }
        if let Some(slot) = ctx.world.get_mut::<Spawner>(id) {
            *slot = spawner;
        }
    }
}

/// Uniform random interval; a degenerate range yields `min`.
pub fn next_interval<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
