//! Bullet system: steps bullet behaviors and does despawn bookkeeping.
//!
//! Outside the arena, a bullet's despawn countdown runs down by `dt` and
//! the bullet is removed when it reaches zero. Inside the arena, or with
//! despawn disabled, the countdown is held at its full value.

use barrage_core::components::{Bullet, Transform};

use crate::behaviors::bullets::{self, StepOutcome};
use crate::context::SimContext;
use crate::ecs::Family;
use crate::factories;

pub fn run(ctx: &mut SimContext, family: Family) {
    let dt = ctx.dt;
    let mut spawned = Vec::new();
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let mut bullet = *ctx.world.component::<Bullet>(id);

        let outcome = bullets::step(ctx, id, &mut bullet, &mut spawned);
        factories::build_all(ctx, &mut spawned);
        if outcome == StepOutcome::Remove || !ctx.world.is_alive(id) {
            ctx.remove(id);
            continue;
        }

        let position = ctx.world.component::<Transform>(id).position;
        if tick_despawn(&mut bullet, ctx.arena.contains_point(position), dt) {
            ctx.remove(id);
            continue;
        }
        *ctx.world.component_mut::<Bullet>(id) = bullet;
    }
}

/// Advance the off-screen countdown. Returns `true` when the bullet should
/// be removed.
pub fn tick_despawn(bullet: &mut Bullet, inside: bool, dt: f32) -> bool {
    if !bullet.despawns_off_screen() || inside {
        bullet.despawn_timer = bullet.despawn_time;
        return false;
    }
    bullet.despawn_timer -= dt;
    bullet.despawn_timer <= 0.0
}
