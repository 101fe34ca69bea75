//! Lifetime system: counts timers down and removes expired entities.

use barrage_core::components::Lifetime;

use crate::context::SimContext;
use crate::ecs::Family;

pub fn run(ctx: &mut SimContext, family: Family) {
    let dt = ctx.dt;
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let lifetime = ctx.world.component_mut::<Lifetime>(id);
        lifetime.timer -= dt;
        if lifetime.timer <= 0.0 {
            ctx.remove(id);
        }
    }
}
