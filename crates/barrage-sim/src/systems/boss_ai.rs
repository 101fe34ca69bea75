//! Boss AI system: advances each boss's action queue and turns attack
//! emissions into bullets.

use barrage_ai::ActionContext;
use barrage_core::components::{Ai, Health, Transform};

use crate::behaviors::bullets;
use crate::context::SimContext;
use crate::ecs::Family;
use crate::factories;

pub fn run(ctx: &mut SimContext, family: Family) {
    let dt = ctx.dt;
    let mut spawned = Vec::new();
    let mut action_ctx = ActionContext {
        arena: ctx.arena,
        ..Default::default()
    };

    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let center = ctx.world.component::<Transform>(id).center();
        action_ctx.position = center;
        action_ctx.player = ctx.player_center();
        action_ctx.health_fraction = ctx.world.get::<Health>(id).map_or(1.0, Health::fraction);
        action_ctx.emissions.clear();

        let mut ai = std::mem::take(ctx.world.component_mut::<Ai>(id));
        barrage_ai::step(&mut ai, &mut action_ctx, &mut ctx.rng, dt);
        *ctx.world.component_mut::<Ai>(id) = ai;

        if action_ctx.position != center {
            ctx.world
                .component_mut::<Transform>(id)
                .set_center(action_ctx.position);
        }
        for emission in &action_ctx.emissions {
            bullets::from_emission(emission, &mut spawned);
        }
        factories::build_all(ctx, &mut spawned);
    }
}
