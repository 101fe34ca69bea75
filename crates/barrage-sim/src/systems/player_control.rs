//! Player control system: steering input to movement, arena clamping and
//! the fire button.
//!
//! The movement normal stays unit length. Near a wall the speed shrinks so
//! that the next integration step ends exactly on the boundary.

use barrage_core::components::{Health, Movement, Player, Transform};
use barrage_core::constants::PLAYER_SPEED;
use barrage_core::types::{Rect, Vec2};

use crate::behaviors::bullets;
use crate::context::SimContext;
use crate::ecs::Family;
use crate::factories;

pub fn run(ctx: &mut SimContext, family: Family) {
    let dt = ctx.dt;
    let mut spawned = Vec::new();
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let respawning = ctx.world.get::<Health>(id).is_some_and(Health::is_respawning);
        let transform = *ctx.world.component::<Transform>(id);
        let mut player = *ctx.world.component::<Player>(id);

        let (normal, speed) = if respawning {
            (Vec2::ZERO, 0.0)
        } else {
            steer(&transform, player.input, ctx.arena)
        };
        let movement = ctx.world.component_mut::<Movement>(id);
        movement.normal = normal;
        movement.speed = speed;

        player.fire_timer = (player.fire_timer - dt).max(0.0);
        if player.firing && !respawning && player.fire_timer <= 0.0 {
            let muzzle = transform.center() + Vec2::new(0.0, transform.size.y * 0.5);
            bullets::player_volley(muzzle, player.weapon_level, &mut spawned);
            player.fire_timer = player.fire_interval;
        }
        *ctx.world.component_mut::<Player>(id) = player;
        factories::build_all(ctx, &mut spawned);
    }
}

/// Movement for this tick from steering `input`, stopping at the walls.
pub fn steer(transform: &Transform, input: Vec2, arena: Rect) -> (Vec2, f32) {
    let input = input.clamp(Vec2::NEG_ONE, Vec2::ONE);
    let input = if input.length_squared() > 1.0 {
        input.normalize()
    } else {
        input
    };

    let center = transform.center();
    let half = transform.size * 0.5;
    let lo = arena.min + half;
    let hi = (arena.max - half).max(lo);
    let target = (center + input * PLAYER_SPEED).clamp(lo, hi);
    let delta = target - center;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        (Vec2::ZERO, 0.0)
    } else {
        (delta / distance, distance)
    }
}
