//! Kinematic integration system.
//!
//! Per tick: `speed += acceleration`, clamped to `max_speed`; then
//! `position += normal * speed` and `rotation += rotation_speed`, wrapped
//! into `[0, 360)`. The normal is used as given; a non-unit normal scales
//! the displacement.

use barrage_core::components::{Movement, Transform};

use crate::context::SimContext;
use crate::ecs::Family;

pub fn run(ctx: &mut SimContext, family: Family) {
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let movement = ctx.world.component_mut::<Movement>(id);
        integrate_speed(movement);
        let (step, spin) = (movement.normal * movement.speed, movement.rotation_speed);

        let transform = ctx.world.component_mut::<Transform>(id);
        transform.position += step;
        transform.rotate(spin);
    }
}

/// Apply acceleration and the speed cap.
pub fn integrate_speed(movement: &mut Movement) {
    movement.speed += movement.acceleration;
    if let Some(max) = movement.max_speed {
        movement.speed = movement.speed.min(max);
    }
}
