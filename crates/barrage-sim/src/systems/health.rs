//! Health system: clamps health, runs invincibility and respawn timers,
//! and resolves deaths.
//!
//! Per entity, in order:
//! 1. Clamp `current` into `[0, max]`.
//! 2. Count the invincibility timer down.
//! 3. While respawning, count the respawn timer down and restore the
//!    entity when it expires.
//! 4. On death: remove the entity and pay out its reward, or, for the
//!    player, spend a life (respawn) or end the game.

use barrage_core::components::*;
use barrage_core::enums::Archetype;
use barrage_core::events::SimEvent;
use barrage_core::types::{EntityId, Vec2};

use crate::context::SimContext;
use crate::ecs::Family;
use crate::factories::{self, player_spawn_point};

pub fn run(ctx: &mut SimContext, family: Family) {
    let dt = ctx.dt;
    let mut cursor = ctx.world.query(family);
    while let Some(id) = cursor.next(&ctx.world) {
        let health = ctx.world.component_mut::<Health>(id);
        health.current = health.current.clamp(0, health.max.max(0));
        health.invincibility_timer = (health.invincibility_timer - dt).max(0.0);

        if health.is_respawning() {
            health.respawn_timer -= dt;
            if health.respawn_timer <= 0.0 {
                respawn(ctx, id);
            }
            continue;
        }

        if health.is_dead() {
            if ctx.world.has::<Player>(id) {
                player_down(ctx, id);
            } else {
                destroy(ctx, id);
            }
        }
    }
}

/// Bring a respawning entity back at full health, briefly invincible.
fn respawn(ctx: &mut SimContext, id: EntityId) {
    let health = ctx.world.component_mut::<Health>(id);
    health.respawn_timer = 0.0;
    health.current = health.max;
    health.invincibility_timer = health.invincibility_duration;

    if let Some(sprite) = ctx.world.get_mut::<Sprite>(id) {
        sprite.hidden = false;
    }
    ctx.events.push(SimEvent::PlayerRespawned);
    tracing::debug!(entity = %id, "respawned");
}

fn player_down(ctx: &mut SimContext, id: EntityId) {
    let player = ctx.world.component_mut::<Player>(id);
    player.lives = player.lives.saturating_sub(1);
    let lives_left = player.lives;
    let respawn = ctx
        .world
        .get::<Health>(id)
        .and_then(|h| h.respawn_duration);

    match respawn {
        Some(duration) if lives_left > 0 => {
            let spawn = player_spawn_point(ctx.arena);
            let health = ctx.world.component_mut::<Health>(id);
            health.respawn_timer = duration;
            if let Some(transform) = ctx.world.get_mut::<Transform>(id) {
                transform.set_center(spawn);
            }
            if let Some(movement) = ctx.world.get_mut::<Movement>(id) {
                movement.speed = 0.0;
            }
            if let Some(sprite) = ctx.world.get_mut::<Sprite>(id) {
                sprite.hidden = true;
            }
            ctx.events.push(SimEvent::PlayerDown { lives_left });
            tracing::info!(lives_left, "player down");
        }
        _ => {
            let position = ctx.world.get::<Transform>(id).map(Transform::center);
            let particles = ctx.world.get::<Reward>(id).map_or(0, |r| r.particles);
            if let Some(position) = position {
                burst(ctx, position, particles);
            }
            ctx.remove(id);
            ctx.game_over = true;
            ctx.events.push(SimEvent::GameOver { score: ctx.score });
            tracing::info!(score = ctx.score, "game over");
        }
    }
}

/// Remove a dead entity, paying out its reward.
fn destroy(ctx: &mut SimContext, id: EntityId) {
    let archetype = ctx
        .world
        .get::<Marker>(id)
        .map_or(Archetype::default(), |m| m.archetype);
    let reward = ctx.world.get::<Reward>(id).copied().unwrap_or_default();
    let position = ctx
        .world
        .get::<Transform>(id)
        .map(Transform::center)
        .unwrap_or_default();

    ctx.score += u64::from(reward.points);
    burst(ctx, position, reward.particles);
    ctx.remove(id);

    ctx.events.push(SimEvent::Destroyed {
        entity: id,
        archetype,
        position,
        points: reward.points,
    });
    if archetype == Archetype::Boss {
        ctx.events.push(SimEvent::BossDefeated);
        tracing::info!(score = ctx.score, "boss defeated");
    }
}

fn burst(ctx: &mut SimContext, position: Vec2, count: u8) {
    if count == 0 {
        return;
    }
    let mut spawned = Vec::with_capacity(usize::from(count));
    factories::particle_burst(position, count, &mut ctx.rng, &mut spawned);
    factories::build_all(ctx, &mut spawned);
}
