//! What each spawner kind produces when its timer expires.

use rand::Rng;

use barrage_core::behaviors::SpawnerKind;
use barrage_core::constants::*;
use barrage_core::enums::{PowerUpKind, Team};
use barrage_core::types::{Rect, Vec2};

use crate::behaviors::bullets::homing_shot;
use crate::factories::{Blueprint, BulletSpec};

/// What a spawner sees when it fires.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    /// Center of the spawner's own entity, or the arena center for
    /// free-standing spawners.
    pub origin: Vec2,
    pub player: Option<Vec2>,
    pub arena: Rect,
}

/// Append the blueprints one firing of `kind` produces. May produce nothing.
pub fn fire<R: Rng + ?Sized>(
    kind: &SpawnerKind,
    ctx: &SpawnContext,
    rng: &mut R,
    out: &mut Vec<Blueprint>,
) {
    match *kind {
        SpawnerKind::EnemyWave { count } => enemy_wave(count, ctx.arena, rng, out),
        SpawnerKind::PowerUpDrop => {
            let kind = match rng.gen_range(0..3) {
                0 => PowerUpKind::Heal,
                1 => PowerUpKind::WeaponUp,
                _ => PowerUpKind::Shield,
            };
            let margin = POWERUP_SIZE;
            let min_x = ctx.arena.min.x + margin;
            let max_x = (ctx.arena.max.x - margin).max(min_x);
            let x = rng.gen_range(min_x..=max_x);
            out.push(Blueprint::PowerUp {
                kind,
                center: Vec2::new(x, ctx.arena.max.y - margin),
            });
        }
        SpawnerKind::Boss => {
            let center = Vec2::new(ctx.arena.center().x, ctx.arena.max.y - BOSS_SIZE * 0.75);
            out.push(Blueprint::Boss { center });
            out.push(Blueprint::Banner);
        }
        SpawnerKind::AimedShot {
            speed,
            homing_chance,
        } => {
            let Some(player) = ctx.player else {
                return;
            };
            let direction = (player - ctx.origin).normalize_or_zero();
            if direction == Vec2::ZERO {
                return;
            }
            let spec = if rng.gen_bool(f64::from(homing_chance.clamp(0.0, 1.0))) {
                homing_shot(Team::Enemy, ctx.origin, direction, speed)
            } else {
                BulletSpec::straight(Team::Enemy, ctx.origin, direction, speed)
            };
            out.push(Blueprint::Bullet(spec));
        }
    }
}

/// A row of enemies entering just above the top edge, one per lane.
fn enemy_wave<R: Rng + ?Sized>(count: u8, arena: Rect, rng: &mut R, out: &mut Vec<Blueprint>) {
    let lane = arena.width() / f32::from(count.saturating_add(1));
    let jitter = lane * 0.25;
    for i in 0..count {
        let x = arena.min.x + lane * f32::from(i + 1) + rng.gen_range(-jitter..=jitter);
        let drift = rng.gen_range(-0.3..=0.3);
        out.push(Blueprint::Enemy {
            center: Vec2::new(x, arena.max.y + ENEMY_SIZE * 0.5),
            heading: Vec2::new(drift, -1.0),
            fire_delay: rng.gen_range(ENEMY_FIRE_MIN..=ENEMY_FIRE_MAX),
        });
    }
}
