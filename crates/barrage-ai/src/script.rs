//! The boss script: which action comes next.
//!
//! The script cycles move, attack, recover. Attacks rotate through ring,
//! aimed fan, burst and laser. Below the enrage fraction the boss waits
//! less, moves faster and fires denser patterns.

use barrage_core::behaviors::{AttackAction, AttackPattern, BossAction, MoveAction};
use barrage_core::constants::*;
use barrage_core::types::{Rect, Vec2};
use rand::Rng;

use crate::actions::ActionContext;

/// Action for script position `step`.
pub fn next_action<R: Rng + ?Sized>(step: u32, ctx: &ActionContext, rng: &mut R) -> BossAction {
    let enraged = ctx.health_fraction < BOSS_ENRAGE_FRACTION;
    match step % 3 {
        0 => {
            let (wait, lerp) = if enraged {
                (BOSS_MOVE_WAIT * 0.5, BOSS_LERP_SPEED * 1.5)
            } else {
                (BOSS_MOVE_WAIT, BOSS_LERP_SPEED)
            };
            BossAction::Move(MoveAction::new(wait, destination(ctx.arena, rng), lerp))
        }
        1 => BossAction::Attack(attack((step / 3) % 4, enraged)),
        _ => BossAction::Idle {
            remaining: if enraged {
                BOSS_ATTACK_RECOVERY * 0.5
            } else {
                BOSS_ATTACK_RECOVERY
            },
        },
    }
}

/// Attack number `index` of the rotation.
pub fn attack(index: u32, enraged: bool) -> AttackAction {
    let extra = u8::from(enraged);
    match index {
        0 => AttackAction::new(
            AttackPattern::Ring {
                count: RING_COUNT + 6 * extra,
                waves: RING_WAVES + 2 * extra,
            },
            1,
            0.0,
        ),
        1 => AttackAction::new(
            AttackPattern::Fan {
                count: BOSS_FAN_COUNT + 2 * extra,
                spread: BOSS_FAN_SPREAD,
                speed: ENEMY_BULLET_SPEED,
            },
            3 + extra,
            0.4,
        ),
        2 => AttackAction::new(AttackPattern::Burst, 2 + extra, 0.6),
        _ => AttackAction::new(AttackPattern::Laser, 1, 0.0),
    }
}

/// Random boss destination in the upper band of the arena, far enough
/// from the walls that the whole body stays inside.
pub fn destination<R: Rng + ?Sized>(arena: Rect, rng: &mut R) -> Vec2 {
    let margin = BOSS_SIZE * 0.5;
    let min_x = arena.min.x + margin;
    let max_x = (arena.max.x - margin).max(min_x);
    let min_y = (arena.min.y + arena.height() * BOSS_ZONE_FLOOR).max(arena.min.y + margin);
    let max_y = (arena.max.y - margin).max(min_y);
    Vec2::new(rng.gen_range(min_x..=max_x), rng.gen_range(min_y..=max_y))
}
