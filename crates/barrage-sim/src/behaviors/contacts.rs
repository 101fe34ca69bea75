//! Collision handler dispatch.
//!
//! The resolver calls [`dispatch`] with the entity being processed (the
//! owner) and the entity it touched. Handlers apply damage, pick up
//! power-ups and remove entities; any of these may invalidate either
//! handle, so callers re-check liveness afterwards.

use barrage_core::behaviors::CollisionHandler;
use barrage_core::components::{Bullet, Collider, Health, Player};
use barrage_core::constants::{PLAYER_MAX_WEAPON_LEVEL, SHIELD_DURATION};
use barrage_core::enums::{PowerUpKind, Team};
use barrage_core::events::SimEvent;
use barrage_core::types::EntityId;

use crate::context::SimContext;

/// Which handler callback to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    /// Overlap detected this tick.
    Enter,
    /// Continued overlap. Part of the handler contract; the resolver keeps
    /// no per-pair state, so it never raises this phase.
    While,
    /// The owner was just pushed out of a solid body.
    Exit,
}

pub fn dispatch(ctx: &mut SimContext, owner: EntityId, other: EntityId, phase: ContactPhase) {
    let Some(collider) = ctx.world.get::<Collider>(owner) else {
        return;
    };
    let (handler, team) = (collider.handler, collider.team);

    match phase {
        ContactPhase::Enter => enter(ctx, owner, other, handler, team),
        ContactPhase::While => {}
        ContactPhase::Exit => ctx.events.push(SimEvent::Pushed {
            entity: owner,
            other,
        }),
    }
}

fn enter(
    ctx: &mut SimContext,
    owner: EntityId,
    other: EntityId,
    handler: CollisionHandler,
    team: Team,
) {
    match handler {
        CollisionHandler::None => {}
        CollisionHandler::Projectile { pierce } => {
            if !is_target(ctx, team, other) {
                return;
            }
            let damage = ctx
                .world
                .get::<Bullet>(owner)
                .map_or(1, |b| b.damage.ceil() as i32);
            hurt(ctx, other, damage);
            if !pierce {
                ctx.remove(owner);
            }
        }
        CollisionHandler::Contact { damage } => {
            if is_target(ctx, team, other) {
                hurt(ctx, other, damage);
            }
        }
        CollisionHandler::PowerUp(kind) => {
            if ctx.world.has::<Player>(other) && is_target_alive(ctx, other) {
                apply_powerup(ctx, other, kind);
                ctx.events.push(SimEvent::PowerUpCollected { kind });
                ctx.remove(owner);
            }
        }
    }
}

/// Opposing team, damageable, and on the field.
fn is_target(ctx: &SimContext, team: Team, other: EntityId) -> bool {
    ctx.world
        .get::<Collider>(other)
        .is_some_and(|c| team.opposes(c.team))
        && is_target_alive(ctx, other)
}

fn is_target_alive(ctx: &SimContext, other: EntityId) -> bool {
    ctx.world
        .get::<Health>(other)
        .is_some_and(|h| !h.is_respawning() && !h.is_dead())
}

fn hurt(ctx: &mut SimContext, target: EntityId, amount: i32) {
    let Some(health) = ctx.world.get_mut::<Health>(target) else {
        return;
    };
    if health.apply_damage(amount) {
        let remaining = health.current;
        ctx.events.push(SimEvent::Damaged {
            entity: target,
            amount,
            remaining,
        });
    }
}

fn apply_powerup(ctx: &mut SimContext, player: EntityId, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Heal => {
            if let Some(health) = ctx.world.get_mut::<Health>(player) {
                health.current = (health.current + 1).min(health.max);
            }
        }
        PowerUpKind::WeaponUp => {
            if let Some(state) = ctx.world.get_mut::<Player>(player) {
                state.weapon_level = (state.weapon_level + 1).min(PLAYER_MAX_WEAPON_LEVEL);
            }
        }
        PowerUpKind::Shield => {
            if let Some(health) = ctx.world.get_mut::<Health>(player) {
                health.invincibility_timer = health.invincibility_timer.max(SHIELD_DURATION);
            }
        }
    }
}
