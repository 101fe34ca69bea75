//! Stepping of individual boss actions.
//!
//! Every action exposes the same `advance(ctx, dt) -> finished` contract.
//! Actions read and move the boss through [`ActionContext::position`] and
//! request bullets through [`ActionContext::emissions`].

use std::f32::consts::FRAC_PI_2;

use barrage_core::behaviors::{AttackAction, BossAction, Emission, MoveAction};
use barrage_core::types::{Rect, Vec2};

/// What an action sees of the world for one tick.
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    /// Boss center; Move actions write it back.
    pub position: Vec2,
    /// Player center, if a player is alive.
    pub player: Option<Vec2>,
    pub arena: Rect,
    /// Boss health as a fraction of its maximum.
    pub health_fraction: f32,
    /// Bullets requested this tick.
    pub emissions: Vec<Emission>,
}

impl ActionContext {
    /// Unit direction from the boss toward the player, straight down when
    /// there is no player to aim at.
    pub fn aim(&self) -> Vec2 {
        self.player
            .map(|p| (p - self.position).normalize_or_zero())
            .filter(|d| *d != Vec2::ZERO)
            .unwrap_or(Vec2::NEG_Y)
    }
}

/// One timed unit of boss behavior.
pub trait Action {
    /// Advance by `dt` seconds. Returns `true` once the action is complete.
    fn advance(&mut self, ctx: &mut ActionContext, dt: f32) -> bool;
}

/// Sine ease-out over `[0, 1]`: fast start, gentle arrival, exact endpoints.
pub fn ease_out_sine(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else if t <= 0.0 {
        0.0
    } else {
        (t * FRAC_PI_2).sin()
    }
}

impl Action for MoveAction {
    fn advance(&mut self, ctx: &mut ActionContext, dt: f32) -> bool {
        if !self.moving {
            self.wait -= dt;
            if self.wait <= 0.0 {
                self.start = ctx.position;
                self.moving = true;
            }
            return false;
        }

        self.progress = (self.progress + dt * self.lerp_speed).clamp(0.0, 1.0);
        if self.progress >= 1.0 {
            ctx.position = self.target;
            return true;
        }
        ctx.position = self.start.lerp(self.target, ease_out_sine(self.progress));
        false
    }
}

impl Action for AttackAction {
    fn advance(&mut self, ctx: &mut ActionContext, dt: f32) -> bool {
        if self.volleys == 0 {
            return true;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            let emission = Emission {
                pattern: self.pattern,
                origin: ctx.position,
                aim: ctx.aim(),
            };
            ctx.emissions.push(emission);
            self.volleys -= 1;
            self.timer = self.interval;
        }
        self.volleys == 0
    }
}

impl Action for BossAction {
    fn advance(&mut self, ctx: &mut ActionContext, dt: f32) -> bool {
        match self {
            BossAction::Move(action) => action.advance(ctx, dt),
            BossAction::Attack(action) => action.advance(ctx, dt),
            BossAction::Idle { remaining } => {
                *remaining -= dt;
                *remaining <= 0.0
            }
        }
    }
}
