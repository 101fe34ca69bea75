//! Per-boss action queue driver.

use barrage_core::behaviors::BossAction;
use barrage_core::components::Ai;
use barrage_core::enums::AiState;
use rand::Rng;

use crate::actions::{Action, ActionContext};
use crate::script;

/// Run one tick of a boss's action queue.
///
/// An empty queue is refilled from the boss script and nothing advances on
/// that tick. Otherwise the front action advances once and is popped when
/// it reports completion. Returns `true` when an action finished.
pub fn step<R: Rng + ?Sized>(ai: &mut Ai, ctx: &mut ActionContext, rng: &mut R, dt: f32) -> bool {
    let Some(front) = ai.queue.front_mut() else {
        let action = script::next_action(ai.script_step, ctx, rng);
        tracing::debug!(step = ai.script_step, ?action, "boss action scheduled");
        ai.state = match action {
            BossAction::Move(_) => AiState::SchedulingMove,
            _ => AiState::Scheduling,
        };
        ai.script_step = ai.script_step.wrapping_add(1);
        ai.queue.push_back(action);
        return false;
    };

    let finished = front.advance(ctx, dt);
    ai.state = match front {
        BossAction::Move(m) if m.moving => AiState::Moving,
        _ => AiState::Processing,
    };

    if finished {
        ai.queue.pop_front();
        ai.state = AiState::Scheduling;
    }
    finished
}
