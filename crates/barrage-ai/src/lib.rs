//! Boss behavior for BARRAGE.
//!
//! A boss carries a queue of timed actions. Each tick the front action
//! advances once; when it reports completion it is dequeued, and an empty
//! queue asks the boss script for the next action.
//! No ECS dependency; operates on plain data.

pub mod actions;
pub mod scheduler;
pub mod script;

pub use actions::{Action, ActionContext};
pub use scheduler::step;

#[cfg(test)]
mod tests;
