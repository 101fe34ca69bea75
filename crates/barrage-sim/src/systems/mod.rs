//! ECS systems that operate on the simulation world each tick.
//!
//! Every scheduled system has the signature `fn run(&mut SimContext, Family)`
//! and visits the entities matching the family it was registered with.
//! They do not own state; all state lives in components and the context.

pub mod boss_ai;
pub mod bullet;
pub mod collision;
pub mod health;
pub mod lifetime;
pub mod movement;
pub mod player_control;
pub mod snapshot;
pub mod spawner;
