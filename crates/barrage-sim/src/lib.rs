//! Simulation engine for BARRAGE.
//!
//! Owns the pooled entity/component store, runs systems in a fixed order
//! each tick, and produces `FrameSnapshot`s for the renderer.

pub mod behaviors;
pub mod context;
pub mod ecs;
pub mod engine;
pub mod factories;
pub mod scheduler;
pub mod systems;

pub use barrage_core as core;
pub use context::SimContext;
pub use engine::{SimConfig, SimulationEngine};
pub use scheduler::Scheduler;
