//! Core types and definitions for the BARRAGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity handles, geometry, components, behavior data, commands, events,
//! frame snapshots, constants and the leaderboard file format.
//! It has no dependency on the ECS runtime.

pub mod behaviors;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod leaderboard;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
