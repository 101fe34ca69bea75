//! Per-entity behavior dispatch.
//!
//! Behavior state lives in the components as plain enums (see
//! `barrage_core::behaviors`); the functions here step that state against
//! the world. New entities are requested as blueprints and built by the
//! calling system.

pub mod bullets;
pub mod contacts;
pub mod spawners;
