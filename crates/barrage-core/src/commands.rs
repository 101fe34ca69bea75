//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Build the stage and start simulating.
    StartStage,
    /// Set the steering input; each axis is clamped to `[-1, 1]`.
    Steer { x: f32, y: f32 },
    /// Hold or release the fire button.
    SetFiring { firing: bool },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
