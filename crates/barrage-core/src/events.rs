//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Vec2};

/// Things that happened during a tick. Drained into each frame snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A hit landed.
    Damaged {
        entity: EntityId,
        amount: i32,
        remaining: i32,
    },
    /// A non-player entity died and was removed.
    Destroyed {
        entity: EntityId,
        archetype: Archetype,
        position: Vec2,
        points: u32,
    },
    /// A solid body was pushed out of another.
    Pushed { entity: EntityId, other: EntityId },
    PowerUpCollected { kind: PowerUpKind },
    /// The player died with lives to spare and is respawning.
    PlayerDown { lives_left: u32 },
    PlayerRespawned,
    BossAppeared,
    BossDefeated,
    /// The player lost the last life.
    GameOver { score: u64 },
}
