//! Frame snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime, Vec2};

/// Everything the rendering collaborator needs after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// World items ordered by z-index, followed by GUI items ordered by z-index.
    pub draw_list: Vec<DrawItem>,
    pub hud: HudView,
    pub events: Vec<SimEvent>,
}

/// One visual layer of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub entity: EntityId,
    pub kind: VisualKind,
    pub position: Vec2,
    pub origin: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub z_index: i32,
    pub scale: Vec2,
    pub alpha: f32,
    pub gui: bool,
}

/// Heads-up display values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub lives: u32,
    pub health: i32,
    pub weapon_level: u8,
    /// Boss health fraction while a boss is alive.
    pub boss_health: Option<f32>,
    pub entity_count: usize,
}
