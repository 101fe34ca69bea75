//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Overall simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine created, stage not started yet.
    #[default]
    Idle,
    Active,
    Paused,
    /// The player lost the last life.
    GameOver,
}

/// Side an entity fights for. Damage only flows between `Player` and `Enemy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
    #[default]
    Neutral,
}

impl Team {
    /// Whether damage flows from `self` to `other`.
    pub fn opposes(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Player, Team::Enemy) | (Team::Enemy, Team::Player)
        )
    }
}

/// Factory archetype an entity was assembled from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Player,
    Bullet,
    Enemy,
    Boss,
    PowerUp,
    #[default]
    Particle,
    Spawner,
    Banner,
}

/// High-level boss AI state. Callers branch on it; the AI component does not
/// enforce transitions beyond the scheduler loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// No action queued; the script picks the next one.
    #[default]
    Scheduling,
    /// A movement action was just queued.
    SchedulingMove,
    /// The front action is advancing.
    Processing,
    /// The front action is a move in its interpolation phase.
    Moving,
}

/// Power-up effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restore one point of health.
    #[default]
    Heal,
    /// Raise the weapon level.
    WeaponUp,
    /// Temporary invincibility.
    Shield,
}

/// Visual asset the renderer should draw for a sprite layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    Player,
    PlayerShot,
    EnemyShot,
    HomingShot,
    BurstShell,
    Laser,
    RingEmitter,
    Enemy,
    Boss,
    PowerUp(PowerUpKind),
    #[default]
    Spark,
    BossWarning,
}
