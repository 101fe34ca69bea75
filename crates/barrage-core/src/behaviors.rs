//! Per-entity behavior data: collision handlers, bullet behaviors, spawner
//! kinds and boss actions.
//!
//! Each behavior is a variant of a closed enum carrying its own state struct.
//! The logic that steps these lives in `barrage-sim` (bullets, spawners,
//! contacts) and `barrage-ai` (boss actions).

use serde::{Deserialize, Serialize};

use crate::enums::PowerUpKind;
use crate::types::{EntityId, Vec2};

// ---- Collision handlers ----

/// Reaction of a collider's owner when it touches another collider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum CollisionHandler {
    /// No reaction; the body only takes part in solid separation.
    #[default]
    None,
    /// Damage an opposing entity by the owner's `Bullet::damage`, then
    /// remove the owner unless it pierces.
    Projectile { pierce: bool },
    /// Damage an opposing entity on every tick of overlap.
    Contact { damage: i32 },
    /// Grant a power-up to a player entity and remove the owner.
    PowerUp(PowerUpKind),
}

// ---- Bullets ----

/// Step logic attached to a bullet. `Straight` bullets have no handler and
/// only take part in despawn bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum BulletBehavior {
    #[default]
    Straight,
    Homing(HomingState),
    Burst(BurstState),
    Laser(LaserState),
    Ring(RingState),
}

/// Steers toward a target for a limited time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HomingState {
    /// Locked target; reacquired when missing or removed.
    pub target: Option<EntityId>,
    /// Maximum heading change per tick (degrees).
    pub turn_rate: f32,
    /// Seconds of steering left.
    pub seek_remaining: f32,
}

/// Shell that splits into a fan of straight pellets when its fuse runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BurstState {
    pub fuse: f32,
    pub pellets: u8,
    /// Total fan angle (degrees).
    pub spread: f32,
    pub pellet_speed: f32,
}

/// Beam that charges, fires and fades. The bullet's `state` counter holds
/// the phase: 0 charging, 1 firing, 2 fading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LaserState {
    /// Seconds left in the current phase.
    pub timer: f32,
    pub length: f32,
    pub width: f32,
}

/// Stationary or drifting emitter that fires radial waves. The bullet's
/// `state` counter holds the number of waves already fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RingState {
    pub interval: f32,
    pub timer: f32,
    pub count: u8,
    pub waves: u8,
    /// Heading offset added after each wave (degrees).
    pub spin: f32,
    /// Current heading offset (degrees).
    pub offset: f32,
    pub speed: f32,
}

// ---- Spawners ----

/// What a spawner produces when its timer expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SpawnerKind {
    /// A row of enemies entering from the top edge.
    EnemyWave { count: u8 },
    /// One random power-up drifting down from the top edge.
    #[default]
    PowerUpDrop,
    /// The stage boss.
    Boss,
    /// An enemy gun: one bullet from the owner toward the player.
    AimedShot { speed: f32, homing_chance: f32 },
}

// ---- Boss actions ----

/// One timed unit of boss behavior. Advanced once per tick until it reports
/// completion, then dequeued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossAction {
    Move(MoveAction),
    Attack(AttackAction),
    Idle { remaining: f32 },
}

/// Wait, then ease from the position at activation to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveAction {
    /// Seconds left before the move starts.
    pub wait: f32,
    pub target: Vec2,
    /// Captured when the wait ends.
    pub start: Vec2,
    /// Interpolation parameter in `[0, 1]`.
    pub progress: f32,
    /// Parameter gained per second.
    pub lerp_speed: f32,
    pub moving: bool,
}

impl MoveAction {
    pub fn new(wait: f32, target: Vec2, lerp_speed: f32) -> Self {
        Self {
            wait,
            target,
            start: Vec2::ZERO,
            progress: 0.0,
            lerp_speed,
            moving: false,
        }
    }
}

/// Fire `volleys` emissions of `pattern`, `interval` seconds apart. The first
/// volley goes out on the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackAction {
    pub pattern: AttackPattern,
    pub volleys: u8,
    pub interval: f32,
    pub timer: f32,
}

impl AttackAction {
    pub fn new(pattern: AttackPattern, volleys: u8, interval: f32) -> Self {
        Self {
            pattern,
            volleys,
            interval,
            timer: 0.0,
        }
    }
}

/// Bullet pattern a boss attack emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackPattern {
    /// A ring emitter at the boss position.
    Ring { count: u8, waves: u8 },
    /// An aimed fan of straight bullets.
    Fan { count: u8, spread: f32, speed: f32 },
    /// One burst shell aimed at the player.
    Burst,
    /// A laser pointed at the player.
    Laser,
}

/// Request to create bullets, produced by boss actions and turned into
/// entities by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    pub pattern: AttackPattern,
    pub origin: Vec2,
    /// Unit direction toward the aim point.
    pub aim: Vec2,
}
