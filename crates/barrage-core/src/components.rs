//! Component data attached to entities.
//!
//! Components are plain data. Game logic lives in systems; the few methods
//! here are small invariant-keeping helpers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::behaviors::{BossAction, BulletBehavior, CollisionHandler, SpawnerKind};
use crate::constants::DESPAWN_DISABLED;
use crate::enums::*;
use crate::types::{wrap_degrees, ConvexPolygon, Vec2};

/// Placement of an entity in the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Lower-left corner of the visual box.
    pub position: Vec2,
    /// Offset from `position` to the visual center. Fixed after creation
    /// except where a behavior rescales its body.
    pub origin: Vec2,
    pub size: Vec2,
    /// Degrees in `[0, 360)`.
    pub rotation: f32,
}

impl Transform {
    /// Box of `size` whose visual center sits on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let origin = size * 0.5;
        Self {
            position: center - origin,
            origin,
            size,
            rotation: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.origin
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.position = center - self.origin;
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(degrees);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }
}

/// Per-tick motion: `position += normal * speed`, `rotation += rotation_speed`.
///
/// `normal` is expected to be unit length so that `speed` reads as units per
/// tick; the integrator uses the raw product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub normal: Vec2,
    pub speed: f32,
    /// Degrees per tick.
    pub rotation_speed: f32,
    /// Added to `speed` each tick before clamping.
    pub acceleration: f32,
    /// Upper bound on `speed`, if any.
    pub max_speed: Option<f32>,
}

impl Movement {
    pub fn new(normal: Vec2, speed: f32) -> Self {
        Self {
            normal,
            speed,
            ..Default::default()
        }
    }

    /// Movement along the normalized `direction`.
    pub fn toward(direction: Vec2, speed: f32) -> Self {
        Self::new(direction.normalize_or_zero(), speed)
    }
}

/// Convex collision body plus how the owner reacts to contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub body: ConvexPolygon,
    /// Solid bodies push each other apart; others only fire handlers.
    pub solid: bool,
    pub team: Team,
    pub handler: CollisionHandler,
}

/// Hit points plus invincibility and respawn bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    /// Seconds of post-hit invincibility left.
    pub invincibility_timer: f32,
    /// Invincibility granted after each hit; zero disables it.
    pub invincibility_duration: f32,
    /// Seconds until respawn; positive only while respawning.
    pub respawn_timer: f32,
    /// Respawn delay for entities that come back after dying.
    pub respawn_duration: Option<f32>,
    /// Override that ignores all damage.
    pub invincible: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            ..Default::default()
        }
    }

    pub fn with_invincibility(mut self, duration: f32) -> Self {
        self.invincibility_duration = duration;
        self
    }

    pub fn with_respawn(mut self, duration: f32) -> Self {
        self.respawn_duration = Some(duration);
        self
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn_timer > 0.0
    }

    /// Whether damage should currently be ignored.
    pub fn is_invincible(&self) -> bool {
        self.invincible || self.invincibility_timer > 0.0 || self.is_respawning()
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.current.clamp(0, self.max) as f32 / self.max as f32
        }
    }

    /// Apply `amount` unless invincible, starting the invincibility window.
    /// Returns whether the hit landed.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.is_invincible() || amount <= 0 {
            return false;
        }
        self.current -= amount;
        self.invincibility_timer = self.invincibility_duration;
        true
    }
}

/// Transient projectile or emitter with optional scripted behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub damage: f32,
    pub behavior: BulletBehavior,
    /// Phase/progress counter owned by the behavior.
    pub state: u32,
    /// Grace period outside the arena; [`DESPAWN_DISABLED`] turns it off.
    pub despawn_time: f32,
    /// Countdown while outside the arena, held at `despawn_time` inside.
    pub despawn_timer: f32,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            damage: 0.0,
            behavior: BulletBehavior::Straight,
            state: 0,
            despawn_time: DESPAWN_DISABLED,
            despawn_timer: DESPAWN_DISABLED,
        }
    }
}

impl Bullet {
    pub fn new(damage: f32, behavior: BulletBehavior, despawn_time: f32) -> Self {
        Self {
            damage,
            behavior,
            state: 0,
            despawn_time,
            despawn_timer: despawn_time,
        }
    }

    /// Whether leaving the arena starts the despawn countdown.
    pub fn despawns_off_screen(&self) -> bool {
        self.despawn_time != DESPAWN_DISABLED
    }
}

/// Scripted boss behavior: a queue of timed actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ai {
    pub queue: VecDeque<BossAction>,
    pub state: AiState,
    /// Position in the boss script; advanced each time an action is scheduled.
    pub script_step: u32,
}

/// Timer-driven entity factory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub timer: f32,
    pub min_interval: f32,
    pub max_interval: f32,
    pub kind: SpawnerKind,
    /// Firings left before the spawner removes itself; `None` is unlimited.
    pub remaining: Option<u32>,
}

impl Spawner {
    pub fn new(kind: SpawnerKind, first_delay: f32, min_interval: f32, max_interval: f32) -> Self {
        Self {
            timer: first_delay,
            min_interval,
            max_interval,
            kind,
            remaining: None,
        }
    }

    pub fn limited(mut self, firings: u32) -> Self {
        self.remaining = Some(firings);
        self
    }
}

/// Countdown to removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub timer: f32,
}

/// One drawable layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub kind: VisualKind,
    pub z_index: i32,
    pub scale: Vec2,
    pub alpha: f32,
}

impl Visual {
    pub fn new(kind: VisualKind, z_index: i32) -> Self {
        Self {
            kind,
            z_index,
            scale: Vec2::ONE,
            alpha: 1.0,
        }
    }
}

/// Z-ordered visual layers consumed by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub layers: Vec<Visual>,
    /// GUI sprites draw after every world sprite.
    pub gui: bool,
    pub hidden: bool,
}

/// Player-controlled ship state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub lives: u32,
    pub weapon_level: u8,
    pub fire_timer: f32,
    pub fire_interval: f32,
    /// Steering input, each axis in `[-1, 1]`.
    pub input: Vec2,
    pub firing: bool,
}

/// Score and debris released when the entity is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub points: u32,
    pub particles: u8,
}

/// Archetype tag set by the factory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub archetype: Archetype,
}
