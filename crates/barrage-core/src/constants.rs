//! Simulation constants and tuning parameters.
//!
//! Speeds are in world units per tick (the movement integrator does not scale
//! by `dt`); timers and durations are in seconds.

/// Nominal tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate. Also the largest `dt` callers should pass.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena ---

/// Playfield width (world units). Origin is the lower-left corner, +y is up.
pub const ARENA_WIDTH: f32 = 480.0;

/// Playfield height (world units).
pub const ARENA_HEIGHT: f32 = 640.0;

// --- Spatial index ---

/// Maximum quadtree depth (root is depth 0).
pub const QUADTREE_MAX_DEPTH: u32 = 6;

/// Objects a quadtree node holds before it splits.
pub const QUADTREE_CAPACITY: usize = 3;

/// Penetration below this depth is treated as touching, not overlapping.
pub const CONTACT_SLOP: f32 = 1e-3;

// --- Bullets ---

/// `despawn_time` sentinel that disables despawn-on-exit.
pub const DESPAWN_DISABLED: f32 = -1.0;

/// Grace period a bullet may spend outside the arena before removal.
pub const BULLET_DESPAWN_TIME: f32 = 0.5;

/// Side length of ordinary enemy bullets.
pub const ENEMY_BULLET_SIZE: f32 = 8.0;

/// Straight enemy bullet speed.
pub const ENEMY_BULLET_SPEED: f32 = 3.5;

/// Player bullet width and height.
pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 12.0;

/// Player bullet speed.
pub const PLAYER_BULLET_SPEED: f32 = 10.0;

/// Player bullet damage.
pub const PLAYER_BULLET_DAMAGE: f32 = 1.0;

/// Enemy bullet damage.
pub const ENEMY_BULLET_DAMAGE: f32 = 1.0;

/// Homing: maximum heading change per tick (degrees).
pub const HOMING_TURN_RATE: f32 = 3.0;

/// Homing: seconds of steering before the bullet flies straight.
pub const HOMING_SEEK_TIME: f32 = 1.5;

/// Burst shell: seconds before it splits.
pub const BURST_FUSE: f32 = 0.8;

/// Burst shell: pellets released on split.
pub const BURST_PELLETS: u8 = 6;

/// Burst shell: total fan angle of the pellets (degrees).
pub const BURST_SPREAD: f32 = 60.0;

/// Laser: telegraph phase, no damage.
pub const LASER_CHARGE_TIME: f32 = 0.6;

/// Laser: damaging phase.
pub const LASER_FIRE_TIME: f32 = 1.2;

/// Laser: shrink-out phase.
pub const LASER_FADE_TIME: f32 = 0.3;

/// Laser beam length at full extension.
pub const LASER_LENGTH: f32 = 640.0;

/// Laser beam width.
pub const LASER_WIDTH: f32 = 18.0;

/// Laser width scale while charging; the length grows to full over the charge.
pub const LASER_CHARGE_SCALE: f32 = 0.05;

/// Ring emitter: seconds between waves.
pub const RING_INTERVAL: f32 = 0.25;

/// Ring emitter: bullets per wave.
pub const RING_COUNT: u8 = 12;

/// Ring emitter: number of waves before it expires.
pub const RING_WAVES: u8 = 4;

/// Ring emitter: heading offset added after each wave (degrees).
pub const RING_SPIN: f32 = 7.5;

// --- Player ---

pub const PLAYER_SIZE: f32 = 24.0;
pub const PLAYER_SPEED: f32 = 4.0;
pub const PLAYER_MAX_HEALTH: i32 = 3;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_INVINCIBILITY: f32 = 2.0;
pub const PLAYER_RESPAWN_TIME: f32 = 1.5;
pub const PLAYER_FIRE_INTERVAL: f32 = 0.12;
pub const PLAYER_MAX_WEAPON_LEVEL: u8 = 3;

/// Spacing between parallel player shots and fan angle for level 3 (degrees).
pub const PLAYER_SHOT_SPACING: f32 = 10.0;
pub const PLAYER_SHOT_FAN: f32 = 12.0;

/// Height above the arena floor where the player (re)spawns.
pub const PLAYER_SPAWN_HEIGHT: f32 = 64.0;

// --- Enemies ---

pub const ENEMY_SIZE: f32 = 28.0;
pub const ENEMY_SPEED: f32 = 1.5;
pub const ENEMY_HEALTH: i32 = 3;
pub const ENEMY_CONTACT_DAMAGE: i32 = 1;
pub const ENEMY_POINTS: u32 = 100;
pub const ENEMY_LIFETIME: f32 = 15.0;
pub const ENEMY_FIRE_MIN: f32 = 1.5;
pub const ENEMY_FIRE_MAX: f32 = 3.0;

/// Chance that an enemy gun fires a homing round instead of a straight one.
pub const ENEMY_HOMING_CHANCE: f64 = 0.25;

// --- Boss ---

pub const BOSS_SIZE: f32 = 96.0;
pub const BOSS_HEALTH: i32 = 200;
pub const BOSS_POINTS: u32 = 5000;
pub const BOSS_CONTACT_DAMAGE: i32 = 1;

/// Interpolation parameter gained per second by a Move action.
pub const BOSS_LERP_SPEED: f32 = 0.8;

/// Wait before each scripted move.
pub const BOSS_MOVE_WAIT: f32 = 0.5;

/// Pause after each attack.
pub const BOSS_ATTACK_RECOVERY: f32 = 0.75;

/// Health fraction below which the boss script escalates.
pub const BOSS_ENRAGE_FRACTION: f32 = 0.5;

/// Boss destinations are picked from the top part of the arena.
pub const BOSS_ZONE_FLOOR: f32 = 0.6;

/// Shots in an aimed fan.
pub const BOSS_FAN_COUNT: u8 = 5;

/// Fan spread (degrees).
pub const BOSS_FAN_SPREAD: f32 = 40.0;

// --- Power-ups ---

pub const POWERUP_SIZE: f32 = 16.0;
pub const POWERUP_SPEED: f32 = 1.0;
pub const POWERUP_LIFETIME: f32 = 10.0;
pub const SHIELD_DURATION: f32 = 5.0;

// --- Particles ---

pub const PARTICLE_SIZE: f32 = 4.0;
pub const PARTICLE_LIFETIME: f32 = 0.6;
pub const PARTICLE_MIN_SPEED: f32 = 1.0;
pub const PARTICLE_MAX_SPEED: f32 = 4.0;
pub const PARTICLE_BURST_SMALL: u8 = 8;
pub const PARTICLE_BURST_LARGE: u8 = 32;

// --- Stage spawners ---

pub const WAVE_MIN_INTERVAL: f32 = 2.0;
pub const WAVE_MAX_INTERVAL: f32 = 4.0;
pub const WAVE_SIZE: u8 = 3;
pub const POWERUP_MIN_INTERVAL: f32 = 12.0;
pub const POWERUP_MAX_INTERVAL: f32 = 20.0;

/// Seconds into the stage before the boss arrives.
pub const BOSS_ARRIVAL: f32 = 45.0;

/// Seconds the boss warning banner stays on screen.
pub const BANNER_TIME: f32 = 3.0;

// --- Instrumentation ---

/// Live entity count that triggers a warning.
pub const ENTITY_WARN_THRESHOLD: usize = 4000;

/// Ticks between periodic world statistics logs.
pub const STATS_LOG_INTERVAL: u64 = 600;

// --- Leaderboard ---

/// Entries kept in the persisted leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 10;
