//! Simulation engine: owns the world and drives the tick.
//!
//! `SimulationEngine` owns the simulation context, processes player
//! commands, runs the scheduled systems, and produces `FrameSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use barrage_core::commands::PlayerCommand;
use barrage_core::components::Player;
use barrage_core::constants::*;
use barrage_core::enums::GamePhase;
use barrage_core::state::FrameSnapshot;
use barrage_core::types::{Rect, SimTime, Vec2};

use crate::context::SimContext;
use crate::ecs::WorldStats;
use crate::factories;
use crate::scheduler::Scheduler;
use crate::systems;

/// Configuration for starting a new simulation. Missing fields in a
/// serialized config take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Playfield bounds; also the quadtree root.
    pub arena: Rect,
    pub quadtree_depth: u32,
    pub quadtree_capacity: usize,
    /// Live entity count above which a warning is logged.
    pub entity_warn_threshold: usize,
    /// Build the player and stage spawners on `StartStage`.
    pub install_stage: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
            quadtree_depth: QUADTREE_MAX_DEPTH,
            quadtree_capacity: QUADTREE_CAPACITY,
            entity_warn_threshold: ENTITY_WARN_THRESHOLD,
            install_stage: true,
        }
    }
}

impl SimConfig {
    /// Defaults overridden by `BARRAGE_SEED`, `BARRAGE_ARENA_WIDTH`,
    /// `BARRAGE_ARENA_HEIGHT` and `BARRAGE_ENTITY_WARN`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(seed) = std::env::var("BARRAGE_SEED") {
            if let Ok(parsed) = seed.parse::<u64>() {
                config.seed = parsed;
            } else {
                tracing::warn!("Invalid BARRAGE_SEED '{}', using default", seed);
            }
        }

        if let Some(width) = positive_env("BARRAGE_ARENA_WIDTH") {
            config.arena.max.x = config.arena.min.x + width;
        }
        if let Some(height) = positive_env("BARRAGE_ARENA_HEIGHT") {
            config.arena.max.y = config.arena.min.y + height;
        }

        if let Ok(warn) = std::env::var("BARRAGE_ENTITY_WARN") {
            match warn.parse::<usize>() {
                Ok(parsed) if parsed > 0 => config.entity_warn_threshold = parsed,
                Ok(_) => tracing::warn!("BARRAGE_ENTITY_WARN must be > 0, using default"),
                Err(_) => {
                    tracing::warn!("Invalid BARRAGE_ENTITY_WARN '{}', using default", warn)
                }
            }
        }

        config
    }
}

fn positive_env(key: &str) -> Option<f32> {
    let value = std::env::var(key).ok()?;
    match value.parse::<f32>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Some(parsed),
        _ => {
            tracing::warn!("Invalid {} '{}', using default", key, value);
            None
        }
    }
}

/// The simulation engine. Owns the world and all sim state.
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimConfig,
    ctx: SimContext,
    scheduler: Scheduler,
    phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
    warned_entities: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            ctx: SimContext::new(&config),
            config,
            scheduler: Scheduler::stage(),
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            warned_entities: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting
    /// snapshot. `dt` is used as given; callers clamp it (see [`DT`]).
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.ctx.dt = dt;
            self.scheduler.run(&mut self.ctx);
            self.ctx.time.advance(dt);
            self.instrument();

            if self.ctx.game_over {
                self.phase = GamePhase::GameOver;
            }
        }

        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx, self.phase, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    pub fn score(&self) -> u64 {
        self.ctx.score
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only access to the simulation context.
    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Mutable access for seeding test scenarios.
    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn stats(&self) -> WorldStats {
        self.ctx.world.stats()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartStage => {
                if matches!(self.phase, GamePhase::Idle | GamePhase::GameOver) {
                    if self.phase == GamePhase::GameOver {
                        self.ctx = SimContext::new(&self.config);
                    }
                    if self.config.install_stage {
                        factories::setup_stage(&mut self.ctx);
                    }
                    self.phase = GamePhase::Active;
                    self.warned_entities = false;
                    tracing::info!(seed = self.config.seed, "stage started");
                }
            }
            PlayerCommand::Steer { x, y } => {
                if let Some(player) = self.player_mut() {
                    player.input = Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE);
                }
            }
            PlayerCommand::SetFiring { firing } => {
                if let Some(player) = self.player_mut() {
                    player.firing = firing;
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    fn player_mut(&mut self) -> Option<&mut Player> {
        let id = self.ctx.player?;
        self.ctx.world.get_mut::<Player>(id)
    }

    /// Periodic world statistics and the entity-count warning.
    fn instrument(&mut self) {
        let live = self.ctx.world.entity_count();
        if live > self.config.entity_warn_threshold {
            if !self.warned_entities {
                tracing::warn!(
                    live,
                    threshold = self.config.entity_warn_threshold,
                    "entity count above threshold"
                );
                self.warned_entities = true;
            }
        } else {
            self.warned_entities = false;
        }

        if self.ctx.time.tick.is_multiple_of(STATS_LOG_INTERVAL) {
            let stats = self.ctx.world.stats();
            tracing::debug!(
                tick = self.ctx.time.tick,
                live = stats.live,
                created = stats.created,
                removed = stats.removed,
                recycled = stats.pools.iter().map(|p| p.recycled).sum::<u64>(),
                "world stats"
            );
        }
    }
}
