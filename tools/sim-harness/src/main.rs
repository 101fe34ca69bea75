//! sim-harness: headless runner for the BARRAGE simulation.
//!
//! Usage:
//!   sim-harness run --ticks 3600 --seed 7 --leaderboard scores.json --name ACE
//!   sim-harness scores --leaderboard scores.json

use std::path::PathBuf;
use std::process;

use barrage_core::commands::PlayerCommand;
use barrage_core::constants::{DT, TICK_RATE};
use barrage_core::enums::GamePhase;
use barrage_core::events::SimEvent;
use barrage_core::leaderboard::{Leaderboard, LeaderboardError};
use barrage_core::types::EntityId;
use barrage_sim::{SimConfig, SimulationEngine};

#[derive(Debug, thiserror::Error)]
enum HarnessError {
    #[error("{0}")]
    Usage(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "scores" => cmd_scores(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(HarnessError::Usage(format!("Unknown command: {other}"))),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if matches!(e, HarnessError::Usage(_)) {
            print_usage();
        }
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "sim-harness: BARRAGE headless simulation runner\n\
         \n\
         Commands:\n\
         \n\
         run       Play one stage with a scripted pilot\n\
         \n\
           --ticks <N>          Ticks to simulate (default: 3600)\n\
           --seed <S>           RNG seed (default: BARRAGE_SEED or 42)\n\
           --leaderboard <path> Record the final score in this file (optional)\n\
           --name <name>        Name for the leaderboard entry (default: PILOT)\n\
         \n\
         scores    Print a leaderboard\n\
         \n\
           --leaderboard <path> Leaderboard file to read\n\
         \n\
         Examples:\n\
         \n\
           sim-harness run --ticks 7200 --seed 7 --leaderboard scores.json --name ACE\n\
           sim-harness scores --leaderboard scores.json\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(
    args: &[String],
    flag: &'static str,
) -> Result<Option<T>, HarnessError> {
    match flag_value(args, flag) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| HarnessError::InvalidValue {
            flag,
            value: value.to_string(),
        }),
    }
}

// --- Run command ---

/// Scripted input for `tick`: sweep across the arena, drifting up and down,
/// with the trigger held.
fn autopilot(tick: u64) -> Option<PlayerCommand> {
    if tick == 0 {
        return Some(PlayerCommand::SetFiring { firing: true });
    }
    if !tick.is_multiple_of(30) {
        return None;
    }
    let sweep = (tick / 90) % 4;
    let x = match sweep {
        0 => 1.0,
        1 | 3 => 0.0,
        _ => -1.0,
    };
    let y = if (tick / 240) % 2 == 0 { 0.25 } else { -0.25 };
    Some(PlayerCommand::Steer { x, y })
}

#[derive(Debug, Default)]
struct RunSummary {
    kills: u32,
    hits_taken: u32,
    lives_lost: u32,
    powerups: u32,
    boss_seen: bool,
    boss_defeated: bool,
}

impl RunSummary {
    fn record(&mut self, event: &SimEvent, player: Option<EntityId>) {
        match event {
            SimEvent::Destroyed { points, .. } if *points > 0 => self.kills += 1,
            SimEvent::Damaged { entity, .. } if Some(*entity) == player => self.hits_taken += 1,
            SimEvent::PlayerDown { .. } => self.lives_lost += 1,
            SimEvent::PowerUpCollected { .. } => self.powerups += 1,
            SimEvent::BossAppeared => self.boss_seen = true,
            SimEvent::BossDefeated => self.boss_defeated = true,
            _ => {}
        }
    }
}

fn cmd_run(args: &[String]) -> Result<(), HarnessError> {
    let ticks: u64 = parse_flag(args, "--ticks")?.unwrap_or(u64::from(TICK_RATE) * 60);
    let mut config = SimConfig::from_env();
    if let Some(seed) = parse_flag(args, "--seed")? {
        config.seed = seed;
    }
    let leaderboard = flag_value(args, "--leaderboard").map(PathBuf::from);
    let name = flag_value(args, "--name").unwrap_or("PILOT").to_string();

    tracing::info!(seed = config.seed, ticks, "starting run");
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartStage);

    let mut summary = RunSummary::default();
    let mut ran = 0;
    for tick in 0..ticks {
        if let Some(command) = autopilot(tick) {
            engine.queue_command(command);
        }
        let player = engine.context().player;
        let snapshot = engine.tick(DT);
        for event in &snapshot.events {
            summary.record(event, player);
        }
        ran = tick + 1;
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
    }

    let stats = engine.stats();
    let recycled: u64 = stats.pools.iter().map(|p| p.recycled).sum();
    println!("=== BARRAGE run summary ===");
    println!("  Seed:          {}", engine.config().seed);
    println!("  Ticks:         {ran} ({:.1} s)", engine.time().elapsed_secs);
    println!("  Phase:         {:?}", engine.phase());
    println!("  Score:         {}", engine.score());
    println!("  Kills:         {}", summary.kills);
    println!("  Hits taken:    {}", summary.hits_taken);
    println!("  Lives lost:    {}", summary.lives_lost);
    println!("  Power-ups:     {}", summary.powerups);
    println!(
        "  Boss:          {}",
        match (summary.boss_seen, summary.boss_defeated) {
            (_, true) => "defeated",
            (true, false) => "engaged",
            _ => "not reached",
        }
    );
    println!(
        "  Entities:      {} live, {} created, {} removed, {} pooled reuses",
        stats.live, stats.created, stats.removed, recycled
    );

    if let Some(path) = leaderboard {
        let mut board = Leaderboard::load(&path)?;
        let score = engine.score();
        if !board.qualifies(score) {
            println!("  Leaderboard:   {name} did not place");
            return Ok(());
        }
        if let Some(rank) = board.submit(name.clone(), score) {
            println!("  Leaderboard:   {name} placed #{}", rank + 1);
        }
        board.save(&path)?;
    }
    Ok(())
}

// --- Scores command ---

fn cmd_scores(args: &[String]) -> Result<(), HarnessError> {
    let path = flag_value(args, "--leaderboard")
        .map(PathBuf::from)
        .ok_or_else(|| HarnessError::Usage("--leaderboard <path> is required".to_string()))?;
    let board = Leaderboard::load(&path)?;
    if board.entries().is_empty() {
        println!("No scores recorded in {}", path.display());
        return Ok(());
    }
    for (i, entry) in board.entries().iter().enumerate() {
        println!("{:>2}. {:<12} {:>10}", i + 1, entry.name, entry.score);
    }
    Ok(())
}
