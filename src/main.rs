//! Headless bot runner (default binary).
//!
//! Loads a level (from `MATCH3_LEVEL_PATH` or the built-in one), lets the
//! automated player take turns until the session ends, and prints the board
//! before and after. Set `RUST_LOG=debug` to follow every cascade phase.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use match3::config::{RunnerConfig, DEFAULT_LEVEL_JSON};
use match3::core::{level_from_json, GameSession};
use match3::engine::autoplay;
use match3::types::{CoreEvent, LevelDefinition};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RunnerConfig::from_env();
    let level = load_level(&config)?;

    let mut session = GameSession::new(0, level, config.seed)
        .with_context(|| format!("failed to start level (seed {})", config.seed))?;
    let repaired = session
        .drain_events()
        .iter()
        .filter(|e| matches!(e, CoreEvent::ItemReplaced { .. }))
        .count();
    info!(repaired, "board ready");

    println!("{}\n", session.board());

    let summary = autoplay(&mut session, config.max_turns);

    println!("{}\n", session.board());
    println!(
        "{} turns, score {}/{} ({}), {} moves left",
        summary.turns,
        summary.score,
        session.target_score(),
        session.target().as_str(),
        summary.moves_left
    );
    match (summary.outcome, summary.stopped) {
        (Some(outcome), _) => println!("result: {}", if outcome.is_win() { "win" } else { "lose" }),
        (None, Some(err)) => println!("stopped: {} ({})", err.message(), err.code()),
        (None, None) => println!("stopped: turn limit {} reached", config.max_turns),
    }

    Ok(())
}

fn load_level(config: &RunnerConfig) -> Result<LevelDefinition> {
    let json = match &config.level_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read level file {}", path))?,
        None => DEFAULT_LEVEL_JSON.to_string(),
    };
    let level = level_from_json(&json).map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;
    Ok(level)
}
