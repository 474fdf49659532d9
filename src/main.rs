//! Voidbreaker - headless arcade session
//!
//! Runs a scripted session against the game core and logs what the renderer
//! and audio collaborators would receive. Pass a config path as the first
//! argument to override the user config.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use voidbreaker_core::Vec2;
use voidbreaker_game::{BlockPlacement, Game, GameConfig, InputState};

const TICKS: u32 = 600;
const FRAME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting Voidbreaker...");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => GameConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::load(),
    };

    let mut game = Game::new(config).context("Failed to start game")?;
    game.spawn_player();

    let block_height = game.config().blocks.size.y;
    let mut layout = Vec::new();
    for row in 0..3 {
        let y = 40.0 + row as f32 * (block_height + 8.0);
        layout.extend(BlockPlacement::row(game.config(), y, 10, 8.0));
    }
    let width = game.config().world.width;
    layout.push(BlockPlacement::solid(Vec2::new(width * 0.5 - 24.0, 220.0)));
    game.place_blocks(layout);

    let mut cue_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for tick in 0..TICKS {
        game.set_input(scripted_input(tick));
        game.tick(FRAME);

        for event in game.drain_sounds() {
            *cue_counts.entry(event.cue.id()).or_default() += 1;
        }

        if tick % 60 == 0 {
            let stats = game.collision_stats();
            info!(
                "t={:.1}s score={} entities={} drawn={} pairs={}/{}",
                game.time().total_time,
                game.score(),
                game.world().entity_count(),
                game.render_queue().len(),
                stats.resolved,
                stats.candidates
            );
        }

        if game.is_game_over() {
            info!("Ship lost after {} ticks", tick + 1);
            break;
        }
    }

    info!("Final score: {}", game.score());
    for (cue, count) in cue_counts {
        info!("  {}: {}", cue, count);
    }

    Ok(())
}

/// Sweep left and right across the screen while holding fire.
fn scripted_input(tick: u32) -> InputState {
    let leg = (tick / 90) % 2 == 0;
    InputState {
        left: leg,
        right: !leg,
        fire: true,
        ..Default::default()
    }
}
