mod autoplay;
mod config;

use std::path::{Path, PathBuf};

use clap::Parser;
use snake_common::config::Validate;
use snake_common::replay::{ReplayPlayer, generate_replay_filename, load_replay, save_replay};
use snake_common::snake::{SimulationSession, SimulationState};
use snake_common::{log, logger};

use config::{RunnerConfig, get_config_manager};

#[derive(Parser)]
#[command(name = "snake_runner", about = "Headless single-player snake steered by an autopilot")]
struct Args {
    /// YAML config file; defaults to snake_runner_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long)]
    tick_interval_ms: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    save_replay: bool,
    /// Re-simulate a saved replay instead of playing.
    #[arg(long)]
    replay: Option<PathBuf>,
    #[arg(long)]
    verbose: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut RunnerConfig) {
        if let Some(width) = self.width {
            config.simulation.field_width = width;
        }
        if let Some(height) = self.height {
            config.simulation.field_height = height;
        }
        if let Some(tick_interval_ms) = self.tick_interval_ms {
            config.simulation.tick_interval_ms = tick_interval_ms;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
        if self.save_replay {
            config.replays.save = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = args.use_log_prefix.then(|| "Runner".to_string());
    logger::init_logger(prefix, args.verbose);

    if let Some(path) = &args.replay {
        return run_replay(path);
    }

    let mut config = get_config_manager(args.config.clone()).get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log!(
        "Starting {}x{} run, tick {} ms, seed {}",
        config.simulation.field_width,
        config.simulation.field_height,
        config.simulation.tick_interval_ms,
        seed
    );

    let mut session = SimulationSession::new(config.simulation.clone(), seed);

    let interrupted = tokio::select! {
        _ = autoplay::play(&mut session, config.max_ticks) => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    session.stop().await;

    let final_state = session.state().await;
    if interrupted {
        log!("Interrupted at tick {}", final_state.tick);
    }
    report(&final_state);

    if config.replays.save
        && let Some(replay) = session.replay().await
    {
        let replay_dir = Path::new(&config.replays.location);
        std::fs::create_dir_all(replay_dir)?;
        let file_path = replay_dir.join(generate_replay_filename(replay.seed));
        save_replay(&file_path, &replay)?;
        log!("Replay saved to: {}", file_path.display());
    }

    Ok(())
}

fn run_replay(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let replay = load_replay(path)?;
    log!(
        "Replaying {} (seed {}, {} turns, recorded with {})",
        path.display(),
        replay.seed,
        replay.actions.len(),
        replay.engine_version
    );

    let expected_score = replay.final_score;
    let expected_tick = replay.final_tick;
    let state = ReplayPlayer::new(replay).simulate();
    report(&state);

    if state.score != expected_score || state.tick != expected_tick {
        return Err(format!(
            "Replay diverged: expected score {} at tick {}, got score {} at tick {}",
            expected_score, expected_tick, state.score, state.tick
        )
        .into());
    }
    Ok(())
}

fn report(state: &SimulationState) {
    match state.end_reason {
        Some(reason) => log!(
            "Game over ({:?}) after {} ticks: score {}, length {}",
            reason,
            state.tick,
            state.score,
            state.snake.len()
        ),
        None => log!(
            "Stopped ({:?}) after {} ticks: score {}, length {}",
            state.status,
            state.tick,
            state.score,
            state.snake.len()
        ),
    }
}
