//! Headless runner: simulates a recipe, optionally recording every frame, or walks an
//! existing recording.
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use particle_life::recipes::Recipe;
use particle_life::recording::{FrameRecorder, FrameReplayer};
use particle_life::simulation::Simulation;
use particle_life::utils::{EngineConfig, SimulationError, SimulationParams};

#[derive(Parser, Debug)]
#[command(
    name = "particle_life",
    version,
    about = "Run a particle life recipe without a window"
)]
struct Cli {
    /// Recipe file describing the world to simulate.
    #[arg(long, conflicts_with = "replay", required_unless_present = "replay")]
    recipe: Option<PathBuf>,

    /// Write every simulated frame to this file.
    #[arg(long, conflicts_with = "replay")]
    record: Option<PathBuf>,

    /// Walk the frames of an existing recording instead of simulating.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Number of generations to simulate.
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Worker threads; overrides the config file.
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for particle placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config file (`key = value` lines).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target frames per second; overrides the config file.
    #[arg(long)]
    framerate: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match (&cli.recipe, &cli.replay) {
        (_, Some(replay)) => replay_recording(replay),
        (Some(recipe), None) => run_recipe(recipe, &cli),
        (None, None) => Err(SimulationError::InvalidParameter(
            "one of --recipe or --replay is required".to_string(),
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// The config file (or defaults) with command-line overrides applied.
fn engine_config(cli: &Cli) -> Result<EngineConfig, SimulationError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Some(framerate) = cli.framerate {
        config.target_fps = framerate;
    }
    Ok(config)
}

fn run_recipe(recipe_path: &Path, cli: &Cli) -> Result<(), SimulationError> {
    let config = engine_config(cli)?;
    let recipe = Recipe::load(recipe_path)?;
    let params = SimulationParams::new(
        None,
        None,
        Some(config.grid_resolution),
        Some(config.threads),
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut simulation = Simulation::from_recipe(&recipe, params, &mut rng)?;
    info!(
        "Loaded {}: {} particles, {} rules",
        recipe_path.display(),
        simulation.particle_count(),
        simulation.rules().len()
    );

    let mut recorder = match &cli.record {
        Some(path) => Some(FrameRecorder::create(
            path,
            simulation.board_size(),
            simulation.particle_count(),
        )?),
        None => None,
    };

    let budget_ms = config.frame_budget_ms();
    let started = Instant::now();
    for frame in 0..cli.frames {
        let frame_started = Instant::now();
        simulation.advance()?;
        if let Some(recorder) = recorder.as_mut() {
            recorder.record(simulation.particles())?;
        }

        let elapsed_ms = frame_started.elapsed().as_secs_f64() * 1000.0;
        if budget_ms > 0.0 && elapsed_ms > budget_ms {
            debug!("Frame {} took {:.2} ms, over the {:.2} ms budget", frame, elapsed_ms, budget_ms);
        } else {
            debug!("Frame {} took {:.2} ms", frame, elapsed_ms);
        }
    }

    if let Some(recorder) = recorder {
        let frames = recorder.frames_written();
        recorder.into_inner()?;
        info!("Recorded {} frames", frames);
    }

    if cli.frames > 0 {
        let average_ms = started.elapsed().as_secs_f64() * 1000.0 / cli.frames as f64;
        info!(
            "Simulated {} generations, {:.2} ms per generation ({:.1} fps, target {})",
            simulation.generation(),
            average_ms,
            1000.0 / average_ms.max(f64::EPSILON),
            config.target_fps
        );
    } else {
        warn!("No frames requested");
    }
    Ok(())
}

fn replay_recording(path: &Path) -> Result<(), SimulationError> {
    let mut replayer = FrameReplayer::open(path)?;
    let (width, height) = replayer.board_size();
    info!(
        "Replaying {}: {}x{} board, {} particles",
        path.display(),
        width,
        height,
        replayer.particle_count()
    );

    let mut total_speed = 0.0f64;
    let mut samples = 0u64;
    while let Some(frame) = replayer.next_frame()? {
        total_speed += frame.iter().map(|p| p.speed() as f64).sum::<f64>();
        samples += frame.len() as u64;
    }

    let mean_speed = if samples > 0 { total_speed / samples as f64 } else { 0.0 };
    info!("Replayed {} frames, mean particle speed {:.4}", replayer.frames_read(), mean_speed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_overrides_config() {
        let args = ["particle_life", "--recipe", "r.txt", "--framerate", "30", "--threads", "3"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = engine_config(&cli).unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.threads, 3);
        assert_eq!(config.grid_resolution, EngineConfig::default().grid_resolution);
    }

    #[test]
    fn test_defaults_without_overrides() {
        let cli = Cli::try_parse_from(["particle_life", "--recipe", "r.txt"]).unwrap();
        assert_eq!(cli.frames, 600);
        assert_eq!(engine_config(&cli).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_recipe_and_replay_are_exclusive() {
        assert!(Cli::try_parse_from(["particle_life"]).is_err());
        assert!(Cli::try_parse_from(["particle_life", "--recipe", "a", "--replay", "b"]).is_err());
        assert!(Cli::try_parse_from(["particle_life", "--replay", "b", "--record", "c"]).is_err());
        assert!(Cli::try_parse_from(["particle_life", "--replay", "b"]).is_ok());
    }
}
