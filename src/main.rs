use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use arcade_snake::config::{ConfigOverrides, GameConfig};
use arcade_snake::error::AppError;
use arcade_snake::game::{GameWorld, TickOutcome};
use arcade_snake::input::{GameInput, InputHandler};
use arcade_snake::logging::{default_log_path, init_file_logger};
use arcade_snake::renderer;
use arcade_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use log::{LevelFilter, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the per-user config when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid edge length in cells.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Target frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Include per-tick events in the log.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("arcade-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let overrides = ConfigOverrides {
        grid_cells: cli.grid_size,
        frame_rate: cli.fps,
        seed: cli.seed,
    };
    let config = GameConfig::load(cli.config.as_deref(), &overrides)?;

    let log_path = cli.log_file.unwrap_or_else(default_log_path);
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_file_logger(&log_path, level)?;
    info!("starting arcade-snake, logging to {}", log_path.display());

    let mut session = TerminalSession::enter()?;
    game_loop(&mut session, config)?;
    info!("quit");
    Ok(())
}

fn game_loop(session: &mut TerminalSession, config: GameConfig) -> Result<(), AppError> {
    let frame_duration = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate));
    let mut input = InputHandler::new();
    let mut world = GameWorld::new(config.clone());

    loop {
        let frame_start = Instant::now();

        for game_input in input.drain()? {
            match game_input {
                GameInput::Quit => return Ok(()),
                GameInput::Restart if world.is_over() => {
                    info!("restarting after score {}", world.score());
                    world = GameWorld::new(config.clone());
                }
                other => world.apply_input(other),
            }
        }

        if world.advance_frame() == Some(TickOutcome::GameOver) {
            info!("final score {} in {} mode", world.score(), world.mode().name());
        }

        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &world))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }
}
