use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use tick_snake::config::Config;
use tick_snake::error::AppError;
use tick_snake::events::{run_game, wait_for_dismiss, LoopExit, Producers};
use tick_snake::game::Simulation;
use tick_snake::logging;
use tick_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file. Defaults to the per-user config location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Simulation steps per second.
    #[arg(long = "tps")]
    ticks_per_second: Option<u32>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Exit immediately when the game ends instead of showing the result.
    #[arg(long)]
    no_linger: bool,

    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.log_file.as_deref()) {
        eprintln!("error: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(score) => {
            println!("Game over! Score: {score}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "fatal error");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(ticks_per_second) = cli.ticks_per_second {
        config.ticks_per_second = ticks_per_second;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_linger {
        config.linger_on_game_over = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<usize, AppError> {
    let config = resolve_config(cli)?;
    info!(?config, "starting game");

    let mut sim = Simulation::new(&config);
    let (tx, rx) = mpsc::channel();

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    let producers = Producers::spawn(&tx, config.tick_interval())?;
    drop(tx);

    let exit = run_game(&rx, &mut sim, |sim| session.draw(sim, None))?;

    if let LoopExit::Terminated(outcome) = exit {
        if config.linger_on_game_over {
            session.draw(&sim, Some(outcome))?;
            let dismissed = wait_for_dismiss(&rx, || session.draw(&sim, Some(outcome)))?;
            info!(?dismissed, "result screen closed");
        }
    }

    drop(producers);
    drop(session);

    info!(?exit, score = sim.score(), ticks = sim.tick_count(), "session finished");
    Ok(sim.score())
}
