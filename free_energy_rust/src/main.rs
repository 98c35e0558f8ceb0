#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use free_energy_rust::simulation::{run_exercises, ExerciseResult};
use free_energy_rust::ui::{chart::final_value_summary, render::draw_ui, ViewState};
use free_energy_rust::ExperimentConfig;

#[derive(Parser)]
#[command(name = "free_energy_rust")]
#[command(version)]
#[command(about = "Free-Energy principle exercises: exact posterior, gradient descent, predictive coding, variance learning")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a TOML configuration file (defaults to the built-in constants)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the variance-learning latent samples
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Zero the error units at the start of every variance-learning trial
    #[arg(long, global = true)]
    reset_per_trial: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run the exercises and browse the plots in the terminal (default)
    Plot,

    /// Run the exercises and print the final value of every plotted line
    Summary,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn load_config(cli: &Cli) -> Result<ExperimentConfig> {
    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => ExperimentConfig::default(),
    };

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.reset_per_trial {
        config.variance_learning.reset_per_trial = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(config: &ExperimentConfig) -> Result<Vec<ExerciseResult>> {
    let results = match config.seed {
        Some(seed) => {
            info!(seed, "using seeded RNG");
            run_exercises(config, &mut StdRng::seed_from_u64(seed))
        }
        None => run_exercises(config, &mut rand::rng()),
    };
    results.context("Exercise failed")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Plot);
    if let Commands::Example = command {
        println!("{}", ExperimentConfig::example());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let results = run(&config)?;

    match command {
        Commands::Summary => {
            for result in &results {
                println!(
                    "{:<11} {:<14} {}",
                    result.exercise.label(),
                    result.figure.title,
                    final_value_summary(&result.figure)
                );
            }
            Ok(())
        }
        _ => show_plots(&results),
    }
}

fn show_plots(results: &[ExerciseResult]) -> Result<()> {
    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, results);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("Terminal UI failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    results: &[ExerciseResult],
) -> io::Result<()> {
    let mut view = ViewState::new(results.len());
    let poll_timeout = Duration::from_millis(250);

    loop {
        terminal.draw(|f| {
            let hud = results.get(view.selected).map_or_else(String::new, |r| {
                format!(
                    "{} | ←/→ switch | q quit",
                    final_value_summary(&r.figure)
                )
            });
            draw_ui(f, results, view.selected, &hud);
        })?;

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Right | KeyCode::Tab => view.next(),
                    KeyCode::Left | KeyCode::BackTab => view.previous(),
                    KeyCode::Char(c) => {
                        if let Some(digit) = c.to_digit(10) {
                            view.select((digit as usize).saturating_sub(1));
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
