use std::{path::PathBuf, sync::Arc, thread, time::Duration};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{OptionExt, WrapErr, eyre};
use config::AppConfig;
use cube_core::{AnimationEvent, AxisDirection, CoreState, CubeManager, Turn};
use cube_solver::{
    FilterKind, HeuristicKind, SolverConfig, StrategyKind,
    heuristic::{Heuristic, PlacementHeuristic},
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug, info};
use owo_colors::OwoColorize;

mod config;
mod render;

/// Scrambles, solves, and animates a 3x3x3 cube
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file, in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random turn sequence
    Scramble {
        /// Number of turns
        #[arg(short = 'n', long, default_value_t = 20)]
        length: usize,
        /// Only draw from the first RANGE turns in canonical order
        #[arg(long, default_value_t = 12)]
        range: usize,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Solve the cube reached from solved by a turn sequence, e.g. "X+ Y-' Z+"
    Solve {
        scramble: String,
        #[command(flatten)]
        overrides: SolverOverrides,
    },
    /// Show the cube reached from solved by a turn sequence
    Inspect {
        scramble: String,
        /// Print color letters instead of colored blocks
        #[arg(long)]
        plain: bool,
    },
    /// Feed a turn sequence through the animated turn queue
    Play {
        sequence: String,
        /// Time spent on each turn
        #[arg(long)]
        duration_ms: Option<f64>,
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    AStar,
    IterativeDeepening,
    Staged,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Placement,
    Zero,
    Face,
}

/// Command line settings that take precedence over the configuration file
#[derive(Args)]
struct SolverOverrides {
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,
    /// Allow turns that undo or repeat the previous ones
    #[arg(long)]
    permissive: bool,
    /// Cost of each turn relative to the heuristic
    #[arg(long)]
    cost_weight: Option<f64>,
    #[arg(long)]
    min_depth: Option<usize>,
    #[arg(long)]
    max_depth: Option<usize>,
    /// Give up after expanding this many states
    #[arg(long)]
    max_expansions: Option<usize>,
    /// The face solved first by the staged strategy
    #[arg(long)]
    stage_face: Option<AxisDirection>,
}

impl SolverOverrides {
    fn apply(&self, config: &mut SolverConfig) {
        if let Some(strategy) = self.strategy {
            config.strategy = match strategy {
                StrategyArg::AStar => StrategyKind::AStar,
                StrategyArg::IterativeDeepening => StrategyKind::IterativeDeepening,
                StrategyArg::Staged => StrategyKind::Staged,
            };
        }
        if let Some(heuristic) = self.heuristic {
            config.heuristic = match heuristic {
                HeuristicArg::Placement => HeuristicKind::Placement,
                HeuristicArg::Zero => HeuristicKind::Zero,
                HeuristicArg::Face => HeuristicKind::Face,
            };
        }
        if self.permissive {
            config.filter = FilterKind::Permissive;
        }
        if let Some(cost_weight) = self.cost_weight {
            config.cost_weight = cost_weight;
        }
        if let Some(min_depth) = self.min_depth {
            config.min_depth = min_depth;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_expansions) = self.max_expansions {
            config.max_expansions = Some(max_expansions);
        }
        if let Some(stage_face) = self.stage_face {
            config.stage_face = stage_face;
        }
    }
}

fn scrambled_state(config: &AppConfig, scramble: &str) -> color_eyre::Result<CoreState> {
    let turns = Turn::parse_sequence(scramble)?;
    let mut state = CoreState::new();
    config.apply_scheme(state.ledger_mut())?;
    for turn in turns {
        state.apply_turn(turn);
    }
    Ok(state)
}

/// How long the animator spends on each turn.
fn turn_duration(duration_ms: f64) -> color_eyre::Result<Duration> {
    Duration::try_from_secs_f64(duration_ms / 1000.0).map_err(|_| {
        eyre!("Duration must be a non-negative number of milliseconds, got {duration_ms}")
    })
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scramble {
            length,
            range,
            seed,
        } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let manager = CubeManager::default();
            let turns = manager.randomize(length, range, &mut rng);
            println!("{}", Turn::format_sequence(&turns));
        }
        Commands::Solve {
            scramble,
            overrides,
        } => {
            let state = scrambled_state(&config, &scramble)?;
            let mut solver_config = config.solver.clone();
            overrides.apply(&mut solver_config);
            let solver = solver_config.build()?;

            let solution = solver
                .solve(state.ledger())
                .ok_or_eyre("No solution found within the configured limits")?;
            if solution.is_empty() {
                println!("{}", "Already solved".green());
            } else {
                println!("{}", Turn::format_sequence(&solution));
            }
        }
        Commands::Inspect { scramble, plain } => {
            let state = scrambled_state(&config, &scramble)?;
            let ledger = state.ledger();
            println!("{}", render::net(ledger, plain));
            println!();

            let consistent = ledger.check_links();
            println!(
                "Links consistent: {}",
                if consistent { "yes".green().to_string() } else { "no".red().to_string() }
            );
            println!("Placement estimate: {}", PlacementHeuristic.estimate(ledger));
            println!("Solved: {}", ledger.is_solved());

            let cycles = ledger.cycles()?;
            println!("Sticker cycles: {}", cycles.len());
            for cycle in cycles {
                println!("  {}", cycle.iter().join(" -> "));
            }
        }
        Commands::Play {
            sequence,
            duration_ms,
            plain,
        } => {
            let turns = Turn::parse_sequence(&sequence)?;
            let duration_ms = duration_ms.unwrap_or(config.animation.duration_ms);
            let per_turn = turn_duration(duration_ms)?;
            let state = scrambled_state(&config, "")?;
            let (manager, rx) = CubeManager::with_animation(state, duration_ms);
            let manager = Arc::new(manager);

            let animator = {
                let manager = Arc::clone(&manager);
                let mut remaining = turns.len();
                thread::spawn(move || {
                    while remaining > 0 {
                        let Ok(event) = rx.recv() else {
                            break;
                        };
                        match event {
                            AnimationEvent::Start {
                                ticket,
                                turn,
                                rotations,
                                ..
                            } => {
                                info!(
                                    target: "play",
                                    "Animating {turn}: {} pieces by {} degrees",
                                    rotations.len(),
                                    turn.degrees()
                                );
                                thread::sleep(per_turn);
                                manager.complete_turn(ticket)?;
                                println!("{turn}");
                                remaining -= 1;
                            }
                            AnimationEvent::Queued { turn, pending } => {
                                debug!(target: "play", "{turn} queued, {pending} waiting");
                            }
                            AnimationEvent::Cancel { ticket } => {
                                info!(target: "play", "Turn {ticket:?} was cancelled");
                            }
                        }
                    }
                    Ok::<_, cube_core::ManagerError>(())
                })
            };

            manager.turn_all(turns);
            animator
                .join()
                .map_err(|_| eyre!("The animator thread panicked"))?
                .wrap_err("The animator lost track of the turn queue")?;

            println!();
            println!("{}", render::net(&manager.ledger(), plain));
        }
    }

    Ok(())
}
