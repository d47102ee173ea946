//! Check10 engine command line
//!
//! `solve` answers one JSON move request; `selfplay` lets the engine play
//! both sides from the initial position.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use check10::protocol::handle_move_request;
use check10::search::ChoicePolicy;
use check10::{Engine, EngineConfig, GameState, Result};

#[derive(Parser)]
#[command(name = "check10-engine")]
#[command(about = "Best-move search for Check10", long_about = None)]
struct Cli {
    /// JSON engine configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Time budget per move in milliseconds
    #[arg(short, long, global = true)]
    time_budget_ms: Option<u64>,

    /// Maximum search depth (1-15)
    #[arg(short = 'd', long, global = true)]
    max_depth: Option<i8>,

    /// Seed for the fallback move
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// How the search treats moves with several promotion targets
    #[arg(long, global = true)]
    choice_policy: Option<PolicyArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a move request and print the response
    Solve {
        /// Request file; stdin when omitted
        input: Option<PathBuf>,
    },
    /// Play the engine against itself
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value = "200")]
        max_moves: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    ImmediateGain,
    Branch,
}

impl From<PolicyArg> for ChoicePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::ImmediateGain => ChoicePolicy::ImmediateGain,
            PolicyArg::Branch => ChoicePolicy::Branch,
        }
    }
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json(path)?,
            None => EngineConfig::default(),
        };
        if let Some(ms) = self.time_budget_ms {
            config = config.with_time_budget_ms(ms);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(policy) = self.choice_policy {
            config = config.with_choice_policy(policy.into());
        }
        Ok(config)
    }
}

fn solve(engine: &Engine, input: Option<PathBuf>) -> Result<()> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    println!("{}", handle_move_request(engine, &body)?);
    Ok(())
}

fn selfplay(engine: &Engine, max_moves: usize) -> Result<()> {
    let mut state = GameState::new();
    for ply in 1..=max_moves {
        let result = engine.find_best_move(&state);
        let Some(mv) = result.best_move else {
            break;
        };
        let transition = state.apply_move(&mv, result.capture_choice)?;
        info!(
            ply,
            mv = %mv,
            captured = transition.captured.len(),
            gain = transition.score_gain,
            depth = result.depth,
            search_type = ?result.search_type,
            "Move played"
        );
        if state.game_over {
            break;
        }
    }

    println!("{}", state.board);
    println!(
        "White {} - Black {} ({} pieces left)",
        state.white_score,
        state.black_score,
        state.board.piece_count()
    );
    match state.winner() {
        Some(color) => println!("{} wins", color.name()),
        None if state.game_over => println!("Draw"),
        None => println!("Move limit reached"),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let engine = Engine::new(cli.engine_config()?);
    match cli.command {
        Command::Solve { input } => solve(&engine, input),
        Command::Selfplay { max_moves } => selfplay(&engine, max_moves),
    }
}

/// Exit code 2 for unusable input, 1 for engine faults
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_client_error() => {
            warn!(error = %err, "Request rejected");
            ExitCode::from(2)
        }
        Err(err) => {
            error!(error = %err, "Engine failed");
            ExitCode::FAILURE
        }
    }
}
