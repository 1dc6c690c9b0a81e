//! Command-line crossword filler.
//!
//! Reads a structure file and a word list, fills the grid and prints it.
//!
//! # Usage
//!
//! ```sh
//! xwfill data/structure1.txt data/words1.txt
//! ```
//!
//! Write the filled grid to a file as well:
//!
//! ```sh
//! xwfill data/structure1.txt data/words1.txt output.txt
//! ```
//!
//! Limit the search and show what it cost:
//!
//! ```sh
//! xwfill data/structure2.txt data/words2.txt --max-nodes 100000 --timeout 2.5 --stats
//! ```
//!
//! Set `RUST_LOG=debug` to see the solver phases.
//!
//! # Exit status
//!
//! `0` when the grid was filled or proven unfillable, `1` on input or output
//! errors, `2` when the search budget ran out.

use std::{fs, path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, ValueEnum};
use xwfill_solver::{CrosswordSolver, Propagation, SearchStats, SolveOutcome, SolverConfig};

use self::error::CliError;

mod error;
mod input;
mod render;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum PropagationArg {
    None,
    #[default]
    ForwardChecking,
    MaintainArcConsistency,
}

impl From<PropagationArg> for Propagation {
    fn from(arg: PropagationArg) -> Self {
        match arg {
            PropagationArg::None => Self::None,
            PropagationArg::ForwardChecking => Self::ForwardChecking,
            PropagationArg::MaintainArcConsistency => Self::MaintainArcConsistency,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid file: one line per row, `_` for a fillable cell.
    #[arg(value_name = "STRUCTURE")]
    structure: PathBuf,

    /// Word list: one word per line.
    #[arg(value_name = "WORDS")]
    words: PathBuf,

    /// Also write the filled grid to this file.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Look-ahead after each tentative assignment.
    #[arg(long, value_name = "MODE", value_enum, default_value_t)]
    propagation: PropagationArg,

    /// Give up after visiting this many search nodes.
    #[arg(long, value_name = "COUNT")]
    max_nodes: Option<usize>,

    /// Give up after this many seconds.
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Print search statistics to stderr.
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::new().with_propagation(self.propagation.into());
        if let Some(limit) = self.max_nodes {
            config = config.with_node_limit(limit);
        }
        if let Some(limit) = self.timeout {
            config = config.with_time_limit(limit);
        }
        config
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs = s
        .parse::<f64>()
        .map_err(|e| format!("invalid number of seconds: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid number of seconds: {e}"))
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, CliError> {
    let crossword = input::load_structure(&args.structure)?;
    let dictionary = input::load_words(&args.words)?;
    log::info!(
        "{}x{} grid with {} slots, {} words",
        crossword.height(),
        crossword.width(),
        crossword.variables().len(),
        dictionary.len()
    );

    let solver = CrosswordSolver::with_config(&crossword, &dictionary, args.solver_config());
    let report = solver.solve();
    if args.stats {
        print_stats(&report.stats);
    }

    match report.outcome {
        SolveOutcome::Solved(solution) => {
            let text = render::render(&crossword, &solution);
            print!("{text}");
            if let Some(path) = &args.output {
                fs::write(path, &text).map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
            }
            Ok(ExitCode::SUCCESS)
        }
        SolveOutcome::NoSolution(reason) => {
            log::info!("{reason}");
            println!("No solution.");
            Ok(ExitCode::SUCCESS)
        }
        SolveOutcome::BudgetExceeded(exceeded) => {
            eprintln!("Gave up: {exceeded}.");
            Ok(ExitCode::from(2))
        }
    }
}

fn print_stats(stats: &SearchStats) {
    eprintln!("Nodes:        {}", stats.nodes());
    eprintln!("Values tried: {}", stats.values_tried());
    eprintln!("Backtracks:   {}", stats.backtracks());
    eprintln!("Revisions:    {}", stats.revisions());
    eprintln!("Removals:     {}", stats.removals());
}
