//! CLI entry point for the dissection solver.
//!
//! Usage:
//!   dissect solve <LETTERS> <SOLID> <SOLID> <SOLID> [options]
//!   dissect catalog [--json]
//!
//! Options:
//!   --max-depth <n>   Deepest search level that may still branch (default: 5)
//!   --json            Print a JSON object instead of numbered instructions
//!
//! Log output goes to stderr and is filtered with `RUST_LOG`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dissection_solver::{
    dissect_with, render_solution, DissectError, Dissection, PieceKind, SolidKind, SolverConfig,
    SwapStep, ALREADY_ARRANGED,
};

#[derive(Parser)]
#[command(name = "dissect")]
#[command(about = "Find the fewest piece exchanges that turn three solids into their targets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one arrangement
    Solve {
        /// Target letters, one each of T, S and C (any case)
        #[arg(value_name = "LETTERS")]
        letters: String,

        /// Current solids, left to right
        #[arg(value_name = "SOLID", num_args = 0..)]
        solids: Vec<String>,

        /// Deepest search level that may still branch
        #[arg(long, default_value = "5")]
        max_depth: usize,

        /// Print JSON instead of numbered instructions
        #[arg(long)]
        json: bool,
    },
    /// List the solids and their pieces
    Catalog {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Output format for a solve request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    steps: Vec<StepOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    nodes_explored: usize,
    time_elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepOutput {
    #[serde(flatten)]
    step: SwapStep,
    instruction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    solid: SolidKind,
    pieces: Vec<PieceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    letter: Option<char>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            letters,
            solids,
            max_depth,
            json,
        } => run_solve(&letters, &solids, &SolverConfig { max_depth }, json),
        Commands::Catalog { json } => run_catalog(json),
    }
}

fn run_solve(letters: &str, solids: &[String], config: &SolverConfig, json: bool) -> ExitCode {
    let result = dissect_with(letters, solids, config);

    if json {
        let output = format_result(&result);
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match &result {
            Ok(dissection) if dissection.steps.is_empty() => {
                println!("{}", ALREADY_ARRANGED)
            }
            Ok(dissection) => print!("{}", render_solution(&dissection.steps)),
            Err(e) => eprintln!("{}", e),
        }
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn format_result(result: &Result<Dissection, DissectError>) -> SolveOutput {
    match result {
        Ok(dissection) => SolveOutput {
            solved: true,
            steps: dissection
                .steps
                .iter()
                .map(|&step| StepOutput {
                    step,
                    instruction: step.to_string(),
                })
                .collect(),
            error: None,
            nodes_explored: dissection.nodes_explored,
            time_elapsed_ms: dissection.time_elapsed_ms,
        },
        Err(e) => SolveOutput {
            solved: false,
            steps: Vec::new(),
            error: Some(e.to_string()),
            nodes_explored: 0,
            time_elapsed_ms: 0,
        },
    }
}

fn run_catalog(json: bool) -> ExitCode {
    let entries: Vec<CatalogEntry> = SolidKind::ALL
        .into_iter()
        .map(|solid| CatalogEntry {
            solid,
            pieces: solid
                .decomposition()
                .iter()
                .flat_map(|&(kind, count)| std::iter::repeat(kind).take(count as usize))
                .collect(),
            letter: solid.letter(),
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing catalog: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for entry in &entries {
        let pieces: Vec<&str> = entry.pieces.iter().map(|kind| kind.name()).collect();
        let letter = entry
            .letter
            .map(|letter| format!("  (target letter {})", letter))
            .unwrap_or_default();
        println!("{:<10}{}{}", entry.solid.name(), pieces.join(" + "), letter);
    }
    ExitCode::SUCCESS
}
