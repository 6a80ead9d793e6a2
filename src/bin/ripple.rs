use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ripple::{
    error::Result,
    puzzle::parse::parse_file,
    solver::{
        brute_force::BruteForceSolver,
        compare::compare,
        heuristic::HeuristicSolver,
        stats::render_comparison_table,
        Solver,
    },
};

/// Solve Ripple Effect puzzle files, comparing the brute-force and
/// minimum-remaining-values searches on each.
#[derive(Debug, Parser)]
#[command(name = "ripple", version, about)]
struct Cli {
    /// Puzzle files to solve.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print each solved grid.
    #[arg(long)]
    print: bool,

    /// Emit the reports as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let brute = BruteForceSolver::new();
    let heuristic = HeuristicSolver::new();
    let solvers: [&dyn Solver; 2] = [&brute, &heuristic];

    for file in &cli.files {
        let puzzle = parse_file(file)?;
        let reports = compare(&puzzle, &solvers)?;

        if cli.json {
            let report = serde_json::json!({
                "file": file.display().to_string(),
                "reports": reports,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&report).expect("reports serialize")
            );
        } else {
            println!("File: {}", file.display());
            print!("{}", render_comparison_table(&reports));
        }

        if cli.print {
            for report in &reports {
                if let Some(solution) = &report.solution {
                    println!("{} solution:\n{solution}\n", report.solver);
                }
            }
        }
    }
    Ok(())
}
