//! `timetable-cli`: load -> validate -> feasibility-check -> solve -> export.
//! Exit codes: 0 success, 2 input/validation error, 3 infeasible, other internal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sched_core::{SolveError, Solver};
use solver_milp::MilpSolver;
use types::{SolveParams, SolveStatus};

/// Builds a weekly timetable from a directory of input CSVs.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory containing the six required CSVs and an optional rooms.csv.
    #[arg(long)]
    inputs: PathBuf,

    /// Directory the per-section/faculty/master CSVs are written to.
    #[arg(long)]
    output: PathBuf,

    /// Solver wall-clock time limit, in seconds.
    #[arg(long, default_value_t = 60)]
    time_limit_sec: u64,

    /// Minimize schedule gaps (slower to solve).
    #[arg(long, default_value_t = false)]
    optimize_gaps: bool,

    /// Parallel search workers handed to the underlying solver.
    #[arg(long, default_value_t = 8)]
    workers: u32,

    /// Fixed random seed, for reproducible solves.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("internal error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let problem = match loader::load_from_dir(&cli.inputs) {
        Ok(problem) => problem,
        Err(err) => {
            println!("Input error: {err}");
            return Ok(ExitCode::from(2));
        }
    };

    let prepared = match sched_core::prepare(&problem) {
        Ok(p) => p,
        Err(SolveError::FeasibilityFailed(report)) => {
            println!("Feasibility errors detected:");
            for e in &report.errors {
                println!(" - {e}");
            }
            if !report.warnings.is_empty() {
                println!("Warnings:");
                for w in &report.warnings {
                    println!(" - {w}");
                }
            }
            return Ok(ExitCode::from(2));
        }
        Err(SolveError::Invalid(err)) => {
            println!("Feasibility errors detected:");
            println!(" - {err}");
            return Ok(ExitCode::from(2));
        }
        Err(SolveError::Internal(err)) => return Err(err),
    };

    if !prepared.feasibility.warnings.is_empty() {
        println!("Feasibility warnings:");
        for w in &prepared.feasibility.warnings {
            println!(" - {w}");
        }
    }

    let params = SolveParams {
        time_limit_sec: cli.time_limit_sec,
        optimize_gaps: cli.optimize_gaps,
        workers: cli.workers,
        seed: cli.seed,
    };

    let result = MilpSolver::new()
        .solve(&prepared, &params)
        .map_err(anyhow::Error::from)?;

    if result.status == SolveStatus::Infeasible {
        println!("Solver could not find a feasible timetable.");
        return Ok(ExitCode::from(3));
    }

    write_outputs(&problem, &result, &cli.output)?;

    println!("Solver status: {:?}", result.status);
    if let Some(obj) = result.objective_value {
        println!("Objective value: {obj}");
    }
    println!("Outputs written to: {}", cli.output.display());
    Ok(ExitCode::SUCCESS)
}

fn write_outputs(
    problem: &types::ProblemData,
    result: &types::SolveResult,
    output_dir: &std::path::Path,
) -> anyhow::Result<()> {
    let bundle = exporter::export_all(problem, result)?;

    let sections_dir = output_dir.join("sections");
    let faculty_dir = output_dir.join("faculty");
    std::fs::create_dir_all(&sections_dir)?;
    std::fs::create_dir_all(&faculty_dir)?;

    for (section_id, csv) in &bundle.sections {
        std::fs::write(sections_dir.join(format!("section_{section_id}.csv")), csv)?;
    }
    for (faculty_id, csv) in &bundle.faculty {
        std::fs::write(faculty_dir.join(format!("faculty_{faculty_id}.csv")), csv)?;
    }
    std::fs::write(output_dir.join("master_timetable.csv"), &bundle.master)?;
    if let Some(rooms_csv) = &bundle.available_rooms {
        std::fs::write(output_dir.join("available_rooms.csv"), rooms_csv)?;
    }
    std::fs::write(output_dir.join("available_faculty.csv"), &bundle.available_faculty)?;

    Ok(())
}
