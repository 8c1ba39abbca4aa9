//! Command-line driver for the biofilm simulation.

mod cli;
mod export;
mod telemetry;

use anyhow::Result;
use biofilm_world::{Simulation, SimulationResult, StepObserver};
use clap::Parser;
use cli::{Args, RunMode};
use export::{append_benchmark, BenchmarkRecord, HistoryWriter};
use std::time::Instant;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry()?;

    let config = args.run_config()?;

    println!("\nBiofilm simulation parameters");
    println!("-----------------------------");
    print!("{}", cli::format_parameters(&config, args.mode));
    println!();

    let mut history = match &args.output {
        Some(path) => {
            info!("Saving history to {}", path.display());
            Some(HistoryWriter::create(path)?)
        }
        None => None,
    };

    let mut simulation = Simulation::new(config);

    let timer = Instant::now();
    let result = match args.mode {
        RunMode::Serial => run_serial(&mut simulation, history.as_mut())?,
    };
    let sim_time = timer.elapsed().as_secs_f64();

    if let Some(writer) = history.as_mut() {
        writer.flush()?;
        info!(rows = writer.rows_written(), "History saved");
    }

    println!("simulation time = {} seconds", sim_time);
    info!(
        alive = result.alive,
        dead = result.dead,
        divisions = result.total_divisions,
        "Run finished"
    );

    if let Some(path) = &args.summary {
        let config = simulation.config();
        append_benchmark(
            path,
            &BenchmarkRecord {
                steps: config.num_steps,
                rows: config.grid.rows,
                columns: config.grid.columns,
                sim_time,
                run_mode: args.mode.label(),
            },
        )?;
        info!("Benchmark summary appended to {}", path.display());
    }

    if args.print_grid {
        print!("{}", cli::format_grids(simulation.entities()));
    }

    Ok(())
}

fn run_serial<W: std::io::Write>(
    simulation: &mut Simulation,
    history: Option<&mut HistoryWriter<W>>,
) -> Result<SimulationResult> {
    let mut discard = ();
    let observer: &mut dyn StepObserver = match history {
        Some(writer) => writer,
        None => &mut discard,
    };
    Ok(simulation.run(observer)?)
}
