//! Command-line arguments.

use anyhow::{Context, Result};
use biofilm_core::RunConfig;
use biofilm_world::render::{render_bacteria_grid, render_cell_locations, render_nutrient_grid};
use biofilm_world::EntityStore;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Execution strategies for the stepping loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Single-threaded, sequential passes over the grid
    Serial,
}

impl RunMode {
    pub fn label(self) -> &'static str {
        match self {
            RunMode::Serial => "serial",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "biofilm", version, about = "Biofilm colonization cellular automaton")]
pub struct Args {
    /// Simulation run mode
    #[arg(long, value_enum, ignore_case = true, default_value_t = RunMode::Serial)]
    pub mode: RunMode,

    /// Number of rows and columns [default: 400 100]
    #[arg(
        short = 'd',
        long = "dim",
        num_args = 2,
        value_names = ["ROWS", "COLUMNS"],
        action = ArgAction::Set
    )]
    pub dim: Option<Vec<usize>>,

    /// Total time steps to run [default: 1000]
    #[arg(short = 't', long = "time-steps")]
    pub time_steps: Option<u64>,

    /// Probability to initialize a bacterium in the first column [default: 0.5]
    #[arg(long = "prob-init")]
    pub prob_init: Option<f64>,

    /// Probability that a bacterium divides [default: 0.3]
    #[arg(long = "prob-divide")]
    pub prob_divide: Option<f64>,

    /// Nutrients a bacterium consumes per time step [default: 0.1]
    #[arg(short = 'c', long = "consume")]
    pub consume: Option<f64>,

    /// Diffusion rate for nutrients, at most 0.125 [default: 0.1]
    #[arg(long = "diffusion-rate")]
    pub diffusion_rate: Option<f64>,

    /// Initial fill value for the nutrient grid [default: 1.0]
    #[arg(long = "max-nutrient")]
    pub max_nutrient: Option<f64>,

    /// Random number generator seed [default: random]
    #[arg(long)]
    pub seed: Option<u32>,

    /// Save simulation history to a CSV file
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Append the benchmark summary to a CSV file
    #[arg(short = 's', long)]
    pub summary: Option<PathBuf>,

    /// Load parameters from a JSON file; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the final bacteria and nutrient grids
    #[arg(long)]
    pub print_grid: bool,
}

impl Args {
    /// Merge the optional config file with command-line overrides and validate the result
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunConfig {
                seed: rand::random(),
                ..Default::default()
            },
        };

        if let Some(dim) = &self.dim {
            config.grid.rows = dim[0];
            config.grid.columns = dim[1];
        }
        if let Some(steps) = self.time_steps {
            config.num_steps = steps;
        }
        if let Some(probability) = self.prob_init {
            config.bacteria.probability_init = probability;
        }
        if let Some(probability) = self.prob_divide {
            config.bacteria.probability_divide = probability;
        }
        if let Some(amount) = self.consume {
            config.nutrient.consume_amount = amount;
        }
        if let Some(rate) = self.diffusion_rate {
            config.nutrient.diffusion_rate = rate;
        }
        if let Some(max) = self.max_nutrient {
            config.nutrient.max_nutrient = max;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parameter table printed before a run
pub fn format_parameters(config: &RunConfig, mode: RunMode) -> String {
    let rows = [
        ("mode", mode.label().to_string()),
        ("rows", config.grid.rows.to_string()),
        ("columns", config.grid.columns.to_string()),
        ("time steps", config.num_steps.to_string()),
        ("prob-init", config.bacteria.probability_init.to_string()),
        ("prob-divide", config.bacteria.probability_divide.to_string()),
        ("consume", config.nutrient.consume_amount.to_string()),
        ("diffusion-rate", config.nutrient.diffusion_rate.to_string()),
        ("max-nutrient", config.nutrient.max_nutrient.to_string()),
        ("seed", config.seed.to_string()),
    ];

    rows.iter()
        .map(|(name, value)| format!("{:<16}{}\n", name, value))
        .collect()
}

/// Location map plus the final bacteria and nutrient grids, for `--print-grid`
pub fn format_grids(entities: &EntityStore) -> String {
    format!(
        "\nLocations\n{}\nBacteria\n{}\nNutrients\n{}",
        render_cell_locations(entities),
        render_bacteria_grid(entities),
        render_nutrient_grid(entities)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["biofilm"]).unwrap();
        assert_eq!(args.mode, RunMode::Serial);
        assert!(args.output.is_none());

        let config = args.run_config().unwrap();
        assert_eq!(config.grid.rows, 400);
        assert_eq!(config.num_steps, 1000);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "biofilm", "--mode", "SERIAL", "-d", "20", "10", "-t", "5", "--prob-init", "1.0",
            "--diffusion-rate", "0.125", "--seed", "7", "-o", "history.csv",
        ])
        .unwrap();

        let config = args.run_config().unwrap();
        assert_eq!(config.grid.rows, 20);
        assert_eq!(config.grid.columns, 10);
        assert_eq!(config.num_steps, 5);
        assert_eq!(config.bacteria.probability_init, 1.0);
        assert_eq!(config.nutrient.diffusion_rate, 0.125);
        assert_eq!(config.seed, 7);
        assert_eq!(args.output, Some(PathBuf::from("history.csv")));
    }

    #[test]
    fn test_repeated_dim_last_wins() {
        let args = Args::try_parse_from(["biofilm", "-d", "20", "10", "-d", "8", "4"]).unwrap();
        assert_eq!(args.dim, Some(vec![8, 4]));

        let config = args.run_config().unwrap();
        assert_eq!(config.grid.rows, 8);
        assert_eq!(config.grid.columns, 4);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let args = Args::try_parse_from(["biofilm", "--diffusion-rate", "0.2"]).unwrap();
        assert!(args.run_config().is_err());

        let args = Args::try_parse_from(["biofilm", "-d", "0", "10"]).unwrap();
        assert!(args.run_config().is_err());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Args::try_parse_from(["biofilm", "--mode", "parallel"]).is_err());
    }

    #[test]
    fn test_format_grids_includes_location_map() {
        let simulation = biofilm_world::Simulation::new(RunConfig {
            num_steps: 0,
            seed: 1,
            grid: biofilm_core::GridConfig { rows: 2, columns: 3 },
            ..Default::default()
        });
        let text = format_grids(simulation.entities());

        // Pad rows are all top/bottom pads except their corner columns
        assert!(text.starts_with("\nLocations\n0 2 2 2 1\n0 4 6 5 1\n0 4 6 5 1\n0 3 3 3 1\n"));
        assert!(text.contains("\nBacteria\n"));
        assert!(text.ends_with("\nNutrients\n1 1 1\n1 1 1\n"));
    }

    #[test]
    fn test_format_parameters() {
        let config = RunConfig::default();
        let table = format_parameters(&config, RunMode::Serial);
        assert!(table.starts_with("mode            serial\n"));
        assert!(table.contains("diffusion-rate  0.1\n"));
    }
}
