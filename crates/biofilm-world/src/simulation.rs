//! Simulation engine driving the per-step pipeline.

use crate::entities::EntityStore;
use crate::geometry::GridGeometry;
use crate::history::StepObserver;
use crate::initializer::{initialize_entities, InitializationParameters};
use crate::neighbors::NeighborResolver;
use crate::render::{
    render_bacteria_grid, render_bacteria_snapshot_grid, render_nutrient_grid,
    render_nutrient_snapshot_grid,
};
use crate::systems::{
    apply_consumption, apply_diffusion, apply_growth, copy_bacteria_states, copy_nutrient_states,
    refresh_padded_states, GrowthOutcome,
};
use biofilm_core::{BacteriumState, Result, RunConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Steps between population summaries in the log
const METRICS_INTERVAL: u64 = 100;

pub struct Simulation {
    entities: EntityStore,
    resolver: NeighborResolver,
    config: RunConfig,
    rng: ChaCha8Rng,
    step: u64,
    total_divisions: u64,
    total_deaths: u64,
}

impl Simulation {
    /// Build the grid from a configuration the caller has already validated.
    ///
    /// The random stream is seeded once here and shared by initialization and
    /// every later step.
    pub fn new(config: RunConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(config.seed));
        let geometry = GridGeometry::new(config.grid.dimensions());
        let parameters = InitializationParameters::from(&config);
        let entities = initialize_entities(&geometry, &parameters, &mut rng);

        Self {
            entities,
            resolver: NeighborResolver::new(geometry),
            config,
            rng,
            step: 0,
            total_divisions: 0,
            total_deaths: 0,
        }
    }

    /// Run the configured number of steps.
    ///
    /// The observer sees the state before the first step and after every step.
    #[instrument(skip(self, observer), fields(num_steps = self.config.num_steps, seed = self.config.seed))]
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Result<SimulationResult> {
        info!(
            rows = self.config.grid.rows,
            columns = self.config.grid.columns,
            cells = self.entities.len(),
            "Starting simulation for {} steps",
            self.config.num_steps
        );

        observer.observe(self.step, &self.entities)?;

        for _ in 0..self.config.num_steps {
            self.step();
            observer.observe(self.step, &self.entities)?;

            if self.step % METRICS_INTERVAL == 0 {
                self.emit_population_metrics();
            }
        }

        let result = self.collect_results();
        info!(
            event = "run_summary",
            total_steps = result.total_steps,
            alive = result.alive,
            dead = result.dead,
            empty = result.empty,
            total_nutrient = result.total_nutrient,
            total_divisions = result.total_divisions,
            total_deaths = result.total_deaths,
            "Simulation complete"
        );

        Ok(result)
    }

    /// Execute one time step: snapshot, boundary refresh, diffusion, growth, consumption
    pub fn step(&mut self) -> GrowthOutcome {
        let cells_per_row = self.resolver.geometry().cells_per_row;

        copy_bacteria_states(&mut self.entities);
        copy_nutrient_states(&mut self.entities);
        refresh_padded_states(&mut self.entities, cells_per_row);

        apply_diffusion(
            &mut self.entities,
            self.config.nutrient.diffusion_rate,
            &self.resolver,
        );
        let outcome = apply_growth(
            &mut self.entities,
            self.config.bacteria.probability_divide,
            &self.resolver,
            &mut self.rng,
        );
        apply_consumption(&mut self.entities, self.config.nutrient.consume_amount);

        self.step += 1;
        self.total_divisions += outcome.divisions as u64;
        self.total_deaths += outcome.deaths as u64;

        debug!(
            step = self.step,
            divisions = outcome.divisions,
            deaths = outcome.deaths,
            "Step complete"
        );
        trace!(
            step = self.step,
            bacteria = %render_bacteria_grid(&self.entities),
            nutrients = %render_nutrient_grid(&self.entities),
            bacteria_snapshot = %render_bacteria_snapshot_grid(&self.entities),
            nutrient_snapshot = %render_nutrient_snapshot_grid(&self.entities),
            "Grid state"
        );

        outcome
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.resolver.geometry()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of steps executed so far
    pub fn current_step(&self) -> u64 {
        self.step
    }

    fn emit_population_metrics(&self) {
        let live = self.entities.live_cells().count();
        let mean_nutrient = if live > 0 {
            self.entities.total_nutrient() / live as f64
        } else {
            0.0
        };

        info!(
            event = "population_metrics",
            step = self.step,
            alive = self.entities.count_bacteria(BacteriumState::Alive),
            dead = self.entities.count_bacteria(BacteriumState::Dead),
            empty = self.entities.count_bacteria(BacteriumState::Empty),
            mean_nutrient = mean_nutrient,
            total_divisions = self.total_divisions,
            total_deaths = self.total_deaths,
            "Population metrics snapshot"
        );
    }

    fn collect_results(&self) -> SimulationResult {
        SimulationResult {
            total_steps: self.step,
            alive: self.entities.count_bacteria(BacteriumState::Alive),
            dead: self.entities.count_bacteria(BacteriumState::Dead),
            empty: self.entities.count_bacteria(BacteriumState::Empty),
            total_nutrient: self.entities.total_nutrient(),
            total_divisions: self.total_divisions,
            total_deaths: self.total_deaths,
        }
    }
}

/// Final population summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_steps: u64,
    pub alive: usize,
    pub dead: usize,
    pub empty: usize,
    pub total_nutrient: f64,
    pub total_divisions: u64,
    pub total_deaths: u64,
}
