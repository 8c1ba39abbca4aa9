//! Bacterial growth: starvation and division into empty neighbors.

use crate::entities::{ComponentFlags, EntityStore};
use crate::neighbors::NeighborResolver;
use biofilm_core::BacteriumState;
use rand::Rng;

/// Below this nutrient level a live bacterium dies
pub const STARVATION_THRESHOLD: f64 = 1.0e-5;

/// Counts of state changes made by one growth pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthOutcome {
    pub deaths: usize,
    pub divisions: usize,
}

/// Apply the growth rule to every cell with all four bacteria and nutrient
/// components active.
///
/// Reads the bacteria snapshot and the current (post-diffusion) nutrient.
/// A starving bacterium dies without a random draw. A fed bacterium with an
/// empty neighbor draws once to decide whether it divides, and a second time
/// to pick the neighbor it divides into.
pub fn apply_growth<R: Rng + ?Sized>(
    entities: &mut EntityStore,
    probability_divide: f64,
    resolver: &NeighborResolver,
    rng: &mut R,
) -> GrowthOutcome {
    let required = ComponentFlags::BACTERIA
        | ComponentFlags::BACTERIA_SNAPSHOT
        | ComponentFlags::NUTRIENT
        | ComponentFlags::NUTRIENT_SNAPSHOT;
    let mut outcome = GrowthOutcome::default();

    for id in 0..entities.len() {
        if !entities.has(id, required) || !entities.bacteria_snapshot[id].is_alive() {
            continue;
        }

        let nutrient = entities.nutrients[id];

        if nutrient < STARVATION_THRESHOLD {
            entities.bacteria[id] = BacteriumState::Dead;
            outcome.deaths += 1;
        } else if resolver.has_empty_von_neumann_neighbor(id, entities)
            && rng.gen::<f64>() < nutrient * probability_divide
        {
            let target = resolver.sample_empty_von_neumann_neighbor(id, entities, rng);
            entities.bacteria[target] = BacteriumState::Alive;
            outcome.divisions += 1;
        }
    }

    outcome
}
