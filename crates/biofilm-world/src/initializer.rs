//! Builds the padded grid and its initial bacteria and nutrient state.

use crate::entities::{ComponentFlags, EntityStore};
use crate::geometry::GridGeometry;
use biofilm_core::{BacteriumState, CellLocation, EntityId, RunConfig};
use rand::Rng;
use tracing::debug;

/// Values used to populate the initial grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitializationParameters {
    /// Probability that a first-column cell starts with a live bacterium
    pub probability_init: f64,
    /// Initial nutrient fill, also the east reservoir value
    pub max_nutrient: f64,
}

impl From<&RunConfig> for InitializationParameters {
    fn from(config: &RunConfig) -> Self {
        Self {
            probability_init: config.bacteria.probability_init,
            max_nutrient: config.nutrient.max_nutrient,
        }
    }
}

/// Create every cell of the padded grid in id order and set its initial state.
///
/// Draws one uniform sample per first-column cell, in ascending id order.
pub fn initialize_entities<R: Rng + ?Sized>(
    geometry: &GridGeometry,
    parameters: &InitializationParameters,
    rng: &mut R,
) -> EntityStore {
    let mut entities = EntityStore::with_capacity(geometry.cell_count());

    for index in geometry.indices() {
        let location = geometry.classify(index);
        let id = add_located_cell(&mut entities, location);
        entities.indices[id] = index;
        entities.activate(id, ComponentFlags::INDICES);

        match location {
            // West wall: no nutrient source
            CellLocation::LeftPad => {
                entities.bacteria_snapshot[id] = BacteriumState::Border;
            }
            // East reservoir of constant nutrient
            CellLocation::RightPad => {
                entities.bacteria_snapshot[id] = BacteriumState::Border;
                entities.nutrient_snapshot[id] = parameters.max_nutrient;
            }
            // Filled every step by the boundary refresh
            CellLocation::TopPad | CellLocation::BottomPad => {}
            CellLocation::FirstColumn => {
                entities.bacteria[id] = seed_bacterium(parameters.probability_init, rng);
                entities.nutrients[id] = parameters.max_nutrient;
            }
            CellLocation::LastColumn | CellLocation::Other => {
                entities.nutrients[id] = parameters.max_nutrient;
            }
        }
    }

    debug!(
        cells = entities.len(),
        seeded = entities.count_bacteria(BacteriumState::Alive),
        "Initialized grid"
    );

    entities
}

fn add_located_cell(entities: &mut EntityStore, location: CellLocation) -> EntityId {
    let name = match location {
        CellLocation::LeftPad => "LeftPad",
        CellLocation::RightPad => "RightPad",
        CellLocation::TopPad => "TopPad",
        CellLocation::BottomPad => "BottomPad",
        CellLocation::FirstColumn | CellLocation::LastColumn | CellLocation::Other => "Cell",
    };

    let id = entities.add_cell(name);
    entities.assign_location(id, location);

    let components = if location.is_padding() {
        ComponentFlags::PADDING
    } else {
        ComponentFlags::CELL
    };
    entities.activate(id, components);

    id
}

fn seed_bacterium<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> BacteriumState {
    if rng.gen::<f64>() < probability {
        BacteriumState::Alive
    } else {
        BacteriumState::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biofilm_core::Dimensions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn build(rows: usize, columns: usize, probability_init: f64) -> (GridGeometry, EntityStore) {
        let geometry = GridGeometry::new(Dimensions::new(rows, columns));
        let parameters = InitializationParameters {
            probability_init,
            max_nutrient: 1.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let entities = initialize_entities(&geometry, &parameters, &mut rng);
        (geometry, entities)
    }

    #[test]
    fn test_small_grid_scenario() {
        let (geometry, entities) = build(2, 3, 1.0);
        assert_eq!(geometry.cells_per_row, 5);
        assert_eq!(entities.len(), 20);

        for row in 1..=2 {
            let first = row * 5 + 1;
            assert_eq!(entities.location(first), Some(CellLocation::FirstColumn));
            assert_eq!(entities.bacteria[first], BacteriumState::Alive);

            for column in 2..=3 {
                let id = row * 5 + column;
                assert_eq!(entities.bacteria[id], BacteriumState::Empty);
                assert_eq!(entities.nutrients[id], 1.0);
            }
        }

        for row in 0..4 {
            let left = row * 5;
            let right = row * 5 + 4;
            assert_eq!(entities.location(left), Some(CellLocation::LeftPad));
            assert_eq!(entities.bacteria_snapshot[left], BacteriumState::Border);
            assert!(!entities.has(left, ComponentFlags::NUTRIENT));
            assert!(!entities.has(left, ComponentFlags::BACTERIA));

            assert_eq!(entities.location(right), Some(CellLocation::RightPad));
            assert_eq!(entities.nutrient_snapshot[right], 1.0);
            assert_eq!(entities.bacteria_snapshot[right], BacteriumState::Border);
        }
    }

    #[test]
    fn test_zero_probability_seeds_nothing() {
        let (_, entities) = build(5, 5, 0.0);
        assert_eq!(entities.count_bacteria(BacteriumState::Alive), 0);
    }

    #[test]
    fn test_ids_match_row_major_indices() {
        let (geometry, entities) = build(3, 4, 0.5);
        for id in 0..entities.len() {
            assert_eq!(geometry.index_to_id(entities.indices[id]), id);
            assert!(entities.has(id, ComponentFlags::INDICES | ComponentFlags::LOCATION));
        }
    }

    #[test]
    fn test_row_pads_have_no_live_components() {
        let (_, entities) = build(3, 4, 1.0);
        for id in 0..entities.len() {
            match entities.location(id) {
                Some(CellLocation::TopPad) | Some(CellLocation::BottomPad) => {
                    assert_eq!(entities.flags[id], ComponentFlags::PADDING);
                }
                Some(location) if !location.is_padding() => {
                    assert_eq!(entities.flags[id], ComponentFlags::CELL);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let (_, first) = build(20, 10, 0.5);
        let (_, second) = build(20, 10, 0.5);
        assert_eq!(first.bacteria, second.bacteria);
    }
}
