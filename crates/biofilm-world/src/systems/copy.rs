//! Snapshot and boundary-refresh stages.

use crate::entities::{ComponentFlags, EntityStore};
use biofilm_core::CellLocation;

/// Copy the bacteria component into its snapshot for cells that have both
pub fn copy_bacteria_states(entities: &mut EntityStore) {
    let required = ComponentFlags::BACTERIA | ComponentFlags::BACTERIA_SNAPSHOT;

    for id in 0..entities.len() {
        if entities.has(id, required) {
            entities.bacteria_snapshot[id] = entities.bacteria[id];
        }
    }
}

/// Copy the nutrient component into its snapshot for cells that have both
pub fn copy_nutrient_states(entities: &mut EntityStore) {
    let required = ComponentFlags::NUTRIENT | ComponentFlags::NUTRIENT_SNAPSHOT;

    for id in 0..entities.len() {
        if entities.has(id, required) {
            entities.nutrient_snapshot[id] = entities.nutrients[id];
        }
    }
}

/// Fill the snapshot slots of the top and bottom pad rows from the adjacent
/// regular row's current state.
pub fn refresh_padded_states(entities: &mut EntityStore, cells_per_row: usize) {
    for id in 0..entities.len() {
        let source = match entities.location(id) {
            Some(CellLocation::TopPad) => id + cells_per_row,
            Some(CellLocation::BottomPad) => id - cells_per_row,
            _ => continue,
        };
        entities.bacteria_snapshot[id] = entities.bacteria[source];
        entities.nutrient_snapshot[id] = entities.nutrients[source];
    }
}
