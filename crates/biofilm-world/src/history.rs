//! Per-step history records and the observer seam used to export them.

use crate::entities::EntityStore;
use biofilm_core::{BacteriumState, Result};
use serde::{Deserialize, Serialize};

/// State of one regular cell at one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub step: u64,
    /// Sequential index over regular cells, independent of the padded id
    pub cell_id: usize,
    pub bacterium_state: BacteriumState,
    pub nutrient: f64,
}

/// Records for every cell with live bacteria and nutrient components, in id order
pub fn history_records(entities: &EntityStore, step: u64) -> impl Iterator<Item = HistoryRecord> + '_ {
    entities
        .live_cells()
        .enumerate()
        .map(move |(cell_id, id)| HistoryRecord {
            step,
            cell_id,
            bacterium_state: entities.bacteria[id],
            nutrient: entities.nutrients[id],
        })
}

/// Receives the grid state after initialization (step 0) and after every step
pub trait StepObserver {
    fn observe(&mut self, step: u64, entities: &EntityStore) -> Result<()>;
}

/// Discards every step
impl StepObserver for () {
    fn observe(&mut self, _step: u64, _entities: &EntityStore) -> Result<()> {
        Ok(())
    }
}

/// Collects records in memory
impl StepObserver for Vec<HistoryRecord> {
    fn observe(&mut self, step: u64, entities: &EntityStore) -> Result<()> {
        self.extend(history_records(entities, step));
        Ok(())
    }
}

impl<T: StepObserver + ?Sized> StepObserver for &mut T {
    fn observe(&mut self, step: u64, entities: &EntityStore) -> Result<()> {
        (**self).observe(step, entities)
    }
}
