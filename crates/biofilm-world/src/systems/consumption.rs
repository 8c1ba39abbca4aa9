//! Nutrient consumption by live bacteria.

use crate::entities::{ComponentFlags, EntityStore};
use biofilm_core::BacteriumState;

/// Subtract `consume_amount` from the nutrient of every cell whose current
/// bacteria state is alive, flooring at zero.
pub fn apply_consumption(entities: &mut EntityStore, consume_amount: f64) {
    let required = ComponentFlags::BACTERIA | ComponentFlags::NUTRIENT;

    for id in 0..entities.len() {
        if entities.has(id, required) && entities.bacteria[id] == BacteriumState::Alive {
            entities.nutrients[id] = (entities.nutrients[id] - consume_amount).max(0.0);
        }
    }
}
