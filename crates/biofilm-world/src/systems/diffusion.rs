//! Nutrient diffusion over the Moore neighborhood.

use crate::entities::{ComponentFlags, EntityStore};
use crate::neighbors::NeighborResolver;

/// Diffuse nutrients for every cell with the nutrient and nutrient snapshot
/// components active.
///
/// Reads only snapshot values, so the result does not depend on traversal
/// order. Requires `0 <= diffusion_rate <= 0.125`.
pub fn apply_diffusion(entities: &mut EntityStore, diffusion_rate: f64, resolver: &NeighborResolver) {
    let required = ComponentFlags::NUTRIENT | ComponentFlags::NUTRIENT_SNAPSHOT;

    for id in 0..entities.len() {
        if !entities.has(id, required) {
            continue;
        }

        let neighbor_ids = resolver.moore_neighbors(id, entities);
        let neighbors = resolver.neighbor_nutrient_values(entities, &neighbor_ids);
        let site = entities.nutrient_snapshot[id];

        entities.nutrients[id] = apply_site_diffusion(diffusion_rate, site, &neighbors);
    }
}

/// `(1 - 8d) * site + d * sum(neighbors)`
pub fn apply_site_diffusion(diffusion_rate: f64, site: f64, neighbors: &[f64; 8]) -> f64 {
    let neighbor_sum: f64 = neighbors.iter().sum();
    (1.0 - 8.0 * diffusion_rate) * site + diffusion_rate * neighbor_sum
}
