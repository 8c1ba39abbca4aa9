//! Plain-text renderings of the grid for debugging.
//!
//! One line per padded row, values separated by single spaces. Renderings of
//! the live components only include regular cells and skip the pad rows.

use crate::entities::{ComponentFlags, EntityStore};
use biofilm_core::EntityId;
use std::fmt::Display;

pub fn render_bacteria_grid(entities: &EntityStore) -> String {
    render(entities, Some(ComponentFlags::BACTERIA), |id| entities.bacteria[id])
}

pub fn render_nutrient_grid(entities: &EntityStore) -> String {
    render(entities, Some(ComponentFlags::NUTRIENT), |id| entities.nutrients[id])
}

pub fn render_bacteria_snapshot_grid(entities: &EntityStore) -> String {
    render(entities, None, |id| entities.bacteria_snapshot[id])
}

pub fn render_nutrient_snapshot_grid(entities: &EntityStore) -> String {
    render(entities, None, |id| entities.nutrient_snapshot[id])
}

pub fn render_cell_locations(entities: &EntityStore) -> String {
    render(entities, None, |id| match entities.location(id) {
        Some(location) => location.code().to_string(),
        None => "-".to_string(),
    })
}

fn render<T: Display>(
    entities: &EntityStore,
    required: Option<ComponentFlags>,
    value: impl Fn(EntityId) -> T,
) -> String {
    let mut output = String::new();
    let mut line: Vec<String> = Vec::new();
    let mut current_row = None;

    for id in 0..entities.len() {
        let row = entities.indices[id].row;
        if current_row != Some(row) {
            flush_line(&mut output, &mut line);
            current_row = Some(row);
        }

        if required.map_or(true, |components| entities.has(id, components)) {
            line.push(value(id).to_string());
        }
    }
    flush_line(&mut output, &mut line);

    output
}

fn flush_line(output: &mut String, line: &mut Vec<String>) {
    if !line.is_empty() {
        output.push_str(&line.join(" "));
        output.push('\n');
        line.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridGeometry;
    use crate::initializer::{initialize_entities, InitializationParameters};
    use biofilm_core::Dimensions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn entities() -> EntityStore {
        let geometry = GridGeometry::new(Dimensions::new(2, 3));
        let parameters = InitializationParameters {
            probability_init: 1.0,
            max_nutrient: 1.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        initialize_entities(&geometry, &parameters, &mut rng)
    }

    #[test]
    fn test_render_bacteria_grid() {
        assert_eq!(render_bacteria_grid(&entities()), "1 0 0\n1 0 0\n");
    }

    #[test]
    fn test_render_nutrient_grid() {
        assert_eq!(render_nutrient_grid(&entities()), "1 1 1\n1 1 1\n");
    }

    #[test]
    fn test_render_cell_locations() {
        let expected = "0 2 2 2 1\n0 4 6 5 1\n0 4 6 5 1\n0 3 3 3 1\n";
        assert_eq!(render_cell_locations(&entities()), expected);
    }

    #[test]
    fn test_render_snapshot_grids_include_padding() {
        let rendered = render_bacteria_snapshot_grid(&entities());
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.starts_with("3 0 0 0 3\n"));
        assert!(render_nutrient_snapshot_grid(&entities()).ends_with("0 0 0 0 1\n"));
    }
}
