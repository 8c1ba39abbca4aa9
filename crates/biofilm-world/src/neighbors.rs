//! Neighbor lookup on the padded grid.
//!
//! Boundary policy:
//! * West and east: hard walls. First- and last-column cells have three von
//!   Neumann neighbors. Moore neighborhoods reach into the pad columns, which
//!   hold the wall (zero) and reservoir (max nutrient) values.
//! * North and south: periodic. The first regular row's northern neighbor is
//!   the last regular row and vice versa.

use crate::entities::EntityStore;
use crate::geometry::GridGeometry;
use biofilm_core::{BacteriumState, CellLocation, EntityId};
use rand::Rng;

/// Up to four von Neumann neighbor ids, stored inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VonNeumannNeighbors {
    ids: [EntityId; 4],
    len: usize,
}

impl VonNeumannNeighbors {
    fn new() -> Self {
        Self { ids: [0; 4], len: 0 }
    }

    fn push(&mut self, id: EntityId) {
        self.ids[self.len] = id;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.ids[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Computes neighbor ids from grid geometry and the cells' stored indices.
#[derive(Debug, Clone, Copy)]
pub struct NeighborResolver {
    geometry: GridGeometry,
}

impl NeighborResolver {
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Northern neighbor, wrapping from the first regular row to the last
    pub fn north(&self, id: EntityId, entities: &EntityStore) -> EntityId {
        if entities.indices[id].row == self.geometry.first_unpadded_row {
            id + self.geometry.wraparound_shift
        } else {
            id - self.geometry.cells_per_row
        }
    }

    /// Southern neighbor, wrapping from the last regular row to the first
    pub fn south(&self, id: EntityId, entities: &EntityStore) -> EntityId {
        if entities.indices[id].row == self.geometry.last_unpadded_row {
            id - self.geometry.wraparound_shift
        } else {
            id + self.geometry.cells_per_row
        }
    }

    /// Von Neumann neighborhood.
    ///
    /// First-column cells yield `[east, north, south]`, last-column cells
    /// `[west, north, south]`, all others `[west, east, north, south]`.
    pub fn von_neumann_neighbors(&self, id: EntityId, entities: &EntityStore) -> VonNeumannNeighbors {
        let mut neighbors = VonNeumannNeighbors::new();

        match entities.location(id) {
            Some(CellLocation::FirstColumn) => neighbors.push(id + 1),
            Some(CellLocation::LastColumn) => neighbors.push(id - 1),
            _ => {
                neighbors.push(id - 1);
                neighbors.push(id + 1);
            }
        }
        neighbors.push(self.north(id, entities));
        neighbors.push(self.south(id, entities));

        neighbors
    }

    /// Moore neighborhood in the order
    /// `[west, east, north-west, north, north-east, south-west, south, south-east]`.
    pub fn moore_neighbors(&self, id: EntityId, entities: &EntityStore) -> [EntityId; 8] {
        let north = self.north(id, entities);
        let south = self.south(id, entities);

        [
            id - 1,
            id + 1,
            north - 1,
            north,
            north + 1,
            south - 1,
            south,
            south + 1,
        ]
    }

    /// Snapshot nutrient values of the given neighbors, in the same order
    pub fn neighbor_nutrient_values(&self, entities: &EntityStore, ids: &[EntityId; 8]) -> [f64; 8] {
        ids.map(|neighbor| entities.nutrient_snapshot[neighbor])
    }

    /// Von Neumann neighbors whose snapshot bacteria state is empty
    pub fn empty_von_neumann_neighbors(&self, id: EntityId, entities: &EntityStore) -> VonNeumannNeighbors {
        let mut empty = VonNeumannNeighbors::new();
        for neighbor in self.von_neumann_neighbors(id, entities).iter() {
            if entities.bacteria_snapshot[neighbor] == BacteriumState::Empty {
                empty.push(neighbor);
            }
        }
        empty
    }

    pub fn has_empty_von_neumann_neighbor(&self, id: EntityId, entities: &EntityStore) -> bool {
        self.von_neumann_neighbors(id, entities)
            .iter()
            .any(|neighbor| entities.bacteria_snapshot[neighbor] == BacteriumState::Empty)
    }

    /// Pick one empty von Neumann neighbor uniformly at random.
    ///
    /// Consumes exactly one integer draw sized to the number of empty
    /// neighbors. Panics if there is no empty neighbor; check
    /// [`Self::has_empty_von_neumann_neighbor`] first.
    pub fn sample_empty_von_neumann_neighbor<R: Rng + ?Sized>(
        &self,
        id: EntityId,
        entities: &EntityStore,
        rng: &mut R,
    ) -> EntityId {
        let empty = self.empty_von_neumann_neighbors(id, entities);
        assert!(
            !empty.is_empty(),
            "cell {} has no empty von Neumann neighbor to sample",
            id
        );

        let selected = rng.gen_range(0..empty.len());
        empty.as_slice()[selected]
    }
}
