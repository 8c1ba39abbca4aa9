//! Structure-of-arrays storage for grid cells.
//!
//! Every cell of the padded grid, padding included, owns one slot in each
//! component array. A per-cell [`ComponentFlags`] mask records which
//! components carry meaning for that cell: pad cells only have the snapshot
//! components active, so stages that need the live bacteria or nutrient
//! components skip them by checking the mask instead of the location.

use biofilm_core::{BacteriumState, CellIndex, CellLocation, EntityId};
use bitflags::bitflags;

bitflags! {
    /// Which components are valid for a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComponentFlags: u32 {
        const INDICES           = 1 << 0;
        const LOCATION          = 1 << 1;
        const BACTERIA          = 1 << 2;
        const NUTRIENT          = 1 << 3;
        const BACTERIA_SNAPSHOT = 1 << 4;
        const NUTRIENT_SNAPSHOT = 1 << 5;
    }
}

impl ComponentFlags {
    /// Components every cell carries, padding included
    pub const PADDING: Self = Self::INDICES
        .union(Self::LOCATION)
        .union(Self::BACTERIA_SNAPSHOT)
        .union(Self::NUTRIENT_SNAPSHOT);

    /// Components of a regular, unpadded cell
    pub const CELL: Self = Self::PADDING
        .union(Self::BACTERIA)
        .union(Self::NUTRIENT);
}

/// Parallel component arrays indexed by [`EntityId`].
///
/// Not synchronized; a single owner mutates it sequentially.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Plain-text label for each cell, for debugging
    pub names: Vec<String>,
    pub indices: Vec<CellIndex>,
    locations: Vec<Option<CellLocation>>,
    pub bacteria: Vec<BacteriumState>,
    pub nutrients: Vec<f64>,
    pub bacteria_snapshot: Vec<BacteriumState>,
    pub nutrient_snapshot: Vec<f64>,
    pub flags: Vec<ComponentFlags>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        let mut store = Self::new();
        store.reserve(n);
        store
    }

    /// Reserve room for `n` additional cells in every component array
    pub fn reserve(&mut self, n: usize) {
        self.names.reserve(n);
        self.indices.reserve(n);
        self.locations.reserve(n);
        self.bacteria.reserve(n);
        self.nutrients.reserve(n);
        self.bacteria_snapshot.reserve(n);
        self.nutrient_snapshot.reserve(n);
        self.flags.reserve(n);
    }

    /// Append a cell with every component inactive and default-valued.
    ///
    /// Ids are handed out in insertion order starting at zero.
    pub fn add_cell(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.names.len();

        self.names.push(name.into());
        self.indices.push(CellIndex::default());
        self.locations.push(None);
        self.bacteria.push(BacteriumState::Empty);
        self.nutrients.push(0.0);
        self.bacteria_snapshot.push(BacteriumState::Empty);
        self.nutrient_snapshot.push(0.0);
        self.flags.push(ComponentFlags::empty());

        id
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True when every component in `required` is active for `id`
    #[inline]
    pub fn has(&self, id: EntityId, required: ComponentFlags) -> bool {
        self.flags[id].contains(required)
    }

    pub fn activate(&mut self, id: EntityId, components: ComponentFlags) {
        self.flags[id] |= components;
    }

    pub fn location(&self, id: EntityId) -> Option<CellLocation> {
        self.locations[id]
    }

    /// Assign the location of a cell. A location is set once and never changes.
    pub fn assign_location(&mut self, id: EntityId, location: CellLocation) {
        assert!(
            self.locations[id].is_none(),
            "location of cell {} already assigned",
            id
        );
        self.locations[id] = Some(location);
        self.flags[id] |= ComponentFlags::LOCATION;
    }

    /// Ids of cells with both live components active, in ascending order
    pub fn live_cells(&self) -> impl Iterator<Item = EntityId> + '_ {
        let live = ComponentFlags::BACTERIA | ComponentFlags::NUTRIENT;
        (0..self.len()).filter(move |&id| self.has(id, live))
    }

    /// Count live cells whose current bacteria component is `state`
    pub fn count_bacteria(&self, state: BacteriumState) -> usize {
        self.live_cells()
            .filter(|&id| self.bacteria[id] == state)
            .count()
    }

    /// Sum of the current nutrient component over live cells
    pub fn total_nutrient(&self) -> f64 {
        self.live_cells().map(|id| self.nutrients[id]).sum()
    }
}
