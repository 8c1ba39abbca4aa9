//! Padded grid geometry: id conversion and location classification.

use biofilm_core::{CellIndex, CellLocation, Dimensions, EntityId};
use serde::{Deserialize, Serialize};

/// Derived layout of the padded grid.
///
/// Ids are row-major over the padded grid: `id = column + row * cells_per_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub dimensions: Dimensions,
    /// Number of columns per row in the padded grid
    pub cells_per_row: usize,
    /// Row index of the first row of the regular grid
    pub first_unpadded_row: usize,
    /// Row index of the last row of the regular grid
    pub last_unpadded_row: usize,
    /// Column index of the first column of the regular grid
    pub first_unpadded_column: usize,
    /// Column index of the last column of the regular grid
    pub last_unpadded_column: usize,
    /// Id offset between the first and last regular rows
    pub wraparound_shift: usize,
}

impl GridGeometry {
    /// Requires `rows >= 1` and `columns >= 1`.
    pub fn new(dimensions: Dimensions) -> Self {
        let cells_per_row = dimensions.padded_columns();
        let padding = dimensions.padding;

        Self {
            dimensions,
            cells_per_row,
            first_unpadded_row: padding,
            last_unpadded_row: padding + dimensions.rows - 1,
            first_unpadded_column: padding,
            last_unpadded_column: padding + dimensions.columns - 1,
            wraparound_shift: (dimensions.rows - 1) * cells_per_row,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.dimensions.cell_count()
    }

    pub fn index_to_id(&self, index: CellIndex) -> EntityId {
        index.column + self.cells_per_row * index.row
    }

    pub fn id_to_index(&self, id: EntityId) -> CellIndex {
        CellIndex::new(id / self.cells_per_row, id % self.cells_per_row)
    }

    /// Classify a padded-grid position.
    ///
    /// Padding columns take priority over padding rows, so the four corners
    /// belong to the left and right pads.
    pub fn classify(&self, index: CellIndex) -> CellLocation {
        if index.column < self.first_unpadded_column {
            CellLocation::LeftPad
        } else if index.column > self.last_unpadded_column {
            CellLocation::RightPad
        } else if index.row < self.first_unpadded_row {
            CellLocation::TopPad
        } else if index.row > self.last_unpadded_row {
            CellLocation::BottomPad
        } else if index.column == self.first_unpadded_column {
            CellLocation::FirstColumn
        } else if index.column == self.last_unpadded_column {
            CellLocation::LastColumn
        } else {
            CellLocation::Other
        }
    }

    /// Iterator over all padded-grid positions in id order
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.cell_count()).map(move |id| self.id_to_index(id))
    }
}
