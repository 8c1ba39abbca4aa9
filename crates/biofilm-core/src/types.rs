//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense identifier of a cell, equal to its row-major position in the padded grid
pub type EntityId = usize;

/// Width of the ghost-cell ring wrapped around the grid
pub const PADDING: usize = 1;

/// (row, column) of a cell in padded coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

impl CellIndex {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Grid dimensions, unpadded, plus the padding width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
    pub padding: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            padding: PADDING,
        }
    }

    pub fn padded_rows(&self) -> usize {
        self.rows + 2 * self.padding
    }

    pub fn padded_columns(&self) -> usize {
        self.columns + 2 * self.padding
    }

    /// Number of cells in the padded grid
    pub fn cell_count(&self) -> usize {
        self.padded_rows() * self.padded_columns()
    }
}

/// State of the bacteria component of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BacteriumState {
    #[default]
    Empty = 0,
    Alive = 1,
    Dead = 2,
    Border = 3,
}

impl BacteriumState {
    /// Numeric code used in exported history
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_alive(self) -> bool {
        self == BacteriumState::Alive
    }
}

impl fmt::Display for BacteriumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where a cell sits on the padded grid. Assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellLocation {
    LeftPad = 0,
    RightPad = 1,
    TopPad = 2,
    BottomPad = 3,
    FirstColumn = 4,
    LastColumn = 5,
    Other = 6,
}

impl CellLocation {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_padding(self) -> bool {
        matches!(
            self,
            CellLocation::LeftPad
                | CellLocation::RightPad
                | CellLocation::TopPad
                | CellLocation::BottomPad
        )
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
