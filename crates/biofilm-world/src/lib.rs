//! Biofilm simulation engine.
//!
//! Cells of a padded 2D grid are stored as parallel component arrays. Each
//! time step runs five passes over every cell: snapshot, boundary refresh,
//! nutrient diffusion, bacterial growth and nutrient consumption.

pub mod entities;
pub mod geometry;
pub mod history;
pub mod initializer;
pub mod neighbors;
pub mod render;
pub mod simulation;
pub mod systems;

pub use entities::{ComponentFlags, EntityStore};
pub use geometry::GridGeometry;
pub use history::{history_records, HistoryRecord, StepObserver};
pub use initializer::initialize_entities;
pub use neighbors::{NeighborResolver, VonNeumannNeighbors};
pub use simulation::{Simulation, SimulationResult};
