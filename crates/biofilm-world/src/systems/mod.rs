//! Per-step transformations applied to the entity store.
//!
//! Each stage is a full pass over every cell by ascending id. Stages are run
//! in this order: snapshot, boundary refresh, diffusion, growth, consumption.

pub mod consumption;
pub mod copy;
pub mod diffusion;
pub mod growth;

pub use consumption::apply_consumption;
pub use copy::{copy_bacteria_states, copy_nutrient_states, refresh_padded_states};
pub use diffusion::{apply_diffusion, apply_site_diffusion};
pub use growth::{apply_growth, GrowthOutcome, STARVATION_THRESHOLD};
