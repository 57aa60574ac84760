//! Electromagnetics calculations.
pub mod beam;
pub mod slab;

pub use slab::{flux_density_slab, flux_density_slab_2d, flux_density_slab_surface};
