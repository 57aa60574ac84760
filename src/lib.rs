#![allow(non_snake_case)]

pub mod fit;
pub mod math;
pub mod physics;

/// (T-m/A) `mu_0 / 4 pi`, collapsed to the exact SI value.
/// The slab field formulas are calibrated against this constant,
/// not the CODATA-adjusted permeability.
pub const MU0_OVER_4PI: f64 = 1e-7;
