//! Probe beam and detector aperture models for scanned field measurements.
use core::f64::consts::PI;

/// FWHM of a Gaussian per unit standard deviation, `2 sqrt(2 ln 2)`.
/// Kept at this truncated precision; fitted calibrations are pinned to it.
pub const FWHM_PER_SIGMA: f64 = 2.3548;

/// Normalized 1D Gaussian point-spread function.
///
/// # Arguments
///
/// * `x`:    (m) sample coords, length `n`
/// * `x0`:   (m) beam center
/// * `fwhm`: (m) beam full width at half maximum, `fwhm > 0`
/// * `out`:  (1/m) probability density at sample coords, length `n`
///
/// # Commentary
///
/// Integrates to 1 over the real line for any positive width, so convolving
/// against it preserves signal amplitude. Non-positive `fwhm` is not
/// validated and yields NaN/Inf densities.
pub fn gaussian1d(x: &[f64], x0: f64, fwhm: f64, out: &mut [f64]) -> Result<(), &'static str> {
    if out.len() != x.len() {
        return Err("Input length mismatch");
    }

    let s = fwhm / FWHM_PER_SIGMA; // [m]
    let norm = 1.0 / ((2.0 * PI).sqrt() * s); // [1/m]
    let gain = -1.0 / (2.0 * s * s); // [1/m^2]

    for (xi, o) in x.iter().zip(out.iter_mut()) {
        let r = xi - x0; // [m]
        *o = norm * (gain * r * r).exp();
    }

    Ok(())
}

/// Detector aperture indicator: 1.0 within `half_width` of `x0`, else 0.0.
///
/// # Arguments
///
/// * `x`:          (m) sample coords, length `n`
/// * `x0`:         (m) aperture center
/// * `half_width`: (m) aperture half-width; the boundary is inclusive
/// * `out`:        indicator values, length `n`
pub fn box1d(x: &[f64], x0: f64, half_width: f64, out: &mut [f64]) -> Result<(), &'static str> {
    if out.len() != x.len() {
        return Err("Input length mismatch");
    }

    for (xi, o) in x.iter().zip(out.iter_mut()) {
        *o = if (xi - x0).abs() <= half_width {
            1.0
        } else {
            0.0
        };
    }

    Ok(())
}
