//! Fitting models for beam-scanned measurements of a current-carrying strip.
//!
//! Each model captures the fixed physical parameters of a measurement
//! (probe width, strip geometry, drive current) and exposes an `eval` of
//! `(scan positions, center, height)` suited to an external nonlinear
//! least-squares routine: the optimizer holds the positions fixed and
//! varies `center` and `height` until the model matches the data.
use std::num::NonZeroUsize;

use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::{ParallelSlice, ParallelSliceMut};

use crate::math::{linspace_into, simpson_uniform};
use crate::physics::beam::{box1d, gaussian1d};
use crate::physics::slab::flux_density_slab_surface;

/// Quadrature node count for the amplitude-scan window.
const AMPLITUDE_QUAD_POINTS: usize = 200;

/// Quadrature node count for the field-offset window. The surface field
/// varies faster than the aperture indicator, so this window is denser.
const OFFSET_QUAD_POINTS: usize = 500;

/// Integration window half-span in units of beam FWHM. Beyond two widths
/// the Gaussian tail contributes below the quadrature error floor.
const WINDOW_HALF_SPAN_FWHM: f64 = 2.0;

/// Amplitude-scan model: a finite-width strip's reflectance step as seen
/// through a Gaussian probe beam.
///
/// # Commentary
///
/// For each scan position the probe PSF is integrated against the strip
/// aperture over a local window of [`AMPLITUDE_QUAD_POINTS`] nodes spanning
/// +/- 2 FWHM, using composite Simpson quadrature. `height` scales the
/// aperture, `center` shifts it.
///
/// Preconditions `fwhm > 0`, `w > 0` are not validated; non-positive values
/// give NaN outputs.
#[derive(Clone, Copy, Debug)]
pub struct AmplitudeModel {
    /// (m) probe beam full width at half maximum
    fwhm: f64,
    /// (m) strip aperture half-width
    half_width: f64,
}

impl AmplitudeModel {
    /// Build a model for a probe of width `fwhm` scanning a strip of width `w`,
    /// both in meters.
    pub fn new(fwhm: f64, w: f64) -> Self {
        Self {
            fwhm,
            half_width: 0.5 * w,
        }
    }

    /// Evaluate the model at each scan position.
    ///
    /// # Arguments
    ///
    /// * `x`:      (m) scan positions, length `n`
    /// * `center`: (m) strip center offset
    /// * `height`: signal amplitude scale
    /// * `out`:    convolved model values, length `n`, in input order
    pub fn eval(
        &self,
        x: &[f64],
        center: f64,
        height: f64,
        out: &mut [f64],
    ) -> Result<(), &'static str> {
        if out.len() != x.len() {
            return Err("Input length mismatch");
        }

        let mut window = Window::new(AMPLITUDE_QUAD_POINTS);

        for (xi, o) in x.iter().zip(out.iter_mut()) {
            let dx = window.fill(*xi, self.fwhm);
            box1d(&window.xx, center, self.half_width, &mut window.integrand)?;
            gaussian1d(&window.xx, *xi, self.fwhm, &mut window.beam)?;

            for (v, g) in window.integrand.iter_mut().zip(window.beam.iter()) {
                *v *= height * g;
            }

            *o = simpson_uniform(&window.integrand, dx);
        }

        Ok(())
    }

    /// [`AmplitudeModel::eval`] parallelized over chunks of scan positions.
    /// Output is identical to the sequential version, in input order.
    pub fn eval_par(
        &self,
        x: &[f64],
        center: f64,
        height: f64,
        out: &mut [f64],
    ) -> Result<(), &'static str> {
        if out.len() != x.len() {
            return Err("Input length mismatch");
        }

        let n = chunk_size(x.len());
        x.par_chunks(n)
            .zip(out.par_chunks_mut(n))
            .try_for_each(|(xc, oc)| self.eval(xc, center, height, oc))
    }
}

/// Field-offset model: the surface field of a current-carrying strip as
/// seen through a Gaussian probe beam and the strip-width aperture.
///
/// # Commentary
///
/// The current density `j = current / (w d)` is fixed at construction. For
/// each scan position, the surface field is evaluated in the strip frame
/// (`xx - center`), masked by the aperture, weighted by the probe PSF, and
/// integrated over a [`OFFSET_QUAD_POINTS`]-node window via composite
/// Simpson quadrature.
#[derive(Clone, Copy, Debug)]
pub struct OffsetModel {
    /// (m) probe beam full width at half maximum
    fwhm: f64,
    /// (m) strip width
    w: f64,
    /// (m) strip depth
    d: f64,
    /// (A/m^2) current density through the strip cross-section
    j: f64,
}

impl OffsetModel {
    /// Build a model for a strip of width `w` and depth `d` (meters)
    /// carrying total current `current` (amperes), probed at `fwhm`.
    pub fn new(fwhm: f64, w: f64, d: f64, current: f64) -> Self {
        Self {
            fwhm,
            w,
            d,
            j: current / (w * d),
        }
    }

    /// Evaluate the model at each scan position.
    ///
    /// # Arguments
    ///
    /// * `x`:      (m) scan positions, length `n`
    /// * `center`: (m) strip center offset
    /// * `height`: field scale factor
    /// * `out`:    (T) convolved model values, length `n`, in input order
    pub fn eval(
        &self,
        x: &[f64],
        center: f64,
        height: f64,
        out: &mut [f64],
    ) -> Result<(), &'static str> {
        if out.len() != x.len() {
            return Err("Input length mismatch");
        }

        let mut window = Window::new(OFFSET_QUAD_POINTS);
        let mut x_strip = vec![0.0; OFFSET_QUAD_POINTS]; // [m] strip-frame coords
        let mut by = vec![0.0; OFFSET_QUAD_POINTS]; // [T]

        for (xi, o) in x.iter().zip(out.iter_mut()) {
            let dx = window.fill(*xi, self.fwhm);

            for (xs, xw) in x_strip.iter_mut().zip(window.xx.iter()) {
                *xs = xw - center;
            }
            flux_density_slab_surface(&x_strip, self.w, self.d, self.j, &mut by)?;

            box1d(&window.xx, center, 0.5 * self.w, &mut window.integrand)?;
            gaussian1d(&window.xx, *xi, self.fwhm, &mut window.beam)?;

            for ((v, g), b) in window
                .integrand
                .iter_mut()
                .zip(window.beam.iter())
                .zip(by.iter())
            {
                *v *= g * height * b;
            }

            *o = simpson_uniform(&window.integrand, dx);
        }

        Ok(())
    }

    /// [`OffsetModel::eval`] parallelized over chunks of scan positions.
    /// Output is identical to the sequential version, in input order.
    pub fn eval_par(
        &self,
        x: &[f64],
        center: f64,
        height: f64,
        out: &mut [f64],
    ) -> Result<(), &'static str> {
        if out.len() != x.len() {
            return Err("Input length mismatch");
        }

        let n = chunk_size(x.len());
        x.par_chunks(n)
            .zip(out.par_chunks_mut(n))
            .try_for_each(|(xc, oc)| self.eval(xc, center, height, oc))
    }
}

/// Reusable per-position quadrature window buffers.
struct Window {
    /// (m) quadrature node coords
    xx: Vec<f64>,
    /// probe PSF values at the nodes
    beam: Vec<f64>,
    /// integrand accumulator, seeded with the aperture indicator
    integrand: Vec<f64>,
}

impl Window {
    fn new(npoints: usize) -> Self {
        Self {
            xx: vec![0.0; npoints],
            beam: vec![0.0; npoints],
            integrand: vec![0.0; npoints],
        }
    }

    /// Center the window nodes on scan position `xi` and return the node spacing.
    fn fill(&mut self, xi: f64, fwhm: f64) -> f64 {
        let span = WINDOW_HALF_SPAN_FWHM * fwhm; // [m]
        linspace_into(xi - span, xi + span, &mut self.xx);

        2.0 * span / (self.xx.len() - 1) as f64
    }
}

/// Positions per rayon work item, sized to the available cores.
fn chunk_size(len: usize) -> usize {
    let ncores = std::thread::available_parallelism()
        .unwrap_or(NonZeroUsize::MIN)
        .get();

    (len / ncores).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace_into;
    use approx::assert_relative_eq;

    #[test]
    fn test_amplitude_model_regression() {
        // Pinned from offline evaluation of the convolved closed form
        let model = AmplitudeModel::new(1e-3, 2e-3);
        let x = [0.0, 5e-4, -5e-4, 1e-3, 3e-3];
        let mut out = [0.0; 5];
        model.eval(&x, 0.0, 1.0, &mut out).unwrap();

        assert_relative_eq!(out[0], 0.9820599969504876, epsilon = 1e-10);
        assert_relative_eq!(out[1], 0.8814876215825537, epsilon = 1e-10);
        assert_relative_eq!(out[3], 0.4999987595967751, epsilon = 1e-10);
        // Three beam widths out the signal is gone
        assert!(out[4].abs() < 1e-6);
    }

    #[test]
    fn test_amplitude_model_shape_and_symmetry() {
        let model = AmplitudeModel::new(1e-3, 2e-3);
        let mut x = [0.0; 50];
        linspace_into(-5e-3, 5e-3, &mut x);
        let mut out = [0.0; 50];
        model.eval(&x, 0.0, 1.0, &mut out).unwrap();

        assert!(out.iter().all(|v| v.is_finite()));
        // Symmetric grid about the center gives a symmetric profile
        for i in 0..25 {
            assert_relative_eq!(out[i], out[49 - i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_amplitude_model_linear_in_height() {
        let model = AmplitudeModel::new(1e-3, 2e-3);
        let x = [0.0, 4e-4];
        let (mut a, mut b) = ([0.0; 2], [0.0; 2]);
        model.eval(&x, 0.0, 1.0, &mut a).unwrap();
        model.eval(&x, 0.0, 2.5, &mut b).unwrap();

        for i in 0..2 {
            assert_relative_eq!(b[i], 2.5 * a[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_offset_model_regression() {
        // Pinned from offline evaluation: w = 1 mm, d = 0.1 mm, I = 1 A
        let model = OffsetModel::new(1e-3, 1e-3, 1e-4, 1.0);
        let x = [0.0, 2.5e-4, -2.5e-4, 1e-3];
        let mut out = [0.0; 4];
        model.eval(&x, 0.0, 1.0, &mut out).unwrap();

        // The convolved field is odd about the strip center
        assert!(out[0].abs() < 1e-18);
        assert_relative_eq!(out[1], 6.382796688001987e-5, epsilon = 1e-10);
        assert_relative_eq!(out[1], -out[2], epsilon = 1e-10);
        assert_relative_eq!(out[3], 3.771385161491869e-5, epsilon = 1e-10);
    }

    #[test]
    fn test_offset_model_center_shift() {
        // Shifting both the center and the scan grid leaves values unchanged
        let model = OffsetModel::new(1e-3, 1e-3, 1e-4, 1.0);
        let x0 = [2.5e-4];
        let x1 = [2.5e-4 + 1e-4];
        let (mut a, mut b) = ([0.0], [0.0]);
        model.eval(&x0, 0.0, 1.0, &mut a).unwrap();
        model.eval(&x1, 1e-4, 1.0, &mut b).unwrap();

        assert_relative_eq!(a[0], b[0], epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let amp = AmplitudeModel::new(1e-3, 2e-3);
        let off = OffsetModel::new(1e-3, 1e-3, 1e-4, 1.0);

        let mut x = [0.0; 37];
        linspace_into(-3e-3, 3e-3, &mut x);
        let (mut seq, mut par) = ([0.0; 37], [0.0; 37]);

        amp.eval(&x, 1e-4, 0.7, &mut seq).unwrap();
        amp.eval_par(&x, 1e-4, 0.7, &mut par).unwrap();
        assert_eq!(seq, par);

        off.eval(&x, 1e-4, 0.7, &mut seq).unwrap();
        off.eval_par(&x, 1e-4, 0.7, &mut par).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_length_mismatch() {
        let model = AmplitudeModel::new(1e-3, 2e-3);
        let mut out = [0.0; 3];
        assert!(model.eval(&[0.0], 0.0, 1.0, &mut out).is_err());
        assert!(model.eval_par(&[0.0], 0.0, 1.0, &mut out).is_err());
    }
}
