//! Pure-math functions supporting physics calculations.

/// Fill `out` with `out.len()` evenly-spaced values spanning `[start, stop]`
/// inclusive of both endpoints.
///
/// For a single-element output, writes `start`.
#[inline]
pub fn linspace_into(start: f64, stop: f64, out: &mut [f64]) {
    let n = out.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        out[0] = start;
        return;
    }

    let step = (stop - start) / (n - 1) as f64;
    for (i, v) in out.iter_mut().enumerate() {
        *v = (i as f64).mul_add(step, start);
    }
    // Pin the endpoint so that accumulated step roundoff
    // does not move the last node off the interval boundary
    out[n - 1] = stop;
}

/// Composite Simpson's-rule integration of uniformly-spaced samples.
///
/// # Arguments
///
/// * `y`:  integrand samples on a uniform grid, length `n >= 2`
/// * `dx`: grid spacing
///
/// # Commentary
///
/// Mirrors scipy's `simpson` with `even='avg'` semantics: for an odd number
/// of samples (even number of sub-intervals), this is plain composite
/// Simpson; for an even number of samples, it averages the two ways of
/// patching the leftover sub-interval with a trapezoid (one at each end).
/// The averaged variant matters because fit residuals are sensitive to the
/// quadrature rule at the 4th decimal.
///
/// Degenerate inputs (`n < 2`) integrate to zero.
pub fn simpson_uniform(y: &[f64], dx: f64) -> f64 {
    let n = y.len();
    if n < 2 {
        return 0.0;
    }
    if n == 2 {
        return 0.5 * dx * (y[0] + y[1]);
    }

    if n % 2 == 1 {
        return simpson_odd_samples(y, dx);
    }

    // Even sample count: Simpson on all but one end, trapezoid on the
    // leftover sub-interval, averaged over both choices of end.
    let head = simpson_odd_samples(&y[..n - 1], dx) + 0.5 * dx * (y[n - 2] + y[n - 1]);
    let tail = 0.5 * dx * (y[0] + y[1]) + simpson_odd_samples(&y[1..], dx);

    0.5 * (head + tail)
}

/// Composite Simpson for an odd number of uniformly-spaced samples.
#[inline]
fn simpson_odd_samples(y: &[f64], dx: f64) -> f64 {
    let mut acc = 0.0;
    for i in (0..y.len() - 2).step_by(2) {
        acc += y[i] + 4.0 * y[i + 1] + y[i + 2];
    }

    acc * dx / 3.0
}
