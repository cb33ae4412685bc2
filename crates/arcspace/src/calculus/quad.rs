//! Fixed-step trapezoidal quadrature.
//!
//! The partition is fixed by the bounds and the step alone, and trapezoids are summed left to
//! right, so identical inputs give bit-identical results.

use super::cfg::PrecisionCfg;
use crate::round::snap_if;

/// Trapezoidal estimate of `∫_a^b f` with `ceil((b-a)/dx)` equal-width panels.
///
/// - `b <= a` yields the empty sum `0.0`.
/// - Non-finite bounds yield NaN (the panel count would be unbounded).
/// - Pre: `dx > 0`.
pub fn integrate<F>(f: F, a: f64, b: f64, dx: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite()) {
        return f64::NAN;
    }
    if b <= a {
        return 0.0;
    }
    let range = b - a;
    let panels = ((range / dx).ceil() as usize).max(1);
    let width = range / panels as f64;
    let mut sum = 0.0;
    let mut left = f(a);
    for i in 0..panels {
        // Nodes are placed from `a` directly (no running `x += width`) to avoid drift.
        let x_right = if i + 1 == panels {
            b
        } else {
            a + range * ((i + 1) as f64 / panels as f64)
        };
        let right = f(x_right);
        sum += width * (left + right) / 2.0;
        left = right;
    }
    sum
}

/// `integrate` with step and rounding stages taken from `cfg`.
///
/// `round_inputs` snaps `a`/`b` to the step grid first; `round_outputs` snaps the sum.
pub fn integrate_cfg<F>(f: F, a: f64, b: f64, cfg: &PrecisionCfg) -> f64
where
    F: Fn(f64) -> f64,
{
    let exp = cfg.step_exponent;
    let a = snap_if(cfg.round_inputs, a, exp);
    let b = snap_if(cfg.round_inputs, b, exp);
    let area = integrate(f, a, b, cfg.dx());
    snap_if(cfg.round_outputs, area, exp)
}
