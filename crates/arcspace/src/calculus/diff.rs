//! Finite-difference slope estimation.

use super::cfg::{DiffScheme, PrecisionCfg};
use crate::round::snap_if;

/// Central-difference slope `(f(x+dx) - f(x-dx)) / (2 dx)`.
///
/// Pre: `dx > 0`. NaN/Infinity produced by `f` propagate.
#[inline]
pub fn derivative<F>(f: F, x: f64, dx: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + dx) - f(x - dx)) / (2.0 * dx)
}

/// Forward-difference slope `(f(x+dx) - f(x)) / dx`.
#[inline]
pub fn forward_derivative<F>(f: F, x: f64, dx: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + dx) - f(x)) / dx
}

/// Slope of `f` at `x` with step, scheme and intermediate rounding taken from `cfg`.
///
/// With `round_intermediate`, `x` is snapped to the derivative grid before evaluation and the
/// slope is snapped to the same grid afterwards.
pub fn derivative_cfg<F>(f: F, x: f64, cfg: &PrecisionCfg) -> f64
where
    F: Fn(f64) -> f64,
{
    let dx = cfg.derivative_dx();
    let exp = cfg.derivative_step_exponent;
    let x = snap_if(cfg.round_intermediate, x, exp);
    let slope = match cfg.scheme {
        DiffScheme::Central => derivative(f, x, dx),
        DiffScheme::Forward => forward_derivative(f, x, dx),
    };
    snap_if(cfg.round_intermediate, slope, exp)
}
