//! Numerical calculus primitives: slope, quadrature and the arc-length density.
//!
//! Purpose
//! - Provide the three building blocks the resampler composes: a finite-difference
//!   derivative, a fixed-step trapezoidal integral and the speed combinator
//!   `s(x) = sqrt(1 + f'(x)^2)`.
//! - Each primitive has a plain form taking an explicit step and a `_cfg` form reading step,
//!   scheme and rounding stages from `PrecisionCfg`.
//!
//! Nothing here detects ill-defined input: NaN/Infinity from `f` propagate unchanged.

mod cfg;
mod diff;
mod quad;
mod speed;

pub use cfg::{DiffScheme, PrecisionCfg};
pub use diff::{derivative, derivative_cfg, forward_derivative};
pub use quad::{integrate, integrate_cfg};
pub use speed::{arc_length, speed};
