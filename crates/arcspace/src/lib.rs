//! Arc-length resampling of scalar function graphs.
//!
//! Given `f: ℝ → ℝ`, an interval `[a, b]` and a count `n`, produce `n` points on the graph of
//! `f` that are equally spaced along the curve rather than along the x-axis.
//!
//! Layout
//! - `calculus`: finite-difference slope, trapezoidal quadrature, the speed combinator
//!   `s(x) = sqrt(1 + f'(x)^2)`, and the `PrecisionCfg` knobs shared by all of them.
//! - `resample`: probe sources, the inverse-length solver and the resampling pipeline.
//! - `round`: decimal grid snapping used by the optional rounding stages.
//!
//! Everything is synchronous and pure; the only state carried between solver calls is the
//! probe source, which each `resample` call owns.

pub mod calculus;
pub mod resample;
pub mod round;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use calculus::{
    arc_length, derivative, derivative_cfg, integrate, integrate_cfg, speed, DiffScheme,
    PrecisionCfg,
};
pub use nalgebra::Point2 as Point;
pub use resample::{
    resample, resample_with, resample_with_probe, solve_upper_bound, Anchor, FixedProbe,
    PointSequence, ProbeKind, ProbeSource, ResampleError, SineProbe, SolveCfg, SolveError,
    StdProbe, Strategy,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::calculus::{DiffScheme, PrecisionCfg};
    pub use crate::resample::{
        resample, resample_with, Anchor, PointSequence, ProbeKind, ResampleError, SolveCfg,
        Strategy,
    };
    pub use nalgebra::Point2 as Point;
}
