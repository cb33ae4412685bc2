//! Arc-length resampling: probe sources, the inverse-length solver and the pipeline.
//!
//! Purpose
//! - Turn `(f, [a, b], n)` into `n` points equally spaced along the graph of `f`.
//! - Keep every source of nondeterminism explicit: the solver's initial guesses come from a
//!   `ProbeSource` seeded per call.
//!
//! Why this design
//! - The inverse of the cumulative length is only numerically available, so each boundary is
//!   a bracket-then-refine root solve against the fixed-step integrator (`solver`).
//! - Policy knobs (`Strategy`, `Anchor`, `ProbeKind`) live in `SolveCfg`, apart from the
//!   numeric precision in `PrecisionCfg`, so experiments can vary one without the other.
//!
//! Code cross-refs: `calculus::{speed, integrate_cfg, PrecisionCfg}`, `round::snap`.

mod pipeline;
mod probe;
mod solver;
mod types;

pub use pipeline::{resample, resample_with, resample_with_probe, ResampleError};
pub use probe::{FixedProbe, ProbeSource, SineProbe, StdProbe};
pub use solver::{solve_upper_bound, SolveError};
pub use types::{Anchor, PointSequence, ProbeKind, SolveCfg, Strategy};

#[cfg(test)]
mod tests;
