//! Inverse-length solver: find `x` such that `∫_start^x g ≈ target`.
//!
//! Model
//! - `g` is an arc-length density (`g >= 1`), so `L(x) = ∫_start^x g` is increasing and the
//!   root satisfies `start < x* <= start + target`. `L` is only available numerically, and
//!   quadrature noise makes it monotone only up to the integrator's resolution.
//! - Bracket-then-refine: probe a guess in the remaining range, walk until `L(x) - target`
//!   changes sign, then run a fixed halving schedule. The schedule never re-derives the
//!   bracket; after the walk the root is within one step width `w` of the guess, and before
//!   iteration `j` it stays within `2 * w * 2^-j`.
//! - March is the baseline: accumulate `dx`-wide trapezoids until the target is reached.
//!
//! Failure modes
//! - A NaN/Infinity length estimate surfaces as `SolveError::NonFinite` instead of steering the
//!   walk forever.
//! - More than `SolveCfg::max_bracket_steps` walking moves surfaces as `SolveError::Diverged`.

use std::fmt;

use tracing::{trace, warn};

use super::probe::ProbeSource;
use super::types::{SolveCfg, Strategy};
use crate::calculus::{integrate_cfg, PrecisionCfg};

/// Errors surfaced by the inverse-length solver.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// The target was not bracketed (or reached) within the step budget.
    Diverged { start: f64, target: f64, steps: u64 },
    /// The target or a length estimate was NaN/Infinity.
    NonFinite { x: f64 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Diverged {
                start,
                target,
                steps,
            } => write!(
                f,
                "length {target} from x={start} not reached after {steps} steps"
            ),
            SolveError::NonFinite { x } => {
                write!(f, "non-finite length estimate near x={x}")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Find the upper integration bound `x` with `∫_start^x g ≈ target`.
///
/// Pre: `g >= 1`, `target >= 0`. `upper` bounds the probe range `[start, upper)`; the result
/// may land outside it when the target lies beyond.
pub fn solve_upper_bound<G, P>(
    g: G,
    start: f64,
    target: f64,
    upper: f64,
    cfg: &PrecisionCfg,
    scfg: &SolveCfg,
    probe: &mut P,
) -> Result<f64, SolveError>
where
    G: Fn(f64) -> f64,
    P: ProbeSource + ?Sized,
{
    if !(start.is_finite() && target.is_finite()) {
        return Err(SolveError::NonFinite { x: start });
    }
    let solver = UpperBoundSolver {
        g,
        start,
        target,
        cfg,
        scfg,
    };
    let x = match scfg.strategy {
        Strategy::March => solver.march()?,
        Strategy::UnitWalk => {
            let x0 = solver.probe(upper, probe);
            let (x, width) = solver.bracket(x0, 1.0, false)?;
            solver.refine(x, width)?
        }
        Strategy::Doubling => {
            let x0 = solver.probe(upper, probe);
            let step0 = target.max(cfg.dx());
            let (x, width) = solver.bracket(x0, step0, true)?;
            solver.refine(x, width)?
        }
    };
    trace!(start, target, x, "upper bound");
    Ok(x)
}

/// Per-call context shared by the strategy steps.
struct UpperBoundSolver<'a, G> {
    g: G,
    start: f64,
    target: f64,
    cfg: &'a PrecisionCfg,
    scfg: &'a SolveCfg,
}

impl<G> UpperBoundSolver<'_, G>
where
    G: Fn(f64) -> f64,
{
    fn length_to(&self, x: f64) -> f64 {
        integrate_cfg(&self.g, self.start, x, self.cfg)
    }

    /// `+1` past the target, `-1` short of (or exactly at) it.
    fn sign_at(&self, x: f64) -> Result<f64, SolveError> {
        let len = self.length_to(x);
        if !len.is_finite() {
            return Err(SolveError::NonFinite { x });
        }
        Ok(if len > self.target { 1.0 } else { -1.0 })
    }

    fn probe<P: ProbeSource + ?Sized>(&self, upper: f64, probe: &mut P) -> f64 {
        let remaining = (upper - self.start).max(0.0);
        self.start + probe.next_unit() * remaining
    }

    /// Walk from `x` against the sign until it flips; returns the new point and the last step.
    fn bracket(&self, mut x: f64, step0: f64, doubling: bool) -> Result<(f64, f64), SolveError> {
        let sign = self.sign_at(x)?;
        let mut step = step0;
        for moves in 1..=self.scfg.max_bracket_steps {
            x -= sign * step;
            if self.sign_at(x)? != sign {
                trace!(moves, x, width = step, "bracketed");
                return Ok((x, step));
            }
            if doubling {
                step *= 2.0;
            }
        }
        warn!(
            start = self.start,
            target = self.target,
            steps = self.scfg.max_bracket_steps,
            "bracketing walk exhausted its budget"
        );
        Err(SolveError::Diverged {
            start: self.start,
            target: self.target,
            steps: self.scfg.max_bracket_steps as u64,
        })
    }

    /// Fixed halving schedule: move by `width * 2^-j` against the sign at iteration `j`.
    fn refine(&self, mut x: f64, width: f64) -> Result<f64, SolveError> {
        let mut step = width;
        for _ in 0..self.cfg.refinement_depth {
            x -= self.sign_at(x)? * step;
            step *= 0.5;
        }
        Ok(x)
    }

    /// Accumulate `dx`-wide trapezoids until the running sum reaches the target.
    fn march(&self) -> Result<f64, SolveError> {
        let dx = self.cfg.dx();
        // g >= 1 reaches the target within ceil(target / dx) panels
        let limit = (self.target / dx).ceil() as u64 + 1;
        let mut sum = 0.0;
        let mut panels: u64 = 0;
        let mut left = (self.g)(self.start);
        while sum < self.target {
            if panels >= limit {
                warn!(start = self.start, target = self.target, panels, "march overran");
                return Err(SolveError::Diverged {
                    start: self.start,
                    target: self.target,
                    steps: panels,
                });
            }
            let right = (self.g)(self.start + (panels + 1) as f64 * dx);
            sum += dx * (left + right) / 2.0;
            left = right;
            panels += 1;
        }
        let x = self.start + panels as f64 * dx;
        if !sum.is_finite() {
            return Err(SolveError::NonFinite { x });
        }
        Ok(x)
    }
}
