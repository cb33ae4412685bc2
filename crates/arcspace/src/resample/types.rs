//! Point containers and solver policy knobs.

use nalgebra::Point2;

use crate::round::snap;

/// Bracketing strategy of the inverse-length solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Accumulate `dx`-wide trapezoids from the start until the target is reached.
    /// Cost grows with `target / dx` on every call.
    March,
    /// Probe, walk in unit steps until the sign flips, then refine on a fixed `2^-j` schedule.
    /// Only well behaved when the curve's x-scale is commensurate with 1.
    UnitWalk,
    /// Probe, walk with a doubling step starting at the target length, then refine on the same
    /// schedule scaled by the final step width.
    #[default]
    Doubling,
}

/// Where each segment's target length is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// From the previously solved point, targeting one segment length.
    #[default]
    Previous,
    /// Always from `a`, targeting `i` segment lengths for the `i`-th boundary.
    Origin,
}

/// Probe source family used for the solver's initial guesses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProbeKind {
    /// `rand::StdRng` seeded through SplitMix mixing of the seed.
    #[default]
    Std,
    /// `fract(sin(k) * 10000)` for `k = seed, seed+1, …`; replays historical outputs.
    Sine,
}

/// Solver policy for one resampling run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveCfg {
    pub strategy: Strategy,
    pub anchor: Anchor,
    pub probe: ProbeKind,
    pub seed: u64,
    /// Cap on bracketing moves before giving up with `SolveError::Diverged`.
    pub max_bracket_steps: u32,
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            strategy: Strategy::Doubling,
            anchor: Anchor::Previous,
            probe: ProbeKind::Std,
            seed: 1,
            max_bracket_steps: 1024,
        }
    }
}

impl SolveCfg {
    /// Policy that replays the historical single-knob runs: unit-step walk, sine probe, seed 1.
    pub fn historical() -> Self {
        Self {
            strategy: Strategy::UnitWalk,
            probe: ProbeKind::Sine,
            ..Self::default()
        }
    }
}

/// Ordered points on the graph of `f`, first at `x = a`, last at `x = b`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSequence {
    points: Vec<Point2<f64>>,
}

impl PointSequence {
    pub(crate) fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&Point2<f64>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2<f64>> {
        self.points.last()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Euclidean distance between consecutive points (`len - 1` entries).
    pub fn chord_lengths(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .collect()
    }

    /// Snap interior x and every y to the grid `10^-exponent`.
    ///
    /// Endpoint abscissae are exact by construction and stay untouched, so the sequence keeps
    /// starting at `a` and ending at `b`. Applying this twice equals applying it once.
    pub fn snapped(&self, exponent: u32) -> Self {
        let last = self.points.len().saturating_sub(1);
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = if i == 0 || i == last {
                    p.x
                } else {
                    snap(p.x, exponent)
                };
                Point2::new(x, snap(p.y, exponent))
            })
            .collect();
        Self { points }
    }

    pub fn into_pairs(self) -> Vec<(f64, f64)> {
        self.points.into_iter().map(|p| (p.x, p.y)).collect()
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point2<f64>;
    type IntoIter = std::slice::Iter<'a, Point2<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
