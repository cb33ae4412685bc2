//! Seeded probe sources for the solver's initial guesses.
//!
//! A probe source yields numbers in `[0, 1)`; the solver scales them onto the remaining range.
//! Sources are explicit values (no thread-local or global RNG), so a run is reproducible from
//! its seed alone and tests can inject fixed sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::ProbeKind;

/// Deterministic stream of unit-interval samples.
pub trait ProbeSource {
    /// Next sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<P: ProbeSource + ?Sized> ProbeSource for &mut P {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<P: ProbeSource + ?Sized> ProbeSource for Box<P> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// `StdRng`-backed probe.
pub struct StdProbe {
    rng: StdRng,
}

impl StdProbe {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(mix_seed(seed)),
        }
    }
}

impl ProbeSource for StdProbe {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Sine-hash probe: the `k`-th sample is `fract(sin(seed + k) * 10000)`.
///
/// Poor statistical quality, but it reproduces runs recorded with this generator.
#[derive(Clone, Debug)]
pub struct SineProbe {
    counter: u64,
}

impl SineProbe {
    pub fn new(seed: u64) -> Self {
        Self { counter: seed }
    }
}

impl ProbeSource for SineProbe {
    fn next_unit(&mut self) -> f64 {
        let x = (self.counter as f64).sin() * 10000.0;
        self.counter = self.counter.wrapping_add(1);
        x - x.floor()
    }
}

/// Fixed cyclic sequence; handy for pinning the solver's starting guesses.
#[derive(Clone, Debug)]
pub struct FixedProbe {
    values: Vec<f64>,
    next: usize,
}

impl FixedProbe {
    /// Values outside `[0, 1)` are clamped into it. An empty list behaves like `[0.5]`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.5);
        }
        Self { values, next: 0 }
    }
}

impl ProbeSource for FixedProbe {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next = self.next.wrapping_add(1);
        v
    }
}

impl ProbeKind {
    /// Fresh source of this kind seeded with `seed`.
    pub fn build(self, seed: u64) -> Box<dyn ProbeSource> {
        match self {
            ProbeKind::Std => Box::new(StdProbe::new(seed)),
            ProbeKind::Sine => Box::new(SineProbe::new(seed)),
        }
    }
}

// SplitMix64-style mixing, cheap and stable.
fn mix_seed(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}
