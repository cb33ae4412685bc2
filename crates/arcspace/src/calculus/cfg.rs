//! Precision knobs shared by the derivative estimator, the integrator and the solver.

use crate::round::grid_step;

/// Largest accepted exponent; `10^-16` is below f64 resolution around 1.0.
pub(crate) const MAX_EXPONENT: u32 = 15;

/// Finite-difference scheme used by the derivative estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiffScheme {
    /// `(f(x+h) - f(x-h)) / 2h`; second-order accurate and symmetric under reflection.
    #[default]
    Central,
    /// `(f(x+h) - f(x)) / h`; first-order, one evaluation cheaper per call.
    Forward,
}

/// Accuracy/cost trade-offs for one resampling run.
///
/// Accuracy assumes `2^refinement_depth > 10^step_exponent`, i.e. the solver refines below the
/// integrator's own step. Violations are accepted and only logged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecisionCfg {
    /// Integration step `dx = 10^-step_exponent`; also the snapping grid for inputs/outputs.
    pub step_exponent: u32,
    /// Finite-difference step `h = 10^-derivative_step_exponent`.
    pub derivative_step_exponent: u32,
    /// Binary-refinement iterations in the inverse-length solver.
    pub refinement_depth: u32,
    /// Snap integration bounds (and final points) to the step grid.
    pub round_inputs: bool,
    /// Snap the derivative's abscissa and result to the derivative grid.
    pub round_intermediate: bool,
    /// Snap integration results to the step grid.
    pub round_outputs: bool,
    pub scheme: DiffScheme,
}

impl Default for PrecisionCfg {
    fn default() -> Self {
        Self {
            step_exponent: 3,
            derivative_step_exponent: 6,
            refinement_depth: 24,
            round_inputs: false,
            round_intermediate: false,
            round_outputs: false,
            scheme: DiffScheme::Central,
        }
    }
}

impl PrecisionCfg {
    /// Single-knob configuration: every exponent is `degree`, refinement runs
    /// `round(log2(10) * degree)` iterations and all rounding stages are on.
    ///
    /// `degree = 3` is a reasonable low-cost setting, `5` a high-accuracy one.
    pub fn from_degree(degree: u32) -> Self {
        Self {
            step_exponent: degree,
            derivative_step_exponent: degree,
            refinement_depth: (std::f64::consts::LOG2_10 * degree as f64).round() as u32,
            round_inputs: true,
            round_intermediate: true,
            round_outputs: true,
            scheme: DiffScheme::Central,
        }
    }

    /// Integration step `10^-step_exponent`.
    #[inline]
    pub fn dx(&self) -> f64 {
        grid_step(self.step_exponent)
    }

    /// Finite-difference step `10^-derivative_step_exponent`.
    #[inline]
    pub fn derivative_dx(&self) -> f64 {
        grid_step(self.derivative_step_exponent)
    }

    /// Whether refinement resolves finer than the integration step.
    pub fn refinement_resolves_step(&self) -> bool {
        // 2^depth > 10^step  <=>  depth > step * log2(10)
        self.refinement_depth as f64 > self.step_exponent as f64 * std::f64::consts::LOG2_10
    }

    /// Reject configurations the numerics cannot honor.
    pub fn validate(&self) -> Result<(), String> {
        if self.step_exponent > MAX_EXPONENT {
            return Err(format!(
                "step_exponent {} exceeds {MAX_EXPONENT}",
                self.step_exponent
            ));
        }
        if self.derivative_step_exponent > MAX_EXPONENT {
            return Err(format!(
                "derivative_step_exponent {} exceeds {MAX_EXPONENT}",
                self.derivative_step_exponent
            ));
        }
        if self.refinement_depth == 0 {
            return Err("refinement_depth must be >= 1".to_string());
        }
        Ok(())
    }
}
