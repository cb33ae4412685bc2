//! Run settings: a JSON file plus command-line flags, resolved onto library defaults.
//!
//! Precedence, lowest first: `PrecisionCfg`/`SolveCfg` defaults, `degree` (single-knob mode),
//! explicit fields in the file, `--degree` on the command line, explicit flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arcspace::{Anchor, DiffScheme, PrecisionCfg, ProbeKind, SolveCfg, Strategy};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyArg {
    March,
    UnitWalk,
    Doubling,
}

impl From<StrategyArg> for Strategy {
    fn from(v: StrategyArg) -> Self {
        match v {
            StrategyArg::March => Strategy::March,
            StrategyArg::UnitWalk => Strategy::UnitWalk,
            StrategyArg::Doubling => Strategy::Doubling,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorArg {
    Previous,
    Origin,
}

impl From<AnchorArg> for Anchor {
    fn from(v: AnchorArg) -> Self {
        match v {
            AnchorArg::Previous => Anchor::Previous,
            AnchorArg::Origin => Anchor::Origin,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeArg {
    Std,
    Sine,
}

impl From<ProbeArg> for ProbeKind {
    fn from(v: ProbeArg) -> Self {
        match v {
            ProbeArg::Std => ProbeKind::Std,
            ProbeArg::Sine => ProbeKind::Sine,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeArg {
    Central,
    Forward,
}

impl From<SchemeArg> for DiffScheme {
    fn from(v: SchemeArg) -> Self {
        match v {
            SchemeArg::Central => DiffScheme::Central,
            SchemeArg::Forward => DiffScheme::Forward,
        }
    }
}

/// Partial settings; unset fields fall through to the next layer down.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_exponent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative_step_exponent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinement_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_inputs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_intermediate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_outputs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<SchemeArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bracket_steps: Option<u32>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Layer `top` over `self`; fields set in `top` win.
    ///
    /// A `degree` in `top` also clears the precision fields below it, so `--degree` on the
    /// command line restarts single-knob mode instead of mixing with the file's exponents.
    pub fn overlay(self, top: Settings) -> Settings {
        let base = if top.degree.is_some() {
            Settings {
                degree: None,
                step_exponent: None,
                derivative_step_exponent: None,
                refinement_depth: None,
                round_inputs: None,
                round_intermediate: None,
                round_outputs: None,
                ..self
            }
        } else {
            self
        };
        Settings {
            degree: top.degree.or(base.degree),
            step_exponent: top.step_exponent.or(base.step_exponent),
            derivative_step_exponent: top
                .derivative_step_exponent
                .or(base.derivative_step_exponent),
            refinement_depth: top.refinement_depth.or(base.refinement_depth),
            round_inputs: top.round_inputs.or(base.round_inputs),
            round_intermediate: top.round_intermediate.or(base.round_intermediate),
            round_outputs: top.round_outputs.or(base.round_outputs),
            scheme: top.scheme.or(base.scheme),
            strategy: top.strategy.or(base.strategy),
            anchor: top.anchor.or(base.anchor),
            probe: top.probe.or(base.probe),
            seed: top.seed.or(base.seed),
            max_bracket_steps: top.max_bracket_steps.or(base.max_bracket_steps),
        }
    }

    pub fn precision(&self) -> PrecisionCfg {
        let mut cfg = self
            .degree
            .map(PrecisionCfg::from_degree)
            .unwrap_or_default();
        if let Some(v) = self.step_exponent {
            cfg.step_exponent = v;
        }
        if let Some(v) = self.derivative_step_exponent {
            cfg.derivative_step_exponent = v;
        }
        if let Some(v) = self.refinement_depth {
            cfg.refinement_depth = v;
        }
        if let Some(v) = self.round_inputs {
            cfg.round_inputs = v;
        }
        if let Some(v) = self.round_intermediate {
            cfg.round_intermediate = v;
        }
        if let Some(v) = self.round_outputs {
            cfg.round_outputs = v;
        }
        if let Some(v) = self.scheme {
            cfg.scheme = v.into();
        }
        cfg
    }

    pub fn solve(&self) -> SolveCfg {
        let mut cfg = SolveCfg::default();
        if let Some(v) = self.strategy {
            cfg.strategy = v.into();
        }
        if let Some(v) = self.anchor {
            cfg.anchor = v.into();
        }
        if let Some(v) = self.probe {
            cfg.probe = v.into();
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.max_bracket_steps {
            cfg.max_bracket_steps = v;
        }
        cfg
    }
}

/// Precision and solver flags shared by the subcommands that evaluate a curve.
#[derive(Args, Clone, Debug, Default)]
pub struct Knobs {
    /// JSON settings file; flags override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Single-knob precision: every exponent set to this, all rounding stages on
    #[arg(long)]
    pub degree: Option<u32>,
    /// Integration step is 10^-step_exponent
    #[arg(long)]
    pub step_exponent: Option<u32>,
    /// Finite-difference step is 10^-derivative_step_exponent
    #[arg(long)]
    pub derivative_step_exponent: Option<u32>,
    #[arg(long)]
    pub refinement_depth: Option<u32>,
    #[arg(long)]
    pub round_inputs: Option<bool>,
    #[arg(long)]
    pub round_intermediate: Option<bool>,
    #[arg(long)]
    pub round_outputs: Option<bool>,
    #[arg(long, value_enum)]
    pub scheme: Option<SchemeArg>,
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    #[arg(long, value_enum)]
    pub anchor: Option<AnchorArg>,
    #[arg(long, value_enum)]
    pub probe: Option<ProbeArg>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub max_bracket_steps: Option<u32>,
}

impl Knobs {
    /// Load the config file (if any) and lay the flags over it.
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(file.overlay(self.flags()))
    }

    fn flags(&self) -> Settings {
        Settings {
            degree: self.degree,
            step_exponent: self.step_exponent,
            derivative_step_exponent: self.derivative_step_exponent,
            refinement_depth: self.refinement_depth,
            round_inputs: self.round_inputs,
            round_intermediate: self.round_intermediate,
            round_outputs: self.round_outputs,
            scheme: self.scheme,
            strategy: self.strategy,
            anchor: self.anchor,
            probe: self.probe,
            seed: self.seed,
            max_bracket_steps: self.max_bracket_steps,
        }
    }
}
