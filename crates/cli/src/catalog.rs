//! Named curves the CLI can resample; each is a plain `f64 -> f64`.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    Identity,
    Square,
    Cube,
    Sine,
    /// x + sin x
    SineRamp,
    Exp,
    /// sqrt(x + 1)
    SqrtShift,
}

impl Curve {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Curve::Identity => x,
            Curve::Square => x * x,
            Curve::Cube => x * x * x,
            Curve::Sine => x.sin(),
            Curve::SineRamp => x + x.sin(),
            Curve::Exp => x.exp(),
            Curve::SqrtShift => (x + 1.0).sqrt(),
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            Curve::Identity => "x",
            Curve::Square => "x^2",
            Curve::Cube => "x^3",
            Curve::Sine => "sin(x)",
            Curve::SineRamp => "x + sin(x)",
            Curve::Exp => "exp(x)",
            Curve::SqrtShift => "sqrt(x + 1)",
        }
    }
}
