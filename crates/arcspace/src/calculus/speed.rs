use super::cfg::PrecisionCfg;
use super::diff::derivative_cfg;
use super::quad::integrate_cfg;

/// Arc-length density `g(x) = sqrt(1 + f'(x)^2)` of the graph of `f`.
///
/// `g >= 1` wherever the slope is finite. The closure captures `f` and a copy of `cfg`.
pub fn speed<F>(f: F, cfg: PrecisionCfg) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |x| {
        let slope = derivative_cfg(&f, x, &cfg);
        (1.0 + slope * slope).sqrt()
    }
}

/// Length of the graph of `f` over `[a, b]`.
pub fn arc_length<F>(f: F, a: f64, b: f64, cfg: &PrecisionCfg) -> f64
where
    F: Fn(f64) -> f64,
{
    integrate_cfg(speed(f, *cfg), a, b, cfg)
}
