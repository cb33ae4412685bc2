//! Decimal grid snapping.
//!
//! A grid of exponent `e` is the set of multiples of `10^-e`. Snapping multiplies by `10^e`,
//! rounds to the nearest integer and divides back, which yields the correctly rounded decimal
//! for moderate magnitudes and is idempotent: snapping a snapped value returns it unchanged.

/// Spacing of the grid with exponent `exponent`, i.e. `10^-exponent`.
#[inline]
pub fn grid_step(exponent: u32) -> f64 {
    10f64.powi(-(exponent as i32))
}

/// Snap `value` to the nearest multiple of `10^-exponent`.
///
/// Non-finite values pass through untouched.
#[inline]
pub fn snap(value: f64, exponent: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(exponent as i32);
    (value * scale).round() / scale
}

/// Snap only when `enabled`; keeps call sites free of `if` ladders.
#[inline]
pub fn snap_if(enabled: bool, value: f64, exponent: u32) -> f64 {
    if enabled {
        snap(value, exponent)
    } else {
        value
    }
}
