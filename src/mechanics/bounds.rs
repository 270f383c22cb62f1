//! Stat bounds: every stat lives in [STAT_MIN, STAT_MAX].

pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;

/// Clamp into [0, 100]. NaN collapses to the floor.
#[inline]
pub fn clamp_stat(v: f64) -> f64 {
    if v.is_nan() { STAT_MIN } else { v.clamp(STAT_MIN, STAT_MAX) }
}

/// Additive step: x' = clamp(x + delta).
#[inline]
pub fn shift(x: f64, delta: f64) -> f64 {
    clamp_stat(x + delta)
}
