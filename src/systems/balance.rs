//! Post-decision balance pass.
//!
//! Runs every round once the grace period is over, in three phases:
//! 1. decay: every stat above the floor loses `base_decay + (round - grace) * decay_step`;
//! 2. specialist penalty: if the top stat exceeds the threshold, all others lose a little;
//! 3. outlier nudge: stats far above the mean drop, stats far below it (but
//!    still above the rescue floor) rise.
//!
//! Stats at or below the rescue floor are never rescued.

use crate::mechanics::bounds;
use crate::state::GameState;
use crate::{Stat, Stats};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceTuning {
    /// Rounds `<= grace_rounds` are left untouched.
    pub grace_rounds: u32,
    pub base_decay: f64,
    pub decay_step: f64,
    /// Only stats strictly above this decay.
    pub decay_floor: f64,
    pub specialist_threshold: f64,
    pub specialist_penalty: f64,
    pub outlier_band: f64,
    pub outlier_nudge: f64,
    pub rescue_floor: f64,
}

impl Default for BalanceTuning {
    fn default() -> Self {
        Self {
            grace_rounds: 6,
            base_decay: 0.08,
            decay_step: 0.02,
            decay_floor: 50.0,
            specialist_threshold: 90.0,
            specialist_penalty: 0.5,
            outlier_band: 25.0,
            outlier_nudge: 0.5,
            rescue_floor: 15.0,
        }
    }
}

impl BalanceTuning {
    /// Decay for `round`, or None inside the grace period.
    pub fn decay_rate(&self, round: u32) -> Option<f64> {
        if round <= self.grace_rounds {
            return None;
        }
        Some(self.base_decay + f64::from(round - self.grace_rounds) * self.decay_step)
    }
}

/// Balance pass with default tuning. Returns the state for chaining.
pub fn apply_balance_adjustments(state: &mut GameState) -> &mut GameState {
    apply_balance_with(state, &BalanceTuning::default())
}

pub fn apply_balance_with<'s>(state: &'s mut GameState, t: &BalanceTuning) -> &'s mut GameState {
    let Some(rate) = t.decay_rate(state.round) else {
        return state;
    };
    let before = state.stats;
    decay(&mut state.stats, t, rate);
    specialist_penalty(&mut state.stats, t);
    rebalance(&mut state.stats, t);
    if state.stats != before {
        tracing::trace!(round = state.round, decay = rate, ?before, after = ?state.stats, "balance pass");
    }
    state
}

fn decay(stats: &mut Stats, t: &BalanceTuning, rate: f64) {
    for s in Stat::ALL {
        if stats.get(s) > t.decay_floor {
            stats.shift(s, -rate);
        }
    }
}

fn specialist_penalty(stats: &mut Stats, t: &BalanceTuning) {
    let (top, value) = stats.max();
    if value <= t.specialist_threshold {
        return;
    }
    for s in Stat::ALL.into_iter().filter(|&s| s != top) {
        stats.shift(s, -t.specialist_penalty);
    }
}

fn rebalance(stats: &mut Stats, t: &BalanceTuning) {
    let avg = stats.mean();
    for s in Stat::ALL {
        let v = stats.get(s);
        if v > avg + t.outlier_band {
            stats.set(s, bounds::shift(v, -t.outlier_nudge));
        } else if v < avg - t.outlier_band && v > t.rescue_floor {
            stats.set(s, bounds::shift(v, t.outlier_nudge));
        }
    }
}
