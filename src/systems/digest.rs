#![cfg(feature = "system-commentary_digest")]

//! Commentary digest: the numbers a commentary writer works from.
//!
//! Pure data. The engine never turns this into prose; an external writer
//! (or a canned-template fallback) does.

use serde::Serialize;

use crate::state::{DecisionContext, GameState};
use crate::{Decision, Stat, Stats};

/// Stats below this are flagged as critical in the digest.
pub const DANGER_ZONE: f64 = 20.0;
/// Trend looks at this many most recent decisions.
pub const TREND_WINDOW: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatBand {
    Strong,
    Fair,
    Weak,
    Critical,
}

impl StatBand {
    pub fn of(v: f64) -> Self {
        if v >= 70.0 {
            StatBand::Strong
        } else if v >= 40.0 {
            StatBand::Fair
        } else if v >= 20.0 {
            StatBand::Weak
        } else {
            StatBand::Critical
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Imbalance {
    Severe,
    Notable,
    Balanced,
}

impl Imbalance {
    /// From the spread between the highest and lowest stat.
    pub fn of(spread: f64) -> Self {
        if spread > 40.0 {
            Imbalance::Severe
        } else if spread > 25.0 {
            Imbalance::Notable
        } else {
            Imbalance::Balanced
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Unknown,
    Aggressive,
    Conservative,
    Indecisive,
    Mixed,
}

impl Trend {
    /// Two of the last three decisions alike set the trend.
    pub fn of(decisions: &[Decision]) -> Self {
        if decisions.is_empty() {
            return Trend::Unknown;
        }
        let recent = &decisions[decisions.len().saturating_sub(TREND_WINDOW)..];
        let count = |d: Decision| recent.iter().filter(|&&x| x == d).count();
        if count(Decision::Approve) >= 2 {
            Trend::Aggressive
        } else if count(Decision::Reject) >= 2 {
            Trend::Conservative
        } else if count(Decision::Delay) >= 2 {
            Trend::Indecisive
        } else {
            Trend::Mixed
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Prosperous,
    Precarious,
    Unstable,
}

impl Outlook {
    pub fn of(average: f64) -> Self {
        if average >= 60.0 {
            Outlook::Prosperous
        } else if average >= 40.0 {
            Outlook::Precarious
        } else {
            Outlook::Unstable
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommentaryDigest {
    pub round: u32,
    pub stats: Stats,
    pub bands: [(Stat, StatBand); 4],
    pub average: f64,
    pub highest: (Stat, f64),
    pub lowest: (Stat, f64),
    pub imbalance: Imbalance,
    pub critical: Vec<Stat>,
    pub trend: Trend,
    pub outlook: Outlook,
    pub last_decision: Option<DecisionContext>,
}

impl CommentaryDigest {
    pub fn from_state(state: &GameState) -> Self {
        let stats = state.stats;
        let average = stats.mean();
        let highest = stats.max();
        let lowest = stats.min();
        Self {
            round: state.round,
            stats,
            bands: Stat::ALL.map(|s| (s, StatBand::of(stats.get(s)))),
            average,
            highest,
            lowest,
            imbalance: Imbalance::of(highest.1 - lowest.1),
            critical: stats.iter().filter(|&(_, v)| v < DANGER_ZONE).map(|(s, _)| s).collect(),
            trend: Trend::of(&state.decisions),
            outlook: Outlook::of(average),
            last_decision: state.last_decision.clone(),
        }
    }
}
