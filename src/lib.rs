/*!
`council_engine` — a seeded, pure round-resolution engine for a four-stat
governance game.

What it does
- Holds one [`state::GameState`]: round number, four bounded stats
  (innovation, profit, trust, ethics), decision history, terminal fields.
- Resolves a round: scenario pick → decision + stakeholder modifiers →
  balance pass → event trigger → collapse check.
- Classifies the final stat vector into one of six endings.

How to use (call surface only)
- Load a [`catalog::Catalog`] once (`Catalog::from_dir`, or
  `Catalog::load_or_fallback` to stay playable on bad data).
- Either drive the systems yourself:
  * `systems::rounds::pick_scenario(&catalog, round, rng)`
  * `systems::rounds::roll_stakeholder(&catalog, rng)`
  * `systems::rounds::apply_decision(&mut state, decision, stakeholder)`
  * `systems::events::maybe_event(&mut state, &catalog, rng)`
  * `systems::collapse::check_game_over(&state)`
  * `systems::ending::compute_ending(&state)`
- or let [`genres::session::Session`] sequence them per round.

What it does NOT do
- No rendering, no narrative text generation, no persistence. Randomness is
  always injected (`rand_core::RngCore`), never ambient.
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mechanics::bounds;

/// The four governance stats, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Innovation,
    Profit,
    Trust,
    Ethics,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Innovation, Stat::Profit, Stat::Trust, Stat::Ethics];

    pub fn key(self) -> &'static str {
        match self {
            Stat::Innovation => "innovation",
            Stat::Profit => "profit",
            Stat::Trust => "trust",
            Stat::Ethics => "ethics",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// Stat vector. Every value is kept inside [0, 100]; all writers clamp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Stats {
    innovation: f64,
    profit: f64,
    trust: f64,
    ethics: f64,
}

impl Stats {
    pub const START: f64 = 50.0;

    pub fn new(innovation: f64, profit: f64, trust: f64, ethics: f64) -> Self {
        Self {
            innovation: bounds::clamp_stat(innovation),
            profit: bounds::clamp_stat(profit),
            trust: bounds::clamp_stat(trust),
            ethics: bounds::clamp_stat(ethics),
        }
    }

    pub fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.as_array()[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        let v = bounds::clamp_stat(value);
        match stat {
            Stat::Innovation => self.innovation = v,
            Stat::Profit => self.profit = v,
            Stat::Trust => self.trust = v,
            Stat::Ethics => self.ethics = v,
        }
    }

    /// Add `delta` and clamp.
    pub fn shift(&mut self, stat: Stat, delta: f64) {
        self.set(stat, bounds::shift(self.get(stat), delta));
    }

    pub fn innovation(&self) -> f64 {
        self.innovation
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn trust(&self) -> f64 {
        self.trust
    }

    pub fn ethics(&self) -> f64 {
        self.ethics
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.innovation, self.profit, self.trust, self.ethics]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    pub fn mean(&self) -> f64 {
        self.as_array().iter().sum::<f64>() / 4.0
    }

    /// Highest stat; ties go to the first in [`Stat::ALL`] order.
    pub fn max(&self) -> (Stat, f64) {
        self.iter()
            .fold((Stat::Innovation, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    /// Lowest stat; ties go to the first in [`Stat::ALL`] order.
    pub fn min(&self) -> (Stat, f64) {
        self.iter()
            .fold((Stat::Innovation, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(Self::START)
    }
}

/// Partial, signed integer stat deltas. Absent stats deserialize as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    pub innovation: i32,
    pub profit: i32,
    pub trust: i32,
    pub ethics: i32,
}

impl StatDelta {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Innovation => self.innovation,
            Stat::Profit => self.profit,
            Stat::Trust => self.trust,
            Stat::Ethics => self.ethics,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Innovation => self.innovation = value,
            Stat::Profit => self.profit = value,
            Stat::Trust => self.trust = value,
            Stat::Ethics => self.ethics = value,
        }
    }

    pub fn plus(&self, other: &StatDelta) -> StatDelta {
        let mut out = StatDelta::default();
        for s in Stat::ALL {
            out.set(s, self.get(s) + other.get(s));
        }
        out
    }
}

/// The three answers every scenario offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Delay,
    Reject,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Approve, Decision::Delay, Decision::Reject];

    pub fn key(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Delay => "delay",
            Decision::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for Decision {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Decision::Approve),
            "delay" => Ok(Decision::Delay),
            "reject" => Ok(Decision::Reject),
            other => Err(EngineError::UnknownDecision(other.to_string())),
        }
    }
}

/// Caller contract violations. Numeric saturation is never an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown decision key {0:?}; expected approve, delay or reject")]
    UnknownDecision(String),
    #[error("no active scenario; pick one before applying a decision")]
    NoActiveScenario,
    #[error("catalog has no {0}")]
    EmptyCatalog(&'static str),
    #[error("the session is over; no further rounds can be played")]
    SessionOver,
}

pub mod mechanics;
pub mod catalog;
pub mod state;
pub mod systems;
pub mod genres;

pub use catalog::Catalog;
pub use state::GameState;
