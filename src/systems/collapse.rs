//! Collapse detection: any stat at or below the floor ends the game.
//! Checked ethics → trust → profit → innovation; the first hit is reported.

use serde::Serialize;

use crate::state::GameState;
use crate::{Stat, Stats};

pub const COLLAPSE_FLOOR: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollapseReason {
    Scandal,
    Uprising,
    Recession,
    Stagnation,
}

impl CollapseReason {
    /// Priority order.
    pub const ALL: [CollapseReason; 4] = [
        CollapseReason::Scandal,
        CollapseReason::Uprising,
        CollapseReason::Recession,
        CollapseReason::Stagnation,
    ];

    pub fn stat(self) -> Stat {
        match self {
            CollapseReason::Scandal => Stat::Ethics,
            CollapseReason::Uprising => Stat::Trust,
            CollapseReason::Recession => Stat::Profit,
            CollapseReason::Stagnation => Stat::Innovation,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            CollapseReason::Scandal => "SCANDAL",
            CollapseReason::Uprising => "UPRISING",
            CollapseReason::Recession => "RECESSION",
            CollapseReason::Stagnation => "STAGNATION",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CollapseReason::Scandal => "Immediate Scandal!",
            CollapseReason::Uprising => "Civil Uprising!",
            CollapseReason::Recession => "Financial Collapse!",
            CollapseReason::Stagnation => "Global Stagnation!",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CollapseReason::Scandal => {
                "Legal collapse due to ethical violations. The Global AI Ethics Council has been dissolved by international authorities. Your governance has failed."
            }
            CollapseReason::Uprising => {
                "Widespread protests and digital boycotts have eroded all governing power. Citizens have lost faith in the Council's ability to protect their interests."
            }
            CollapseReason::Recession => {
                "The Council has run out of operating funds. Without economic support, all AI governance initiatives have been suspended indefinitely."
            }
            CollapseReason::Stagnation => {
                "Technological breakthroughs have ceased entirely. Your conservative approach has left the world unable to compete, leading to economic decline."
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameOver {
    pub reason: CollapseReason,
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollapseTuning {
    /// Inclusive: a stat `<= floor` collapses.
    pub floor: f64,
}

impl Default for CollapseTuning {
    fn default() -> Self {
        Self { floor: COLLAPSE_FLOOR }
    }
}

pub fn collapse_of(stats: &Stats, t: &CollapseTuning) -> Option<CollapseReason> {
    CollapseReason::ALL
        .into_iter()
        .find(|r| stats.get(r.stat()) <= t.floor)
}

/// `None` while every stat is above the floor.
pub fn check_game_over(state: &GameState) -> Option<GameOver> {
    check_game_over_with(state, &CollapseTuning::default())
}

pub fn check_game_over_with(state: &GameState, t: &CollapseTuning) -> Option<GameOver> {
    collapse_of(&state.stats, t).map(|reason| GameOver {
        reason,
        title: reason.title(),
        message: reason.message(),
    })
}
