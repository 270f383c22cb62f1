//! Natural-ending classification, first match wins:
//!
//! | # | ending              | rule                                                   |
//! |---|---------------------|--------------------------------------------------------|
//! | 1 | The Balanced One    | all stats in [65, 85] and max − min ≤ 20               |
//! | 2 | Ethical Guardian    | ethics, trust ≥ 70; innovation, profit ≥ 40            |
//! | 3 | Visionary Innovator | innovation, profit ≥ 75; ethics, trust ≥ 40            |
//! | 4 | Data Dealer         | profit ≥ 70 and (ethics ≤ 35 or trust ≤ 35)            |
//! | 5 | Algorithm Overlord  | innovation ≥ 75 and (ethics ≤ 30 or trust ≤ 30)        |
//! | 6 | Stalled Bureaucrat  | anything else                                          |

use serde::Serialize;

use crate::Stats;
use crate::state::{Ending, EndingCause, GameState};
use crate::systems::collapse::CollapseReason;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingKind {
    Balanced,
    EthicalGuardian,
    VisionaryInnovator,
    DataDealer,
    AlgorithmOverlord,
    StalledBureaucrat,
}

impl EndingKind {
    pub fn title(self) -> &'static str {
        match self {
            EndingKind::Balanced => "The Balanced One",
            EndingKind::EthicalGuardian => "Ethical Guardian",
            EndingKind::VisionaryInnovator => "Visionary Innovator",
            EndingKind::DataDealer => "Data Dealer",
            EndingKind::AlgorithmOverlord => "Algorithm Overlord",
            EndingKind::StalledBureaucrat => "Stalled Bureaucrat",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EndingKind::Balanced => {
                "The rarest achievement: You proved that Innovation and Integrity can coexist. Your governance maintained equilibrium across all pillars of power."
            }
            EndingKind::EthicalGuardian => {
                "A stable, technologically conservative world. You prioritized safety and trust over rapid innovation."
            }
            EndingKind::VisionaryInnovator => {
                "A hyper-advanced society where surveillance is an accepted trade-off for progress."
            }
            EndingKind::DataDealer => "Wealth and power amassed at the expense of privacy and public faith.",
            EndingKind::AlgorithmOverlord => {
                "A chilling technocracy where AI dictates life. The Council rules through technology alone."
            }
            EndingKind::StalledBureaucrat => {
                "Indecision and compromise led to mediocrity. No clear vision emerged from your governance."
            }
        }
    }

    pub fn legacy(self) -> &'static str {
        match self {
            EndingKind::Balanced => {
                "A sustainable future where technology serves humanity without sacrificing core values."
            }
            EndingKind::EthicalGuardian => {
                "Citizens sleep soundly, but global competitiveness may suffer in the long term."
            }
            EndingKind::VisionaryInnovator => {
                "Technological marvels abound, but at what cost to privacy and autonomy?"
            }
            EndingKind::DataDealer => {
                "The Council became what it was meant to regulate: a profit-driven entity trading in human data."
            }
            EndingKind::AlgorithmOverlord => {
                "Innovation without ethics creates a dystopia where efficiency trumps humanity."
            }
            EndingKind::StalledBureaucrat => {
                "The world muddles forward, neither thriving nor collapsing, simply existing."
            }
        }
    }

    pub fn ending(self) -> Ending {
        Ending {
            cause: EndingCause::Natural(self),
            title: self.title().to_string(),
            description: self.description().to_string(),
            legacy: self.legacy().to_string(),
        }
    }
}

pub fn classify(stats: &Stats) -> EndingKind {
    let (i, p, t, e) = (stats.innovation(), stats.profit(), stats.trust(), stats.ethics());
    let all = stats.as_array();
    let in_band = all.iter().all(|v| (65.0..=85.0).contains(v));
    let spread = stats.max().1 - stats.min().1;

    if in_band && spread <= 20.0 {
        EndingKind::Balanced
    } else if e >= 70.0 && t >= 70.0 && i >= 40.0 && p >= 40.0 {
        EndingKind::EthicalGuardian
    } else if i >= 75.0 && p >= 75.0 && e >= 40.0 && t >= 40.0 {
        EndingKind::VisionaryInnovator
    } else if p >= 70.0 && (e <= 35.0 || t <= 35.0) {
        EndingKind::DataDealer
    } else if i >= 75.0 && (e <= 30.0 || t <= 30.0) {
        EndingKind::AlgorithmOverlord
    } else {
        EndingKind::StalledBureaucrat
    }
}

/// Ending for a game concluded without collapse.
pub fn compute_ending(state: &GameState) -> Ending {
    classify(&state.stats).ending()
}

/// Ending recorded when `reason` cut the game short in `round`.
pub fn collapse_ending(reason: CollapseReason, round: u32) -> Ending {
    Ending {
        cause: EndingCause::Collapse(reason),
        title: reason.title().to_string(),
        description: reason.message().to_string(),
        legacy: format!("Your governance lasted {round} rounds before collapse."),
    }
}
