//! The mutable game record and the bookkeeping it carries.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Scenario;
use crate::systems::collapse::CollapseReason;
use crate::systems::ending::EndingKind;
use crate::{Decision, StatDelta, Stats};

/// Event ids with this prefix count as critical in the [`Tally`].
pub const CRITICAL_EVENT_PREFIX: &str = "critical_";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub round: u32,
    pub scenario: String,
    pub decision: Decision,
}

/// What the last decision did, for commentary writers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecisionContext {
    pub title: String,
    pub decision: Decision,
    /// Scenario delta plus stakeholder modifier, before clamping and balance.
    pub impact: StatDelta,
    pub stakeholder: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriggeredEvent {
    pub round: u32,
    pub event_id: String,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EndingCause {
    Natural(EndingKind),
    Collapse(CollapseReason),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ending {
    pub cause: EndingCause,
    pub title: String,
    pub description: String,
    pub legacy: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub decision: Decision,
    pub count: u32,
}

/// Counters for achievement trackers. The engine's rules never read them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Tally {
    approvals: u32,
    delays: u32,
    rejections: u32,
    pub streak: Option<Streak>,
    pub stakeholders: BTreeSet<String>,
    pub scenarios: BTreeSet<String>,
    pub events: BTreeSet<String>,
    pub critical_events: u32,
}

impl Tally {
    pub fn decision_count(&self, decision: Decision) -> u32 {
        match decision {
            Decision::Approve => self.approvals,
            Decision::Delay => self.delays,
            Decision::Reject => self.rejections,
        }
    }

    pub fn record_decision(&mut self, decision: Decision) {
        match decision {
            Decision::Approve => self.approvals += 1,
            Decision::Delay => self.delays += 1,
            Decision::Reject => self.rejections += 1,
        }
        self.streak = match self.streak {
            Some(s) if s.decision == decision => Some(Streak { decision, count: s.count + 1 }),
            _ => Some(Streak { decision, count: 1 }),
        };
    }

    pub fn record_stakeholder(&mut self, id: &str) {
        self.stakeholders.insert(id.to_string());
    }

    pub fn record_scenario(&mut self, id: &str) {
        self.scenarios.insert(id.to_string());
    }

    pub fn record_event(&mut self, id: &str) {
        self.events.insert(id.to_string());
        if id.starts_with(CRITICAL_EVENT_PREFIX) {
            self.critical_events += 1;
        }
    }
}

/// Root record of one play session.
///
/// `history` is most-recent-first; `decisions` is chronological.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    pub round: u32,
    pub stats: Stats,
    pub history: VecDeque<HistoryEntry>,
    pub decisions: Vec<Decision>,
    pub current_scenario: Option<Arc<Scenario>>,
    pub last_decision: Option<DecisionContext>,
    pub triggered_events: Vec<TriggeredEvent>,
    pub tally: Tally,
    pub collapse: Option<CollapseReason>,
    pub ending: Option<Ending>,
}

impl GameState {
    /// Round 1, all stats at 50, empty histories.
    pub fn new() -> Self {
        Self {
            round: 1,
            stats: Stats::default(),
            history: VecDeque::new(),
            decisions: Vec::new(),
            current_scenario: None,
            last_decision: None,
            triggered_events: Vec::new(),
            tally: Tally::default(),
            collapse: None,
            ending: None,
        }
    }

    pub fn with_stats(stats: Stats) -> Self {
        Self { stats, ..Self::new() }
    }

    /// Terminal once a collapse or an ending has been recorded.
    pub fn is_over(&self) -> bool {
        self.collapse.is_some() || self.ending.is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh session state.
pub fn init_game_state() -> GameState {
    GameState::new()
}
