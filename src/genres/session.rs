// src/genres/session.rs

//! Session orchestrator.
//!
//! Sequences the systems the way a play screen does, one round at a time:
//! - `begin_round`  → rounds::pick_scenario (data-trade every third round)
//! - `resolve`      → rounds::roll_stakeholder, rounds::apply_decision (+ balance),
//!                    events::maybe_event, collapse::check_game_over
//! - `conclude`     → ending::compute_ending for a game that did not collapse
//!
//! A `Session` owns the only `&mut GameState`, so two decisions can never be
//! in flight at once. Put it behind a `Mutex` or a task if several callers
//! share it.

use std::sync::Arc;

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

use crate::catalog::{Catalog, Event, Scenario, Stakeholder};
use crate::state::{Ending, GameState};
use crate::systems::balance::BalanceTuning;
use crate::systems::collapse::{self, CollapseTuning, GameOver};
use crate::systems::ending;
use crate::systems::events;
use crate::systems::rounds::{self, DecisionRules, ModifierPolicy, Reaction, TRADE_EVERY};
use crate::systems::sdk::RoundHook;
use crate::{Decision, EngineError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub seed: u64,
    /// Every n-th round is a data-trade round; 0 disables them.
    pub trade_every: u32,
    pub modifiers: ModifierPolicy,
    pub balance: BalanceTuning,
    pub collapse: CollapseTuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            trade_every: TRADE_EVERY,
            modifiers: ModifierPolicy::default(),
            balance: BalanceTuning::default(),
            collapse: CollapseTuning::default(),
        }
    }
}

impl SessionConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }
}

/// Everything a UI needs to show after a round.
#[derive(Clone, Debug)]
pub struct RoundOutcome {
    pub round: u32,
    pub scenario: Arc<Scenario>,
    pub decision: Decision,
    pub stakeholder: Option<Arc<Stakeholder>>,
    pub reaction: Option<Reaction>,
    pub event: Option<Event>,
    pub game_over: Option<GameOver>,
}

pub struct Session<'c, R: RngCore = WyRand> {
    catalog: &'c Catalog,
    config: SessionConfig,
    state: GameState,
    rng: R,
    hooks: Vec<Box<dyn RoundHook + 'c>>,
    awaiting_decision: bool,
}

impl<'c> Session<'c, WyRand> {
    /// Fresh session with a WyRand seeded from `config.seed`.
    pub fn new(catalog: &'c Catalog, config: SessionConfig) -> Self {
        let rng = WyRand::from_seed(config.seed.to_le_bytes());
        Self::with_rng(catalog, config, rng)
    }
}

impl<'c, R: RngCore> Session<'c, R> {
    pub fn with_rng(catalog: &'c Catalog, config: SessionConfig, rng: R) -> Self {
        Self {
            catalog,
            config,
            state: GameState::new(),
            rng,
            hooks: Vec::new(),
            awaiting_decision: false,
        }
    }

    pub fn add_hook(&mut self, hook: Box<dyn RoundHook + 'c>) {
        self.hooks.push(hook);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Pick and activate this round's scenario.
    pub fn begin_round(&mut self) -> Result<Arc<Scenario>, EngineError> {
        if self.state.is_over() {
            return Err(EngineError::SessionOver);
        }
        let scenario = rounds::pick_scenario_every(
            self.catalog,
            self.state.round,
            self.config.trade_every,
            &mut self.rng,
        )
        .ok_or(EngineError::EmptyCatalog("scenarios"))?;

        self.state.tally.record_scenario(&scenario.id);
        self.state.current_scenario = Some(Arc::clone(&scenario));
        self.awaiting_decision = true;
        for h in self.hooks.iter_mut() {
            h.on_scenario(&self.state, &scenario);
        }
        Ok(scenario)
    }

    /// Run the full pipeline for `decision` on the active scenario. The round
    /// advances unless the game collapsed.
    pub fn resolve(&mut self, decision: Decision) -> Result<RoundOutcome, EngineError> {
        if self.state.is_over() {
            return Err(EngineError::SessionOver);
        }
        let scenario = match (&self.state.current_scenario, self.awaiting_decision) {
            (Some(s), true) => Arc::clone(s),
            _ => return Err(EngineError::NoActiveScenario),
        };
        let round = self.state.round;

        let stakeholder = rounds::roll_stakeholder(self.catalog, &mut self.rng);
        if let Some(s) = &stakeholder {
            self.state.tally.record_stakeholder(&s.id);
        }
        self.state.tally.record_decision(decision);

        let rules = DecisionRules { modifiers: self.config.modifiers, balance: self.config.balance };
        rounds::apply_decision_with(&mut self.state, decision, stakeholder.as_deref(), &rules)?;
        self.awaiting_decision = false;

        let reaction = stakeholder
            .as_deref()
            .map(|s| rounds::reaction(s, scenario.decisions.get(decision)));
        for h in self.hooks.iter_mut() {
            h.on_decision(&self.state, stakeholder.as_deref(), reaction);
        }

        let event = events::maybe_event(&mut self.state, self.catalog, &mut self.rng).cloned();
        if let Some(e) = &event {
            self.state.tally.record_event(&e.id);
            for h in self.hooks.iter_mut() {
                h.on_event(&self.state, e);
            }
        }

        let game_over = collapse::check_game_over_with(&self.state, &self.config.collapse);
        match &game_over {
            Some(over) => {
                tracing::info!(round, reason = over.reason.tag(), "governance collapsed");
                self.state.collapse = Some(over.reason);
                self.finish(ending::collapse_ending(over.reason, round));
            }
            None => self.state.round += 1,
        }

        Ok(RoundOutcome { round, scenario, decision, stakeholder, reaction, event, game_over })
    }

    /// End a game that has not collapsed and classify it.
    pub fn conclude(&mut self) -> Result<Ending, EngineError> {
        if self.state.is_over() {
            return Err(EngineError::SessionOver);
        }
        let ending = ending::compute_ending(&self.state);
        tracing::info!(round = self.state.round, ending = %ending.title, "session concluded");
        self.finish(ending.clone());
        Ok(ending)
    }

    fn finish(&mut self, ending: Ending) {
        self.awaiting_decision = false;
        self.state.ending = Some(ending);
        if let Some(ending) = &self.state.ending {
            for h in self.hooks.iter_mut() {
                h.on_game_over(&self.state, ending);
            }
        }
    }
}
