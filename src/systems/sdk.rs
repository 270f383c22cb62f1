// src/systems/sdk.rs

//! # Round hooks
//!
//! Observer protocol for collaborators that live outside the engine:
//! achievement trackers, commentary writers, popups, loggers. A hook sees the
//! state after each phase of a round but cannot change it; the session owns
//! the only `&mut GameState`.
//!
//! ## Phases, in call order
//! - `on_scenario`  after the round's scenario is picked.
//! - `on_decision`  after the decision, stakeholder modifier and balance pass.
//! - `on_event`     only when an event fired.
//! - `on_game_over` once, when a collapse or a natural ending is recorded.
//!
//! Every method defaults to a no-op; implement only what you need.
//!
//! ## Failure isolation
//! Hooks return nothing. A collaborator that talks to the network should queue
//! the work and return; a slow or failing commentary service must never hold up
//! round resolution.

use crate::catalog::{Event, Scenario, Stakeholder};
use crate::state::{Ending, GameState};
use crate::systems::rounds::Reaction;

pub trait RoundHook {
    fn on_scenario(&mut self, _state: &GameState, _scenario: &Scenario) {}

    fn on_decision(
        &mut self,
        _state: &GameState,
        _stakeholder: Option<&Stakeholder>,
        _reaction: Option<Reaction>,
    ) {
    }

    fn on_event(&mut self, _state: &GameState, _event: &Event) {}

    fn on_game_over(&mut self, _state: &GameState, _ending: &Ending) {}
}
