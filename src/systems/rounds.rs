//! Round resolution: scenario pick, stakeholder roll, decision application.

use std::sync::Arc;

use rand_core::RngCore;

use crate::catalog::{Catalog, DATA_TRADE, DecisionOutcome, Scenario, Stakeholder};
use crate::mechanics::stoch;
use crate::state::{DecisionContext, GameState, HistoryEntry};
use crate::systems::balance::{self, BalanceTuning};
use crate::{Decision, EngineError, Stat, StatDelta};

/// Every `TRADE_EVERY`-th round draws from the data-trade category.
pub const TRADE_EVERY: u32 = 3;

/// Which stakeholder modifier vector a decision picks up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModifierPolicy {
    /// Always the positive `mod` vector, whatever the decision did.
    #[default]
    AlwaysPositive,
    /// `mod` when the decision raised the stakeholder's concern, else `mod_negative`.
    ByConcern,
}

/// How a stakeholder took the decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Positive,
    Negative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecisionRules {
    pub modifiers: ModifierPolicy,
    pub balance: BalanceTuning,
}

pub fn pick_scenario<R: RngCore + ?Sized>(
    catalog: &Catalog,
    round: u32,
    rng: &mut R,
) -> Option<Arc<Scenario>> {
    pick_scenario_every(catalog, round, TRADE_EVERY, rng)
}

/// Data-trade rounds fall back to the full catalog when that category is empty.
/// `trade_every == 0` disables data-trade rounds.
pub fn pick_scenario_every<R: RngCore + ?Sized>(
    catalog: &Catalog,
    round: u32,
    trade_every: u32,
    rng: &mut R,
) -> Option<Arc<Scenario>> {
    if trade_every > 0 && round % trade_every == 0 {
        let trade = catalog.scenarios_in(DATA_TRADE);
        if let Some(s) = stoch::random_item(rng, &trade) {
            tracing::debug!(round, scenario = %s.id, "data-trade scenario picked");
            return Some(Arc::clone(s));
        }
        tracing::warn!(round, "no {DATA_TRADE} scenarios in catalog; sampling all scenarios");
    }
    let picked = stoch::random_item(rng, catalog.scenarios()).cloned();
    if let Some(s) = &picked {
        tracing::debug!(round, scenario = %s.id, "scenario picked");
    }
    picked
}

pub fn roll_stakeholder<R: RngCore + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
) -> Option<Arc<Stakeholder>> {
    stoch::random_item(rng, catalog.stakeholders()).cloned()
}

/// Positive iff the decision strictly raised the stakeholder's concern stat.
pub fn reaction(stakeholder: &Stakeholder, outcome: &DecisionOutcome) -> Reaction {
    if outcome.delta.get(stakeholder.concern) > 0 {
        Reaction::Positive
    } else {
        Reaction::Negative
    }
}

pub fn stakeholder_modifier(
    stakeholder: &Stakeholder,
    outcome: &DecisionOutcome,
    policy: ModifierPolicy,
) -> StatDelta {
    match policy {
        ModifierPolicy::AlwaysPositive => stakeholder.modifier,
        ModifierPolicy::ByConcern => match reaction(stakeholder, outcome) {
            Reaction::Positive => stakeholder.modifier,
            Reaction::Negative => stakeholder.modifier_negative,
        },
    }
}

/// Apply `decision` on the active scenario with default rules.
pub fn apply_decision(
    state: &mut GameState,
    decision: Decision,
    stakeholder: Option<&Stakeholder>,
) -> Result<(), EngineError> {
    apply_decision_with(state, decision, stakeholder, &DecisionRules::default())
}

/// stat' = clamp(stat + scenario delta + stakeholder modifier), then the
/// balance pass. Records history (front), the decision list (back) and the
/// last decision context.
pub fn apply_decision_with(
    state: &mut GameState,
    decision: Decision,
    stakeholder: Option<&Stakeholder>,
    rules: &DecisionRules,
) -> Result<(), EngineError> {
    let scenario = state
        .current_scenario
        .clone()
        .ok_or(EngineError::NoActiveScenario)?;
    let outcome = scenario.decisions.get(decision);
    let modifier = stakeholder
        .map(|s| stakeholder_modifier(s, outcome, rules.modifiers))
        .unwrap_or_default();

    let impact = outcome.delta.plus(&modifier);
    for s in Stat::ALL {
        state.stats.shift(s, f64::from(impact.get(s)));
    }
    tracing::debug!(
        round = state.round,
        scenario = %scenario.id,
        %decision,
        ?impact,
        stakeholder = stakeholder.map(|s| s.id.as_str()),
        "decision applied"
    );

    balance::apply_balance_with(state, &rules.balance);

    state.history.push_front(HistoryEntry {
        round: state.round,
        scenario: scenario.title.clone(),
        decision,
    });
    state.decisions.push(decision);
    state.last_decision = Some(DecisionContext {
        title: scenario.title.clone(),
        decision,
        impact,
        stakeholder: stakeholder.map(|s| s.name.clone()),
    });
    Ok(())
}
