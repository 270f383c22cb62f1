//! Random events: first triggered event in catalog order wins.

use rand_core::RngCore;

use crate::catalog::{Catalog, Event, Trigger};
use crate::mechanics::stoch;
use crate::state::{GameState, TriggeredEvent};
use crate::{Stat, Stats};

/// Deterministic half of a trigger: every listed comparison holds.
pub fn conditions_hold(trigger: &Trigger, stats: &Stats) -> bool {
    trigger.conditions.iter().all(|c| c.cmp.holds(stats.get(c.stat)))
}

/// Conditions first; the probability roll only consumes randomness once they pass.
pub fn check_trigger<R: RngCore + ?Sized>(trigger: &Trigger, stats: &Stats, rng: &mut R) -> bool {
    conditions_hold(trigger, stats) && stoch::bernoulli(rng, trigger.probability)
}

/// Add the event's effect (clamped) and log it.
pub fn apply_event(state: &mut GameState, event: &Event) {
    for s in Stat::ALL {
        let d = event.effect.get(s);
        if d != 0 {
            state.stats.shift(s, f64::from(d));
        }
    }
    state.triggered_events.push(TriggeredEvent {
        round: state.round,
        event_id: event.id.clone(),
        title: event.title.clone(),
    });
}

/// Scan events in order; apply and return the first that triggers.
pub fn maybe_event<'c, R: RngCore + ?Sized>(
    state: &mut GameState,
    catalog: &'c Catalog,
    rng: &mut R,
) -> Option<&'c Event> {
    let event = catalog
        .events()
        .iter()
        .find(|e| check_trigger(&e.trigger, &state.stats, &mut *rng))?;
    apply_event(state, event);
    tracing::info!(round = state.round, event = %event.id, "event triggered");
    Some(event)
}
