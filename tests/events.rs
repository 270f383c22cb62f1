// tests/events.rs
mod common;

use common::{assert_stats, catalog, rng, state_at};
use council_engine::catalog::{Catalog, Comparison, CompareOp, Event, Trigger};
use council_engine::systems::events::{apply_event, check_trigger, conditions_hold, maybe_event};
use council_engine::{Stat, StatDelta, Stats};

fn with_events(events: &str) -> Catalog {
    Catalog::from_json_strs(common::SCENARIOS, common::STAKEHOLDERS, events).unwrap()
}

/* ──────────────────────────────────────────────────────────────────────────
1) Trigger parsing
────────────────────────────────────────────────────────────────────────── */

#[test]
fn comparisons_parse_once_at_load() {
    let cat = with_events(
        r#"[{
            "id": "e", "title": "E",
            "trigger": { "ethics": "<30", "trust": ">70.5", "profit": "50", "innovation": 7 },
            "effect": {}
        }]"#,
    );
    let t = &cat.events()[0].trigger;
    assert_eq!(t.probability, 0.5);
    let find = |stat: Stat| t.conditions.iter().find(|c| c.stat == stat).map(|c| c.cmp);
    assert_eq!(find(Stat::Ethics), Some(Comparison::below(30.0)));
    assert_eq!(find(Stat::Trust), Some(Comparison::above(70.5)));
    // Anything without a < or > prefix means "> 0".
    assert_eq!(find(Stat::Profit), Some(Comparison::above(0.0)));
    assert_eq!(find(Stat::Innovation), Some(Comparison { op: CompareOp::Above, threshold: 0.0 }));
}

#[test]
fn empty_and_null_comparisons_impose_nothing() {
    let cat = with_events(
        r#"[{ "id": "e", "title": "E", "trigger": { "ethics": "", "trust": null, "probability": 0.25 } }]"#,
    );
    let t = &cat.events()[0].trigger;
    assert!(t.conditions.is_empty());
    assert_eq!(t.probability, 0.25);
}

#[test]
fn falsy_values_impose_nothing() {
    let cat = with_events(
        r#"[{
            "id": "e", "title": "E",
            "trigger": { "ethics": 0, "trust": false, "profit": 0.0, "innovation": true }
        }]"#,
    );
    let t = &cat.events()[0].trigger;
    assert_eq!(t.conditions.len(), 1);
    assert_eq!(t.conditions[0].stat, Stat::Innovation);
    assert_eq!(t.conditions[0].cmp, Comparison::above(0.0));
}

#[test]
fn threshold_reads_the_leading_number() {
    let cat = with_events(
        r#"[{
            "id": "e", "title": "E",
            "trigger": { "trust": "<30%", "ethics": "> 7.5e1 points", "profit": "<-.5" }
        }]"#,
    );
    let t = &cat.events()[0].trigger;
    let find = |stat: Stat| t.conditions.iter().find(|c| c.stat == stat).map(|c| c.cmp);
    assert_eq!(find(Stat::Trust), Some(Comparison::below(30.0)));
    assert_eq!(find(Stat::Ethics), Some(Comparison::above(75.0)));
    assert_eq!(find(Stat::Profit), Some(Comparison::below(-0.5)));
}

#[test]
fn unreadable_threshold_only_disables_its_event() {
    let cat = with_events(
        r#"[
            { "id": "bad", "title": "Bad", "trigger": { "trust": "<lots", "probability": 1 }, "effect": { "trust": -50 } },
            { "id": "good", "title": "Good", "trigger": { "probability": 1 }, "effect": { "profit": 1 } }
        ]"#,
    );
    assert_eq!(cat.scenarios().len(), 3);
    assert_eq!(cat.events().len(), 2);

    let bad = &cat.events()[0];
    assert_eq!(bad.trigger.conditions.len(), 1);
    assert!(bad.trigger.conditions[0].cmp.is_dead());
    for v in [0.0, 30.0, 100.0] {
        assert!(!conditions_hold(&bad.trigger, &Stats::uniform(v)));
    }

    let mut r = rng(4);
    for _ in 0..20 {
        let mut state = state_at(1, [50.0, 50.0, 50.0, 50.0]);
        let fired = maybe_event(&mut state, &cat, &mut r).map(|e| e.id.clone());
        assert_eq!(fired.as_deref(), Some("good"));
    }
}

#[test]
fn comparisons_are_strict() {
    assert!(Comparison::below(30.0).holds(29.9));
    assert!(!Comparison::below(30.0).holds(30.0));
    assert!(Comparison::above(70.0).holds(70.1));
    assert!(!Comparison::above(70.0).holds(70.0));
}

/* ──────────────────────────────────────────────────────────────────────────
2) Evaluation
────────────────────────────────────────────────────────────────────────── */

#[test]
fn all_conditions_must_hold() {
    let t = Trigger::default()
        .when(Stat::Innovation, Comparison::above(70.0))
        .when(Stat::Profit, Comparison::above(60.0));
    assert!(conditions_hold(&t, &Stats::new(75.0, 65.0, 50.0, 50.0)));
    assert!(!conditions_hold(&t, &Stats::new(75.0, 55.0, 50.0, 50.0)));
    assert!(conditions_hold(&Trigger::default(), &Stats::default()));
}

#[test]
fn probability_bounds_are_exact() {
    let stats = Stats::default();
    let mut r = rng(9);
    for _ in 0..500 {
        assert!(check_trigger(&Trigger::default().with_probability(1.0), &stats, &mut r));
        assert!(!check_trigger(&Trigger::default().with_probability(0.0), &stats, &mut r));
    }
}

#[test]
fn probability_roll_is_skipped_when_conditions_fail() {
    let t = Trigger::default().when(Stat::Ethics, Comparison::below(10.0)).with_probability(1.0);
    let stats = Stats::default();
    let (mut a, mut b) = (rng(5), rng(5));
    assert!(!check_trigger(&t, &stats, &mut a));
    // `a` must not have advanced.
    assert_eq!(rand_core::RngCore::next_u64(&mut a), rand_core::RngCore::next_u64(&mut b));
}

#[test]
fn default_probability_fires_about_half_the_time() {
    let t = Trigger::default();
    let stats = Stats::default();
    let mut r = rng(11);
    let hits = (0..10_000).filter(|_| check_trigger(&t, &stats, &mut r)).count();
    assert!((4_500..5_500).contains(&hits), "hits = {hits}");
}

/* ──────────────────────────────────────────────────────────────────────────
3) maybe_event
────────────────────────────────────────────────────────────────────────── */

#[test]
fn first_matching_event_wins() {
    let cat = with_events(
        r#"[
          { "id": "first",  "title": "First",  "trigger": { "trust": ">10", "probability": 1 }, "effect": { "profit": -3 } },
          { "id": "second", "title": "Second", "trigger": { "trust": ">10", "probability": 1 }, "effect": { "profit": 9 } }
        ]"#,
    );
    let mut s = state_at(4, [50.0, 50.0, 50.0, 50.0]);
    let ev = maybe_event(&mut s, &cat, &mut rng(0)).expect("an event fires");

    assert_eq!(ev.id, "first");
    assert_stats(&s.stats, [50.0, 47.0, 50.0, 50.0]);
    assert_eq!(s.triggered_events.len(), 1);
    assert_eq!(s.triggered_events[0].event_id, "first");
    assert_eq!(s.triggered_events[0].round, 4);
}

#[test]
fn failing_events_are_skipped_in_order() {
    let cat = catalog();
    // critical_leak needs ethics < 30; boom needs innovation > 70 and profit > 60.
    let mut s = state_at(2, [50.0, 50.0, 50.0, 50.0]);
    assert!(maybe_event(&mut s, &cat, &mut rng(1)).is_none());
    assert!(s.triggered_events.is_empty());

    let mut leak = state_at(2, [50.0, 50.0, 50.0, 25.0]);
    let ev = maybe_event(&mut leak, &cat, &mut rng(1)).unwrap();
    assert_eq!(ev.id, "critical_leak");
    assert_stats(&leak.stats, [50.0, 50.0, 45.0, 25.0]);
}

#[test]
fn no_events_means_nothing_happens() {
    let cat = Catalog::fallback();
    let mut s = state_at(2, [0.0, 0.0, 0.0, 0.0]);
    assert!(maybe_event(&mut s, &cat, &mut rng(1)).is_none());
}

#[test]
fn event_effects_are_clamped() {
    let ev = Event {
        id: "windfall".into(),
        title: "Windfall".into(),
        description: None,
        category: None,
        trigger: Trigger::default(),
        effect: StatDelta { profit: 30, trust: -30, ..StatDelta::default() },
    };
    let mut s = state_at(1, [50.0, 90.0, 10.0, 50.0]);
    apply_event(&mut s, &ev);
    assert_stats(&s.stats, [50.0, 100.0, 0.0, 50.0]);
    assert_eq!(s.triggered_events[0].title, "Windfall");
}
