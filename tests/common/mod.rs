// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use bevy_prng::WyRand;
use council_engine::catalog::{Catalog, Scenario, Stakeholder};
use council_engine::{GameState, Stats};
use rand_core::SeedableRng;

pub const EPS: f64 = 1e-9;

pub const SCENARIOS: &str = r#"[
  {
    "id": "surveil",
    "title": "AI Surveillance in Schools",
    "category": "education",
    "desc": "Emotion tracking in classrooms.",
    "decisions": {
      "approve": { "innovation": 5, "ethics": -7, "consequence": "Schools become digital prisons." },
      "delay":   { "trust": 1, "consequence": "Ethics review commissioned." },
      "reject":  { "innovation": -3, "trust": 4, "consequence": "Privacy protected." }
    },
    "tags": ["privacy", "education"]
  },
  {
    "id": "broker",
    "title": "Health Data Broker",
    "category": "data_trade",
    "desc": "Sell anonymised patient records.",
    "decisions": {
      "approve": { "profit": 6, "trust": -4, "ethics": -5, "consequence": "Records change hands." },
      "delay":   { "consequence": "Lawyers are consulted." },
      "reject":  { "profit": -3, "ethics": 4, "consequence": "The deal dies." }
    },
    "tags": ["health"]
  },
  {
    "id": "lab",
    "title": "Open Model Lab",
    "category": "research",
    "description": "Fund an open-weights research lab.",
    "decisions": {
      "approve": { "innovation": 6, "profit": 2, "ethics": -2, "consequence": "Papers flood in." },
      "delay":   { "innovation": 1, "consequence": "Grant deferred." },
      "reject":  { "innovation": -4, "trust": 2, "consequence": "Researchers emigrate." }
    }
  }
]"#;

pub const STAKEHOLDERS: &str = r#"[
  {
    "id": "regulator",
    "name": "The Regulator",
    "concern": "ethics",
    "mod": { "ethics": 2 },
    "mod_negative": { "ethics": -2 },
    "flavor": "Paperwork never sleeps.",
    "reaction_positive": "A nod of approval.",
    "reaction_negative": "An inquiry is opened."
  },
  {
    "id": "investor",
    "name": "Venture Capital",
    "concern": "profit",
    "mod": { "profit": 2 },
    "mod_negative": { "profit": -1 },
    "flavor": "Growth at any cost.",
    "reaction_positive": "Funding rounds close.",
    "reaction_negative": "Capital flees."
  }
]"#;

pub const EVENTS: &str = r#"[
  {
    "id": "critical_leak",
    "title": "Massive Data Leak",
    "description": "Millions of records surface online.",
    "category": "negative",
    "trigger": { "ethics": "<30", "probability": 1.0 },
    "effect": { "trust": -5 }
  },
  {
    "id": "boom",
    "title": "AI Boom",
    "trigger": { "innovation": ">70", "profit": ">60", "probability": 0.6 },
    "effect": { "profit": 4 }
  }
]"#;

pub fn catalog() -> Catalog {
    Catalog::from_json_strs(SCENARIOS, STAKEHOLDERS, EVENTS).expect("fixture catalog should load")
}

pub fn rng(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

pub fn scenario(catalog: &Catalog, id: &str) -> Arc<Scenario> {
    Arc::clone(catalog.scenario(id).expect("fixture scenario"))
}

pub fn stakeholder(catalog: &Catalog, id: &str) -> Arc<Stakeholder> {
    Arc::clone(catalog.stakeholder(id).expect("fixture stakeholder"))
}

pub fn state_at(round: u32, stats: [f64; 4]) -> GameState {
    let mut s = GameState::with_stats(Stats::new(stats[0], stats[1], stats[2], stats[3]));
    s.round = round;
    s
}

pub fn assert_stats(stats: &Stats, expected: [f64; 4]) {
    let got = stats.as_array();
    for (g, e) in got.iter().zip(expected.iter()) {
        assert!((g - e).abs() < 1e-6, "stats {:?} != expected {:?}", got, expected);
    }
}

pub fn assert_in_bounds(stats: &Stats) {
    for (stat, v) in stats.iter() {
        assert!((0.0..=100.0).contains(&v), "{stat} out of bounds: {v}");
    }
}
