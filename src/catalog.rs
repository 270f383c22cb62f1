//! Content catalog: scenarios, stakeholders and events.
//!
//! Loaded once (from three JSON datasets or the built-in fallback), then
//! shared by reference. Nothing in the engine mutates it. Event trigger
//! strings such as `"<30"` are parsed here, not per evaluation.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use thiserror::Error;

use crate::{Decision, Stat, StatDelta};

/// Category sampled on every third round.
pub const DATA_TRADE: &str = "data_trade";
pub const DEFAULT_EVENT_PROBABILITY: f64 = 0.5;

pub const SCENARIOS_FILE: &str = "scenarios.json";
pub const STAKEHOLDERS_FILE: &str = "stakeholders.json";
pub const EVENTS_FILE: &str = "events.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {dataset} from {path:?}: {source}")]
    Read {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {dataset}: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate {dataset} id {id}")]
    Duplicate { dataset: &'static str, id: String },
    #[error("no {dataset} in catalog")]
    Empty { dataset: &'static str },
}

/* ──────────────────────────────────────────────────────────────────────────
Scenarios
────────────────────────────────────────────────────────────────────────── */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    #[serde(flatten)]
    pub delta: StatDelta,
    #[serde(default)]
    pub consequence: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decisions {
    pub approve: DecisionOutcome,
    pub delay: DecisionOutcome,
    pub reject: DecisionOutcome,
}

impl Decisions {
    pub fn get(&self, decision: Decision) -> &DecisionOutcome {
        match decision {
            Decision::Approve => &self.approve,
            Decision::Delay => &self.delay,
            Decision::Reject => &self.reject,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "desc", alias = "description")]
    pub description: String,
    pub decisions: Decisions,
    #[serde(default)]
    pub tags: Vec<String>,
}

/* ──────────────────────────────────────────────────────────────────────────
Stakeholders
────────────────────────────────────────────────────────────────────────── */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: String,
    pub name: String,
    pub concern: Stat,
    #[serde(default, rename = "mod")]
    pub modifier: StatDelta,
    #[serde(default, rename = "mod_negative")]
    pub modifier_negative: StatDelta,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub reaction_positive: String,
    #[serde(default)]
    pub reaction_negative: String,
}

/* ──────────────────────────────────────────────────────────────────────────
Events and triggers
────────────────────────────────────────────────────────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Below,
    Above,
}

/// Strict comparison against a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub op: CompareOp,
    pub threshold: f64,
}

impl Comparison {
    pub fn below(threshold: f64) -> Self {
        Self { op: CompareOp::Below, threshold }
    }

    pub fn above(threshold: f64) -> Self {
        Self { op: CompareOp::Above, threshold }
    }

    pub fn holds(&self, value: f64) -> bool {
        match self.op {
            CompareOp::Below => value < self.threshold,
            CompareOp::Above => value > self.threshold,
        }
    }

    /// Never holds; stands in for a threshold that is not a number.
    pub fn never(op: CompareOp) -> Self {
        Self { op, threshold: f64::NAN }
    }

    /// A comparison whose threshold could not be read.
    pub fn is_dead(&self) -> bool {
        self.threshold.is_nan()
    }

    /// `"<N"` / `">N"`, reading the leading number of `N` (`"<30%"` is
    /// `< 30`). Any other truthy value means `> 0`. `None` for null, `""`,
    /// `0` and `false`.
    fn parse(raw: &Value) -> Option<Self> {
        let s = match raw {
            Value::Null | Value::Bool(false) => return None,
            Value::Number(n) if n.as_f64() == Some(0.0) => return None,
            Value::String(s) if s.is_empty() => return None,
            Value::String(s) => s.as_str(),
            _ => return Some(Self::above(0.0)),
        };
        let (op, rest) = if let Some(rest) = s.strip_prefix('<') {
            (CompareOp::Below, rest)
        } else if let Some(rest) = s.strip_prefix('>') {
            (CompareOp::Above, rest)
        } else {
            return Some(Self::above(0.0));
        };
        Some(match leading_number(rest) {
            Some(threshold) => Self { op, threshold },
            None => Self::never(op),
        })
    }
}

/// Longest numeric prefix after leading whitespace: sign, digits, fraction,
/// exponent. `None` when no digit is found.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let digits = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = if matches!(b.first(), Some(b'+' | b'-')) { 1 } else { 0 };
    let int_end = digits(end);
    let mut seen = int_end > end;
    end = int_end;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits(end + 1);
        if frac_end > end + 1 || seen {
            seen |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !seen {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(b.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Condition {
    pub stat: Stat,
    pub cmp: Comparison,
}

/// AND over `conditions`, then a Bernoulli(`probability`) roll.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trigger {
    pub conditions: Vec<Condition>,
    pub probability: f64,
}

impl Default for Trigger {
    fn default() -> Self {
        Self { conditions: Vec::new(), probability: DEFAULT_EVENT_PROBABILITY }
    }
}

impl Trigger {
    pub fn when(mut self, stat: Stat, cmp: Comparison) -> Self {
        self.conditions.push(Condition { stat, cmp });
        self
    }

    pub fn with_probability(mut self, p: f64) -> Self {
        self.probability = p.clamp(0.0, 1.0);
        self
    }

    fn from_json(event: &str, raw: &JsonMap<String, Value>) -> Self {
        let mut trigger = Trigger::default();
        for stat in Stat::ALL {
            let Some(value) = raw.get(stat.key()) else { continue };
            let Some(cmp) = Comparison::parse(value) else { continue };
            if cmp.is_dead() {
                tracing::warn!(event, %stat, raw = %value, "unreadable trigger threshold; event can never fire");
            }
            trigger.conditions.push(Condition { stat, cmp });
        }
        if let Some(p) = raw.get("probability").and_then(Value::as_f64) {
            trigger = trigger.with_probability(p);
        }
        trigger
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub trigger: Trigger,
    pub effect: StatDelta,
}

#[derive(Deserialize)]
struct RawEvent {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    trigger: JsonMap<String, Value>,
    #[serde(default)]
    effect: StatDelta,
}

impl RawEvent {
    fn into_event(self) -> Event {
        let trigger = Trigger::from_json(&self.id, &self.trigger);
        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            trigger,
            effect: self.effect,
        }
    }
}

/* ──────────────────────────────────────────────────────────────────────────
Catalog
────────────────────────────────────────────────────────────────────────── */

#[derive(Clone, Debug)]
pub struct Catalog {
    scenarios: Vec<Arc<Scenario>>,
    stakeholders: Vec<Arc<Stakeholder>>,
    events: Vec<Event>,
}

impl Catalog {
    /// Validated catalog. Scenarios and stakeholders must be non-empty and
    /// ids unique per dataset; events may be empty.
    pub fn new(
        scenarios: Vec<Scenario>,
        stakeholders: Vec<Stakeholder>,
        events: Vec<Event>,
    ) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty { dataset: "scenarios" });
        }
        if stakeholders.is_empty() {
            return Err(CatalogError::Empty { dataset: "stakeholders" });
        }
        check_unique("scenarios", scenarios.iter().map(|s| s.id.as_str()))?;
        check_unique("stakeholders", stakeholders.iter().map(|s| s.id.as_str()))?;
        check_unique("events", events.iter().map(|e| e.id.as_str()))?;
        Ok(Self {
            scenarios: scenarios.into_iter().map(Arc::new).collect(),
            stakeholders: stakeholders.into_iter().map(Arc::new).collect(),
            events,
        })
    }

    pub fn from_json_strs(
        scenarios: &str,
        stakeholders: &str,
        events: &str,
    ) -> Result<Self, CatalogError> {
        let scenarios: Vec<Scenario> = serde_json::from_str(scenarios)
            .map_err(|source| CatalogError::Parse { dataset: "scenarios", source })?;
        let stakeholders: Vec<Stakeholder> = serde_json::from_str(stakeholders)
            .map_err(|source| CatalogError::Parse { dataset: "stakeholders", source })?;
        let raw_events: Vec<RawEvent> = serde_json::from_str(events)
            .map_err(|source| CatalogError::Parse { dataset: "events", source })?;
        let events = raw_events.into_iter().map(RawEvent::into_event).collect();
        Self::new(scenarios, stakeholders, events)
    }

    /// Reads `scenarios.json`, `stakeholders.json` and `events.json` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let scenarios = read_dataset(dir, "scenarios", SCENARIOS_FILE)?;
        let stakeholders = read_dataset(dir, "stakeholders", STAKEHOLDERS_FILE)?;
        let events = read_dataset(dir, "events", EVENTS_FILE)?;
        let catalog = Self::from_json_strs(&scenarios, &stakeholders, &events)?;
        tracing::info!(
            scenarios = catalog.scenarios.len(),
            stakeholders = catalog.stakeholders.len(),
            events = catalog.events.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Like [`Catalog::from_dir`], but never fails: on any error the
    /// built-in fallback is returned so the engine stays playable.
    pub fn load_or_fallback(dir: &Path) -> Self {
        match Self::from_dir(dir) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(error = %err, dir = ?dir, "catalog failed to load; using fallback");
                Self::fallback()
            }
        }
    }

    /// One scenario, one stakeholder, no events.
    pub fn fallback() -> Self {
        let scenario = Scenario {
            id: "s1".into(),
            title: "AI Surveillance in Schools".into(),
            category: "education".into(),
            description: "A startup wants to analyze student emotions using facial recognition to improve learning.".into(),
            decisions: Decisions {
                approve: outcome(5, 4, -6, -7, "Schools become digital prisons."),
                delay: outcome(1, 0, 2, 2, "Ethics review commissioned."),
                reject: outcome(-3, -4, 5, 6, "Privacy protected, innovation slows."),
            },
            tags: vec!["privacy".into(), "education".into()],
        };
        let public = Stakeholder {
            id: "public".into(),
            name: "The Public".into(),
            concern: Stat::Trust,
            modifier: StatDelta { trust: 2, ethics: 1, ..StatDelta::default() },
            modifier_negative: StatDelta { trust: -2, ethics: -1, ..StatDelta::default() },
            flavor: "Citizens watch your every move.".into(),
            reaction_positive: "Public support grows.".into(),
            reaction_negative: "Mass protest organized.".into(),
        };
        Self {
            scenarios: vec![Arc::new(scenario)],
            stakeholders: vec![Arc::new(public)],
            events: Vec::new(),
        }
    }

    pub fn scenarios(&self) -> &[Arc<Scenario>] {
        &self.scenarios
    }

    pub fn stakeholders(&self) -> &[Arc<Stakeholder>] {
        &self.stakeholders
    }

    /// In declaration order; earlier events win ties.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn scenarios_in(&self, category: &str) -> Vec<Arc<Scenario>> {
        self.scenarios
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    }

    pub fn scenario(&self, id: &str) -> Option<&Arc<Scenario>> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn stakeholder(&self, id: &str) -> Option<&Arc<Stakeholder>> {
        self.stakeholders.iter().find(|s| s.id == id)
    }
}

fn outcome(innovation: i32, profit: i32, trust: i32, ethics: i32, consequence: &str) -> DecisionOutcome {
    DecisionOutcome {
        delta: StatDelta { innovation, profit, trust, ethics },
        consequence: consequence.into(),
    }
}

fn read_dataset(dir: &Path, dataset: &'static str, file: &str) -> Result<String, CatalogError> {
    let path = dir.join(file);
    fs::read_to_string(&path).map_err(|source| CatalogError::Read { dataset, path, source })
}

fn check_unique<'a>(
    dataset: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::Duplicate { dataset, id: id.to_string() });
        }
    }
    Ok(())
}
