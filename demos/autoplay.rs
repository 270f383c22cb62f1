// demos/autoplay.rs
// Run with:
//   cargo run --example autoplay -- [seed] [max_rounds]
//
// Plays one session with a naive policy (protect the weakest stat) and
// prints each round. Loads demos/data, or the built-in fallback if missing.

use std::path::Path;

use council_engine::catalog::{Catalog, Scenario};
use council_engine::genres::session::{Session, SessionConfig};
use council_engine::state::GameState;
use council_engine::systems::digest::CommentaryDigest;
use council_engine::Decision;

/// Pick the decision whose delta best lifts the currently weakest stat.
fn protect_weakest(state: &GameState, scenario: &Scenario) -> Decision {
    let (weakest, _) = state.stats.min();
    Decision::ALL
        .into_iter()
        .max_by_key(|&d| scenario.decisions.get(d).delta.get(weakest))
        .unwrap_or(Decision::Delay)
}

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);
    let max_rounds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(40);

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/data");
    let catalog = Catalog::load_or_fallback(&dir);
    let mut session = Session::new(&catalog, SessionConfig::seeded(seed));

    println!("== Council session (seed {seed}) ==");
    while !session.is_over() && session.state().round <= max_rounds {
        let scenario = match session.begin_round() {
            Ok(s) => s,
            Err(err) => {
                eprintln!("cannot start round: {err}");
                return;
            }
        };
        let decision = protect_weakest(session.state(), &scenario);
        let out = match session.resolve(decision) {
            Ok(out) => out,
            Err(err) => {
                eprintln!("cannot resolve round: {err}");
                return;
            }
        };

        let s = session.state().stats;
        println!(
            "R{:>3} {:<32} {:<7} I {:>5.1}  P {:>5.1}  T {:>5.1}  E {:>5.1}",
            out.round,
            out.scenario.title,
            decision,
            s.innovation(),
            s.profit(),
            s.trust(),
            s.ethics()
        );
        if let (Some(who), Some(reaction)) = (&out.stakeholder, out.reaction) {
            println!("      {} reacts: {:?}", who.name, reaction);
        }
        if let Some(ev) = &out.event {
            println!("      event: {}", ev.title);
        }
    }

    let ending = match &session.state().ending {
        Some(e) => e.clone(),
        None => match session.conclude() {
            Ok(e) => e,
            Err(err) => {
                eprintln!("cannot conclude: {err}");
                return;
            }
        },
    };
    let digest = CommentaryDigest::from_state(session.state());

    println!("== {} ==", ending.title);
    println!("{}", ending.description);
    println!("Legacy: {}", ending.legacy);
    println!("Digest -> {:?} / {:?} / {:?}", digest.imbalance, digest.trend, digest.outlook);
}
