// src/genres/mod.rs

// Orchestrations that sequence the systems into a playable loop.

pub mod session;
pub use session::*;
