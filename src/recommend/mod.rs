//! Aid recommendation generation
//!
//! Tiers run in a fixed order and share one capacity state and one set of
//! used pairs:
//! 0. re-establish expired pairings
//! 1. new internal cash
//! 2. cross-group cash (only with an enabled link)
//! 3. new internal tech
//! 4. cross-group tech (only with an enabled link)
//!
//! Matching inside a tier is greedy first-fit over a priority-ordered
//! sender x recipient scan. It does not search for a maximum matching; a
//! different `PairingStrategy` can be plugged in without touching the tiers.

mod generator;
pub mod pairing;
pub mod recommendation;

pub use generator::{generate, GenerationOutput, RecommendationEngine};
pub use pairing::{GreedyFirstFit, PairRegistry, Pairing, PairingStrategy};
pub use recommendation::{NationView, Recommendation, RecommendationKind, Tier};
