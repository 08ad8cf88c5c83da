//! Capacity tracking - how much of each nation's allocation is in use
//!
//! Existing usage comes from the offer ledger; planned usage accumulates as
//! the recommendation tiers commit pairings during a single run.

mod state;
mod usage;

pub use state::{CapacityState, Commitment};
pub use usage::UsageCounters;
