//! Snapshot providers - where nations and offers come from
//!
//! The engine itself never fetches anything. Providers are the seam to the
//! storage or feed layer; failures they report are passed to the caller
//! unchanged.

mod provider;
mod in_memory;

pub use provider::{NationSnapshotProvider, OfferLedgerProvider};
pub use in_memory::Snapshot;
