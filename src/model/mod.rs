//! Snapshot records: nations, offers and slot allocations

pub mod nation;
pub mod offer;
pub mod slots;

pub use nation::Nation;
pub use offer::{Offer, TERMINAL_STATUSES};
pub use slots::{PersistedSlots, SlotAllocation};
