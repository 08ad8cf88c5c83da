//! Read-only operator reports computed from a finished run

mod availability;
mod mismatch;
mod slot_counts;

pub use availability::{find_available_slots, AvailableSlots, IdleSlot};
pub use mismatch::{detect_mismatches, ExternalMisuse, MismatchReport, SlotOverflow};
pub use slot_counts::{count_slots, CrossGroupCounts, DirectionalTallies, SlotCounts, SlotTally};
