//! Nation categorization - resource profile to slot allocation
//!
//! A persisted operator configuration always wins. Without one, the nation's
//! technology and infrastructure levels select a band from the configured
//! banding table, and the band's template becomes the allocation.

pub mod bands;
mod categorizer;

pub use bands::{default_bands, Band, SlotTemplate};
pub use categorizer::{CategorizedNation, Category, Categorizer};
