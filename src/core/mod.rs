pub mod config;
pub mod error;
pub mod numeric;
pub mod types;

pub use config::{CapacityLimits, CrossGroupLink, EngineConfig, PolicyConfig};
pub use error::{AidError, Result};
pub use types::{AllianceId, Direction, NationId, PairKey, Resource, SlotKind};
