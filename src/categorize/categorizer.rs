use serde::{Deserialize, Serialize};

use crate::categorize::bands::Band;
use crate::core::config::{CapacityLimits, EngineConfig};
use crate::core::types::{AllianceId, NationId};
use crate::model::nation::Nation;
use crate::model::slots::{PersistedSlots, SlotAllocation};

/// Where a nation's allocation came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "band", rename_all = "snake_case")]
pub enum Category {
    /// Operator-persisted configuration
    Persisted,
    /// Computed from the named band
    Band(String),
    /// No band matched; the nation holds no slots
    Unbanded,
}

/// A nation with its resolved slot allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedNation {
    pub id: NationId,
    pub name: String,
    pub ruler: String,
    pub group_id: AllianceId,
    pub in_war_mode: bool,
    pub has_expanded_capacity: bool,
    pub slot_limit: u8,
    pub slots: SlotAllocation,
    pub category: Category,
}

impl CategorizedNation {
    pub fn over_limit(&self) -> bool {
        self.slots.total() > self.slot_limit as u32
    }
}

/// Maps nations to slot allocations using a banding table
#[derive(Debug, Clone, Copy)]
pub struct Categorizer<'a> {
    bands: &'a [Band],
    limits: &'a CapacityLimits,
}

impl<'a> Categorizer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            bands: &config.bands,
            limits: &config.capacity,
        }
    }

    pub fn with_bands(bands: &'a [Band], limits: &'a CapacityLimits) -> Self {
        Self { bands, limits }
    }

    /// Categorize using the nation's own persisted slots, if it carries any
    pub fn categorize_nation(&self, nation: &Nation) -> CategorizedNation {
        self.categorize(nation, nation.slots.as_ref())
    }

    /// Categorize with an explicit persisted configuration lookup
    pub fn categorize(&self, nation: &Nation, persisted: Option<&PersistedSlots>) -> CategorizedNation {
        let slot_limit = self.limits.limit_for(nation.has_expanded_capacity);

        let (slots, category) = match persisted {
            Some(persisted) => (persisted.resolve(), Category::Persisted),
            None => self.computed(nation),
        };

        let categorized = CategorizedNation {
            id: nation.id,
            name: nation.name.clone(),
            ruler: nation.ruler.clone(),
            group_id: nation.group_id,
            in_war_mode: nation.in_war_mode,
            has_expanded_capacity: nation.has_expanded_capacity,
            slot_limit,
            slots,
            category,
        };

        if categorized.over_limit() {
            // Persisted values still win; the drift is surfaced, not corrected
            tracing::warn!(
                "Nation {} is configured with {} slots, ceiling is {}",
                nation.id,
                categorized.slots.total(),
                slot_limit
            );
        }

        categorized
    }

    fn computed(&self, nation: &Nation) -> (SlotAllocation, Category) {
        let band = self
            .bands
            .iter()
            .find(|band| band.matches(nation.technology, nation.infrastructure));

        match band {
            Some(band) => {
                let mut slots = band.template(nation.has_expanded_capacity).to_allocation();
                trim_to_limit(&mut slots, self.limits.limit_for(nation.has_expanded_capacity));
                (slots, Category::Band(band.name.clone()))
            }
            None => (SlotAllocation::default(), Category::Unbanded),
        }
    }
}

/// Drop receive slots first, then send slots, until the allocation fits
fn trim_to_limit(slots: &mut SlotAllocation, limit: u8) {
    while slots.total() > limit as u32 {
        let field = if slots.get_tech > 0 {
            &mut slots.get_tech
        } else if slots.get_cash > 0 {
            &mut slots.get_cash
        } else if slots.send_tech > 0 {
            &mut slots.send_tech
        } else {
            &mut slots.send_cash
        };
        *field -= 1;
    }
}
