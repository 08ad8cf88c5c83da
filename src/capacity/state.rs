use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::capacity::usage::UsageCounters;
use crate::categorize::CategorizedNation;
use crate::core::types::{AllianceId, Direction, NationId, Resource, SlotKind};
use crate::model::offer::Offer;
use crate::model::slots::SlotAllocation;

/// Which budget a committed slot was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commitment {
    /// A tracked directional slot
    Tracked,
    /// An unused external slot, only under the fallback policy
    ExternalFallback,
}

/// Per-run capacity state: allocations, ledger usage and planned usage
///
/// Existing usage is fixed when the state is built. Planned usage grows as
/// pairings are committed, and every query accounts for both, so a tier sees
/// the capacity consumed by earlier tiers and earlier pairings in the same
/// tier.
#[derive(Debug, Clone, Default)]
pub struct CapacityState {
    allocations: AHashMap<NationId, SlotAllocation>,
    existing: AHashMap<NationId, UsageCounters>,
    planned: AHashMap<NationId, UsageCounters>,
    /// Directional kinds that external fallbacks stood in for
    fallbacks: AHashMap<NationId, UsageCounters>,
    allow_external_fallback: bool,
}

impl CapacityState {
    /// Build the state for the members of `group`
    ///
    /// Active offers with both ends in `group` count against the directional
    /// counters of each end. Active offers with exactly one end in `group`
    /// count against that member's external budget. Terminal offers use no
    /// capacity.
    pub fn build(nations: &[CategorizedNation], offers: &[Offer], group: AllianceId) -> Self {
        let mut state = Self::default();

        for nation in nations.iter().filter(|n| n.group_id == group) {
            state.allocations.entry(nation.id).or_insert(nation.slots);
            state.existing.entry(nation.id).or_default();
        }

        for offer in offers.iter().filter(|o| o.is_active()) {
            if offer.is_tracked_for(group) {
                let Some(resource) = offer.resource() else {
                    continue;
                };
                state.record_existing(offer.declaring_id, SlotKind::new(resource, Direction::Send));
                state.record_existing(offer.receiving_id, SlotKind::new(resource, Direction::Receive));
            } else if offer.is_external_for(group) {
                let member = if offer.declaring_group_id == group {
                    offer.declaring_id
                } else {
                    offer.receiving_id
                };
                if let Some(usage) = state.existing.get_mut(&member) {
                    usage.external += 1;
                }
            }
        }

        state
    }

    pub fn with_external_fallback(mut self, allow: bool) -> Self {
        self.allow_external_fallback = allow;
        self
    }

    /// Absorb another alliance's state; nations already present are kept
    pub fn merge(&mut self, other: CapacityState) {
        for (id, slots) in other.allocations {
            self.allocations.entry(id).or_insert(slots);
        }
        for (id, usage) in other.existing {
            self.existing.entry(id).or_insert(usage);
        }
        for (id, usage) in other.planned {
            self.planned.entry(id).or_insert(usage);
        }
        for (id, usage) in other.fallbacks {
            self.fallbacks.entry(id).or_insert(usage);
        }
    }

    fn record_existing(&mut self, id: NationId, kind: SlotKind) {
        if let Some(usage) = self.existing.get_mut(&id) {
            usage.increment(kind);
        }
    }

    /// Usage recorded in the offer ledger
    pub fn existing(&self, id: NationId) -> UsageCounters {
        self.existing.get(&id).copied().unwrap_or_default()
    }

    /// Usage committed by recommendations in this run
    pub fn planned(&self, id: NationId) -> UsageCounters {
        self.planned.get(&id).copied().unwrap_or_default()
    }

    /// Recommendations committed in this run per directional kind, whether
    /// they took a tracked slot or an external fallback
    ///
    /// Fallbacks are not tracked usage, so capacity queries never see them
    /// here; `external` still counts every fallback.
    pub fn recommended(&self, id: NationId) -> UsageCounters {
        let fallbacks = self.fallbacks.get(&id).copied().unwrap_or_default();
        self.planned(id).combined(&fallbacks)
    }

    /// Existing plus planned usage
    pub fn usage(&self, id: NationId) -> UsageCounters {
        self.existing(id).combined(&self.planned(id))
    }

    /// Tracked slots of `kind` still free, bounded by the nation's total
    pub fn remaining(&self, id: NationId, kind: SlotKind) -> u32 {
        let Some(slots) = self.allocations.get(&id) else {
            return 0;
        };
        let usage = self.usage(id);
        let directional = (slots.count(kind) as u32).saturating_sub(usage.get(kind));
        let total = slots.total_tracked().saturating_sub(usage.tracked_total());
        directional.min(total)
    }

    /// External slots neither used by the ledger nor taken by fallbacks
    pub fn external_remaining(&self, id: NationId) -> u32 {
        let Some(slots) = self.allocations.get(&id) else {
            return 0;
        };
        (slots.external as u32).saturating_sub(self.usage(id).external)
    }

    /// Any tracked capacity left, or external capacity when fallback is allowed
    pub fn has_total_capacity(&self, id: NationId) -> bool {
        let Some(slots) = self.allocations.get(&id) else {
            return false;
        };
        let tracked_room = self.usage(id).tracked_total() < slots.total_tracked();
        tracked_room || self.fallback_room(id)
    }

    /// Room for one more offer of `resource` in `direction`
    ///
    /// A nation with zero configured slots of the type never has room, even
    /// under the fallback policy.
    pub fn has_directional_capacity(&self, id: NationId, resource: Resource, direction: Direction) -> bool {
        let kind = SlotKind::new(resource, direction);
        match self.allocations.get(&id) {
            Some(slots) if slots.count(kind) > 0 => {
                self.remaining(id, kind) > 0 || self.fallback_room(id)
            }
            _ => false,
        }
    }

    fn fallback_room(&self, id: NationId) -> bool {
        self.allow_external_fallback && self.external_remaining(id) > 0
    }

    /// Take one slot for an offer of `resource` in `direction`
    ///
    /// Returns None, and changes nothing, when no slot is available.
    pub fn commit(&mut self, id: NationId, resource: Resource, direction: Direction) -> Option<Commitment> {
        if !self.has_directional_capacity(id, resource, direction) {
            return None;
        }
        let kind = SlotKind::new(resource, direction);
        let tracked = self.remaining(id, kind) > 0;
        let planned = self.planned.entry(id).or_default();
        if tracked {
            planned.increment(kind);
            Some(Commitment::Tracked)
        } else {
            planned.external += 1;
            self.fallbacks.entry(id).or_default().increment(kind);
            Some(Commitment::ExternalFallback)
        }
    }

    /// Nations tracked by this state, in id order
    pub fn nation_ids(&self) -> Vec<NationId> {
        let mut ids: Vec<NationId> = self.allocations.keys().copied().collect();
        ids.sort();
        ids
    }
}
