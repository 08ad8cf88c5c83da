//! Recommendation records produced by a generation run

use serde::{Deserialize, Serialize};

use crate::capacity::{CapacityState, Commitment, UsageCounters};
use crate::categorize::CategorizedNation;
use crate::core::types::{AllianceId, NationId, Resource};
use crate::model::offer::Offer;
use crate::model::slots::SlotAllocation;

/// Generation phase; lower tiers are emitted first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Tier {
    Reestablish = 0,
    InternalCash = 1,
    CrossGroupCash = 2,
    InternalTech = 3,
    CrossGroupTech = 4,
}

impl Tier {
    pub fn internal(resource: Resource) -> Self {
        match resource {
            Resource::Cash => Tier::InternalCash,
            Resource::Tech => Tier::InternalTech,
        }
    }

    pub fn cross_group(resource: Resource) -> Self {
        match resource {
            Resource::Cash => Tier::CrossGroupCash,
            Resource::Tech => Tier::CrossGroupTech,
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Tier::Reestablish),
            1 => Ok(Tier::InternalCash),
            2 => Ok(Tier::CrossGroupCash),
            3 => Ok(Tier::InternalTech),
            4 => Ok(Tier::CrossGroupTech),
            other => Err(format!("unknown recommendation tier {}", other)),
        }
    }
}

/// Type tag carried alongside the tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ReestablishCash,
    ReestablishTech,
    NewCash,
    NewTech,
    CrossGroupCash,
    CrossGroupTech,
}

impl RecommendationKind {
    pub fn for_tier(tier: Tier, resource: Resource) -> Self {
        match (tier, resource) {
            (Tier::Reestablish, Resource::Cash) => RecommendationKind::ReestablishCash,
            (Tier::Reestablish, Resource::Tech) => RecommendationKind::ReestablishTech,
            (Tier::CrossGroupCash | Tier::CrossGroupTech, Resource::Cash) => RecommendationKind::CrossGroupCash,
            (Tier::CrossGroupCash | Tier::CrossGroupTech, Resource::Tech) => RecommendationKind::CrossGroupTech,
            (_, Resource::Cash) => RecommendationKind::NewCash,
            (_, Resource::Tech) => RecommendationKind::NewTech,
        }
    }
}

/// Snapshot of one side of a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationView {
    pub id: NationId,
    pub name: String,
    pub ruler: String,
    pub group_id: AllianceId,
    pub slots: SlotAllocation,
    /// Usage recorded in the offer ledger at the start of the run
    pub current_usage: UsageCounters,
    pub in_war_mode: bool,
}

impl NationView {
    pub fn new(nation: &CategorizedNation, state: &CapacityState) -> Self {
        Self {
            id: nation.id,
            name: nation.name.clone(),
            ruler: nation.ruler.clone(),
            group_id: nation.group_id,
            slots: nation.slots,
            current_usage: state.existing(nation.id),
            in_war_mode: nation.in_war_mode,
        }
    }
}

/// A proposed sender -> recipient aid pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub tier: Tier,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub resource: Resource,
    pub sender: NationView,
    pub recipient: NationView,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_offer: Option<Offer>,
    /// Set when either side is covered by an external slot under the fallback policy
    #[serde(default)]
    pub uses_external_slot: bool,
}

impl Recommendation {
    pub fn is_cash(&self) -> bool {
        self.resource == Resource::Cash
    }

    pub fn is_tech(&self) -> bool {
        self.resource == Resource::Tech
    }
}

pub(crate) fn uses_fallback(sender: Commitment, recipient: Commitment) -> bool {
    sender == Commitment::ExternalFallback || recipient == Commitment::ExternalFallback
}
