//! Aggregate slot tallies for dashboards

use serde::{Deserialize, Serialize};

use crate::capacity::CapacityState;
use crate::categorize::CategorizedNation;
use crate::core::types::{AllianceId, SlotKind};
use crate::recommend::{Recommendation, Tier};

/// Configured, used, recommended and still-available slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotTally {
    pub configured: u32,
    pub used: u32,
    pub recommended: u32,
    pub available: u32,
}

impl SlotTally {
    /// Add one nation; its overflow never eats into other nations' availability
    fn add(&mut self, configured: u32, used: u32, recommended: u32) {
        self.configured += configured;
        self.used += used;
        self.recommended += recommended;
        self.available += configured.saturating_sub(used + recommended);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalTallies {
    pub send_cash: SlotTally,
    pub send_tech: SlotTally,
    pub get_cash: SlotTally,
    pub get_tech: SlotTally,
}

impl DirectionalTallies {
    pub fn get(&self, kind: SlotKind) -> &SlotTally {
        match kind {
            SlotKind::SendCash => &self.send_cash,
            SlotKind::SendTech => &self.send_tech,
            SlotKind::GetCash => &self.get_cash,
            SlotKind::GetTech => &self.get_tech,
        }
    }

    fn get_mut(&mut self, kind: SlotKind) -> &mut SlotTally {
        match kind {
            SlotKind::SendCash => &mut self.send_cash,
            SlotKind::SendTech => &mut self.send_tech,
            SlotKind::GetCash => &mut self.get_cash,
            SlotKind::GetTech => &mut self.get_tech,
        }
    }

    fn tally(nations: &[CategorizedNation], state: &CapacityState) -> Self {
        let mut tallies = Self::default();
        for nation in nations {
            let existing = state.existing(nation.id);
            let planned = state.recommended(nation.id);
            for kind in SlotKind::ALL {
                tallies
                    .get_mut(kind)
                    .add(nation.slots.count(kind) as u32, existing.get(kind), planned.get(kind));
            }
        }
        tallies
    }
}

/// Cross-group activity in this run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossGroupCounts {
    pub linked_group_id: Option<AllianceId>,
    pub cash_recommended: u32,
    pub tech_recommended: u32,
    /// Receive-side tallies of the linked alliance
    pub linked: DirectionalTallies,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCounts {
    pub nations: u32,
    pub internal: DirectionalTallies,
    pub external: SlotTally,
    pub cross_group: CrossGroupCounts,
}

/// Tally the alliance's slots from the final capacity state
pub fn count_slots(
    members: &[CategorizedNation],
    linked: &[CategorizedNation],
    linked_group: Option<AllianceId>,
    state: &CapacityState,
    recommendations: &[Recommendation],
) -> SlotCounts {
    let mut external = SlotTally::default();
    for nation in members {
        external.add(
            nation.slots.external as u32,
            state.existing(nation.id).external,
            state.recommended(nation.id).external,
        );
    }

    let count_tier = |tier: Tier| recommendations.iter().filter(|r| r.tier == tier).count() as u32;

    SlotCounts {
        nations: members.len() as u32,
        internal: DirectionalTallies::tally(members, state),
        external,
        cross_group: CrossGroupCounts {
            linked_group_id: linked_group,
            cash_recommended: count_tier(Tier::CrossGroupCash),
            tech_recommended: count_tier(Tier::CrossGroupTech),
            linked: DirectionalTallies::tally(linked, state),
        },
    }
}
