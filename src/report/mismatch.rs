//! Mismatch detection - ledger activity that exceeds the configured slots
//!
//! Manual offers are not blocked by the slot configuration, so the ledger can
//! drift past it. Drift is reported here rather than silently absorbed.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::categorize::CategorizedNation;
use crate::core::types::{AllianceId, Direction, NationId, SlotKind};
use crate::model::offer::Offer;

/// More active tracked offers of a type than configured slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOverflow {
    pub nation_id: NationId,
    pub name: String,
    pub kind: SlotKind,
    pub configured: u8,
    pub actual: u32,
    /// Offers beyond the configured count, most recent last
    pub excess_offers: Vec<Offer>,
}

/// External slots configured while tracked offers overflow tracked capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMisuse {
    pub nation_id: NationId,
    pub name: String,
    pub external_slots: u8,
    pub tracked_capacity: u32,
    pub tracked_offers: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchReport {
    pub slot_overflows: Vec<SlotOverflow>,
    pub external_misuse: Vec<ExternalMisuse>,
}

impl MismatchReport {
    pub fn is_empty(&self) -> bool {
        self.slot_overflows.is_empty() && self.external_misuse.is_empty()
    }
}

/// Compare each member's active tracked offers with its configuration
pub fn detect_mismatches(members: &[CategorizedNation], offers: &[Offer], group: AllianceId) -> MismatchReport {
    let mut by_nation: AHashMap<NationId, Vec<&Offer>> = AHashMap::new();
    for offer in offers
        .iter()
        .filter(|o| o.is_active() && o.is_tracked_for(group) && o.resource().is_some())
    {
        by_nation.entry(offer.declaring_id).or_default().push(offer);
        if offer.receiving_id != offer.declaring_id {
            by_nation.entry(offer.receiving_id).or_default().push(offer);
        }
    }

    let mut report = MismatchReport::default();

    for nation in members {
        let Some(nation_offers) = by_nation.get(&nation.id) else {
            continue;
        };

        for kind in SlotKind::ALL {
            let mut matching: Vec<&Offer> = nation_offers
                .iter()
                .copied()
                .filter(|o| o.resource() == Some(kind.resource()))
                .filter(|o| match kind.direction() {
                    Direction::Send => o.declaring_id == nation.id,
                    Direction::Receive => o.receiving_id == nation.id,
                })
                .collect();

            let configured = nation.slots.count(kind);
            if matching.len() <= configured as usize {
                continue;
            }

            matching.sort_by(|a, b| a.date.cmp(&b.date));
            tracing::debug!(
                "Nation {} has {} active {} offers for {} slots",
                nation.id,
                matching.len(),
                kind.label(),
                configured
            );
            report.slot_overflows.push(SlotOverflow {
                nation_id: nation.id,
                name: nation.name.clone(),
                kind,
                configured,
                actual: matching.len() as u32,
                excess_offers: matching[configured as usize..].iter().map(|o| (*o).clone()).collect(),
            });
        }

        let tracked_offers = nation_offers.len() as u32;
        let tracked_capacity = nation.slots.total_tracked();
        if nation.slots.external > 0 && tracked_offers > tracked_capacity {
            report.external_misuse.push(ExternalMisuse {
                nation_id: nation.id,
                name: nation.name.clone(),
                external_slots: nation.slots.external,
                tracked_capacity,
                tracked_offers,
            });
        }
    }

    report
}
