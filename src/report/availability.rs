//! Idle slot report - configured slots nobody is using or was recommended for

use serde::{Deserialize, Serialize};

use crate::capacity::CapacityState;
use crate::categorize::CategorizedNation;
use crate::core::types::{Direction, NationId, Priority, SlotKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleSlot {
    pub nation_id: NationId,
    pub name: String,
    pub ruler: String,
    pub configured: u8,
    pub priority: Priority,
    pub in_war_mode: bool,
}

/// Fully idle slots, one list per directional slot type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlots {
    pub send_cash: Vec<IdleSlot>,
    pub send_tech: Vec<IdleSlot>,
    pub get_cash: Vec<IdleSlot>,
    pub get_tech: Vec<IdleSlot>,
}

impl AvailableSlots {
    pub fn get(&self, kind: SlotKind) -> &[IdleSlot] {
        match kind {
            SlotKind::SendCash => &self.send_cash,
            SlotKind::SendTech => &self.send_tech,
            SlotKind::GetCash => &self.get_cash,
            SlotKind::GetTech => &self.get_tech,
        }
    }

    fn get_mut(&mut self, kind: SlotKind) -> &mut Vec<IdleSlot> {
        match kind {
            SlotKind::SendCash => &mut self.send_cash,
            SlotKind::SendTech => &mut self.send_tech,
            SlotKind::GetCash => &mut self.get_cash,
            SlotKind::GetTech => &mut self.get_tech,
        }
    }

    pub fn total(&self) -> usize {
        SlotKind::ALL.iter().map(|k| self.get(*k).len()).sum()
    }
}

/// Members with a non-zero allocation of a type, no ledger usage of it and no
/// recommendation for it in this run, in snapshot order
pub fn find_available_slots(members: &[CategorizedNation], state: &CapacityState) -> AvailableSlots {
    let mut report = AvailableSlots::default();

    for nation in members {
        let existing = state.existing(nation.id);
        let planned = state.recommended(nation.id);

        for kind in SlotKind::ALL {
            let configured = nation.slots.count(kind);
            if configured == 0 || existing.get(kind) > 0 || planned.get(kind) > 0 {
                continue;
            }
            let priority = match kind.direction() {
                Direction::Send => nation.slots.send_priority,
                Direction::Receive => nation.slots.receive_priority,
            };
            report.get_mut(kind).push(IdleSlot {
                nation_id: nation.id,
                name: nation.name.clone(),
                ruler: nation.ruler.clone(),
                configured,
                priority,
                in_war_mode: nation.in_war_mode,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::Category;
    use crate::core::types::{AllianceId, Resource};
    use crate::model::offer::Offer;
    use crate::model::slots::SlotAllocation;

    const GROUP: AllianceId = AllianceId(1);

    fn member(id: u64, war: bool, slots: SlotAllocation) -> CategorizedNation {
        CategorizedNation {
            id: NationId(id),
            name: format!("N{}", id),
            ruler: String::new(),
            group_id: GROUP,
            in_war_mode: war,
            has_expanded_capacity: false,
            slot_limit: 5,
            slots,
            category: Category::Persisted,
        }
    }

    #[test]
    fn test_idle_requires_no_existing_and_no_planned_usage() {
        let members = vec![
            member(1, false, SlotAllocation { send_cash: 2, send_tech: 1, ..Default::default() }),
            member(2, false, SlotAllocation { get_cash: 1, get_tech: 1, ..Default::default() }),
        ];
        let offers = vec![Offer::new(NationId(1), GROUP, NationId(2), GROUP).with_technology(5.0)];
        let mut state = CapacityState::build(&members, &offers, GROUP);
        state.commit(NationId(2), Resource::Cash, Direction::Receive);

        let report = find_available_slots(&members, &state);
        assert_eq!(report.send_cash.len(), 1);
        assert_eq!(report.send_cash[0].nation_id, NationId(1));
        assert_eq!(report.send_cash[0].configured, 2);
        assert!(report.send_tech.is_empty());
        assert!(report.get_cash.is_empty());
        assert!(report.get_tech.is_empty());
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_external_fallback_slot_not_idle() {
        let members = vec![member(1, true, SlotAllocation { send_cash: 1, get_cash: 1, external: 1, ..Default::default() })];
        let offers = vec![
            Offer::new(NationId(2), GROUP, NationId(1), GROUP).with_money(1.0),
            Offer::new(NationId(3), GROUP, NationId(1), GROUP).with_money(1.0),
        ];
        let mut state = CapacityState::build(&members, &offers, GROUP).with_external_fallback(true);
        state.commit(NationId(1), Resource::Cash, Direction::Send);

        assert!(find_available_slots(&members, &state).send_cash.is_empty());
    }

    #[test]
    fn test_zero_allocations_never_reported() {
        let members = vec![member(1, true, SlotAllocation::default())];
        let state = CapacityState::build(&members, &[], GROUP);
        assert_eq!(find_available_slots(&members, &state).total(), 0);
    }
}
