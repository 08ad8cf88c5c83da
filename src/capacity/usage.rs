use serde::{Deserialize, Serialize};

use crate::core::types::SlotKind;

/// Slot usage for one nation, per directional slot type plus external
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounters {
    pub send_cash: u32,
    pub send_tech: u32,
    pub get_cash: u32,
    pub get_tech: u32,
    pub external: u32,
}

impl UsageCounters {
    pub fn get(&self, kind: SlotKind) -> u32 {
        match kind {
            SlotKind::SendCash => self.send_cash,
            SlotKind::SendTech => self.send_tech,
            SlotKind::GetCash => self.get_cash,
            SlotKind::GetTech => self.get_tech,
        }
    }

    pub fn increment(&mut self, kind: SlotKind) {
        match kind {
            SlotKind::SendCash => self.send_cash += 1,
            SlotKind::SendTech => self.send_tech += 1,
            SlotKind::GetCash => self.get_cash += 1,
            SlotKind::GetTech => self.get_tech += 1,
        }
    }

    /// Usage counted against tracked capacity
    pub fn tracked_total(&self) -> u32 {
        SlotKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    pub fn combined(&self, other: &UsageCounters) -> UsageCounters {
        UsageCounters {
            send_cash: self.send_cash + other.send_cash,
            send_tech: self.send_tech + other.send_tech,
            get_cash: self.get_cash + other.get_cash,
            get_tech: self.get_tech + other.get_tech,
            external: self.external + other.external,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_totals() {
        let mut usage = UsageCounters::default();
        usage.increment(SlotKind::SendCash);
        usage.increment(SlotKind::SendCash);
        usage.increment(SlotKind::GetTech);
        usage.external = 4;

        assert_eq!(usage.get(SlotKind::SendCash), 2);
        assert_eq!(usage.get(SlotKind::GetTech), 1);
        assert_eq!(usage.tracked_total(), 3);
    }

    #[test]
    fn test_combined_adds_fieldwise() {
        let a = UsageCounters { send_cash: 1, external: 1, ..Default::default() };
        let b = UsageCounters { send_cash: 2, get_cash: 1, ..Default::default() };
        let sum = a.combined(&b);
        assert_eq!(sum.send_cash, 3);
        assert_eq!(sum.get_cash, 1);
        assert_eq!(sum.external, 1);
    }
}
