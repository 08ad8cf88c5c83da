//! Slot allocations - how many aid slots of each kind a nation holds

use serde::{Deserialize, Serialize};

use crate::core::numeric::deserialize_lenient_u8;
use crate::core::types::{Priority, SlotKind, LOWEST_PRIORITY};

/// A concrete slot allocation for one nation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAllocation {
    pub send_cash: u8,
    pub send_tech: u8,
    pub get_cash: u8,
    pub get_tech: u8,
    pub send_priority: Priority,
    pub receive_priority: Priority,
    /// Slots reserved for offers with nations outside the alliance
    #[serde(rename = "externalSlots")]
    pub external: u8,
}

impl Default for SlotAllocation {
    fn default() -> Self {
        Self {
            send_cash: 0,
            send_tech: 0,
            get_cash: 0,
            get_tech: 0,
            send_priority: LOWEST_PRIORITY,
            receive_priority: LOWEST_PRIORITY,
            external: 0,
        }
    }
}

impl SlotAllocation {
    pub fn count(&self, kind: SlotKind) -> u8 {
        match kind {
            SlotKind::SendCash => self.send_cash,
            SlotKind::SendTech => self.send_tech,
            SlotKind::GetCash => self.get_cash,
            SlotKind::GetTech => self.get_tech,
        }
    }

    /// Capacity available to tracked (intra-alliance) offers; external excluded
    pub fn total_tracked(&self) -> u32 {
        SlotKind::ALL.iter().map(|k| self.count(*k) as u32).sum()
    }

    /// Every slot the nation holds, external included
    pub fn total(&self) -> u32 {
        self.total_tracked() + self.external as u32
    }
}

/// Slot configuration as persisted by operators; absent fields are unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSlots {
    #[serde(default, deserialize_with = "deserialize_lenient_u8", skip_serializing_if = "Option::is_none")]
    pub send_cash: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_lenient_u8", skip_serializing_if = "Option::is_none")]
    pub send_tech: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_lenient_u8", skip_serializing_if = "Option::is_none")]
    pub get_cash: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_lenient_u8", skip_serializing_if = "Option::is_none")]
    pub get_tech: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_lenient_u8", skip_serializing_if = "Option::is_none")]
    pub send_priority: Option<Priority>,
    #[serde(default, deserialize_with = "deserialize_lenient_u8", skip_serializing_if = "Option::is_none")]
    pub receive_priority: Option<Priority>,
    #[serde(
        default,
        rename = "externalSlots",
        deserialize_with = "deserialize_lenient_u8",
        skip_serializing_if = "Option::is_none"
    )]
    pub external: Option<u8>,
}

impl PersistedSlots {
    /// Merge over a zero-filled allocation: missing counts are 0, missing
    /// priorities are the lowest rank
    pub fn resolve(&self) -> SlotAllocation {
        let base = SlotAllocation::default();
        SlotAllocation {
            send_cash: self.send_cash.unwrap_or(base.send_cash),
            send_tech: self.send_tech.unwrap_or(base.send_tech),
            get_cash: self.get_cash.unwrap_or(base.get_cash),
            get_tech: self.get_tech.unwrap_or(base.get_tech),
            send_priority: clamp_priority(self.send_priority.unwrap_or(base.send_priority)),
            receive_priority: clamp_priority(
                self.receive_priority.unwrap_or(base.receive_priority),
            ),
            external: self.external.unwrap_or(base.external),
        }
    }
}

fn clamp_priority(priority: Priority) -> Priority {
    priority.clamp(crate::core::types::HIGHEST_PRIORITY, LOWEST_PRIORITY)
}
