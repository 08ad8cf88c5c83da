//! Nation - a member record delivered by the snapshot provider

use serde::{Deserialize, Serialize};

use crate::core::numeric::deserialize_lenient;
use crate::core::types::{AllianceId, NationId};
use crate::model::slots::PersistedSlots;

/// A nation as seen in one ingestion snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nation {
    pub id: NationId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ruler: String,
    #[serde(alias = "allianceId")]
    pub group_id: AllianceId,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub technology: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub infrastructure: f64,
    #[serde(default)]
    pub in_war_mode: bool,
    /// Raises the total slot ceiling (the DRA flag)
    #[serde(default, alias = "dra")]
    pub has_expanded_capacity: bool,
    /// Operator-persisted slot configuration; overrides the computed band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<PersistedSlots>,
}

impl Nation {
    pub fn new(id: NationId, group_id: AllianceId) -> Self {
        Self {
            id,
            name: format!("Nation {}", id.0),
            ruler: String::new(),
            group_id,
            technology: 0.0,
            infrastructure: 0.0,
            in_war_mode: false,
            has_expanded_capacity: false,
            slots: None,
        }
    }

    pub fn with_name(mut self, name: &str, ruler: &str) -> Self {
        self.name = name.to_string();
        self.ruler = ruler.to_string();
        self
    }

    pub fn with_levels(mut self, technology: f64, infrastructure: f64) -> Self {
        self.technology = technology;
        self.infrastructure = infrastructure;
        self
    }

    pub fn with_war_mode(mut self, in_war_mode: bool) -> Self {
        self.in_war_mode = in_war_mode;
        self
    }

    pub fn with_expanded_capacity(mut self, expanded: bool) -> Self {
        self.has_expanded_capacity = expanded;
        self
    }

    pub fn with_slots(mut self, slots: PersistedSlots) -> Self {
        self.slots = Some(slots);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_feed_record() {
        let json = r#"{
            "id": 1017,
            "name": "Elsmere",
            "ruler": "Bram",
            "allianceId": 4,
            "technology": "1,204.33",
            "infrastructure": 3550,
            "inWarMode": true
        }"#;
        let nation: Nation = serde_json::from_str(json).unwrap();
        assert_eq!(nation.id, NationId(1017));
        assert_eq!(nation.group_id, AllianceId(4));
        assert_eq!(nation.technology, 1204.33);
        assert_eq!(nation.infrastructure, 3550.0);
        assert!(nation.in_war_mode);
        assert!(!nation.has_expanded_capacity);
        assert!(nation.slots.is_none());
    }

    #[test]
    fn test_missing_flags_default_false() {
        let nation: Nation =
            serde_json::from_str(r#"{"id": 2, "groupId": 1, "technology": "??"}"#).unwrap();
        assert!(!nation.in_war_mode);
        assert_eq!(nation.technology, 0.0);
        assert_eq!(nation.infrastructure, 0.0);
    }

    #[test]
    fn test_dra_alias() {
        let nation: Nation =
            serde_json::from_str(r#"{"id": 3, "groupId": 1, "dra": true}"#).unwrap();
        assert!(nation.has_expanded_capacity);
    }
}
