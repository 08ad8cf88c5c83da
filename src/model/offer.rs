//! Offer - one aid transfer recorded in the external ledger

use serde::{Deserialize, Serialize};

use crate::core::numeric::deserialize_lenient;
use crate::core::types::{AllianceId, NationId, PairKey, Resource};

/// Statuses after which an offer no longer occupies a slot
pub const TERMINAL_STATUSES: [&str; 2] = ["Expired", "Cancelled"];

/// An aid offer between two nations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub declaring_id: NationId,
    pub receiving_id: NationId,
    #[serde(alias = "declaringAllianceId")]
    pub declaring_group_id: AllianceId,
    #[serde(alias = "receivingAllianceId")]
    pub receiving_group_id: AllianceId,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub money: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub technology: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub soldiers: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
}

impl Offer {
    pub fn new(
        declaring_id: NationId,
        declaring_group_id: AllianceId,
        receiving_id: NationId,
        receiving_group_id: AllianceId,
    ) -> Self {
        Self {
            declaring_id,
            receiving_id,
            declaring_group_id,
            receiving_group_id,
            money: 0.0,
            technology: 0.0,
            soldiers: 0.0,
            status: "Pending".to_string(),
            date: String::new(),
        }
    }

    pub fn with_money(mut self, money: f64) -> Self {
        self.money = money;
        self
    }

    pub fn with_technology(mut self, technology: f64) -> Self {
        self.technology = technology;
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    /// Pure cash offer: money and no technology
    pub fn is_cash(&self) -> bool {
        self.money > 0.0 && self.technology == 0.0
    }

    /// Any technology makes the offer a tech offer, even with money attached
    pub fn is_tech(&self) -> bool {
        self.technology > 0.0
    }

    /// Resource the offer occupies a slot for; None for soldier-only or empty offers
    pub fn resource(&self) -> Option<Resource> {
        if self.is_tech() {
            Some(Resource::Tech)
        } else if self.is_cash() {
            Some(Resource::Cash)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        let status = self.status.trim();
        TERMINAL_STATUSES
            .iter()
            .any(|terminal| status.eq_ignore_ascii_case(terminal))
    }

    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.declaring_id, self.receiving_id)
    }

    /// Both ends inside `group`
    pub fn is_tracked_for(&self, group: AllianceId) -> bool {
        self.declaring_group_id == group && self.receiving_group_id == group
    }

    /// Exactly one end inside `group`
    pub fn is_external_for(&self, group: AllianceId) -> bool {
        (self.declaring_group_id == group) != (self.receiving_group_id == group)
    }
}
