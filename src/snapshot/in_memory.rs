//! In-memory snapshot, loadable from a JSON file

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::AllianceId;
use crate::model::nation::Nation;
use crate::model::offer::Offer;
use crate::snapshot::provider::{NationSnapshotProvider, OfferLedgerProvider};

/// A resolved nation + offer snapshot
///
/// JSON layout: `{ "nations": [...], "offers": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nations: Vec<Nation>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl Snapshot {
    pub fn new(nations: Vec<Nation>, offers: Vec<Offer>) -> Self {
        Self { nations, offers }
    }

    /// Load a snapshot from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Alliances with at least one nation, ascending
    pub fn alliances(&self) -> Vec<AllianceId> {
        let mut alliances: Vec<AllianceId> = self.nations.iter().map(|n| n.group_id).collect();
        alliances.sort();
        alliances.dedup();
        alliances
    }
}

impl NationSnapshotProvider for Snapshot {
    fn nations(&self, group: AllianceId) -> Result<Vec<Nation>> {
        Ok(self
            .nations
            .iter()
            .filter(|n| n.group_id == group)
            .cloned()
            .collect())
    }
}

impl OfferLedgerProvider for Snapshot {
    fn offers(&self, groups: &[AllianceId]) -> Result<Vec<Offer>> {
        Ok(self
            .offers
            .iter()
            .filter(|o| groups.contains(&o.declaring_group_id) || groups.contains(&o.receiving_group_id))
            .cloned()
            .collect())
    }
}
