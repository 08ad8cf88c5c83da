use crate::core::error::Result;
use crate::core::types::AllianceId;
use crate::model::nation::Nation;
use crate::model::offer::Offer;

/// Supplies the current nation records of an alliance
pub trait NationSnapshotProvider: Sync {
    fn nations(&self, group: AllianceId) -> Result<Vec<Nation>>;
}

/// Supplies every offer touching at least one of the given alliances
pub trait OfferLedgerProvider: Sync {
    fn offers(&self, groups: &[AllianceId]) -> Result<Vec<Offer>>;
}
