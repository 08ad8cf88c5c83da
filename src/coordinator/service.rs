use rayon::prelude::*;

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::AllianceId;
use crate::recommend::{GenerationOutput, RecommendationEngine};
use crate::snapshot::{NationSnapshotProvider, OfferLedgerProvider};

/// Fetch an alliance's snapshot and generate its recommendations
///
/// Failing to fetch the alliance itself or the offer ledger is returned as an
/// error. Failing to fetch the linked alliance only drops the cross-group
/// tiers and is reported in the output warnings.
pub fn recommend_for_group<P>(provider: &P, config: &EngineConfig, group: AllianceId) -> Result<GenerationOutput>
where
    P: NationSnapshotProvider + OfferLedgerProvider,
{
    let mut nations = provider.nations(group)?;
    let mut warnings = Vec::new();

    let linked_group = match config.linked_group(group) {
        Some(linked) => match provider.nations(linked) {
            Ok(linked_nations) => {
                nations.extend(linked_nations);
                Some(linked)
            }
            Err(err) => {
                let message = format!("Could not load linked alliance {}: {}; cross-group tiers skipped", linked, err);
                tracing::warn!("{}", message);
                warnings.push(message);
                None
            }
        },
        None => None,
    };

    let groups: Vec<AllianceId> = std::iter::once(group).chain(linked_group).collect();
    let offers = provider.offers(&groups)?;

    tracing::debug!(
        "Alliance {}: fetched {} nations and {} offers",
        group,
        nations.len(),
        offers.len()
    );

    let mut output = RecommendationEngine::new(config).generate(group, &nations, &offers, linked_group);
    warnings.append(&mut output.warnings);
    output.warnings = warnings;
    Ok(output)
}

/// Run several alliances in parallel; each run owns its own capacity state
pub fn recommend_for_groups<P>(
    provider: &P,
    config: &EngineConfig,
    groups: &[AllianceId],
) -> Vec<(AllianceId, Result<GenerationOutput>)>
where
    P: NationSnapshotProvider + OfferLedgerProvider,
{
    groups
        .par_iter()
        .map(|group| (*group, recommend_for_group(provider, config, *group)))
        .collect()
}
