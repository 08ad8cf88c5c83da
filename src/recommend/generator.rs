use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::capacity::CapacityState;
use crate::categorize::{CategorizedNation, Categorizer};
use crate::core::config::EngineConfig;
use crate::core::types::{AllianceId, Direction, NationId, Resource, SlotKind};
use crate::model::nation::Nation;
use crate::model::offer::Offer;
use crate::recommend::pairing::{GreedyFirstFit, PairRegistry, Pairing, PairingStrategy};
use crate::recommend::recommendation::{
    uses_fallback, NationView, Recommendation, RecommendationKind, Tier,
};
use crate::report::{
    count_slots, detect_mismatches, find_available_slots, AvailableSlots, MismatchReport, SlotCounts,
};

/// Everything one generation run produces for an alliance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub group_id: AllianceId,
    pub linked_group_id: Option<AllianceId>,
    pub recommendations: Vec<Recommendation>,
    pub slot_counts: SlotCounts,
    pub available_slots: AvailableSlots,
    pub mismatched_offers: MismatchReport,
    /// Recoverable conditions met during the run
    pub warnings: Vec<String>,
}

impl GenerationOutput {
    pub fn in_tier(&self, tier: Tier) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(move |r| r.tier == tier)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let count = |tier| self.in_tier(tier).count();
        format!(
            "Alliance {}: {} recommendations ({} re-establish, {} cash, {} cross-group cash, {} tech, {} cross-group tech), {} slot overflows, {} warnings",
            self.group_id,
            self.recommendations.len(),
            count(Tier::Reestablish),
            count(Tier::InternalCash),
            count(Tier::CrossGroupCash),
            count(Tier::InternalTech),
            count(Tier::CrossGroupTech),
            self.mismatched_offers.slot_overflows.len(),
            self.warnings.len(),
        )
    }
}

/// Runs the tiered generation with a pluggable pairing strategy
#[derive(Debug, Clone)]
pub struct RecommendationEngine<'c, S = GreedyFirstFit> {
    config: &'c EngineConfig,
    strategy: S,
}

impl<'c> RecommendationEngine<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self {
            config,
            strategy: GreedyFirstFit,
        }
    }
}

impl<'c, S: PairingStrategy> RecommendationEngine<'c, S> {
    pub fn with_strategy<T: PairingStrategy>(self, strategy: T) -> RecommendationEngine<'c, T> {
        RecommendationEngine {
            config: self.config,
            strategy,
        }
    }

    /// Generate recommendations for `group` from one snapshot
    ///
    /// `nations` may contain other alliances; only members of `group` (and of
    /// `linked_group`, for the cross-group tiers) take part. Never fails: dirty
    /// or missing data shrinks the result instead.
    pub fn generate(
        &self,
        group: AllianceId,
        nations: &[Nation],
        offers: &[Offer],
        linked_group: Option<AllianceId>,
    ) -> GenerationOutput {
        let categorizer = Categorizer::new(self.config);
        let mut warnings = Vec::new();

        let members = categorize_group(&categorizer, nations, group, &mut warnings);
        let (linked_group, linked) = match linked_group {
            Some(linked) if linked == group => {
                record_warning(&mut warnings, format!("Alliance {} is linked to itself; cross-group tiers skipped", group));
                (None, Vec::new())
            }
            Some(linked) => {
                let mut linked_members = categorize_group(&categorizer, nations, linked, &mut warnings);
                let member_ids: AHashSet<NationId> = members.iter().map(|n| n.id).collect();
                linked_members.retain(|n| {
                    let clash = member_ids.contains(&n.id);
                    if clash {
                        record_warning(
                            &mut warnings,
                            format!(
                                "Nation {} is listed in both alliance {} and linked alliance {}; linked record ignored",
                                n.id, group, linked
                            ),
                        );
                    }
                    !clash
                });
                if linked_members.is_empty() {
                    record_warning(
                        &mut warnings,
                        format!("Linked alliance {} has no nations in the snapshot; cross-group tiers skipped", linked),
                    );
                    (None, Vec::new())
                } else {
                    (Some(linked), linked_members)
                }
            }
            None => (None, Vec::new()),
        };

        let mut state = CapacityState::build(&members, offers, group)
            .with_external_fallback(self.config.policy.allow_external_fallback);
        if let Some(linked_id) = linked_group {
            state.merge(CapacityState::build(&linked, offers, linked_id));
        }

        let directory: AHashMap<NationId, &CategorizedNation> =
            members.iter().chain(linked.iter()).map(|n| (n.id, n)).collect();
        let mut pairs = PairRegistry::from_offers(offers);
        let mut recommendations = Vec::new();

        reestablish_expired(group, &members, offers, &mut state, &mut pairs, &mut recommendations);

        for resource in [Resource::Cash, Resource::Tech] {
            let senders = sender_pool(&members, &state, resource);
            let recipients = recipient_pool(&members, &state, resource);
            let pairings = self.strategy.pair(&senders, &recipients, resource, &mut state, &mut pairs);
            emit(Tier::internal(resource), resource, &pairings, &directory, &state, &mut recommendations);

            if linked_group.is_some() {
                // Only senders with capacity left after internal matching
                let senders = sender_pool(&members, &state, resource);
                let recipients = recipient_pool(&linked, &state, resource);
                let pairings = self.strategy.pair(&senders, &recipients, resource, &mut state, &mut pairs);
                emit(Tier::cross_group(resource), resource, &pairings, &directory, &state, &mut recommendations);
            }
        }

        recommendations.sort_by_key(|r| r.tier);

        let slot_counts = count_slots(&members, &linked, linked_group, &state, &recommendations);
        let available_slots = find_available_slots(&members, &state);
        let mismatched_offers = detect_mismatches(&members, offers, group);

        tracing::info!(
            "Alliance {}: {} members, {} recommendations via {}",
            group,
            members.len(),
            recommendations.len(),
            self.strategy.name()
        );

        GenerationOutput {
            group_id: group,
            linked_group_id: linked_group,
            recommendations,
            slot_counts,
            available_slots,
            mismatched_offers,
            warnings,
        }
    }
}

/// Generate with the default greedy strategy
pub fn generate(
    group: AllianceId,
    nations: &[Nation],
    offers: &[Offer],
    linked_group: Option<AllianceId>,
    config: &EngineConfig,
) -> GenerationOutput {
    RecommendationEngine::new(config).generate(group, nations, offers, linked_group)
}

fn record_warning(warnings: &mut Vec<String>, message: String) {
    tracing::warn!("{}", message);
    warnings.push(message);
}

/// Categorize the members of `group` in snapshot order, first record per id
fn categorize_group(
    categorizer: &Categorizer<'_>,
    nations: &[Nation],
    group: AllianceId,
    warnings: &mut Vec<String>,
) -> Vec<CategorizedNation> {
    let mut seen = AHashSet::new();
    let mut members = Vec::new();

    for nation in nations.iter().filter(|n| n.group_id == group) {
        if !seen.insert(nation.id) {
            record_warning(
                warnings,
                format!("Nation {} appears more than once in alliance {}; later records ignored", nation.id, group),
            );
            continue;
        }
        members.push(categorizer.categorize_nation(nation));
    }

    members
}

/// War-mode nations with send slots and room, by send priority
fn sender_pool<'n>(
    nations: &'n [CategorizedNation],
    state: &CapacityState,
    resource: Resource,
) -> Vec<&'n CategorizedNation> {
    let kind = SlotKind::new(resource, Direction::Send);
    let mut pool: Vec<&CategorizedNation> = nations
        .iter()
        .filter(|n| n.in_war_mode && n.slots.count(kind) > 0)
        .filter(|n| state.has_directional_capacity(n.id, resource, Direction::Send))
        .collect();
    pool.sort_by_key(|n| n.slots.send_priority);
    pool
}

/// Nations with receive slots and room, by receive priority; war mode not required
fn recipient_pool<'n>(
    nations: &'n [CategorizedNation],
    state: &CapacityState,
    resource: Resource,
) -> Vec<&'n CategorizedNation> {
    let kind = SlotKind::new(resource, Direction::Receive);
    let mut pool: Vec<&CategorizedNation> = nations
        .iter()
        .filter(|n| n.slots.count(kind) > 0)
        .filter(|n| state.has_directional_capacity(n.id, resource, Direction::Receive))
        .collect();
    pool.sort_by_key(|n| n.slots.receive_priority);
    pool
}

/// Tier 0: bring back expired or cancelled pairings between current members
fn reestablish_expired(
    group: AllianceId,
    members: &[CategorizedNation],
    offers: &[Offer],
    state: &mut CapacityState,
    pairs: &mut PairRegistry,
    recommendations: &mut Vec<Recommendation>,
) {
    let by_id: AHashMap<NationId, &CategorizedNation> = members.iter().map(|n| (n.id, n)).collect();

    let mut expired: Vec<(&Offer, &CategorizedNation, &CategorizedNation, Resource)> = offers
        .iter()
        .filter(|o| o.is_terminal() && o.is_tracked_for(group))
        .filter_map(|o| {
            let resource = o.resource()?;
            let sender = by_id.get(&o.declaring_id)?;
            let recipient = by_id.get(&o.receiving_id)?;
            Some((o, *sender, *recipient, resource))
        })
        .collect();
    expired.sort_by_key(|(_, sender, recipient, _)| (sender.slots.send_priority, recipient.slots.receive_priority));

    for (offer, sender, recipient, resource) in expired {
        if !sender.in_war_mode || !pairs.is_open(sender.id, recipient.id) {
            continue;
        }
        if !state.has_directional_capacity(sender.id, resource, Direction::Send)
            || !state.has_directional_capacity(recipient.id, resource, Direction::Receive)
        {
            continue;
        }

        let sender_slot = state.commit(sender.id, resource, Direction::Send);
        let recipient_slot = state.commit(recipient.id, resource, Direction::Receive);
        let (Some(sender_slot), Some(recipient_slot)) = (sender_slot, recipient_slot) else {
            continue;
        };
        pairs.claim(sender.id, recipient.id);

        let fallback = uses_fallback(sender_slot, recipient_slot);
        let reason = describe(Tier::Reestablish, resource, sender, recipient, Some(offer), fallback);
        tracing::debug!("Tier 0: {} -> {} ({})", sender.id, recipient.id, resource.label());

        recommendations.push(Recommendation {
            tier: Tier::Reestablish,
            kind: RecommendationKind::for_tier(Tier::Reestablish, resource),
            resource,
            sender: NationView::new(sender, state),
            recipient: NationView::new(recipient, state),
            reason,
            previous_offer: Some(offer.clone()),
            uses_external_slot: fallback,
        });
    }
}

fn emit(
    tier: Tier,
    resource: Resource,
    pairings: &[Pairing],
    directory: &AHashMap<NationId, &CategorizedNation>,
    state: &CapacityState,
    recommendations: &mut Vec<Recommendation>,
) {
    for pairing in pairings {
        let (Some(sender), Some(recipient)) = (directory.get(&pairing.sender), directory.get(&pairing.recipient)) else {
            continue;
        };
        let fallback = uses_fallback(pairing.sender_slot, pairing.recipient_slot);
        tracing::debug!("Tier {}: {} -> {} ({})", tier as u8, sender.id, recipient.id, resource.label());

        recommendations.push(Recommendation {
            tier,
            kind: RecommendationKind::for_tier(tier, resource),
            resource,
            sender: NationView::new(sender, state),
            recipient: NationView::new(recipient, state),
            reason: describe(tier, resource, sender, recipient, None, fallback),
            previous_offer: None,
            uses_external_slot: fallback,
        });
    }
}

fn describe(
    tier: Tier,
    resource: Resource,
    sender: &CategorizedNation,
    recipient: &CategorizedNation,
    previous: Option<&Offer>,
    fallback: bool,
) -> String {
    let mut reason = match tier {
        Tier::Reestablish => {
            let since = previous
                .filter(|o| !o.date.trim().is_empty())
                .map(|o| format!(" (last sent {}, {})", o.date.trim(), o.status.trim()))
                .unwrap_or_default();
            format!(
                "Re-establish expired {} aid from {} to {}{}",
                resource.label(),
                sender.name,
                recipient.name,
                since
            )
        }
        Tier::InternalCash | Tier::InternalTech => format!(
            "New {} aid: {} (send priority {}) to {} (receive priority {})",
            resource.label(),
            sender.name,
            sender.slots.send_priority,
            recipient.name,
            recipient.slots.receive_priority
        ),
        Tier::CrossGroupCash | Tier::CrossGroupTech => format!(
            "Cross-group {} aid: {} of alliance {} has send slots left after internal matching; {} of alliance {} needs {}",
            resource.label(),
            sender.name,
            sender.group_id,
            recipient.name,
            recipient.group_id,
            resource.label()
        ),
    };
    if fallback {
        reason.push_str("; uses an external slot");
    }
    reason
}
