//! Pair bookkeeping and the matching strategy used inside a tier

use ahash::AHashSet;

use crate::capacity::{CapacityState, Commitment};
use crate::categorize::CategorizedNation;
use crate::core::types::{Direction, NationId, PairKey, Resource};
use crate::model::offer::Offer;

/// Undirected pairs that may not be recommended again in this run
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    active: AHashSet<PairKey>,
    used: AHashSet<PairKey>,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with every pair that already has an active offer
    pub fn from_offers(offers: &[Offer]) -> Self {
        Self {
            active: offers.iter().filter(|o| o.is_active()).map(Offer::pair_key).collect(),
            used: AHashSet::new(),
        }
    }

    pub fn is_active(&self, a: NationId, b: NationId) -> bool {
        self.active.contains(&PairKey::new(a, b))
    }

    pub fn is_used(&self, a: NationId, b: NationId) -> bool {
        self.used.contains(&PairKey::new(a, b))
    }

    /// Distinct nations, no active offer between them, not yet used this run
    pub fn is_open(&self, a: NationId, b: NationId) -> bool {
        a != b && !self.is_active(a, b) && !self.is_used(a, b)
    }

    /// Mark the pair used; false if it already was
    pub fn claim(&mut self, a: NationId, b: NationId) -> bool {
        self.used.insert(PairKey::new(a, b))
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}

/// A pairing committed by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub sender: NationId,
    pub recipient: NationId,
    pub sender_slot: Commitment,
    pub recipient_slot: Commitment,
}

/// Assigns senders to recipients for one resource inside one tier
///
/// Implementations must commit capacity through `state` and claim pairs through
/// `pairs` for every pairing they return, and must only return pairs that were
/// open and had capacity on both sides at the time of commitment.
pub trait PairingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Senders arrive sorted by send priority, recipients by receive priority
    fn pair(
        &self,
        senders: &[&CategorizedNation],
        recipients: &[&CategorizedNation],
        resource: Resource,
        state: &mut CapacityState,
        pairs: &mut PairRegistry,
    ) -> Vec<Pairing>;
}

/// Priority-ordered first-fit over the full sender x recipient scan
///
/// Each sender walks every recipient in order and takes each open pair both
/// sides still have room for, committing immediately, so later senders see
/// what earlier ones consumed. O(senders x recipients), no backtracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyFirstFit;

impl PairingStrategy for GreedyFirstFit {
    fn name(&self) -> &'static str {
        "greedy_first_fit"
    }

    fn pair(
        &self,
        senders: &[&CategorizedNation],
        recipients: &[&CategorizedNation],
        resource: Resource,
        state: &mut CapacityState,
        pairs: &mut PairRegistry,
    ) -> Vec<Pairing> {
        let mut pairings = Vec::new();

        for sender in senders {
            for recipient in recipients {
                if !state.has_directional_capacity(sender.id, resource, Direction::Send) {
                    break;
                }
                if !pairs.is_open(sender.id, recipient.id) {
                    continue;
                }
                if !state.has_directional_capacity(recipient.id, resource, Direction::Receive) {
                    continue;
                }

                // Both sides were checked above and are distinct nations
                let sender_slot = state.commit(sender.id, resource, Direction::Send);
                let recipient_slot = state.commit(recipient.id, resource, Direction::Receive);
                if let (Some(sender_slot), Some(recipient_slot)) = (sender_slot, recipient_slot) {
                    pairs.claim(sender.id, recipient.id);
                    pairings.push(Pairing {
                        sender: sender.id,
                        recipient: recipient.id,
                        sender_slot,
                        recipient_slot,
                    });
                }
            }
        }

        pairings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::Category;
    use crate::core::types::AllianceId;
    use crate::model::slots::SlotAllocation;

    const GROUP: AllianceId = AllianceId(1);

    fn nation(id: u64, slots: SlotAllocation) -> CategorizedNation {
        CategorizedNation {
            id: NationId(id),
            name: format!("N{}", id),
            ruler: String::new(),
            group_id: GROUP,
            in_war_mode: true,
            has_expanded_capacity: false,
            slot_limit: 5,
            slots,
            category: Category::Persisted,
        }
    }

    #[test]
    fn test_registry_blocks_active_and_used_pairs() {
        let offers = vec![Offer::new(NationId(1), GROUP, NationId(2), GROUP).with_money(1.0)];
        let mut registry = PairRegistry::from_offers(&offers);

        assert!(!registry.is_open(NationId(2), NationId(1)));
        assert!(registry.is_open(NationId(1), NationId(3)));
        assert!(registry.claim(NationId(3), NationId(1)));
        assert!(!registry.is_open(NationId(1), NationId(3)));
        assert!(!registry.claim(NationId(1), NationId(3)));
        assert!(!registry.is_open(NationId(4), NationId(4)));
    }

    #[test]
    fn test_expired_offers_do_not_block() {
        let offers = vec![Offer::new(NationId(1), GROUP, NationId(2), GROUP)
            .with_money(1.0)
            .with_status("Expired")];
        let registry = PairRegistry::from_offers(&offers);
        assert!(registry.is_open(NationId(1), NationId(2)));
    }

    #[test]
    fn test_greedy_fills_sender_across_recipients() {
        let nations = vec![
            nation(1, SlotAllocation { send_cash: 2, ..Default::default() }),
            nation(2, SlotAllocation { get_cash: 1, ..Default::default() }),
            nation(3, SlotAllocation { get_cash: 1, ..Default::default() }),
            nation(4, SlotAllocation { get_cash: 1, ..Default::default() }),
        ];
        let mut state = CapacityState::build(&nations, &[], GROUP);
        let mut pairs = PairRegistry::new();
        let senders = vec![&nations[0]];
        let recipients: Vec<&CategorizedNation> = nations[1..].iter().collect();

        let result = GreedyFirstFit.pair(&senders, &recipients, Resource::Cash, &mut state, &mut pairs);

        let targets: Vec<NationId> = result.iter().map(|p| p.recipient).collect();
        assert_eq!(targets, vec![NationId(2), NationId(3)]);
        assert!(result.iter().all(|p| p.sender_slot == Commitment::Tracked));
        assert_eq!(pairs.used_count(), 2);
    }

    #[test]
    fn test_greedy_later_sender_sees_committed_capacity() {
        let nations = vec![
            nation(1, SlotAllocation { send_cash: 1, ..Default::default() }),
            nation(2, SlotAllocation { send_cash: 1, ..Default::default() }),
            nation(3, SlotAllocation { get_cash: 1, ..Default::default() }),
            nation(4, SlotAllocation { get_cash: 1, ..Default::default() }),
        ];
        let mut state = CapacityState::build(&nations, &[], GROUP);
        let mut pairs = PairRegistry::new();
        let senders = vec![&nations[0], &nations[1]];
        let recipients = vec![&nations[2], &nations[3]];

        let result = GreedyFirstFit.pair(&senders, &recipients, Resource::Cash, &mut state, &mut pairs);

        assert_eq!(result.len(), 2);
        assert_eq!((result[0].sender, result[0].recipient), (NationId(1), NationId(3)));
        assert_eq!((result[1].sender, result[1].recipient), (NationId(2), NationId(4)));
    }
}
