//! Integration tests for the tiered recommendation engine

use std::collections::HashSet;

use alliance_aid::core::config::EngineConfig;
use alliance_aid::core::types::{AllianceId, NationId, PairKey, Resource};
use alliance_aid::model::{Nation, Offer, PersistedSlots};
use alliance_aid::recommend::{generate, RecommendationKind, Tier};

const HOME: AllianceId = AllianceId(1);
const PARTNER: AllianceId = AllianceId(2);

fn sender(id: u64, group: AllianceId, war: bool, send_cash: u8, priority: u8) -> Nation {
    Nation::new(NationId(id), group)
        .with_war_mode(war)
        .with_slots(PersistedSlots {
            send_cash: Some(send_cash),
            send_priority: Some(priority),
            ..Default::default()
        })
}

fn cash_recipient(id: u64, group: AllianceId, get_cash: u8, priority: u8) -> Nation {
    Nation::new(NationId(id), group).with_slots(PersistedSlots {
        get_cash: Some(get_cash),
        receive_priority: Some(priority),
        ..Default::default()
    })
}

fn cash_offer(from: u64, to: u64) -> Offer {
    Offer::new(NationId(from), HOME, NationId(to), HOME).with_money(3_000_000.0)
}

#[test]
fn test_scenario_a_single_new_cash_pairing() {
    let config = EngineConfig::default();
    let nations = vec![sender(1, HOME, true, 2, 1), cash_recipient(2, HOME, 1, 1)];

    let output = generate(HOME, &nations, &[], None, &config);

    assert_eq!(output.recommendations.len(), 1);
    let rec = &output.recommendations[0];
    assert_eq!(rec.tier, Tier::InternalCash);
    assert_eq!(rec.kind, RecommendationKind::NewCash);
    assert_eq!(rec.sender.id, NationId(1));
    assert_eq!(rec.recipient.id, NationId(2));
    assert!(rec.previous_offer.is_none());

    let json = serde_json::to_value(rec).unwrap();
    assert_eq!(json["type"], "new_cash");
    assert_eq!(json["tier"], 1);
}

#[test]
fn test_scenario_b_peace_mode_sender_excluded() {
    let config = EngineConfig::default();
    let nations = vec![sender(1, HOME, false, 2, 1), cash_recipient(2, HOME, 1, 1)];

    let output = generate(HOME, &nations, &[], None, &config);

    assert!(output
        .recommendations
        .iter()
        .all(|r| !(r.is_cash() && r.sender.id == NationId(1))));
    assert!(output.recommendations.is_empty());
}

#[test]
fn test_peace_mode_recipient_still_receives() {
    let config = EngineConfig::default();
    let nations = vec![sender(1, HOME, true, 1, 1), cash_recipient(2, HOME, 1, 1)];
    let output = generate(HOME, &nations, &[], None, &config);
    assert_eq!(output.recommendations.len(), 1);
    assert!(!output.recommendations[0].recipient.in_war_mode);
}

#[test]
fn test_scenario_c_expired_pairing_reestablished_first() {
    let config = EngineConfig::default();
    let nations = vec![
        sender(1, HOME, true, 2, 1),
        cash_recipient(2, HOME, 1, 2),
        cash_recipient(3, HOME, 1, 1),
    ];
    let offers = vec![cash_offer(1, 2).with_status("Expired").with_date("2024-04-11")];

    let output = generate(HOME, &nations, &offers, None, &config);

    let first = &output.recommendations[0];
    assert_eq!(first.tier, Tier::Reestablish);
    assert_eq!(first.kind, RecommendationKind::ReestablishCash);
    assert_eq!((first.sender.id, first.recipient.id), (NationId(1), NationId(2)));
    assert_eq!(first.previous_offer.as_ref(), Some(&offers[0]));

    let repeats = output
        .recommendations
        .iter()
        .filter(|r| PairKey::new(r.sender.id, r.recipient.id) == PairKey::new(NationId(1), NationId(2)))
        .count();
    assert_eq!(repeats, 1);

    // The remaining send slot goes to the other recipient in tier 1
    assert_eq!(output.recommendations.len(), 2);
    assert_eq!(output.recommendations[1].tier, Tier::InternalCash);
    assert_eq!(output.recommendations[1].recipient.id, NationId(3));
}

#[test]
fn test_expired_pair_with_active_offer_not_reestablished() {
    let config = EngineConfig::default();
    let nations = vec![sender(1, HOME, true, 2, 1), cash_recipient(2, HOME, 2, 1)];
    let offers = vec![
        cash_offer(1, 2).with_status("Expired"),
        cash_offer(2, 1).with_status("Accepted"),
    ];
    let output = generate(HOME, &nations, &offers, None, &config);
    assert!(output.recommendations.is_empty());
}

#[test]
fn test_scenario_d_consumed_sender_never_tier_one() {
    let config = EngineConfig::default();
    let nations = vec![
        sender(1, HOME, true, 1, 1),
        cash_recipient(2, HOME, 1, 1),
        cash_recipient(3, HOME, 1, 1),
    ];
    let offers = vec![cash_offer(1, 2).with_status("Accepted")];

    let output = generate(HOME, &nations, &offers, None, &config);

    assert!(output
        .in_tier(Tier::InternalCash)
        .all(|r| r.sender.id != NationId(1)));
    assert!(output.recommendations.is_empty());
}

#[test]
fn test_scenario_e_cross_group_overflow_after_internal() {
    let config = EngineConfig::default().with_link(HOME, PARTNER);
    let nations = vec![
        sender(1, HOME, true, 3, 1),
        sender(2, HOME, true, 1, 2),
        cash_recipient(3, HOME, 1, 1),
        cash_recipient(10, PARTNER, 2, 1),
        cash_recipient(11, PARTNER, 1, 2),
    ];

    let output = generate(HOME, &nations, &[], Some(PARTNER), &config);

    let cross: Vec<_> = output.in_tier(Tier::CrossGroupCash).collect();
    assert!(!cross.is_empty());
    assert!(cross.iter().all(|r| r.recipient.group_id == PARTNER));
    assert!(cross.iter().all(|r| r.kind == RecommendationKind::CrossGroupCash));

    let last_internal = output
        .recommendations
        .iter()
        .rposition(|r| r.tier == Tier::InternalCash)
        .unwrap();
    let first_cross = output
        .recommendations
        .iter()
        .position(|r| r.tier == Tier::CrossGroupCash)
        .unwrap();
    assert!(last_internal < first_cross);

    // Nation 1 takes the only internal recipient, then both partner recipients
    let pairs: Vec<(u64, u64)> = output
        .recommendations
        .iter()
        .map(|r| (r.sender.id.0, r.recipient.id.0))
        .collect();
    assert_eq!(pairs, vec![(1, 3), (1, 10), (1, 11), (2, 10)]);
    assert_eq!(output.slot_counts.cross_group.cash_recommended, 3);
}

#[test]
fn test_cross_group_link_without_partner_nations() {
    let config = EngineConfig::default().with_link(HOME, PARTNER);
    let nations = vec![sender(1, HOME, true, 3, 1), cash_recipient(3, HOME, 1, 1)];
    let output = generate(HOME, &nations, &[], Some(PARTNER), &config);

    assert_eq!(output.in_tier(Tier::CrossGroupCash).count(), 0);
    assert_eq!(output.in_tier(Tier::InternalCash).count(), 1);
    assert_eq!(output.warnings.len(), 1);
}

#[test]
fn test_tech_tiers_follow_cash_tiers() {
    let config = EngineConfig::default();
    let trader = |id: u64, war: bool| {
        Nation::new(NationId(id), HOME).with_war_mode(war).with_slots(PersistedSlots {
            send_cash: Some(1),
            send_tech: Some(1),
            get_cash: Some(1),
            get_tech: Some(1),
            ..Default::default()
        })
    };
    let nations = vec![trader(1, true), trader(2, true), trader(3, true), trader(4, true)];

    let output = generate(HOME, &nations, &[], None, &config);

    let tiers: Vec<Tier> = output.recommendations.iter().map(|r| r.tier).collect();
    assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    assert!(output.in_tier(Tier::InternalCash).count() > 0);
    assert!(output.in_tier(Tier::InternalTech).count() > 0);

    let mut seen = HashSet::new();
    for rec in &output.recommendations {
        assert!(seen.insert(PairKey::new(rec.sender.id, rec.recipient.id)));
    }
}

#[test]
fn test_zero_tech_slots_never_candidates() {
    let config = EngineConfig::default();
    let nations = vec![
        Nation::new(NationId(1), HOME)
            .with_war_mode(true)
            .with_levels(5000.0, 9000.0)
            .with_slots(PersistedSlots {
                send_cash: Some(2),
                ..Default::default()
            }),
        Nation::new(NationId(2), HOME).with_slots(PersistedSlots {
            get_tech: Some(2),
            ..Default::default()
        }),
    ];
    let output = generate(HOME, &nations, &[], None, &config);
    assert!(output.recommendations.is_empty());
    assert_eq!(output.available_slots.send_cash.len(), 1);
    assert_eq!(output.available_slots.get_tech.len(), 1);
}

#[test]
fn test_banded_nations_without_persisted_slots() {
    let config = EngineConfig::default();
    let nations = vec![
        // tech_buyer: sends cash, receives tech
        Nation::new(NationId(1), HOME).with_war_mode(true).with_levels(2000.0, 5000.0),
        // developing: receives cash, sends tech
        Nation::new(NationId(2), HOME).with_war_mode(true).with_levels(20.0, 500.0),
    ];
    let output = generate(HOME, &nations, &[], None, &config);

    let kinds: Vec<(RecommendationKind, u64, u64)> = output
        .recommendations
        .iter()
        .map(|r| (r.kind, r.sender.id.0, r.recipient.id.0))
        .collect();
    // Only one recommendation per pair per run, cash comes first
    assert_eq!(kinds, vec![(RecommendationKind::NewCash, 1, 2)]);
    assert_eq!(output.recommendations[0].resource, Resource::Cash);
}

#[test]
fn test_identical_snapshots_give_identical_output() {
    let config = EngineConfig::default().with_link(HOME, PARTNER);
    let nations = vec![
        sender(1, HOME, true, 3, 2),
        sender(2, HOME, true, 2, 1),
        cash_recipient(3, HOME, 2, 3),
        cash_recipient(4, HOME, 1, 1),
        cash_recipient(10, PARTNER, 3, 1),
    ];
    let offers = vec![cash_offer(2, 3).with_status("Expired"), cash_offer(1, 4)];

    let first = generate(HOME, &nations, &offers, Some(PARTNER), &config);
    let second = generate(HOME, &nations, &offers, Some(PARTNER), &config);
    assert_eq!(first.to_json(), second.to_json());
}

#[test]
fn test_external_fallback_send_is_reported_as_recommended() {
    let config = EngineConfig::default().with_external_fallback(true);
    let nations = vec![
        Nation::new(NationId(1), HOME).with_war_mode(true).with_slots(PersistedSlots {
            send_cash: Some(1),
            get_cash: Some(1),
            external: Some(1),
            ..Default::default()
        }),
        cash_recipient(2, HOME, 1, 1),
        Nation::new(NationId(3), HOME),
        Nation::new(NationId(4), HOME),
    ];
    // Two incoming cash offers fill nation 1's whole tracked budget
    let offers = vec![cash_offer(3, 1), cash_offer(4, 1)];

    let output = generate(HOME, &nations, &offers, None, &config);

    let sent: Vec<_> = output.recommendations.iter().filter(|r| r.sender.id == NationId(1)).collect();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].uses_external_slot);
    assert!(output.available_slots.send_cash.iter().all(|s| s.nation_id != NationId(1)));
    assert_eq!(output.slot_counts.internal.send_cash.recommended, 1);
    assert_eq!(output.slot_counts.external.recommended, 1);
}
