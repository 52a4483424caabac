//! Icon visibility, counting and targeting tests.

use dogma_engine::cards::{Age, Card, CardDatabase, CardId, Color, Icon, IconSlot};
use dogma_engine::core::{EngineConfig, PlayerId, Snapshot};
use dogma_engine::icons::{compare_icons, count_icons, demand_targets, icon_counts, share_targets};
use dogma_engine::ops::Ops;
use dogma_engine::zones::{SplayDirection, Supply};

/// Card `n` sits alone in the age `n` pile, so drawing age `n` yields it.
fn db() -> CardDatabase {
    let full = |id: u32, color| {
        Card::new(CardId::new(id), format!("full {id}"), Age::new(id as u8), color, Icon::Castle)
            .with_icon(IconSlot::Top, Icon::Castle)
            .with_icon(IconSlot::Left, Icon::Crown)
            .with_icon(IconSlot::Middle, Icon::Leaf)
            .with_icon(IconSlot::Right, Icon::Lightbulb)
    };
    let castle = |id: u32, color| {
        Card::new(CardId::new(id), format!("castle {id}"), Age::new(id as u8), color, Icon::Castle)
            .with_icon(IconSlot::Top, Icon::Castle)
    };
    CardDatabase::from_cards([
        full(1, Color::Red),
        full(2, Color::Red),
        castle(3, Color::Blue),
        castle(4, Color::Green),
        castle(5, Color::Yellow),
        castle(6, Color::Purple),
        castle(7, Color::Yellow),
    ])
    .unwrap()
}

fn opening(player_count: usize, db: &CardDatabase) -> Snapshot {
    let supply = Supply::from_piles(db.iter().map(|card| (card.age, vec![card.id])));
    Snapshot::new(player_count, supply)
}

/// Draw and meld the listed cards for `player`.
fn meld(ops: &Ops<'_>, snapshot: &Snapshot, player: PlayerId, cards: &[u32]) -> Snapshot {
    let mut events = snapshot.event_sink();
    let mut current = snapshot.clone();
    for &id in cards {
        current = ops
            .draw_and_meld(&current, player, Age::new(id as u8), 1, &mut events)
            .unwrap()
            .snapshot;
    }
    current
}

fn splay(
    ops: &Ops<'_>,
    snapshot: &Snapshot,
    player: PlayerId,
    direction: SplayDirection,
) -> Snapshot {
    let mut events = snapshot.event_sink();
    ops.splay(snapshot, player, Color::Red, direction, &mut events).unwrap()
}

// =============================================================================
// Visibility
// =============================================================================

#[test]
fn test_visibility_per_splay() {
    let db = db();
    let config = EngineConfig::new(1);
    let ops = Ops::new(&db, &config);
    let p0 = PlayerId::new(0);
    let two = meld(&ops, &opening(1, &db), p0, &[1, 2]);

    let counts = icon_counts(&two, &db, p0).unwrap();
    assert_eq!(counts.get(Icon::Castle), 1);
    assert_eq!(counts.get(Icon::Crown), 0);

    let left = icon_counts(&splay(&ops, &two, p0, SplayDirection::Left), &db, p0).unwrap();
    assert_eq!(
        Icon::ALL.map(|icon| left.get(icon)),
        [2, 2, 0, 0, 0, 0]
    );

    let right = icon_counts(&splay(&ops, &two, p0, SplayDirection::Right), &db, p0).unwrap();
    assert_eq!(
        Icon::ALL.map(|icon| right.get(icon)),
        [2, 2, 2, 0, 0, 0]
    );

    let up = icon_counts(&splay(&ops, &two, p0, SplayDirection::Up), &db, p0).unwrap();
    assert_eq!(
        Icon::ALL.map(|icon| up.get(icon)),
        [2, 2, 2, 2, 0, 0]
    );
}

#[test]
fn test_single_card_shows_top_only() {
    let db = db();
    let config = EngineConfig::new(1);
    let ops = Ops::new(&db, &config);
    let p0 = PlayerId::new(0);
    let one = meld(&ops, &opening(1, &db), p0, &[1]);

    let counts = icon_counts(&one, &db, p0).unwrap();
    assert_eq!(counts.get(Icon::Castle), 1);
    assert_eq!(counts.get(Icon::Lightbulb), 0);
}

#[test]
fn test_hand_and_score_do_not_count() {
    let db = db();
    let config = EngineConfig::new(1);
    let ops = Ops::new(&db, &config);
    let p0 = PlayerId::new(0);
    let start = opening(1, &db);
    let mut events = start.event_sink();

    let s = ops.draw(&start, p0, Age::new(3), &mut events).unwrap().snapshot;
    let s = ops.draw_and_score(&s, p0, Age::new(4), 1, &mut events).unwrap().snapshot;

    assert_eq!(count_icons(&s, &db, p0, Icon::Castle).unwrap(), 0);
}

#[test]
fn test_counts_sum_across_stacks() {
    let db = db();
    let config = EngineConfig::new(1);
    let ops = Ops::new(&db, &config);
    let p0 = PlayerId::new(0);
    let s = meld(&ops, &opening(1, &db), p0, &[3, 4, 5, 6]);

    assert_eq!(count_icons(&s, &db, p0, Icon::Castle).unwrap(), 4);
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn test_compare_ties_and_threshold() {
    let db = db();
    let config = EngineConfig::new(3);
    let ops = Ops::new(&db, &config);
    let s = opening(3, &db);
    let s = meld(&ops, &s, PlayerId::new(0), &[3, 4]);
    let s = meld(&ops, &s, PlayerId::new(1), &[5]);
    let s = meld(&ops, &s, PlayerId::new(2), &[6, 7]);

    let cmp = compare_icons(&s, &db, Icon::Castle, Some(2)).unwrap();

    assert_eq!(cmp.counts[PlayerId::new(0)], 2);
    assert_eq!(cmp.counts[PlayerId::new(1)], 1);
    assert_eq!(cmp.most.as_slice(), &[PlayerId::new(0), PlayerId::new(2)]);
    assert_eq!(cmp.least.as_slice(), &[PlayerId::new(1)]);
    assert_eq!(cmp.at_least.as_slice(), &[PlayerId::new(0), PlayerId::new(2)]);
    assert_eq!(cmp.below.as_slice(), &[PlayerId::new(1)]);
}

#[test]
fn test_compare_all_equal() {
    let db = db();
    let s = opening(3, &db);

    let cmp = compare_icons(&s, &db, Icon::Leaf, None).unwrap();

    assert_eq!(cmp.most.len(), 3);
    assert_eq!(cmp.least.len(), 3);
    assert!(cmp.at_least.is_empty());
    assert!(cmp.below.is_empty());
}

// =============================================================================
// Demand and share targets
// =============================================================================

/// Four players: p2 activates with 2 castles; p3 has 0, p0 has 1, p1 has 3.
fn four_player_table(ops: &Ops<'_>, db: &CardDatabase) -> Snapshot {
    let s = opening(4, db);
    let s = meld(ops, &s, PlayerId::new(2), &[3, 4]);
    let s = meld(ops, &s, PlayerId::new(0), &[5]);
    meld(ops, &s, PlayerId::new(1), &[1, 6, 7])
}

#[test]
fn test_demand_targets_in_turn_order() {
    let db = db();
    let config = EngineConfig::new(4);
    let ops = Ops::new(&db, &config);
    let s = four_player_table(&ops, &db);

    let targets = demand_targets(&s, &db, PlayerId::new(2), Icon::Castle).unwrap();

    assert_eq!(targets.as_slice(), &[PlayerId::new(3), PlayerId::new(0)]);
}

#[test]
fn test_share_targets_include_ties() {
    let db = db();
    let config = EngineConfig::new(4);
    let ops = Ops::new(&db, &config);
    let s = four_player_table(&ops, &db);

    let sharers = share_targets(&s, &db, PlayerId::new(2), Icon::Castle).unwrap();
    assert_eq!(sharers.as_slice(), &[PlayerId::new(1)]);

    // p0 has 1 castle, same as p3 after melding card 2.
    let s = meld(&ops, &s, PlayerId::new(3), &[2]);
    let ones = share_targets(&s, &db, PlayerId::new(0), Icon::Castle).unwrap();
    assert_eq!(ones.as_slice(), &[PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
}

#[test]
fn test_targets_follow_board_changes() {
    let db = db();
    let config = EngineConfig::new(4);
    let ops = Ops::new(&db, &config);
    let s = four_player_table(&ops, &db);

    // p3 catches up to 1 castle: still below p2's 2.
    let s = meld(&ops, &s, PlayerId::new(3), &[2]);
    let targets = demand_targets(&s, &db, PlayerId::new(2), Icon::Castle).unwrap();
    assert_eq!(targets.as_slice(), &[PlayerId::new(3), PlayerId::new(0)]);

    // Nobody has fewer crowns than p3's zero.
    assert!(demand_targets(&s, &db, PlayerId::new(3), Icon::Crown).unwrap().is_empty());
}
