//! Primitive state operations.
//!
//! Each primitive reads a `&Snapshot`, returns a new `Snapshot`, and pushes
//! its events into the caller's `EventSink`. The input snapshot is never
//! touched, so an effect can hold on to any intermediate state it likes.
//!
//! Failures are fatal: a card that is not where the caller says it is, an
//! id the database does not know, or a splay on a short stack means the
//! calling effect is wrong, not that the move should be skipped.

use log::trace;

use crate::cards::{Age, CardDatabase, CardId, Color};
use crate::core::{EngineConfig, EngineError, EventKind, EventSink, GameOutcome, PlayerId, Snapshot};
use crate::zones::{PlayerBoard, SplayDirection, Zone};

/// Result of a draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub snapshot: Snapshot,
    /// The card now in hand, or `None` when the draw ended the game.
    pub card: Option<CardId>,
}

/// Primitive operations bound to the card database and configuration.
///
/// ## Example
///
/// ```
/// use dogma_engine::cards::{Age, Card, CardDatabase, CardId, Color, Icon};
/// use dogma_engine::core::{EngineConfig, PlayerId, Snapshot};
/// use dogma_engine::ops::Ops;
/// use dogma_engine::zones::Supply;
///
/// let db = CardDatabase::from_cards([
///     Card::new(CardId::new(1), "Wheel", Age::new(1), Color::Green, Icon::Castle),
/// ]).unwrap();
/// let config = EngineConfig::new(2);
/// let ops = Ops::new(&db, &config);
///
/// let start = Snapshot::new(2, Supply::from_piles([(Age::new(1), vec![CardId::new(1)])]));
/// let mut events = start.event_sink();
///
/// let drawn = ops.draw(&start, PlayerId::new(0), Age::new(1), &mut events).unwrap();
/// let melded = ops.meld(&drawn.snapshot, PlayerId::new(0), CardId::new(1), &mut events).unwrap();
///
/// let board = melded.board(PlayerId::new(0)).unwrap();
/// assert_eq!(board.stack(Color::Green).unwrap().top(), Some(CardId::new(1)));
/// assert_eq!(events.events().len(), 2);
/// // The opening snapshot is untouched.
/// assert_eq!(start.supply().total(), 1);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ops<'a> {
    db: &'a CardDatabase,
    config: &'a EngineConfig,
}

impl<'a> Ops<'a> {
    /// Bind the primitives to a database and configuration.
    #[must_use]
    pub fn new(db: &'a CardDatabase, config: &'a EngineConfig) -> Self {
        Self { db, config }
    }

    /// The card database.
    #[must_use]
    pub fn db(&self) -> &'a CardDatabase {
        self.db
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Draw the top card of the `age` pile into hand.
    ///
    /// An empty pile falls forward to the lowest non-empty pile above
    /// `age`, then back to the lowest non-empty pile of any age. Requesting
    /// an age above `max_age` ends the game by score instead.
    pub fn draw(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        age: Age,
        events: &mut EventSink,
    ) -> Result<Drawn, EngineError> {
        ensure_live(snapshot)?;
        snapshot.board(player)?;

        if age.value() > self.config.max_age {
            return self.end_by_score(snapshot, player, age, events);
        }

        let actual = snapshot
            .supply()
            .draw_age(age)
            .ok_or(EngineError::SupplyExhausted { requested: age })?;

        let mut next = snapshot.clone();
        let card = next
            .supply_mut()
            .take_top(actual)
            .ok_or(EngineError::SupplyExhausted { requested: age })?;
        next.board_mut(player)?.add_to_hand(card);

        trace!("{player} drew {card} (requested age {age}, drew age {actual})");
        events.emit(EventKind::Drew {
            player,
            card,
            requested_age: age,
            actual_age: actual,
        });

        Ok(Drawn {
            snapshot: next,
            card: Some(card),
        })
    }

    /// Move a card from hand to the top of its color stack.
    pub fn meld(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        card: CardId,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        let color = self.db.get(card)?.color;
        let mut next = take_from_hand(snapshot, player, card)?;
        next.board_mut(player)?.meld_on_top(color, card);

        trace!("{player} melded {card}");
        events.emit(EventKind::Melded { player, card, color });
        Ok(next)
    }

    /// Move a card from hand to the score pile.
    pub fn score(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        card: CardId,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        self.db.get(card)?;
        let mut next = take_from_hand(snapshot, player, card)?;
        next.board_mut(player)?.add_to_score(card);

        trace!("{player} scored {card}");
        events.emit(EventKind::Scored { player, card });
        Ok(next)
    }

    /// Move a card from hand to the bottom of the `color` stack, creating
    /// the stack if needed.
    pub fn tuck(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        card: CardId,
        color: Color,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        self.db.get(card)?;
        let mut next = take_from_hand(snapshot, player, card)?;
        next.board_mut(player)?.tuck_under(color, card);

        trace!("{player} tucked {card} under {color}");
        events.emit(EventKind::Tucked { player, card, color });
        Ok(next)
    }

    /// Set the splay of a stack. Stacks of 0 or 1 cards cannot be splayed.
    pub fn splay(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        color: Color,
        direction: SplayDirection,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        ensure_live(snapshot)?;
        let mut next = snapshot.clone();
        let board = next.board_mut(player)?;
        if !board.set_splay(color, direction) {
            let len = board.stack(color).map_or(0, |stack| stack.len());
            return Err(EngineError::CannotSplay { player, color, len });
        }

        trace!("{player} splayed {color} {direction}");
        events.emit(EventKind::Splayed {
            player,
            color,
            direction,
        });
        Ok(next)
    }

    /// Move a card between zones, possibly between players.
    ///
    /// A board source is searched across every stack, since a tucked card
    /// may sit under another color. A board destination is the top of the
    /// card's own color stack.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &self,
        snapshot: &Snapshot,
        from: PlayerId,
        to: PlayerId,
        card: CardId,
        from_zone: Zone,
        to_zone: Zone,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        ensure_live(snapshot)?;
        let color = self.db.get(card)?.color;
        snapshot.board(to)?;

        let mut next = snapshot.clone();
        let source = next.board_mut(from)?;
        let removed = match from_zone {
            Zone::Hand => source.remove_from_hand(card),
            Zone::Score => source.remove_from_score(card),
            Zone::Board => source
                .stack_of(card)
                .is_some_and(|held| source.remove_from_stack(held, card)),
        };
        if !removed {
            return Err(EngineError::CardNotInZone {
                player: from,
                card,
                zone: from_zone,
            });
        }
        place(next.board_mut(to)?, card, color, to_zone);

        trace!("{card} moved from {from}'s {from_zone} to {to}'s {to_zone}");
        events.emit(EventKind::Transferred {
            from,
            to,
            card,
            from_zone,
            to_zone,
        });
        Ok(next)
    }

    /// Move a card from hand to the bottom of the `age` supply pile.
    pub fn return_card(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        card: CardId,
        age: Age,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        self.db.get(card)?;
        let mut next = take_from_hand(snapshot, player, card)?;
        next.supply_mut().return_to_bottom(age, card);

        trace!("{player} returned {card} to age {age}");
        events.emit(EventKind::Returned { player, card, age });
        Ok(next)
    }

    /// Show a card to everyone. Nothing moves.
    pub fn reveal(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        card: CardId,
        events: &mut EventSink,
    ) -> Result<Snapshot, EngineError> {
        ensure_live(snapshot)?;
        self.db.get(card)?;
        snapshot.board(player)?;

        trace!("{player} revealed {card}");
        events.emit(EventKind::CardRevealed { player, card });
        Ok(snapshot.clone())
    }

    fn end_by_score(
        &self,
        snapshot: &Snapshot,
        trigger: PlayerId,
        requested_age: Age,
        events: &mut EventSink,
    ) -> Result<Drawn, EngineError> {
        let mut best = 0;
        let mut winners = Vec::new();
        for player in snapshot.player_ids() {
            let total = snapshot.score_total(self.db, player)?;
            if total > best || winners.is_empty() {
                best = total;
                winners.clear();
            }
            if total == best {
                winners.push(player);
            }
        }

        let mut next = snapshot.clone();
        next.end_game(GameOutcome {
            winners: winners.clone(),
            trigger,
        });

        trace!("{trigger} drew age {requested_age}: game over, winners {winners:?}");
        events.emit(EventKind::GameEnded {
            trigger,
            requested_age,
            winners,
        });
        Ok(Drawn {
            snapshot: next,
            card: None,
        })
    }
}

fn ensure_live(snapshot: &Snapshot) -> Result<(), EngineError> {
    if snapshot.is_over() {
        return Err(EngineError::GameOver);
    }
    Ok(())
}

fn take_from_hand(
    snapshot: &Snapshot,
    player: PlayerId,
    card: CardId,
) -> Result<Snapshot, EngineError> {
    ensure_live(snapshot)?;
    let mut next = snapshot.clone();
    if !next.board_mut(player)?.remove_from_hand(card) {
        return Err(EngineError::CardNotInZone {
            player,
            card,
            zone: Zone::Hand,
        });
    }
    Ok(next)
}

fn place(board: &mut PlayerBoard, card: CardId, color: Color, zone: Zone) {
    match zone {
        Zone::Hand => board.add_to_hand(card),
        Zone::Score => board.add_to_score(card),
        Zone::Board => board.meld_on_top(color, card),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Icon};
    use crate::zones::Supply;

    fn setup() -> (CardDatabase, EngineConfig, Snapshot) {
        let db = CardDatabase::from_cards((1..=6).map(|i| {
            let color = if i % 2 == 0 { Color::Red } else { Color::Blue };
            Card::new(CardId::new(i), format!("c{i}"), Age::new(1), color, Icon::Leaf)
        }))
        .unwrap();
        let supply = Supply::from_piles([(Age::new(1), (1..=6).map(CardId::new).collect())]);
        (db, EngineConfig::new(2), Snapshot::new(2, supply))
    }

    #[test]
    fn test_draw_takes_top() {
        let (db, config, snapshot) = setup();
        let ops = Ops::new(&db, &config);
        let mut events = snapshot.event_sink();

        let drawn = ops.draw(&snapshot, PlayerId::new(1), Age::new(1), &mut events).unwrap();

        assert_eq!(drawn.card, Some(CardId::new(6)));
        assert!(drawn.snapshot.board(PlayerId::new(1)).unwrap().in_hand(CardId::new(6)));
        assert_eq!(drawn.snapshot.supply().total(), 5);
    }

    #[test]
    fn test_meld_requires_card_in_hand() {
        let (db, config, snapshot) = setup();
        let ops = Ops::new(&db, &config);
        let mut events = snapshot.event_sink();

        let err = ops.meld(&snapshot, PlayerId::new(0), CardId::new(1), &mut events).unwrap_err();

        assert_eq!(
            err,
            EngineError::CardNotInZone {
                player: PlayerId::new(0),
                card: CardId::new(1),
                zone: Zone::Hand,
            }
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_transfer_board_to_score() {
        let (db, config, snapshot) = setup();
        let ops = Ops::new(&db, &config);
        let mut events = snapshot.event_sink();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        let drawn = ops.draw(&snapshot, p0, Age::new(1), &mut events).unwrap();
        let card = drawn.card.unwrap();
        let melded = ops.meld(&drawn.snapshot, p0, card, &mut events).unwrap();
        let moved = ops
            .transfer(&melded, p0, p1, card, Zone::Board, Zone::Score, &mut events)
            .unwrap();

        assert!(moved.board(p0).unwrap().stack(Color::Red).is_none());
        assert!(moved.board(p1).unwrap().in_score(card));
    }

    #[test]
    fn test_return_goes_to_bottom() {
        let (db, config, snapshot) = setup();
        let ops = Ops::new(&db, &config);
        let mut events = snapshot.event_sink();
        let p0 = PlayerId::new(0);

        let drawn = ops.draw(&snapshot, p0, Age::new(1), &mut events).unwrap();
        let returned = ops
            .return_card(&drawn.snapshot, p0, CardId::new(6), Age::new(1), &mut events)
            .unwrap();

        assert_eq!(returned.supply().pile(Age::new(1)).next(), Some(CardId::new(6)));
    }

    #[test]
    fn test_reveal_moves_nothing() {
        let (db, config, snapshot) = setup();
        let ops = Ops::new(&db, &config);
        let mut events = snapshot.event_sink();

        let revealed = ops
            .reveal(&snapshot, PlayerId::new(0), CardId::new(3), &mut events)
            .unwrap();

        assert_eq!(revealed, snapshot);
        assert_eq!(events.events()[0].kind.tag(), "card_revealed");
    }

    #[test]
    fn test_draw_above_max_age_ends_game() {
        let (db, config, snapshot) = setup();
        let ops = Ops::new(&db, &config);
        let mut events = snapshot.event_sink();

        let drawn = ops.draw(&snapshot, PlayerId::new(0), Age::new(11), &mut events).unwrap();

        assert_eq!(drawn.card, None);
        let outcome = drawn.snapshot.outcome().unwrap();
        assert_eq!(outcome.winners, vec![PlayerId::new(0), PlayerId::new(1)]);
        assert_eq!(
            ops.draw(&drawn.snapshot, PlayerId::new(0), Age::new(1), &mut events),
            Err(EngineError::GameOver)
        );
    }
}
