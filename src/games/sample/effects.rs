//! Sample effect programs.
//!
//! Each function is one dogma effect written against the continuation
//! protocol. Step 0 is always the fresh activation; later steps are
//! resumptions after a choice or a `Continue`.

use super::cards::*;
use crate::cards::{Age, CardDatabase, CardId, Color, Icon};
use crate::choice::{ChoiceAnswer, ChoiceRequest};
use crate::core::{EngineError, EventSink, PlayerId, Snapshot};
use crate::effects::{
    EffectContext, EffectContinuation, EffectDefinition, EffectRegistry, EffectResult,
};
use crate::zones::{SplayDirection, Zone};

type Outcome = Result<EffectResult, EngineError>;

/// Registry for every sample card.
pub fn sample_registry() -> Result<EffectRegistry, EngineError> {
    EffectRegistry::new().with([
        EffectDefinition::demand(ARCHERY, 0, archery),
        EffectDefinition::demand(OARS, 0, oars),
        EffectDefinition::non_demand(WRITING, 0, writing).shared(),
        EffectDefinition::non_demand(CODE_OF_LAWS, 0, code_of_laws).shared(),
        EffectDefinition::non_demand(AGRICULTURE, 0, agriculture).shared(),
        EffectDefinition::non_demand(FORAGING, 0, foraging).shared(),
        EffectDefinition::non_demand(SAILING, 0, sailing).shared(),
        EffectDefinition::non_demand(THE_WHEEL, 0, the_wheel).shared(),
        EffectDefinition::non_demand(PHILOSOPHY, 0, philosophy_splay).shared(),
        EffectDefinition::non_demand(PHILOSOPHY, 1, philosophy_score).shared(),
        EffectDefinition::non_demand(ROAD_BUILDING, 0, road_building),
        EffectDefinition::demand(MAPMAKING, 0, mapmaking),
        EffectDefinition::non_demand(CALENDAR, 0, calendar).shared(),
        EffectDefinition::demand(ENGINEERING, 0, engineering_demand),
        EffectDefinition::non_demand(ENGINEERING, 1, engineering_splay).shared(),
        EffectDefinition::non_demand(TRANSLATION, 0, translation).shared(),
        EffectDefinition::non_demand(OPTICS, 0, optics).shared(),
    ])
}

// =============================================================================
// Helpers
// =============================================================================

/// The single card picked in a 1-card selection.
fn picked(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Result<Option<CardId>, EngineError> {
    let answer = continuation.require_answer(ctx.card(), answer)?;
    Ok(answer.cards().and_then(|cards| cards.first().copied()))
}

/// Like `picked`, for a mandatory selection.
fn picked_required(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Result<CardId, EngineError> {
    picked(ctx, continuation, answer)?.ok_or(EngineError::MissingAnswer {
        card: ctx.card(),
        step: continuation.step(),
    })
}

fn hand(snapshot: &Snapshot, player: PlayerId) -> Result<Vec<CardId>, EngineError> {
    Ok(snapshot.board(player)?.hand().collect())
}

/// Hand cards of the highest age (several on a tie).
fn highest_in_hand(
    db: &CardDatabase,
    snapshot: &Snapshot,
    player: PlayerId,
) -> Result<Vec<CardId>, EngineError> {
    let mut best: Option<Age> = None;
    let mut cards = Vec::new();
    for card in snapshot.board(player)?.hand() {
        let age = db.get(card)?.age;
        match best {
            Some(b) if age < b => {}
            Some(b) if age == b => cards.push(card),
            _ => {
                best = Some(age);
                cards.clear();
                cards.push(card);
            }
        }
    }
    Ok(cards)
}

/// Whether `color` can be splayed `direction` right now.
fn can_splay(
    snapshot: &Snapshot,
    player: PlayerId,
    color: Color,
    direction: SplayDirection,
) -> Result<bool, EngineError> {
    Ok(snapshot
        .board(player)?
        .stack(color)
        .is_some_and(|stack| stack.len() >= 2 && stack.splay() != direction))
}

/// Draw `count` cards of `age`, stopping if the game ends.
fn draw_cards(
    ctx: &EffectContext<'_>,
    snapshot: &Snapshot,
    player: PlayerId,
    age: Age,
    count: usize,
    events: &mut EventSink,
) -> Result<Snapshot, EngineError> {
    let mut current = snapshot.clone();
    for _ in 0..count {
        let drawn = ctx.ops().draw(&current, player, age, events)?;
        current = drawn.snapshot;
        if drawn.card.is_none() {
            break;
        }
    }
    Ok(current)
}

// =============================================================================
// Age 1
// =============================================================================

/// Archery: "I demand you draw a 1, then transfer the highest card in your
/// hand to my hand!"
pub fn archery(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let owed = ctx.demand_targets(Icon::Castle)?.into_vec();
            archery_next(ctx, ctx.snapshot().clone(), events, owed)
        }
        1 => {
            let target = continuation.player("target")?;
            let card = picked_required(ctx, continuation, answer)?;
            let snapshot = ctx.ops().transfer(
                ctx.snapshot(),
                target,
                ctx.activator(),
                card,
                Zone::Hand,
                Zone::Hand,
                &mut events,
            )?;
            let owed = continuation.players("owed")?.to_vec();
            archery_next(ctx, snapshot, events, owed)
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

fn archery_next(
    ctx: &EffectContext<'_>,
    mut snapshot: Snapshot,
    mut events: EventSink,
    mut owed: Vec<PlayerId>,
) -> Outcome {
    while !owed.is_empty() {
        let target = owed.remove(0);
        let drawn = ctx.ops().draw(&snapshot, target, Age::new(1), &mut events)?;
        snapshot = drawn.snapshot;
        if drawn.card.is_none() {
            break;
        }

        let highest = highest_in_hand(ctx.db(), &snapshot, target)?;
        if highest.is_empty() {
            continue;
        }
        let request = ChoiceRequest::select_cards(
            target,
            "Transfer the highest card in your hand",
            target,
            Zone::Hand,
            highest,
            1,
            1,
        );
        let next = EffectContinuation::start().at(1).with("target", target).with("owed", owed);
        return Ok(EffectResult::need_choice(snapshot, events, request, next));
    }
    Ok(EffectResult::complete(snapshot, events))
}

/// Oars: "I demand you transfer a card with a crown from your hand to my
/// score pile! If no cards were transferred due to this demand, draw a 1."
pub fn oars(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let owed = ctx.demand_targets(Icon::Castle)?.into_vec();
            oars_next(ctx, ctx.snapshot().clone(), events, owed, false)
        }
        1 => {
            let target = continuation.player("target")?;
            let card = picked_required(ctx, continuation, answer)?;
            let snapshot = ctx.ops().transfer(
                ctx.snapshot(),
                target,
                ctx.activator(),
                card,
                Zone::Hand,
                Zone::Score,
                &mut events,
            )?;
            let owed = continuation.players("owed")?.to_vec();
            oars_next(ctx, snapshot, events, owed, true)
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

fn oars_next(
    ctx: &EffectContext<'_>,
    snapshot: Snapshot,
    mut events: EventSink,
    mut owed: Vec<PlayerId>,
    transferred: bool,
) -> Outcome {
    while !owed.is_empty() {
        let target = owed.remove(0);
        let mut crowns = Vec::new();
        for card in snapshot.board(target)?.hand() {
            if ctx.db().get(card)?.has_icon(Icon::Crown) {
                crowns.push(card);
            }
        }
        if crowns.is_empty() {
            continue;
        }
        let request = ChoiceRequest::select_cards(
            target,
            "Transfer a card with a crown to the activator's score pile",
            target,
            Zone::Hand,
            crowns,
            1,
            1,
        );
        let next = EffectContinuation::start().at(1).with("target", target).with("owed", owed);
        return Ok(EffectResult::need_choice(snapshot, events, request, next));
    }

    if transferred {
        return Ok(EffectResult::complete(snapshot, events));
    }
    let drawn = ctx.ops().draw(&snapshot, ctx.activator(), Age::new(1), &mut events)?;
    Ok(EffectResult::complete(drawn.snapshot, events))
}

/// Writing: "Draw a 2."
pub fn writing(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let mut events = ctx.event_sink();
    let drawn = ctx.ops().draw(ctx.snapshot(), ctx.player(), Age::new(2), &mut events)?;
    Ok(EffectResult::complete(drawn.snapshot, events))
}

/// Code of Laws: "You may tuck a card from your hand of the same color as
/// any card on your board. If you do, you may splay that color of your
/// cards left."
pub fn code_of_laws(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let board = ctx.snapshot().board(player)?;
            let mut eligible = Vec::new();
            for card in board.hand() {
                if board.stack(ctx.db().get(card)?.color).is_some() {
                    eligible.push(card);
                }
            }
            if eligible.is_empty() {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let request = ChoiceRequest::select_cards(
                player,
                "You may tuck a card matching a color on your board",
                player,
                Zone::Hand,
                eligible,
                0,
                1,
            )
            .optional();
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            let Some(card) = picked(ctx, continuation, answer)? else {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            };
            let color = ctx.db().get(card)?.color;
            let snapshot = ctx.ops().tuck(ctx.snapshot(), player, card, color, &mut events)?;
            if !can_splay(&snapshot, player, color, SplayDirection::Left)? {
                return Ok(EffectResult::complete(snapshot, events));
            }
            let request = ChoiceRequest::yes_no(player, format!("Splay your {color} cards left?"))
                .optional();
            Ok(EffectResult::need_choice(
                snapshot,
                events,
                request,
                continuation.at(2).with("color", color),
            ))
        }
        2 => {
            let color = continuation.color("color")?;
            let yes = continuation.require_answer(ctx.card(), answer)?.yes().unwrap_or(false);
            if !yes {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let snapshot = ctx.ops().splay(
                ctx.snapshot(),
                player,
                color,
                SplayDirection::Left,
                &mut events,
            )?;
            Ok(EffectResult::complete(snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

/// Agriculture: "You may return a card from your hand. If you do, draw and
/// score a card of value one higher than the card you returned."
pub fn agriculture(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let cards = hand(ctx.snapshot(), player)?;
            if cards.is_empty() {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let request = ChoiceRequest::select_cards(
                player,
                "You may return a card",
                player,
                Zone::Hand,
                cards,
                0,
                1,
            )
            .optional();
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            let Some(card) = picked(ctx, continuation, answer)? else {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            };
            let age = ctx.db().get(card)?.age;
            let snapshot = ctx.ops().return_card(ctx.snapshot(), player, card, age, &mut events)?;
            let scored = ctx.ops().draw_and_score(
                &snapshot,
                player,
                Age::new(age.value().saturating_add(1)),
                1,
                &mut events,
            )?;
            Ok(EffectResult::complete(scored.snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

/// Foraging: "Draw and reveal a 1. If it has a leaf, score it and repeat
/// this effect."
pub fn foraging(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let player = ctx.player();
    let mut events = ctx.event_sink();
    let drawn = ctx.ops().draw(ctx.snapshot(), player, Age::new(1), &mut events)?;
    let Some(card) = drawn.card else {
        return Ok(EffectResult::complete(drawn.snapshot, events));
    };
    let snapshot = ctx.ops().reveal(&drawn.snapshot, player, card, &mut events)?;
    if !ctx.db().get(card)?.has_icon(Icon::Leaf) {
        return Ok(EffectResult::complete(snapshot, events));
    }
    let snapshot = ctx.ops().score(&snapshot, player, card, &mut events)?;
    Ok(EffectResult::continue_at(snapshot, events, continuation.at(0)))
}

/// Sailing: "Draw and meld a 1."
pub fn sailing(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let mut events = ctx.event_sink();
    let melded = ctx.ops().draw_and_meld(
        ctx.snapshot(),
        ctx.player(),
        Age::new(1),
        1,
        &mut events,
    )?;
    Ok(EffectResult::complete(melded.snapshot, events))
}

/// The Wheel: "Draw two 1s."
pub fn the_wheel(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let mut events = ctx.event_sink();
    let snapshot = draw_cards(ctx, ctx.snapshot(), ctx.player(), Age::new(1), 2, &mut events)?;
    Ok(EffectResult::complete(snapshot, events))
}

// =============================================================================
// Age 2
// =============================================================================

/// Philosophy, first effect: "You may splay left any one color of your
/// cards."
pub fn philosophy_splay(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let mut available = Vec::new();
            for color in Color::ALL {
                if can_splay(ctx.snapshot(), player, color, SplayDirection::Left)? {
                    available.push(color);
                }
            }
            if available.is_empty() {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let request = ChoiceRequest::select_color(
                player,
                "You may splay a color left",
                available,
            )
            .optional();
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            let Some(color) = continuation.require_answer(ctx.card(), answer)?.color() else {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            };
            let snapshot = ctx.ops().splay(
                ctx.snapshot(),
                player,
                color,
                SplayDirection::Left,
                &mut events,
            )?;
            Ok(EffectResult::complete(snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

/// Philosophy, second effect: "You may score a card from your hand."
pub fn philosophy_score(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let cards = hand(ctx.snapshot(), player)?;
            if cards.is_empty() {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let request = ChoiceRequest::select_cards(
                player,
                "You may score a card",
                player,
                Zone::Hand,
                cards,
                0,
                1,
            )
            .optional();
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            let Some(card) = picked(ctx, continuation, answer)? else {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            };
            let snapshot = ctx.ops().score(ctx.snapshot(), player, card, &mut events)?;
            Ok(EffectResult::complete(snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

/// Road Building: "Meld a card from your hand. Then you may transfer your
/// top red card to another player's board."
pub fn road_building(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let cards = hand(ctx.snapshot(), player)?;
            if cards.is_empty() {
                return road_building_offer(ctx, ctx.snapshot().clone(), events, continuation);
            }
            let request = ChoiceRequest::select_cards(
                player,
                "Meld a card",
                player,
                Zone::Hand,
                cards,
                1,
                1,
            );
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            let card = picked_required(ctx, continuation, answer)?;
            let snapshot = ctx.ops().meld(ctx.snapshot(), player, card, &mut events)?;
            road_building_offer(ctx, snapshot, events, continuation)
        }
        2 => {
            let answered = continuation.require_answer(ctx.card(), answer)?;
            let Some(recipient) = answered.selected_player() else {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            };
            let red = continuation.card("red")?;
            let snapshot = ctx
                .ops()
                .transfer(
                    ctx.snapshot(),
                    player,
                    recipient,
                    red,
                    Zone::Board,
                    Zone::Board,
                    &mut events,
                )?;
            Ok(EffectResult::complete(snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

fn road_building_offer(
    ctx: &EffectContext<'_>,
    snapshot: Snapshot,
    events: EventSink,
    continuation: &EffectContinuation,
) -> Outcome {
    let player = ctx.player();
    let red = snapshot.board(player)?.stack(Color::Red).and_then(|stack| stack.top());
    let others: Vec<PlayerId> = player.others_in_turn_order(snapshot.player_count()).collect();
    let Some(red) = red.filter(|_| !others.is_empty()) else {
        return Ok(EffectResult::complete(snapshot, events));
    };
    let request = ChoiceRequest::select_player(
        player,
        "You may give your top red card to another player",
        others,
    )
    .optional();
    Ok(EffectResult::need_choice(snapshot, events, request, continuation.at(2).with("red", red)))
}

/// Mapmaking: "I demand you transfer a 1 from your score pile to my score
/// pile!"
pub fn mapmaking(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            let owed = ctx.demand_targets(Icon::Crown)?.into_vec();
            mapmaking_next(ctx, ctx.snapshot().clone(), events, owed)
        }
        1 => {
            let target = continuation.player("target")?;
            let card = picked_required(ctx, continuation, answer)?;
            let snapshot = ctx.ops().transfer(
                ctx.snapshot(),
                target,
                ctx.activator(),
                card,
                Zone::Score,
                Zone::Score,
                &mut events,
            )?;
            let owed = continuation.players("owed")?.to_vec();
            mapmaking_next(ctx, snapshot, events, owed)
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

fn mapmaking_next(
    ctx: &EffectContext<'_>,
    snapshot: Snapshot,
    events: EventSink,
    mut owed: Vec<PlayerId>,
) -> Outcome {
    while !owed.is_empty() {
        let target = owed.remove(0);
        let mut ones = Vec::new();
        for card in snapshot.board(target)?.score() {
            if ctx.db().get(card)?.age == Age::new(1) {
                ones.push(card);
            }
        }
        if ones.is_empty() {
            continue;
        }
        let request = ChoiceRequest::select_cards(
            target,
            "Transfer a 1 from your score pile",
            target,
            Zone::Score,
            ones,
            1,
            1,
        );
        let next = EffectContinuation::start().at(1).with("target", target).with("owed", owed);
        return Ok(EffectResult::need_choice(snapshot, events, request, next));
    }
    Ok(EffectResult::complete(snapshot, events))
}

/// Calendar: "If you have more cards in your score pile than in your hand,
/// draw two 3s."
pub fn calendar(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let mut events = ctx.event_sink();
    let board = ctx.snapshot().board(ctx.player())?;
    if board.score_len() <= board.hand_len() {
        return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
    }
    let snapshot = draw_cards(ctx, ctx.snapshot(), ctx.player(), Age::new(3), 2, &mut events)?;
    Ok(EffectResult::complete(snapshot, events))
}

// =============================================================================
// Age 3
// =============================================================================

/// Engineering, demand: "I demand you transfer all top cards with a castle
/// from your board to my score pile!"
pub fn engineering_demand(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let mut events = ctx.event_sink();
    let mut snapshot = ctx.snapshot().clone();
    for target in ctx.demand_targets(Icon::Castle)? {
        let mut castles = Vec::new();
        for card in snapshot.board(target)?.top_cards() {
            if ctx.db().get(card)?.has_icon(Icon::Castle) {
                castles.push(card);
            }
        }
        for card in castles {
            snapshot = ctx
                .ops()
                .transfer(
                    &snapshot,
                    target,
                    ctx.activator(),
                    card,
                    Zone::Board,
                    Zone::Score,
                    &mut events,
                )?;
        }
    }
    Ok(EffectResult::complete(snapshot, events))
}

/// Engineering, second effect: "You may splay your red cards left."
pub fn engineering_splay(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            if !can_splay(ctx.snapshot(), player, Color::Red, SplayDirection::Left)? {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let request = ChoiceRequest::yes_no(player, "Splay your red cards left?").optional();
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            if !continuation.require_answer(ctx.card(), answer)?.yes().unwrap_or(false) {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let snapshot = ctx.ops().splay(
                ctx.snapshot(),
                player,
                Color::Red,
                SplayDirection::Left,
                &mut events,
            )?;
            Ok(EffectResult::complete(snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

/// Translation: "You may meld all the cards in your score pile."
pub fn translation(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    answer: Option<&ChoiceAnswer>,
) -> Outcome {
    let player = ctx.player();
    let mut events = ctx.event_sink();
    match continuation.step() {
        0 => {
            if ctx.snapshot().board(player)?.score_len() == 0 {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let request = ChoiceRequest::yes_no(player, "Meld all the cards in your score pile?")
                .optional();
            Ok(EffectResult::need_choice(
                ctx.snapshot().clone(),
                events,
                request,
                continuation.at(1),
            ))
        }
        1 => {
            if !continuation.require_answer(ctx.card(), answer)?.yes().unwrap_or(false) {
                return Ok(EffectResult::complete(ctx.snapshot().clone(), events));
            }
            let mut snapshot = ctx.snapshot().clone();
            let scored: Vec<CardId> = snapshot.board(player)?.score().collect();
            for card in scored {
                snapshot = ctx
                    .ops()
                    .transfer(
                        &snapshot,
                        player,
                        player,
                        card,
                        Zone::Score,
                        Zone::Board,
                        &mut events,
                    )?;
            }
            Ok(EffectResult::complete(snapshot, events))
        }
        _ => Err(continuation.unknown_step(ctx.card())),
    }
}

/// Optics: "Draw and meld a 3. If it has a crown, draw and score a 4.
/// Otherwise, draw and tuck a 3."
pub fn optics(
    ctx: &EffectContext<'_>,
    continuation: &EffectContinuation,
    _answer: Option<&ChoiceAnswer>,
) -> Outcome {
    if continuation.step() != 0 {
        return Err(continuation.unknown_step(ctx.card()));
    }
    let player = ctx.player();
    let mut events = ctx.event_sink();
    let melded = ctx.ops().draw_and_meld(ctx.snapshot(), player, Age::new(3), 1, &mut events)?;
    let Some(card) = melded.last() else {
        return Ok(EffectResult::complete(melded.snapshot, events));
    };
    let follow = if ctx.db().get(card)?.has_icon(Icon::Crown) {
        ctx.ops().draw_and_score(&melded.snapshot, player, Age::new(4), 1, &mut events)?
    } else {
        ctx.ops().draw_and_tuck(&melded.snapshot, player, Age::new(3), 1, &mut events)?
    };
    Ok(EffectResult::complete(follow.snapshot, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDatabase;
    use crate::games::sample::sample_cards;

    #[test]
    fn test_registry_covers_database() {
        let db = CardDatabase::from_cards(sample_cards()).unwrap();
        let registry = sample_registry().unwrap();

        assert!(registry.validate(&db).is_ok());
        assert_eq!(registry.effects_for(PHILOSOPHY).len(), 2);
    }

    #[test]
    fn test_highest_in_hand_keeps_ties() {
        use crate::core::EngineConfig;
        use crate::ops::Ops;
        use crate::zones::Supply;

        let db = CardDatabase::from_cards(sample_cards()).unwrap();
        let config = EngineConfig::new(2);
        let ops = Ops::new(&db, &config);
        let supply = Supply::from_piles([
            (Age::new(1), vec![ARCHERY, OARS]),
            (Age::new(2), vec![PHILOSOPHY, CALENDAR]),
        ]);
        let snapshot = Snapshot::new(2, supply);
        let p0 = PlayerId::new(0);
        let mut events = snapshot.event_sink();
        let mut current = snapshot;
        for age in [1, 2, 2] {
            current = ops.draw(&current, p0, Age::new(age), &mut events).unwrap().snapshot;
        }

        let mut highest = highest_in_hand(&db, &current, p0).unwrap();
        highest.sort();
        assert_eq!(highest, vec![PHILOSOPHY, CALENDAR]);
    }
}
