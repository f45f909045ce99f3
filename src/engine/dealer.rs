//! Дилер: колода на раздачу, карманные карты по кругу, burn + открытие борда.

use serde::{Deserialize, Serialize};

use crate::domain::{Board, Card, Deck, HoleCards, SeatIndex, SeatRegistry, HOLE_CARDS};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Итог открытия карт борда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reveal {
    /// Сожжённая карта (None – колода была пуста, burn пропущен).
    pub burned: Option<Card>,
    /// Реально открытые карты.
    pub cards: Vec<Card>,
    /// Сколько карт просили открыть.
    pub requested: usize,
}

impl Reveal {
    /// Колода кончилась посреди открытия – признак ошибки размера колоды.
    pub fn is_partial(&self) -> bool {
        self.cards.len() < self.requested
    }
}

/// Полная 52-карточная колода в случайном порядке.
pub fn new_shuffled_deck<R: RandomSource>(rng: &mut R) -> Deck {
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);
    deck
}

/// Раздать по 2 карты местам из `order`: по одной карте каждому за проход.
///
/// Если в колоде меньше `2 × order.len()` карт, сначала берётся свежая колода.
/// Нехватка карт после этого – ошибка конфигурации (`DeckExhausted`).
pub fn deal_hole_cards<R: RandomSource>(
    deck: &mut Deck,
    rng: &mut R,
    seats: &mut SeatRegistry,
    order: &[SeatIndex],
) -> Result<Vec<(SeatIndex, HoleCards)>, EngineError> {
    let required = HOLE_CARDS * order.len();
    if deck.remaining() < required {
        log::warn!(
            "в колоде {} карт, нужно {required} – перемешиваем свежую колоду",
            deck.remaining()
        );
        *deck = new_shuffled_deck(rng);
    }
    if deck.remaining() < required {
        return Err(EngineError::DeckExhausted);
    }

    let mut passes: Vec<Vec<Card>> = vec![Vec::with_capacity(HOLE_CARDS); order.len()];
    for _round in 0..HOLE_CARDS {
        for cards in passes.iter_mut() {
            cards.push(deck.draw()?);
        }
    }

    let mut dealt = Vec::with_capacity(order.len());
    for (&seat, cards) in order.iter().zip(passes) {
        let hole: HoleCards = [cards[0], cards[1]];
        seats[seat].hole_cards = Some(hole);
        dealt.push((seat, hole));
    }

    Ok(dealt)
}

/// Сжечь одну карту и открыть `n` карт борда.
///
/// Burn пропускается только при пустой колоде. Если колода кончилась посреди
/// открытия – останавливаемся и возвращаем частичный результат; уже открытые
/// карты остаются на борде.
pub fn burn_and_reveal(deck: &mut Deck, board: &mut Board, n: usize) -> Reveal {
    let mut reveal = Reveal {
        burned: None,
        cards: Vec::with_capacity(n),
        requested: n,
    };
    if n == 0 {
        return reveal;
    }

    reveal.burned = deck.draw().ok();

    for _ in 0..n {
        if board.is_full() {
            break;
        }
        match deck.draw() {
            Ok(card) => {
                board.push(card);
                reveal.cards.push(card);
            }
            Err(_) => break,
        }
    }

    if reveal.is_partial() {
        log::warn!(
            "частичное открытие борда: {} из {} карт",
            reveal.cards.len(),
            reveal.requested
        );
    }

    reveal
}
