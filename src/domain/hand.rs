use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Сколько карманных карт у игрока в холдеме.
pub const HOLE_CARDS: usize = 2;

/// Сколько общих карт максимум на борде.
pub const BOARD_CARDS: usize = 5;

/// Карманные карты одного места. Перезаписываются каждую раздачу.
pub type HoleCards = [Card; HOLE_CARDS];

/// Улица торговли.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Следующая улица (None после ривера).
    pub fn next(self) -> Option<Street> {
        match self {
            Street::PreFlop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Сколько карт открывается на борде при переходе на эту улицу.
    pub fn board_cards(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

/// Фаза жизненного цикла раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    NotStarted,
    PreFlop,
    Flop,
    Turn,
    River,
    Complete,
}

impl Phase {
    /// Улица торговли, если фаза – торговая.
    pub fn street(self) -> Option<Street> {
        match self {
            Phase::PreFlop => Some(Street::PreFlop),
            Phase::Flop => Some(Street::Flop),
            Phase::Turn => Some(Street::Turn),
            Phase::River => Some(Street::River),
            Phase::NotStarted | Phase::Complete => None,
        }
    }
}

impl From<Street> for Phase {
    fn from(street: Street) -> Self {
        match street {
            Street::PreFlop => Phase::PreFlop,
            Street::Flop => Phase::Flop,
            Street::Turn => Phase::Turn,
            Street::River => Phase::River,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::NotStarted => "not-started",
            Phase::PreFlop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Общие карты (0–5). Внутри раздачи только дописываются.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(BOARD_CARDS),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= BOARD_CARDS
    }

    /// Добавить карту. false, если борд уже полный.
    pub fn push(&mut self, card: Card) -> bool {
        if self.is_full() {
            return false;
        }
        self.cards.push(card);
        true
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
