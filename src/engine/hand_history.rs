use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HoleCards, Street};
use crate::domain::SeatIndex;
use crate::engine::actions::Action;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_number: u64, button: SeatIndex },

    /// Анте и блайнды.
    BlindsPosted {
        small_blind: Option<(SeatIndex, Chips)>,
        big_blind: Option<(SeatIndex, Chips)>,
        antes: Vec<(SeatIndex, Chips)>,
    },

    /// Место получило карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: HoleCards },

    /// Открыты общие карты на борде.
    BoardDealt {
        street: Street,
        burned: Option<Card>,
        cards: Vec<Card>,
    },

    /// Действие места.
    PlayerActed {
        seat: SeatIndex,
        action: Action,
        committed: Chips,
        stack_after: Chips,
    },

    /// Торговля на улице закрыта, ставки собраны в банки.
    StreetClosed { street: Street, pot_total: Chips },

    /// Выплата из банка.
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished { hand_number: u64 },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все действия мест в порядке применения.
    pub fn actions(&self) -> impl Iterator<Item = (SeatIndex, Action)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((seat, action)),
            _ => None,
        })
    }
}
