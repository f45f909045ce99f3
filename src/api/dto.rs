use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Phase;
use crate::domain::seat::{Seat, SeatState};
use crate::domain::SeatIndex;
use crate::engine::pot::Pot;

/// Снимок одного места. Карманные карты сюда не попадают.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub index: SeatIndex,
    pub state: SeatState,
    pub stack: Chips,
    pub committed_this_street: Chips,
    pub committed_total: Chips,
    pub sits_out: bool,
}

impl SeatView {
    pub fn from_seat(index: SeatIndex, seat: &Seat) -> Self {
        Self {
            index,
            state: seat.state,
            stack: seat.stack,
            committed_this_street: seat.committed_this_street,
            committed_total: seat.committed_total,
            sits_out: seat.sits_out,
        }
    }
}

/// Снимок стола. Вызывающий код его не меняет – это копия.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub phase: Phase,
    pub button: SeatIndex,
    /// Чей сейчас ход (None – улица закрыта или раздача не идёт).
    pub to_act: Option<SeatIndex>,
    pub board: Vec<Card>,
    pub seats: Vec<SeatView>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    /// Собранные банки: первый – main pot.
    pub pots: Vec<Pot>,
}

impl TableView {
    /// Все фишки на столе: стеки + несобранные ставки улицы + банки.
    pub fn total_chips(&self) -> Chips {
        let seats: Chips = self
            .seats
            .iter()
            .map(|s| s.stack + s.committed_this_street)
            .sum();
        let pots: Chips = self.pots.iter().map(|p| p.amount).sum();
        seats + pots
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
