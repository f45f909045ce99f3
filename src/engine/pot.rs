use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, SeatRegistry};
use crate::engine::side_pots::{compute_side_pots, Contribution};

/// Банк: сумма и места, которые могут его выиграть.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<SeatIndex>,
}

/// Все банки раздачи: первый – main pot, дальше сайд-поты по возрастанию уровня олл-ина.
///
/// Банки строятся из уже собранных фишек (`committed_total` минус ставки текущей улицы),
/// поэтому стеки + ставки улицы + банки всегда равны фишкам на начало раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    pub fn new() -> Self {
        Self { pots: Vec::new() }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn clear(&mut self) {
        self.pots.clear();
    }

    /// Забрать ставки текущей улицы в банки и перестроить структуру банков.
    pub fn collect(&mut self, seats: &mut SeatRegistry) {
        for seat in seats.seats_mut() {
            seat.committed_this_street = Chips::ZERO;
        }
        self.pots = compute_side_pots(&contributions(seats));
    }

    /// Банки, какими они стали бы, если закрыть улицу прямо сейчас. Ничего не меняет.
    pub fn projected(seats: &SeatRegistry) -> Vec<Pot> {
        compute_side_pots(&contributions(seats))
    }
}

fn contributions(seats: &SeatRegistry) -> Vec<Contribution> {
    seats
        .iter()
        .filter(|(_, s)| !s.committed_total.is_zero() || s.is_in_hand())
        .map(|(seat, s)| Contribution {
            seat,
            amount: s.committed_total,
            folded: !s.is_in_hand(),
        })
        .collect()
}
