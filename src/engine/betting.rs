use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, SeatRegistry, Street};
use crate::engine::positions::seats_in_order_from;

/// Максимум ставок/рейзов на улице в лимитном холдеме (bet + 3 raise).
pub const FIXED_LIMIT_RAISE_CAP: u32 = 4;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (bet/raise/all-in сверх ставки).
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие на этой улице.
    /// Первый элемент – место, чей сейчас ход.
    pub to_act: Vec<SeatIndex>,
    /// Места, действовавшие после последнего полного рейза.
    /// Неполный олл-ин торговлю для них не переоткрывает.
    pub acted_since_full_raise: Vec<SeatIndex>,
    /// Сколько ставок/рейзов уже сделано на улице.
    pub raises: u32,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
            to_act,
            acted_since_full_raise: Vec::new(),
            raises: 0,
        }
    }

    /// Чей сейчас ход.
    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Может ли место повышать (торговля для него открыта).
    pub fn may_raise(&self, seat: SeatIndex) -> bool {
        !self.acted_since_full_raise.contains(&seat)
    }

    /// Место сделало пассивное действие (fold/check/call).
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        if !self.acted_since_full_raise.contains(&seat) {
            self.acted_since_full_raise.push(seat);
        }
    }

    /// Полный bet/raise: новая ставка, новый min_raise, торговля переоткрыта для всех.
    pub fn on_full_raise(
        &mut self,
        seat: SeatIndex,
        new_bet: Chips,
        raise_size: Chips,
        new_to_act: Vec<SeatIndex>,
    ) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
        self.acted_since_full_raise = vec![seat];
        self.raises += 1;
    }

    /// Олл-ин меньше полного рейза: ставка растёт, min_raise прежний,
    /// уже действовавшие места могут только уравнять или сфолдить.
    /// Если до этого ставки не было – это открытие торговли, она открыта для всех.
    pub fn on_short_all_in(&mut self, seat: SeatIndex, new_bet: Chips, new_to_act: Vec<SeatIndex>) {
        let opening = self.current_bet.is_zero();
        self.current_bet = new_bet;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
        if opening {
            self.acted_since_full_raise = vec![seat];
            self.raises += 1;
        } else if !self.acted_since_full_raise.contains(&seat) {
            self.acted_since_full_raise.push(seat);
        }
    }

    /// Закрыть улицу досрочно (остался один претендент или решать больше некому).
    pub fn close(&mut self) {
        self.to_act.clear();
    }

    /// Раунд ставок завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}

/// Очередь после агрессии: все, кто ещё принимает решения, начиная со следующего за агрессором.
pub fn betting_order_after(seats: &SeatRegistry, aggressor: SeatIndex) -> Vec<SeatIndex> {
    seats_in_order_from(seats, aggressor + 1, |s| s.is_live())
        .into_iter()
        .filter(|&s| s != aggressor)
        .collect()
}

/// Очередь на новую улицу, начиная с `first` (включительно).
/// Если решать некому – очередь пустая.
pub fn opening_order(seats: &SeatRegistry, first: SeatIndex) -> Vec<SeatIndex> {
    if !decisions_remaining(seats) {
        return Vec::new();
    }
    seats_in_order_from(seats, first, |s| s.is_live())
}

/// Остались ли на улице решения.
///
/// Нет, если претендент на банк один, либо живых мест нет, либо живое место
/// одно и оно уже поставило не меньше любого другого претендента.
pub fn decisions_remaining(seats: &SeatRegistry) -> bool {
    if seats.in_hand_count() <= 1 {
        return false;
    }
    let live: Vec<SeatIndex> = seats
        .iter()
        .filter(|(_, s)| s.is_live())
        .map(|(i, _)| i)
        .collect();
    match live.as_slice() {
        [] => false,
        [only] => {
            let facing = seats
                .iter()
                .filter(|(i, s)| i != only && s.is_in_hand())
                .map(|(_, s)| s.committed_this_street)
                .max()
                .unwrap_or(Chips::ZERO);
            seats[*only].committed_this_street < facing
        }
        _ => true,
    }
}
