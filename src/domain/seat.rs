use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::hand::HoleCards;
use crate::domain::table::{SeatIndex, MAX_SEATS};

/// Состояние места в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeatState {
    /// Место свободно (или стек кончился).
    Empty,
    /// Игрок сидит и участвует в раздаче, ход не его.
    Seated,
    /// Игрок сфолдил и больше не претендует на банки.
    Folded,
    /// Игрок в олл-ине – больше не принимает решений.
    AllIn,
    /// Сейчас ход этого места.
    Acting,
    /// Игрок сидит со стеком, но пропускает раздачу (sit out).
    Out,
}

/// Одно место за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub state: SeatState,
    /// Фишки, ещё не поставленные в банк.
    pub stack: Chips,
    /// Сколько поставлено на текущей улице.
    pub committed_this_street: Chips,
    /// Сколько поставлено за всю раздачу (включая текущую улицу).
    pub committed_total: Chips,
    pub sits_out: bool,
    /// Карманные карты. None, если место не получило карт в этой раздаче.
    pub hole_cards: Option<HoleCards>,
}

impl Default for Seat {
    fn default() -> Self {
        Self::empty()
    }
}

impl Seat {
    pub const fn empty() -> Self {
        Self {
            state: SeatState::Empty,
            stack: Chips::ZERO,
            committed_this_street: Chips::ZERO,
            committed_total: Chips::ZERO,
            sits_out: false,
            hole_cards: None,
        }
    }

    /// Ещё претендует на банк (не сфолдил и участвует в раздаче).
    pub fn is_in_hand(&self) -> bool {
        matches!(
            self.state,
            SeatState::Seated | SeatState::Acting | SeatState::AllIn
        )
    }

    /// Может принимать решения на текущей улице.
    pub fn is_live(&self) -> bool {
        matches!(self.state, SeatState::Seated | SeatState::Acting)
    }

    /// Может быть посажен в новую раздачу.
    pub fn can_start_hand(&self) -> bool {
        self.state != SeatState::Empty && !self.sits_out && !self.stack.is_zero()
    }

    /// Перенести из стека в банк не более `amount`. Возвращает реально внесённое.
    /// Если стек обнулился – место уходит в олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.committed_this_street += paid;
        self.committed_total += paid;
        if self.stack.is_zero() && !paid.is_zero() {
            self.state = SeatState::AllIn;
        }
        paid
    }

    /// Сброс ставок перед новой раздачей. Стек сохраняется.
    pub fn reset_for_new_hand(&mut self) {
        self.committed_this_street = Chips::ZERO;
        self.committed_total = Chips::ZERO;
        self.hole_cards = None;
        self.state = if self.stack.is_zero() {
            SeatState::Empty
        } else if self.sits_out {
            SeatState::Out
        } else {
            SeatState::Seated
        };
    }
}

/// Индекс места за пределами вместимости стола.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Место {0} вне вместимости стола")]
pub struct SeatOutOfRange(pub SeatIndex);

/// Реестр мест: массив фиксированного размера `MAX_SEATS`,
/// используется только префикс длины `capacity`. Индексы стабильны всю раздачу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRegistry {
    seats: [Seat; MAX_SEATS],
    capacity: usize,
}

impl SeatRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            seats: Default::default(),
            capacity: capacity.min(MAX_SEATS),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn check(&self, index: SeatIndex) -> Result<(), SeatOutOfRange> {
        if index < self.capacity {
            Ok(())
        } else {
            Err(SeatOutOfRange(index))
        }
    }

    pub fn get(&self, index: SeatIndex) -> Result<&Seat, SeatOutOfRange> {
        self.check(index)?;
        Ok(&self.seats[index])
    }

    pub fn get_mut(&mut self, index: SeatIndex) -> Result<&mut Seat, SeatOutOfRange> {
        self.check(index)?;
        Ok(&mut self.seats[index])
    }

    /// Места в пределах вместимости.
    pub fn seats(&self) -> &[Seat] {
        &self.seats[..self.capacity]
    }

    pub fn seats_mut(&mut self) -> &mut [Seat] {
        &mut self.seats[..self.capacity]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatIndex, &Seat)> {
        self.seats().iter().enumerate()
    }

    /// Назначить стек: Seated при amount > 0 (Out, если место пропускает раздачи), иначе Empty.
    pub fn set_stack(&mut self, index: SeatIndex, amount: Chips) -> Result<(), SeatOutOfRange> {
        let seat = self.get_mut(index)?;
        seat.stack = amount;
        seat.state = if amount.is_zero() {
            SeatState::Empty
        } else if seat.sits_out {
            SeatState::Out
        } else {
            SeatState::Seated
        };
        Ok(())
    }

    pub fn reset_for_new_hand(&mut self) {
        for seat in self.seats_mut() {
            seat.reset_for_new_hand();
        }
    }

    /// Сколько мест могут начать раздачу (есть фишки, не sit out).
    pub fn active_count(&self) -> usize {
        self.seats().iter().filter(|s| s.can_start_hand()).count()
    }

    /// Сколько мест ещё претендуют на банк.
    pub fn in_hand_count(&self) -> usize {
        self.seats().iter().filter(|s| s.is_in_hand()).count()
    }

    /// Сколько мест ещё принимают решения.
    pub fn live_count(&self) -> usize {
        self.seats().iter().filter(|s| s.is_live()).count()
    }

    pub fn total_stacks(&self) -> Chips {
        self.seats().iter().map(|s| s.stack).sum()
    }

    pub fn total_street_commitments(&self) -> Chips {
        self.seats().iter().map(|s| s.committed_this_street).sum()
    }

    /// Наибольшая ставка на текущей улице среди всех мест.
    pub fn max_street_commitment(&self) -> Chips {
        self.seats()
            .iter()
            .map(|s| s.committed_this_street)
            .max()
            .unwrap_or(Chips::ZERO)
    }
}

impl Index<SeatIndex> for SeatRegistry {
    type Output = Seat;

    fn index(&self, index: SeatIndex) -> &Seat {
        &self.seats()[index]
    }
}

impl IndexMut<SeatIndex> for SeatRegistry {
    fn index_mut(&mut self, index: SeatIndex) -> &mut Seat {
        &mut self.seats_mut()[index]
    }
}
