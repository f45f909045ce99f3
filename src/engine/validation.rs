use serde::{Deserialize, Serialize};

use crate::domain::{Chips, LimitType, Seat, SeatIndex, Street};
use crate::engine::actions::Action;
use crate::engine::betting::{BettingState, FIXED_LIMIT_RAISE_CAP};
use crate::engine::errors::ActionFault;

/// Допустимый диапазон итоговой ставки ("raise to") для bet/raise.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaiseRange {
    /// Наименьшая допустимая ставка. Меньше полного рейза только когда это весь стек.
    pub min: Chips,
    /// Наибольшая допустимая ставка (с учётом стека и лимита).
    pub max: Chips,
    /// Ставка, начиная с которой повышение считается полным и переоткрывает торговлю.
    pub full: Chips,
}

/// Что именно делает место, после проверки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wager {
    /// Уравнивание (в том числе олл-ин на меньшую сумму).
    Call,
    /// Полный bet/raise.
    FullRaise,
    /// Олл-ин сверх ставки, но меньше полного рейза.
    ShortAllIn,
}

/// Проверенное действие, готовое к применению.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    Fold,
    Check,
    /// Внести `amount` фишек из стека.
    Put { amount: Chips, wager: Wager },
}

/// Размер одной ставки в лимитном холдеме: малая на префлопе/флопе, большая на тёрне/ривере.
pub fn fixed_limit_unit(street: Street, big_blind: Chips) -> Chips {
    match street {
        Street::PreFlop | Street::Flop => big_blind,
        Street::Turn | Street::River => Chips(big_blind.0.saturating_mul(2)),
    }
}

/// Диапазон bet/raise для места. None – повышать нельзя
/// (не хватает фишек сверх колла, торговля не переоткрыта, исчерпан лимит рейзов).
///
/// `pot_total` – все собранные банки плюс все ставки текущей улицы (нужно для PotLimit).
pub fn legal_raise_range(
    seat_index: SeatIndex,
    seat: &Seat,
    betting: &BettingState,
    limit: LimitType,
    big_blind: Chips,
    pot_total: Chips,
) -> Option<RaiseRange> {
    if !seat.is_live() || !betting.may_raise(seat_index) {
        return None;
    }

    let stack_to = seat.committed_this_street + seat.stack;
    if stack_to <= betting.current_bet {
        return None;
    }

    let full = match limit {
        LimitType::NoLimit | LimitType::PotLimit => betting.current_bet + betting.min_raise,
        LimitType::FixedLimit => {
            if betting.raises >= FIXED_LIMIT_RAISE_CAP {
                return None;
            }
            betting.current_bet + fixed_limit_unit(betting.street, big_blind)
        }
    };

    let cap = match limit {
        LimitType::NoLimit => stack_to,
        LimitType::PotLimit => {
            let to_call = betting.current_bet.saturating_sub(seat.committed_this_street);
            betting.current_bet + pot_total + to_call
        }
        LimitType::FixedLimit => full,
    };

    let min = full.min(stack_to);
    let max = cap.min(stack_to).max(min);

    Some(RaiseRange { min, max, full })
}

/// Проверка, может ли место выполнить это действие при текущем состоянии ставок.
/// Ничего не меняет – возвращает план для применения.
pub fn validate_action(
    seat: &Seat,
    action: &Action,
    betting: &BettingState,
    range: Option<RaiseRange>,
) -> Result<Plan, ActionFault> {
    if !seat.is_live() {
        return Err(ActionFault::SeatNotLive);
    }

    let to_call = diff_to_call(seat, betting);

    match *action {
        Action::Fold => Ok(Plan::Fold),

        Action::Check => {
            if to_call.is_zero() {
                Ok(Plan::Check)
            } else {
                Err(ActionFault::CannotCheck)
            }
        }

        Action::Call => {
            if to_call.is_zero() {
                return Err(ActionFault::NothingToCall);
            }
            Ok(Plan::Put {
                amount: to_call.min(seat.stack),
                wager: Wager::Call,
            })
        }

        Action::Bet(size) => {
            if !betting.current_bet.is_zero() {
                return Err(ActionFault::BetAlreadyOpen);
            }
            sized_wager(seat, size, range, betting)
        }

        Action::Raise(size) => {
            if betting.current_bet.is_zero() {
                return Err(ActionFault::NoBetToRaise);
            }
            sized_wager(seat, size, range, betting)
        }

        Action::AllIn => {
            if seat.stack.is_zero() {
                return Err(ActionFault::NoChips);
            }
            let total = seat.committed_this_street + seat.stack;
            if total <= betting.current_bet {
                return Ok(Plan::Put {
                    amount: seat.stack,
                    wager: Wager::Call,
                });
            }
            let range = range.ok_or_else(|| raise_denied(seat, betting))?;
            if total > range.max {
                return Err(ActionFault::AboveMaximum { max: range.max });
            }
            Ok(Plan::Put {
                amount: seat.stack,
                wager: classify(total, range),
            })
        }
    }
}

/// Bet/Raise c явным размером: размер обязан попасть в диапазон, без подрезки.
fn sized_wager(
    seat: &Seat,
    size: Chips,
    range: Option<RaiseRange>,
    betting: &BettingState,
) -> Result<Plan, ActionFault> {
    let range = range.ok_or_else(|| raise_denied(seat, betting))?;
    if size < range.min {
        return Err(ActionFault::BelowMinimum { min: range.min });
    }
    if size > range.max {
        return Err(ActionFault::AboveMaximum { max: range.max });
    }
    Ok(Plan::Put {
        amount: size - seat.committed_this_street,
        wager: classify(size, range),
    })
}

fn classify(total: Chips, range: RaiseRange) -> Wager {
    if total >= range.full {
        Wager::FullRaise
    } else {
        Wager::ShortAllIn
    }
}

/// Почему диапазона нет.
fn raise_denied(seat: &Seat, betting: &BettingState) -> ActionFault {
    let stack_to = seat.committed_this_street + seat.stack;
    if stack_to <= betting.current_bet {
        ActionFault::AboveMaximum { max: stack_to }
    } else {
        ActionFault::RaiseNotReopened
    }
}

/// Сколько фишек нужно добавить месту, чтобы уравнять текущую ставку.
pub fn diff_to_call(seat: &Seat, betting: &BettingState) -> Chips {
    betting.current_bet.saturating_sub(seat.committed_this_street)
}
