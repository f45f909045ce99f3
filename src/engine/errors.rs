use thiserror::Error;

use crate::domain::{Chips, ConfigError, DeckExhausted, Phase, SeatIndex, SeatOutOfRange};

/// Почему конкретное действие недопустимо в текущем состоянии торговли.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ActionFault {
    #[error("check невозможен – есть ставка, которую нужно уравнять")]
    CannotCheck,

    #[error("call невозможен – нечего уравнивать")]
    NothingToCall,

    #[error("bet невозможен – ставка на улице уже открыта")]
    BetAlreadyOpen,

    #[error("raise невозможен – на улице ещё нет ставки")]
    NoBetToRaise,

    #[error("размер меньше минимального ({min})")]
    BelowMinimum { min: Chips },

    #[error("размер больше допустимого ({max})")]
    AboveMaximum { max: Chips },

    #[error("торговля не переоткрыта для этого места – только call или fold")]
    RaiseNotReopened,

    #[error("у места нет фишек")]
    NoChips,

    #[error("место не участвует в торговле")]
    SeatNotLive,
}

/// Ошибки движка стола.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Место {0} вне вместимости стола")]
    SeatOutOfRange(SeatIndex),

    #[error("Сейчас не ход места {0}")]
    NotSeatsTurn(SeatIndex),

    #[error("Недопустимое действие: {0}")]
    IllegalAction(ActionFault),

    #[error("Колода закончилась посреди раздачи")]
    DeckExhausted,

    #[error("Недостаточно мест с фишками для раздачи")]
    InsufficientLiveSeats,

    #[error("Операция недоступна в фазе {actual}, ожидалась {expected}")]
    InvalidPhase { expected: Phase, actual: Phase },

    #[error("Торговля на улице ещё не закончена")]
    BettingNotClosed,

    #[error("Раздача уже идёт")]
    HandInProgress,

    #[error("Некорректный конфиг: {0}")]
    Config(#[from] ConfigError),
}

impl From<DeckExhausted> for EngineError {
    fn from(_: DeckExhausted) -> Self {
        EngineError::DeckExhausted
    }
}

impl From<SeatOutOfRange> for EngineError {
    fn from(err: SeatOutOfRange) -> Self {
        EngineError::SeatOutOfRange(err.0)
    }
}

impl From<ActionFault> for EngineError {
    fn from(fault: ActionFault) -> Self {
        EngineError::IllegalAction(fault)
    }
}
