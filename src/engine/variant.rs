use serde::{Deserialize, Serialize};

use crate::domain::{SeatIndex, BOARD_CARDS, HOLE_CARDS};
use crate::engine::dealer::Reveal;
use crate::engine::errors::EngineError;
use crate::engine::round::HandResult;

/// Разновидность игры. Пока только холдем: 2 карманные, 5 общих.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Variant {
    HoldEm,
}

impl Variant {
    pub fn hole_cards(self) -> usize {
        match self {
            Variant::HoldEm => HOLE_CARDS,
        }
    }

    pub fn board_cards(self) -> usize {
        match self {
            Variant::HoldEm => BOARD_CARDS,
        }
    }
}

/// Будет ли на улице торговля.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BettingRound {
    /// Торговля открыта, ход у `first_to_act`.
    Open { first_to_act: SeatIndex },
    /// Решать некому (≤1 живого места) – карты открываются, действия не запрашиваются.
    Skipped,
}

impl BettingRound {
    pub fn is_skipped(&self) -> bool {
        matches!(self, BettingRound::Skipped)
    }
}

/// Итог перехода на новую улицу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreetReport {
    pub betting: BettingRound,
    pub reveal: Reveal,
}

/// Контракт переходов фаз, общий для всех разновидностей стола.
///
/// Порядок вызовов на раздачу:
/// `reset_round → pre_flop → flop → turn → river → finalize_round`,
/// между ними – `apply_action` мест, пока улица не закроется.
pub trait RoundLogic {
    fn variant(&self) -> Variant;

    /// Новая раздача: блайнды/анте, свежая колода, карманные карты.
    fn reset_round(&mut self) -> Result<(), EngineError>;

    fn pre_flop(&mut self) -> Result<BettingRound, EngineError>;

    fn flop(&mut self) -> Result<StreetReport, EngineError>;

    fn turn(&mut self) -> Result<StreetReport, EngineError>;

    fn river(&mut self) -> Result<StreetReport, EngineError>;

    /// Шоудаун и выплаты.
    fn finalize_round(&mut self) -> Result<HandResult, EngineError>;
}
