//! Оценка силы рук – внешняя способность.
//!
//! Движок не сравнивает руки сам: на шоудауне он спрашивает `HandEvaluator`
//! о силе каждой претендующей руки и делит банк между лучшими (ничьи – поровну).

use core::fmt::Debug;

use crate::domain::{Card, HoleCards};

/// Оценщик рук: 2 карманные + до 5 карт борда → сила с полным порядком.
/// Равные значения `Strength` – ничья.
pub trait HandEvaluator {
    type Strength: Ord + Clone + Debug;

    fn rank(&self, hole: &HoleCards, board: &[Card]) -> Self::Strength;
}

impl<E: HandEvaluator + ?Sized> HandEvaluator for &E {
    type Strength = E::Strength;

    fn rank(&self, hole: &HoleCards, board: &[Card]) -> Self::Strength {
        (**self).rank(hole, board)
    }
}
