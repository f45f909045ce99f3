use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};
use crate::engine::pot::Pot;

/// Вклад одного места за раздачу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    pub amount: Chips,
    pub folded: bool,
}

/// Посчитать main pot и сайд-поты из сумм, которые внесли места.
///
/// Уровни – различные вклады несфолдивших мест, по возрастанию.
/// Слой между соседними уровнями наполняют все места (сфолдившие тоже – мёртвыми
/// фишками), претендуют на него только несфолдившие с вкладом не ниже уровня.
/// Мёртвые фишки выше верхнего уровня уходят в последний банк.
///
/// Выход: список банков в порядке "от младших" к "старшим", первый – main pot.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let total: Chips = contributions.iter().map(|c| c.amount).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| !c.folded && !c.amount.is_zero())
        .map(|c| c.amount)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    if levels.is_empty() {
        // Никто из претендентов ничего не внёс – все фишки в один банк.
        let mut eligible: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| !c.folded)
            .map(|c| c.seat)
            .collect();
        eligible.sort_unstable();
        return vec![Pot { amount: total, eligible }];
    }

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;

    for &level in &levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| c.amount.min(level) - c.amount.min(prev_level))
            .sum();

        let mut eligible: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| !c.folded && c.amount >= level)
            .map(|c| c.seat)
            .collect();
        eligible.sort_unstable();

        pots.push(Pot { amount, eligible });
        prev_level = level;
    }

    let dead_above: Chips = contributions
        .iter()
        .map(|c| c.amount.saturating_sub(prev_level))
        .sum();
    if let Some(last) = pots.last_mut() {
        last.amount += dead_above;
    }

    pots
}
