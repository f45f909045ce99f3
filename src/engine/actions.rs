use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Действие места. Размер у Bet/Raise – итоговая ставка места на улице ("raise to").
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки.
    Bet(Chips),
    /// Raise существующей ставки до указанной суммы.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

/// Что произошло после применения действия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Сколько фишек место реально внесло этим действием.
    pub committed: Chips,
    /// Следующее место на очереди (None, если улица закрыта).
    pub next_to_act: Option<usize>,
    /// Улица закрыта – движок ждёт перехода фазы.
    pub street_closed: bool,
    /// Остался ровно один претендент – раздачу можно завершать.
    pub hand_decided: bool,
}
