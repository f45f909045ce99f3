//! Движок стола: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `HoldemTable`
//! Основные операции:
//!   - `reset_round` – запустить новую раздачу
//!   - `apply_action` – применить действие места
//!   - `flop` / `turn` / `river` – открыть борд и начать новую улицу
//!   - `finalize_round` – шоудаун и выплаты

pub mod actions;
pub mod betting;
pub mod dealer;
pub mod errors;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod round;
pub mod side_pots;
pub mod validation;
pub mod variant;

pub use actions::{Action, ActionOutcome};
pub use betting::BettingState;
pub use dealer::Reveal;
pub use errors::{ActionFault, EngineError};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::{Pot, PotManager};
pub use round::{HandResult, HoldemTable, PotAward};
pub use side_pots::{compute_side_pots, Contribution};
pub use validation::RaiseRange;
pub use variant::{BettingRound, RoundLogic, StreetReport, Variant};

/// RNG интерфейс для engine: несмещённое перемешивание (все перестановки равновероятны).
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
