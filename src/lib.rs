//! Стол безлимитного техасского холдема: колода и раздача, места,
//! машина состояний торговли, main pot и сайд-поты, жизненный цикл раздачи.
//!
//! Оценка силы рук – внешняя (`eval::HandEvaluator`), RNG передаётся снаружи
//! (`engine::RandomSource`, реализации в `infra`).

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use engine::{Action, EngineError, HoldemTable, RoundLogic};
