//! Доменная модель стола: карты, колода, фишки, места, конфиг.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod seat;
pub mod table;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use seat::*;
pub use table::*;
