use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = usize;

/// Максимум мест за столом. Массив мест всегда такого размера,
/// реально используемая вместимость – `TableConfig::max_seats`.
pub const MAX_SEATS: usize = 9;

/// Тип лимита торговли.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LimitType {
    #[default]
    NoLimit,
    PotLimit,
    FixedLimit,
}

/// Ошибки конфигурации стола.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_seats = {0}, допустимо от 2 до 9")]
    SeatCount(usize),

    #[error("small_blind = 0")]
    ZeroSmallBlind,

    #[error("big_blind = 0")]
    ZeroBigBlind,

    #[error("small_blind ({small}) > big_blind ({big})")]
    BlindsInverted { small: Chips, big: Chips },

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(String),
}

/// Конфиг стола: сколько мест, блайнды, анте, тип лимита.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Вместимость стола (2–9).
    pub max_seats: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Анте с каждого участника; работает только при `use_antes`.
    pub ante: Chips,
    pub limit_type: LimitType,
    pub use_antes: bool,
    /// Флаг на будущее: страддл пока не постится.
    pub allow_straddle: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: MAX_SEATS,
            small_blind: Chips(50),
            big_blind: Chips(100),
            ante: Chips::ZERO,
            limit_type: LimitType::NoLimit,
            use_antes: false,
            allow_straddle: false,
        }
    }
}

impl TableConfig {
    pub fn new(max_seats: usize, small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            max_seats,
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    pub fn with_ante(mut self, ante: Chips) -> Self {
        self.ante = ante;
        self.use_antes = !ante.is_zero();
        self
    }

    pub fn with_limit(mut self, limit_type: LimitType) -> Self {
        self.limit_type = limit_type;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(ConfigError::SeatCount(self.max_seats));
        }
        if self.small_blind.is_zero() {
            return Err(ConfigError::ZeroSmallBlind);
        }
        if self.big_blind.is_zero() {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::BlindsInverted {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        Ok(())
    }

    /// Разобрать конфиг из JSON (отсутствующие поля берутся из `Default`) и проверить.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Анте, которое реально постится (0, если анте выключены).
    pub fn effective_ante(&self) -> Chips {
        if self.use_antes {
            self.ante
        } else {
            Chips::ZERO
        }
    }
}
