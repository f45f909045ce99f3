//! Внешний read-only снимок стола для рендера и наблюдателей.

pub mod dto;

pub use dto::*;
