//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (affiliation, health, player/enemy markers)
//! - inert: missing-reference диагностика (поведение выключено навсегда)

pub mod actor;
pub mod inert;

// Re-exports для удобного импорта
pub use actor::*;
pub use inert::*;
