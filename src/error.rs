use thiserror::Error;

use crate::sim::CombatantId;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Combatant not found: {0}")]
    CombatantNotFound(CombatantId),

    #[error("Unknown combatant id: {0:?}")]
    UnknownCombatant(String),

    #[error("Malformed spell id: {0:?}")]
    InvalidSpellId(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
