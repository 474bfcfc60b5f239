//! Events accepted by the transition engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::CombatantId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Move every combatant one step and bounce off the top/bottom edges
    AdvanceMovement { canvas_height: f32 },
    /// Move spells, resolve hits, drop spells that left the canvas
    AdvanceProjectiles,
    /// Cast a spell from `combatant` at time `now` (ms)
    SpawnProjectile { combatant: CombatantId, now: f64 },
    ChangeSpellColor {
        combatant: CombatantId,
        color: String,
    },
    ChangeCastRate { combatant: CombatantId, rate: f32 },
    /// Sets both speed and vertical velocity
    ChangeSpeed { combatant: CombatantId, speed: f32 },
    /// Flip every combatant under the pointer
    CheckPointerCollision { pointer: Vec2 },
    /// Throw the duel away and start over
    Restart {
        canvas_width: f32,
        canvas_height: f32,
    },
    /// Any event kind this version does not recognise
    #[serde(other)]
    Unknown,
}
