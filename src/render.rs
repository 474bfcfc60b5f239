//! Presentation
//!
//! Paints a duel snapshot onto anything that can clear itself and fill
//! circles. Painting only reads the state.

use glam::Vec2;

use crate::sim::{CombatantId, DuelState};

/// Minimal drawing surface
pub trait Painter {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a circle with a CSS color
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
}

/// Draw combatants, then spells on top, in id order
pub fn paint<P: Painter + ?Sized>(state: &DuelState, painter: &mut P) {
    painter.clear(state.canvas.width, state.canvas.height);

    for combatant in state.combatants.values() {
        painter.fill_circle(combatant.pos, combatant.radius, &combatant.color);
    }

    for spell in state.spells.values() {
        painter.fill_circle(spell.pos, spell.radius, &spell.color);
    }
}

/// HUD score line, e.g. `"3 : 1"`
pub fn scoreboard(state: &DuelState) -> String {
    let score = |id| state.score(id).unwrap_or(0);
    format!("{} : {}", score(CombatantId::One), score(CombatantId::Two))
}
