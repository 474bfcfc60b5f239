//! Collision tests for circular bodies
//!
//! Everything in the duel is a circle, so two tests cover all cases. Both are
//! strict: touching edges do not count as contact.

use glam::Vec2;

use super::state::{Combatant, Spell};
use crate::distance;

/// Check if two circles overlap (distance between centers < sum of radii)
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    distance(pos_a, pos_b) < radius_a + radius_b
}

/// Check if a point lies strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    distance(point, center) < radius
}

/// Whether a spell touches a combatant
pub fn spell_hits(spell: &Spell, combatant: &Combatant) -> bool {
    circles_overlap(spell.pos, spell.radius, combatant.pos, combatant.radius)
}
