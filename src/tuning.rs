//! Data-driven game balance
//!
//! Every number the simulation starts from lives here so that a settings file
//! can override it without touching the rules.

use serde::{Deserialize, Serialize};

/// Gameplay tuning shared by the state constructor and the transition engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Combatant radius as a fraction of canvas height.
    pub combatant_radius_ratio: f32,

    /// Spell radius as a fraction of the combatant radius.
    pub spell_radius_ratio: f32,

    /// Horizontal spell speed in pixels per frame.
    pub spell_speed: f32,

    /// Milliseconds between casts at cast rate 1.
    pub base_interval_ms: f64,

    /// Starting movement speed (pixels per frame).
    pub start_speed: f32,

    /// Starting cast rate (casts per base interval).
    pub start_cast_rate: f32,

    /// Spell color both combatants start with.
    pub spell_color: String,

    /// Body colors for combatant 1 and 2.
    pub colors: [String; 2],

    /// Spawn x as a fraction of canvas width for combatant 1 and 2.
    pub spawn_x_ratios: [f32; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combatant_radius_ratio: 0.05,
            spell_radius_ratio: 0.35,
            spell_speed: 5.0,
            base_interval_ms: 2500.0,
            start_speed: 2.0,
            start_cast_rate: 2.0,
            spell_color: "#111111".to_string(),
            colors: ["blue".to_string(), "green".to_string()],
            spawn_x_ratios: [0.1, 0.9],
        }
    }
}

impl Tuning {
    /// Combatant radius for a canvas of the given height
    pub fn combatant_radius(&self, canvas_height: f32) -> f32 {
        canvas_height * self.combatant_radius_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "spell_speed": 7.5 }"#).unwrap();
        assert_eq!(tuning.spell_speed, 7.5);
        assert_eq!(tuning.base_interval_ms, 2500.0);
        assert_eq!(tuning.colors[1], "green");
    }

    #[test]
    fn test_combatant_radius() {
        let tuning = Tuning::default();
        assert!((tuning.combatant_radius(600.0) - 30.0).abs() < 1e-4);
    }
}
