//! Duel state and core simulation types
//!
//! The aggregate is a plain value: transitions clone it and hand back a new
//! one, so any two snapshots can be compared with `==`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{DuelError, Result};
use crate::tuning::Tuning;

/// One of the two fixed sides of the duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CombatantId {
    /// Left side, casts rightward
    #[serde(rename = "1")]
    One,
    /// Right side, casts leftward
    #[serde(rename = "2")]
    Two,
}

impl CombatantId {
    pub const ALL: [CombatantId; 2] = [CombatantId::One, CombatantId::Two];

    /// Position in per-side tuning arrays
    pub fn index(self) -> usize {
        match self {
            CombatantId::One => 0,
            CombatantId::Two => 1,
        }
    }

    /// Sign of the horizontal spell velocity, fixed by side
    pub fn cast_direction(self) -> f32 {
        match self {
            CombatantId::One => 1.0,
            CombatantId::Two => -1.0,
        }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatantId::One => f.write_str("1"),
            CombatantId::Two => f.write_str("2"),
        }
    }
}

impl FromStr for CombatantId {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(CombatantId::One),
            "2" => Ok(CombatantId::Two),
            other => Err(DuelError::UnknownCombatant(other.to_string())),
        }
    }
}

/// Vertical heading of a combatant (canvas y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Down,
    Up,
}

impl Heading {
    /// +1 for down, -1 for up
    pub fn sign(self) -> f32 {
        match self {
            Heading::Down => 1.0,
            Heading::Up => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Heading::Down => Heading::Up,
            Heading::Up => Heading::Down,
        }
    }
}

/// A wizard on one side of the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity magnitude, kept equal to `speed`
    pub velocity: f32,
    pub heading: Heading,
    pub speed: f32,
    pub score: u32,
    /// Body color
    pub color: String,
    /// Color given to spells cast from now on
    pub spell_color: String,
    /// Casts per base interval
    pub cast_rate: f32,
}

impl Combatant {
    fn spawn(id: CombatantId, canvas: CanvasSize, radius: f32, tuning: &Tuning) -> Self {
        let heading = match id {
            CombatantId::One => Heading::Down,
            CombatantId::Two => Heading::Up,
        };
        Self {
            pos: Vec2::new(
                canvas.width * tuning.spawn_x_ratios[id.index()],
                canvas.height / 2.0,
            ),
            radius,
            velocity: tuning.start_speed,
            heading,
            speed: tuning.start_speed,
            score: 0,
            color: tuning.colors[id.index()].clone(),
            spell_color: tuning.spell_color.clone(),
            cast_rate: tuning.start_cast_rate,
        }
    }
}

/// Identifier of a spell: caster plus that caster's running cast count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SpellId {
    pub owner: CombatantId,
    pub seq: u64,
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.owner, self.seq)
    }
}

impl From<SpellId> for String {
    fn from(id: SpellId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SpellId {
    type Error = DuelError;

    fn try_from(s: String) -> Result<Self> {
        let (owner, seq) = s
            .split_once('-')
            .ok_or_else(|| DuelError::InvalidSpellId(s.clone()))?;
        let seq = seq
            .parse()
            .map_err(|_| DuelError::InvalidSpellId(s.clone()))?;
        Ok(Self {
            owner: owner.parse()?,
            seq,
        })
    }
}

/// A spell in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: String,
    pub owner: CombatantId,
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

/// Complete duel state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelState {
    /// Both combatants, keyed by side
    pub combatants: BTreeMap<CombatantId, Combatant>,
    /// Spells in flight (ordered by id for stable iteration)
    pub spells: BTreeMap<SpellId, Spell>,
    /// Timestamp (ms) of each combatant's latest cast
    pub last_cast: BTreeMap<CombatantId, f64>,
    pub canvas: CanvasSize,
    /// Radius every combatant was created with
    pub combatant_radius: f32,
    /// Milliseconds between casts at cast rate 1
    pub base_interval: f64,
    /// Balance values this duel was built from
    pub tuning: Tuning,
    /// Casts issued so far per combatant
    #[serde(default)]
    spell_seq: BTreeMap<CombatantId, u64>,
}

impl DuelState {
    /// Create a fresh duel with default tuning
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self::with_tuning(canvas_width, canvas_height, Tuning::default())
    }

    /// Create a fresh duel from explicit tuning
    pub fn with_tuning(canvas_width: f32, canvas_height: f32, tuning: Tuning) -> Self {
        let canvas = CanvasSize {
            width: canvas_width,
            height: canvas_height,
        };
        let radius = tuning.combatant_radius(canvas_height);

        let combatants = CombatantId::ALL
            .iter()
            .map(|&id| (id, Combatant::spawn(id, canvas, radius, &tuning)))
            .collect();

        Self {
            combatants,
            spells: BTreeMap::new(),
            last_cast: CombatantId::ALL.iter().map(|&id| (id, 0.0)).collect(),
            canvas,
            combatant_radius: radius,
            base_interval: tuning.base_interval_ms,
            tuning,
            spell_seq: BTreeMap::new(),
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Result<&Combatant> {
        self.combatants
            .get(&id)
            .ok_or(DuelError::CombatantNotFound(id))
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.combatants
            .get_mut(&id)
            .ok_or(DuelError::CombatantNotFound(id))
    }

    pub fn score(&self, id: CombatantId) -> Result<u32> {
        Ok(self.combatant(id)?.score)
    }

    /// Milliseconds that must pass between two casts of this combatant
    pub fn cast_interval(&self, id: CombatantId) -> Result<f64> {
        Ok(self.base_interval / f64::from(self.combatant(id)?.cast_rate))
    }

    /// Whether `id` should cast at time `now` (strictly past its interval)
    pub fn cast_due(&self, id: CombatantId, now: f64) -> Result<bool> {
        let interval = self.cast_interval(id)?;
        let last = self.last_cast.get(&id).copied().unwrap_or(0.0);
        Ok(now - last > interval)
    }

    /// Allocate the next spell id for `owner`
    pub(crate) fn next_spell_id(&mut self, owner: CombatantId) -> SpellId {
        let seq = self.spell_seq.entry(owner).or_insert(0);
        *seq += 1;
        SpellId { owner, seq: *seq }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_initial_layout_800x600() {
        let state = DuelState::new(800.0, 600.0);
        assert_eq!(state.combatants.len(), 2);

        let one = state.combatant(CombatantId::One).unwrap();
        assert!(approx(one.pos.x, 80.0) && approx(one.pos.y, 300.0));
        assert!(approx(one.radius, 30.0));
        assert_eq!(one.heading, Heading::Down);
        assert_eq!(one.score, 0);
        assert_eq!(one.color, "blue");

        let two = state.combatant(CombatantId::Two).unwrap();
        assert!(approx(two.pos.x, 720.0) && approx(two.pos.y, 300.0));
        assert!(approx(two.radius, 30.0));
        assert_eq!(two.heading, Heading::Up);
        assert_eq!(two.color, "green");

        assert!(state.spells.is_empty());
        assert_eq!(state.last_cast[&CombatantId::One], 0.0);
        assert_eq!(state.base_interval, 2500.0);
    }

    #[test]
    fn test_constructor_is_deterministic() {
        assert_eq!(DuelState::new(640.0, 480.0), DuelState::new(640.0, 480.0));
    }

    #[test]
    fn test_spell_ids_never_repeat() {
        let mut state = DuelState::new(800.0, 600.0);
        let a = state.next_spell_id(CombatantId::One);
        let b = state.next_spell_id(CombatantId::One);
        let c = state.next_spell_id(CombatantId::Two);
        assert_ne!(a, b);
        assert_eq!(c.seq, 1);
        assert_eq!(b.to_string(), "1-2");
    }

    #[test]
    fn test_combatant_id_parse() {
        assert_eq!("2".parse::<CombatantId>().unwrap(), CombatantId::Two);
        assert!(matches!(
            "3".parse::<CombatantId>(),
            Err(DuelError::UnknownCombatant(_))
        ));
    }

    #[test]
    fn test_spell_id_parse() {
        let id = SpellId::try_from("2-14".to_string()).unwrap();
        assert_eq!(id.owner, CombatantId::Two);
        assert_eq!(id.seq, 14);
        assert!(matches!(
            SpellId::try_from("2-x".to_string()),
            Err(DuelError::InvalidSpellId(_))
        ));
        assert!(matches!(
            SpellId::try_from("7-1".to_string()),
            Err(DuelError::UnknownCombatant(_))
        ));
    }

    #[test]
    fn test_missing_combatant_is_an_error() {
        let mut state = DuelState::new(800.0, 600.0);
        state.combatants.remove(&CombatantId::Two);
        assert!(matches!(
            state.combatant(CombatantId::Two),
            Err(DuelError::CombatantNotFound(CombatantId::Two))
        ));
    }

    #[test]
    fn test_cast_due_is_strict() {
        let state = DuelState::new(800.0, 600.0);
        // 2500 / 2 = 1250 ms
        assert!(!state.cast_due(CombatantId::One, 1250.0).unwrap());
        assert!(state.cast_due(CombatantId::One, 1250.5).unwrap());
    }

    #[test]
    fn test_snapshot_json_keeps_spell_keys() {
        let mut state = DuelState::new(800.0, 600.0);
        let id = state.next_spell_id(CombatantId::Two);
        state.spells.insert(
            id,
            Spell {
                pos: Vec2::new(10.0, 20.0),
                vel: Vec2::new(-5.0, 0.0),
                radius: 3.0,
                color: "#ff0000".to_string(),
                owner: CombatantId::Two,
            },
        );
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"2-1\""));
        let back: DuelState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
