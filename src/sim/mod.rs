//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Transitions never mutate their input
//! - Time only enters through event payloads or an injected `TimeSource`
//! - Stable iteration order (ordered maps keyed by id)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod event;
pub mod state;
pub mod transition;

pub use clock::{FrameLoop, ManualClock, StepClock, TimeSource};
pub use collision::{circles_overlap, point_in_circle};
pub use event::Event;
pub use state::{CanvasSize, Combatant, CombatantId, DuelState, Heading, Spell, SpellId};
pub use transition::apply;
