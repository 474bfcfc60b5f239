//! Frame clock
//!
//! Owns the live duel and runs one tick per display refresh. Events raised by
//! the UI are queued and applied between ticks, so a tick always sees a
//! consistent state and runs its steps in a fixed order:
//! movement, spells, pointer, casts.

use std::cell::Cell;
use std::collections::VecDeque;

use glam::Vec2;
use log::info;

use super::event::Event;
use super::state::{CombatantId, DuelState};
use super::transition::apply;
use crate::error::Result;

/// Source of the current time in milliseconds
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Clock that moves forward a fixed step every time it is read
#[derive(Debug)]
pub struct StepClock {
    next: Cell<f64>,
    step_ms: f64,
}

impl StepClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            next: Cell::new(step_ms),
            step_ms,
        }
    }
}

impl TimeSource for StepClock {
    fn now_ms(&self) -> f64 {
        let now = self.next.get();
        self.next.set(now + self.step_ms);
        now
    }
}

/// Drives the duel: one queue for UI events, one tick per frame
pub struct FrameLoop<C: TimeSource> {
    state: DuelState,
    clock: C,
    pending: VecDeque<Event>,
    pointer: Option<Vec2>,
    running: bool,
    frames: u64,
}

impl<C: TimeSource> FrameLoop<C> {
    pub fn new(state: DuelState, clock: C) -> Self {
        Self {
            state,
            clock,
            pending: VecDeque::new(),
            pointer: None,
            running: true,
            frames: 0,
        }
    }

    /// Current snapshot (read-only)
    pub fn state(&self) -> &DuelState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Ticks completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queue an event for the start of the next tick
    pub fn submit(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Events waiting for the next tick
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Replace the latest pointer sample (`None` = not seen yet)
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Stop ticking; later calls to `tick` do nothing
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.pending.clear();
            info!("Frame loop stopped after {} frames", self.frames);
        }
    }

    /// Run one frame. Returns `Ok(false)` once the loop has been stopped.
    ///
    /// Queued events are applied first, one by one. The frame itself is built
    /// on a copy and only committed when every step succeeded, so a failing
    /// frame leaves the previous state in place.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }

        while let Some(event) = self.pending.pop_front() {
            self.state = apply(&self.state, &event)?;
        }

        let now = self.clock.now_ms();
        let height = self.state.canvas.height;

        let mut next = apply(
            &self.state,
            &Event::AdvanceMovement {
                canvas_height: height,
            },
        )?;
        next = apply(&next, &Event::AdvanceProjectiles)?;
        if let Some(pointer) = self.pointer {
            next = apply(&next, &Event::CheckPointerCollision { pointer })?;
        }
        for combatant in CombatantId::ALL {
            if next.cast_due(combatant, now)? {
                next = apply(&next, &Event::SpawnProjectile { combatant, now })?;
            }
        }

        self.state = next;
        self.frames += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DuelError;
    use crate::sim::state::{Heading, Spell};

    fn duel() -> FrameLoop<ManualClock> {
        FrameLoop::new(DuelState::new(800.0, 600.0), ManualClock::new(0.0))
    }

    #[test]
    fn test_tick_moves_combatants() {
        let mut game = duel();
        assert!(game.tick().unwrap());
        let state = game.state();
        assert_eq!(state.combatant(CombatantId::One).unwrap().pos.y, 302.0);
        assert_eq!(state.combatant(CombatantId::Two).unwrap().pos.y, 298.0);
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn test_cast_cadence() {
        let mut game = duel();
        // Interval is 2500 / 2 = 1250 ms, counted from t=0
        game.clock().set(1250.0);
        game.tick().unwrap();
        assert!(game.state().spells.is_empty());

        game.clock().set(1251.0);
        game.tick().unwrap();
        assert_eq!(game.state().spells.len(), 2);
        assert_eq!(game.state().last_cast[&CombatantId::One], 1251.0);

        game.clock().advance(1000.0);
        game.tick().unwrap();
        assert_eq!(game.state().spells.len(), 2);

        game.clock().advance(300.0);
        game.tick().unwrap();
        assert_eq!(game.state().spells.len(), 4);
    }

    #[test]
    fn test_new_spells_do_not_move_on_their_cast_frame() {
        let mut game = duel();
        game.clock().set(2000.0);
        game.tick().unwrap();
        let one = game.state().combatant(CombatantId::One).unwrap().pos;
        let spell = game
            .state()
            .spells
            .values()
            .find(|s| s.owner == CombatantId::One)
            .unwrap();
        assert_eq!(spell.pos, one);
    }

    #[test]
    fn test_queued_events_apply_before_the_frame() {
        let mut game = duel();
        game.submit(Event::ChangeSpeed {
            combatant: CombatantId::One,
            speed: 9.0,
        });
        game.submit(Event::ChangeCastRate {
            combatant: CombatantId::One,
            rate: 10.0,
        });
        assert_eq!(game.pending(), 2);
        // 300 ms > 2500 / 10
        game.clock().set(300.0);
        game.tick().unwrap();

        assert_eq!(game.pending(), 0);
        let state = game.state();
        assert_eq!(state.combatant(CombatantId::One).unwrap().pos.y, 309.0);
        assert_eq!(state.spells.len(), 1);
    }

    #[test]
    fn test_pointer_skipped_when_unknown() {
        let mut game = duel();
        game.tick().unwrap();
        assert_eq!(
            game.state().combatant(CombatantId::One).unwrap().heading,
            Heading::Down
        );

        game.set_pointer(Some(Vec2::new(80.0, 304.0)));
        game.tick().unwrap();
        assert_eq!(
            game.state().combatant(CombatantId::One).unwrap().heading,
            Heading::Up
        );

        game.set_pointer(None);
        game.tick().unwrap();
        assert_eq!(
            game.state().combatant(CombatantId::One).unwrap().heading,
            Heading::Up
        );
    }

    #[test]
    fn test_pointer_checked_against_moved_position() {
        // One moves 300 -> 302 before the pointer is checked (radius 30)
        let mut game = duel();
        game.set_pointer(Some(Vec2::new(80.0, 331.0)));
        game.tick().unwrap();
        assert_eq!(
            game.state().combatant(CombatantId::One).unwrap().heading,
            Heading::Up
        );

        let mut game = duel();
        game.set_pointer(Some(Vec2::new(80.0, 271.0)));
        game.tick().unwrap();
        assert_eq!(
            game.state().combatant(CombatantId::One).unwrap().heading,
            Heading::Down
        );
    }

    #[test]
    fn test_spells_checked_against_moved_combatants() {
        // Two moves 300 -> 298; the spell only reaches it after that move
        let mut state = DuelState::new(800.0, 600.0);
        let id = state.next_spell_id(CombatantId::One);
        state.spells.insert(
            id,
            Spell {
                pos: Vec2::new(720.0, 258.0),
                vel: Vec2::ZERO,
                radius: 10.5,
                color: "#111111".to_string(),
                owner: CombatantId::One,
            },
        );
        let mut game = FrameLoop::new(state, ManualClock::new(0.0));
        game.tick().unwrap();

        assert_eq!(game.state().score(CombatantId::One).unwrap(), 1);
        assert!(game.state().spells.is_empty());
    }

    #[test]
    fn test_restart_through_queue() {
        let mut game = duel();
        game.clock().set(5000.0);
        for _ in 0..10 {
            game.tick().unwrap();
        }
        game.submit(Event::Restart {
            canvas_width: 800.0,
            canvas_height: 600.0,
        });
        game.clock().set(5001.0);
        game.tick().unwrap();

        // Restart resets last_cast to 0, so both cast again this frame
        let state = game.state();
        assert_eq!(state.spells.len(), 2);
        assert_eq!(state.score(CombatantId::One).unwrap(), 0);
        assert_eq!(state.combatant(CombatantId::One).unwrap().pos.y, 302.0);
    }

    #[test]
    fn test_stop_prevents_further_ticks() {
        let mut game = duel();
        game.tick().unwrap();
        game.submit(Event::AdvanceProjectiles);
        game.stop();
        let frozen = game.state().clone();

        assert!(!game.tick().unwrap());
        assert!(!game.is_running());
        assert_eq!(game.state(), &frozen);
        assert_eq!(game.frames(), 1);
        assert_eq!(game.pending(), 0);
    }

    #[test]
    fn test_failed_frame_keeps_previous_state() {
        let mut state = DuelState::new(800.0, 600.0);
        state.combatants.remove(&CombatantId::Two);
        let mut game = FrameLoop::new(state, ManualClock::new(0.0));
        let before = game.state().clone();

        assert!(matches!(
            game.tick(),
            Err(DuelError::CombatantNotFound(CombatantId::Two))
        ));
        assert_eq!(game.state(), &before);
        assert_eq!(game.frames(), 0);
    }

    #[test]
    fn test_step_clock() {
        let clock = StepClock::new(16.0);
        assert_eq!(clock.now_ms(), 16.0);
        assert_eq!(clock.now_ms(), 32.0);
    }
}
