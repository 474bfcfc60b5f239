//! Transition engine
//!
//! `apply` maps a state and an event to the next state. The input state is
//! never touched: each call works on a clone and returns it.

use glam::Vec2;
use log::{debug, trace};

use super::collision::{point_in_circle, spell_hits};
use super::event::Event;
use super::state::{CombatantId, DuelState, Spell};
use crate::error::Result;

/// Apply one event to `state`, producing the next state
pub fn apply(state: &DuelState, event: &Event) -> Result<DuelState> {
    if let Event::Restart {
        canvas_width,
        canvas_height,
    } = *event
    {
        debug!("Restart {}x{}", canvas_width, canvas_height);
        return Ok(DuelState::with_tuning(
            canvas_width,
            canvas_height,
            state.tuning.clone(),
        ));
    }

    let mut next = state.clone();
    match event {
        Event::AdvanceMovement { canvas_height } => advance_movement(&mut next, *canvas_height),
        Event::AdvanceProjectiles => advance_projectiles(&mut next)?,
        Event::SpawnProjectile { combatant, now } => spawn_spell(&mut next, *combatant, *now)?,
        Event::ChangeSpellColor { combatant, color } => {
            next.combatant_mut(*combatant)?.spell_color = color.clone();
        }
        Event::ChangeCastRate { combatant, rate } => {
            next.combatant_mut(*combatant)?.cast_rate = *rate;
        }
        Event::ChangeSpeed { combatant, speed } => {
            let c = next.combatant_mut(*combatant)?;
            c.speed = *speed;
            c.velocity = *speed;
        }
        Event::CheckPointerCollision { pointer } => flip_under_pointer(&mut next, *pointer),
        Event::Restart { .. } | Event::Unknown => {}
    }
    Ok(next)
}

/// Step every combatant vertically. A combatant past either edge reverses on
/// the following step; its position is left where it landed.
fn advance_movement(state: &mut DuelState, canvas_height: f32) {
    for combatant in state.combatants.values_mut() {
        combatant.pos.y += combatant.velocity * combatant.heading.sign();

        let top = combatant.pos.y - combatant.radius;
        let bottom = combatant.pos.y + combatant.radius;
        if bottom > canvas_height || top < 0.0 {
            combatant.heading = combatant.heading.flipped();
        }
    }
}

/// Move spells, credit hits to the caster, cull spells that left the canvas
fn advance_projectiles(state: &mut DuelState) -> Result<()> {
    let width = state.canvas.width;
    let spells = std::mem::take(&mut state.spells);

    for (id, mut spell) in spells {
        spell.pos += spell.vel;

        // First opponent touched wins; a spell is consumed by its hit
        let victim = state
            .combatants
            .iter()
            .find(|(cid, c)| **cid != spell.owner && spell_hits(&spell, c))
            .map(|(cid, _)| *cid);

        if let Some(victim) = victim {
            let caster = state.combatant_mut(spell.owner)?;
            caster.score += 1;
            debug!(
                "Spell {} hit combatant {} (score {} now {})",
                id, victim, spell.owner, caster.score
            );
            continue;
        }

        if spell.pos.x >= 0.0 && spell.pos.x <= width {
            state.spells.insert(id, spell);
        }
    }

    Ok(())
}

fn spawn_spell(state: &mut DuelState, caster_id: CombatantId, now: f64) -> Result<()> {
    let caster = state.combatant(caster_id)?;
    let spell = Spell {
        pos: caster.pos,
        vel: Vec2::new(caster_id.cast_direction() * state.tuning.spell_speed, 0.0),
        radius: state.combatant_radius * state.tuning.spell_radius_ratio,
        color: caster.spell_color.clone(),
        owner: caster_id,
    };

    let id = state.next_spell_id(caster_id);
    trace!("Combatant {} cast {} at {:.1}ms", caster_id, id, now);
    state.spells.insert(id, spell);
    state.last_cast.insert(caster_id, now);
    Ok(())
}

fn flip_under_pointer(state: &mut DuelState, pointer: Vec2) {
    for combatant in state.combatants.values_mut() {
        if point_in_circle(pointer, combatant.pos, combatant.radius) {
            combatant.heading = combatant.heading.flipped();
        }
    }
}
