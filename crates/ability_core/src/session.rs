//! Time-sliced strike sessions.
//!
//! A session fires on the engine tick it was scheduled for and then every
//! `strike_interval_ticks`, re-validating its target each firing tick and
//! retargeting on loss. All checks are cooperative: a lost focus item or
//! target is only noticed at the next firing tick, never mid-strike.

use data_runtime::specs::abilities::AbilitySpec;

use crate::actor::ActorId;
use crate::events::{AbilityEvent, CancelReason};
use crate::targeting;
use crate::world::{CombatWorld, TargetId, TargetView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Completed,
    Cancelled,
}

/// One in-flight multi-strike cast.
#[derive(Debug, Clone)]
pub struct StrikeSession {
    pub actor: ActorId,
    pub spec: AbilitySpec,
    pub target: TargetId,
    pub target_name: String,
    /// Strikes landed on the current target; resets when the session
    /// switches targets.
    pub strikes_on_target: u32,
    /// Strikes landed across the whole session; drives completion.
    pub strikes_total: u32,
    /// Ticks until the next firing tick; fires when this reaches 0.
    pub next_fire_in: u32,
    pub phase: Phase,
}

impl StrikeSession {
    pub fn new(actor: ActorId, spec: AbilitySpec, initial: &TargetView) -> Self {
        Self {
            actor,
            spec,
            target: initial.id,
            target_name: initial.name.clone(),
            strikes_on_target: 0,
            strikes_total: 0,
            next_fire_in: 0,
            phase: Phase::Running,
        }
    }

    pub fn finished(&self) -> bool {
        self.phase != Phase::Running
    }

    /// Advance one engine tick: count down between firing ticks and run the
    /// firing sequence when the counter hits zero.
    pub fn tick<W: CombatWorld>(&mut self, world: &mut W, events: &mut Vec<AbilityEvent>) {
        if self.phase != Phase::Running {
            return;
        }
        if self.next_fire_in > 0 {
            self.next_fire_in -= 1;
        }
        if self.next_fire_in > 0 {
            return;
        }
        self.fire(world, events);
        if self.phase == Phase::Running {
            self.next_fire_in = self.spec.strike_interval_ticks;
        }
    }

    fn fire<W: CombatWorld>(&mut self, world: &mut W, events: &mut Vec<AbilityEvent>) {
        // Focus item can be dropped or swapped away mid-sequence.
        if !world.actor_holds(self.actor, &self.spec.focus_item) {
            self.cancel(CancelReason::FocusLost, events);
            return;
        }
        // Re-validate the target; a gone, dead, or despawned target triggers
        // a retarget with the old id excluded.
        let view = match world.target(self.target).filter(|v| v.alive && v.valid) {
            Some(v) => v,
            None => {
                let Some(next) = self.retarget(world) else {
                    self.cancel(CancelReason::NoTargets, events);
                    return;
                };
                events.push(AbilityEvent::TargetSwitched {
                    actor: self.actor,
                    target: next.name.clone(),
                });
                log::debug!(
                    "ability: session for {:?} shifts to {:?} ({})",
                    self.actor,
                    next.id,
                    next.name
                );
                next
            }
        };
        // One strike: direct health write floored at zero, FX at the impact.
        let hp = world.health(view.id);
        world.set_health(view.id, (hp - self.spec.damage_per_strike).max(0.0));
        world.strike_fx(view.pos);
        world.strike_sound(view.pos);
        self.strikes_on_target += 1;
        self.strikes_total += 1;
        metrics::counter!("ability.strikes_total").increment(1);
        events.push(AbilityEvent::StrikeLanded {
            actor: self.actor,
            seq: self.strikes_total,
            of: self.spec.strike_count,
            target: view.name.clone(),
        });
        if self.strikes_total >= self.spec.strike_count {
            self.phase = Phase::Completed;
        }
    }

    /// Pick a replacement for the lost target and adopt it.
    fn retarget<W: CombatWorld>(&mut self, world: &W) -> Option<TargetView> {
        let caster = world.caster_view(self.actor)?;
        let next = targeting::next_target(world, &caster, self.spec.max_range_m, self.target)?;
        self.target = next.id;
        self.target_name = next.name.clone();
        self.strikes_on_target = 0;
        Some(next)
    }

    fn cancel(&mut self, reason: CancelReason, events: &mut Vec<AbilityEvent>) {
        self.phase = Phase::Cancelled;
        metrics::counter!("ability.sessions_cancelled_total").increment(1);
        log::info!(
            "ability: session for {:?} cancelled after {} strikes ({:?})",
            self.actor,
            self.strikes_total,
            reason
        );
        events.push(AbilityEvent::Cancelled {
            actor: self.actor,
            reason,
        });
    }
}
