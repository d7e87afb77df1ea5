//! ability_core: authoritative server-side ability gating and strike
//! session engine.
//!
//! The host game loop owns one [`AbilityState`] and drives it from its main
//! thread: command glue calls [`AbilityState::use_ability`], the engine tick
//! calls [`AbilityState::tick`], and lifecycle wiring calls the death and
//! reconnect entry points. Everything world-shaped is reached through the
//! [`CombatWorld`] trait, so the core compiles and tests without a game
//! engine attached.

pub mod actor;
pub mod cooldown;
pub mod events;
pub mod session;
pub mod targeting;
pub mod world;

pub use actor::ActorId;
pub use events::{AbilityEvent, CancelReason};
pub use world::{CasterView, CombatWorld, TargetId, TargetView};

use std::collections::HashMap;

use data_runtime::specs::abilities::{AbilitySpec, AbilitySpecDb, STORM_STRIKE};
use thiserror::Error;

use crate::cooldown::CooldownStore;
use crate::session::StrikeSession;

/// Registry slot players reference from commands ("cast 1").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbilityId(pub u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("ability slot {0} already registered")]
    SlotTaken(u32),
}

/// Registered abilities by numeric slot.
#[derive(Debug, Default)]
pub struct AbilityBook {
    entries: HashMap<AbilityId, AbilitySpec>,
}

impl AbilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: AbilityId, spec: AbilitySpec) -> Result<(), RegisterError> {
        if self.entries.contains_key(&id) {
            return Err(RegisterError::SlotTaken(id.0));
        }
        log::info!("ability: registered slot {} ({})", id.0, spec.name);
        self.entries.insert(id, spec);
        Ok(())
    }

    pub fn get(&self, id: AbilityId) -> Option<&AbilitySpec> {
        self.entries.get(&id)
    }
}

/// Ability service state: cooldowns, the ability registry, running strike
/// sessions, and notices not yet drained by the host.
///
/// One instance lives for the whole server process (created at service
/// start, dropped at shutdown); a host that needs isolated universes holds
/// one value per universe.
#[derive(Debug, Default)]
pub struct AbilityState {
    pub cooldowns: CooldownStore,
    pub book: AbilityBook,
    sessions: Vec<StrikeSession>,
    events: Vec<AbilityEvent>,
}

impl AbilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service bootstrap: registry populated from the data files, with the
    /// storm strike in slot 1.
    pub fn with_default_book() -> Self {
        let spec = AbilitySpecDb::load_default()
            .ok()
            .and_then(|db| db.get(STORM_STRIKE).cloned())
            .unwrap_or_else(AbilitySpec::storm_strike);
        let mut state = Self::new();
        let _ = state.book.register(AbilityId(1), spec);
        state
    }

    pub fn ability(&self, id: AbilityId) -> Option<&AbilitySpec> {
        self.book.get(id)
    }

    /// Eligibility gate: the slot must be registered, the actor must hold
    /// the ability's focus item, and no cooldown may be pending. All three
    /// must hold.
    pub fn can_use<W: CombatWorld>(
        &mut self,
        world: &W,
        actor: ActorId,
        id: AbilityId,
        now_ms: u64,
    ) -> bool {
        let Some(spec) = self.book.get(id) else {
            return false;
        };
        if !world.actor_holds(actor, &spec.focus_item) {
            return false;
        }
        self.cooldowns.is_available(actor, now_ms)
    }

    /// Cast entry point. Re-checks the gate, runs cast activation, and only
    /// when a session was actually scheduled starts the cooldown.
    ///
    /// The cooldown starts here, at cast initiation, while the strikes are
    /// still pending: a re-cast during the sequence is blocked by the gate,
    /// not by session bookkeeping.
    pub fn use_ability<W: CombatWorld>(
        &mut self,
        world: &mut W,
        actor: ActorId,
        id: AbilityId,
        now_ms: u64,
    ) -> bool {
        if !self.can_use(world, actor, id, now_ms) {
            metrics::counter!("ability.denied_total").increment(1);
            return false;
        }
        let Some(spec) = self.book.get(id).cloned() else {
            return false;
        };
        if !self.cast(world, actor, &spec) {
            return false;
        }
        self.cooldowns.start(actor, spec.cooldown_ms, now_ms);
        metrics::counter!("ability.casts_total").increment(1);
        log::info!(
            "ability: {:?} cast {} (cooldown {} ms)",
            actor,
            spec.name,
            spec.cooldown_ms
        );
        true
    }

    /// Cast activation: resolve the caster, pick the initial target, and
    /// schedule the strike session. False (plus a notice) when nothing was
    /// scheduled.
    ///
    /// Normally reached through [`Self::use_ability`]; calling it directly
    /// skips the gate and starts no cooldown.
    pub fn cast<W: CombatWorld>(&mut self, world: &mut W, actor: ActorId, spec: &AbilitySpec) -> bool {
        let Some(caster) = world.caster_view(actor) else {
            return false;
        };
        let Some(initial) = targeting::primary_target(world, &caster, spec.max_range_m) else {
            self.events.push(AbilityEvent::TargetNotFound { actor });
            return false;
        };
        // The focus item can vanish between the gate check and this point.
        if !world.actor_holds(actor, &spec.focus_item) {
            self.events.push(AbilityEvent::FocusMissing { actor });
            return false;
        }
        self.sessions
            .push(StrikeSession::new(actor, spec.clone(), &initial));
        self.events.push(AbilityEvent::Activated { actor });
        true
    }

    /// Advance every running session one engine tick and drop finished ones.
    pub fn tick<W: CombatWorld>(&mut self, world: &mut W) {
        if self.sessions.is_empty() {
            return;
        }
        let t0 = std::time::Instant::now();
        for s in self.sessions.iter_mut() {
            s.tick(world, &mut self.events);
        }
        self.sessions.retain(|s| !s.finished());
        metrics::histogram!("ability.tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    }

    /// Death wipes any pending cooldown immediately.
    pub fn on_actor_death(&mut self, actor: ActorId) {
        self.cooldowns.clear(actor);
        log::info!("ability: cleared cooldown for {:?} on death", actor);
    }

    /// Reconnect evicts an already-expired entry and nothing else; an active
    /// cooldown keeps its original deadline.
    pub fn on_actor_reconnect(&mut self, actor: ActorId, now_ms: u64) {
        self.cooldowns.evict_if_expired(actor, now_ms);
    }

    pub fn remaining_cooldown_secs(&mut self, actor: ActorId, now_ms: u64) -> u32 {
        self.cooldowns.remaining_secs(actor, now_ms)
    }

    pub fn on_cooldown(&mut self, actor: ActorId, now_ms: u64) -> bool {
        self.cooldowns.remaining_secs(actor, now_ms) > 0
    }

    pub fn clear_cooldown(&mut self, actor: ActorId) {
        self.cooldowns.clear(actor);
    }

    /// Hand pending notices to the host for rendering.
    pub fn drain_events(&mut self) -> Vec<AbilityEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn running_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// The running session for an actor, if any.
    pub fn session(&self, actor: ActorId) -> Option<&StrikeSession> {
        self.sessions.iter().find(|s| s.actor == actor)
    }
}
