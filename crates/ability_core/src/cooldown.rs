//! Per-actor cooldown deadlines with lazy eviction.
//!
//! Time never comes from a global clock: callers pass `now_ms`, so tests and
//! replays can drive expiry explicitly. Absence of an entry means available;
//! an entry whose deadline has passed is treated as absent and dropped on
//! the next query that sees it.

use std::collections::HashMap;

use crate::actor::ActorId;

#[derive(Debug, Default)]
pub struct CooldownStore {
    deadlines: HashMap<ActorId, u64>,
}

impl CooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the actor has no pending deadline. Evicts the entry when it
    /// has expired.
    pub fn is_available(&mut self, actor: ActorId, now_ms: u64) -> bool {
        match self.deadlines.get(&actor) {
            None => true,
            Some(&deadline) if deadline <= now_ms => {
                self.deadlines.remove(&actor);
                true
            }
            Some(_) => false,
        }
    }

    /// Whole seconds left, rounded up; 0 (and eviction) once expired.
    pub fn remaining_secs(&mut self, actor: ActorId, now_ms: u64) -> u32 {
        let Some(&deadline) = self.deadlines.get(&actor) else {
            return 0;
        };
        if deadline <= now_ms {
            self.deadlines.remove(&actor);
            return 0;
        }
        (deadline - now_ms).div_ceil(1000) as u32
    }

    /// Set (or overwrite) the deadline to `now_ms + duration_ms`.
    pub fn start(&mut self, actor: ActorId, duration_ms: u64, now_ms: u64) {
        self.deadlines.insert(actor, now_ms.saturating_add(duration_ms));
    }

    /// Drop any deadline unconditionally (death path).
    pub fn clear(&mut self, actor: ActorId) {
        self.deadlines.remove(&actor);
    }

    /// Reconnect path: drop the entry only if it already expired. Never
    /// starts or extends a cooldown.
    pub fn evict_if_expired(&mut self, actor: ActorId, now_ms: u64) {
        if let Some(&deadline) = self.deadlines.get(&actor)
            && deadline <= now_ms
        {
            self.deadlines.remove(&actor);
        }
    }

    /// Raw deadline, mainly for assertions and debug overlays.
    pub fn deadline(&self, actor: ActorId) -> Option<u64> {
        self.deadlines.get(&actor).copied()
    }
}
