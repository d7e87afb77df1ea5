//! Host integration seam.
//!
//! The core never owns world entities. Hosts implement [`CombatWorld`] over
//! their entity storage; tests and the demo harness use small Vec-backed
//! worlds.

use glam::Vec3;

use crate::actor::ActorId;

/// Stable id for a strikeable world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Snapshot of one target, copied out of the host per query.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetView {
    pub id: TargetId,
    pub pos: Vec3,
    /// Host liveness flag (false once the entity entered its death state).
    pub alive: bool,
    /// False once the host despawned or unloaded the entity.
    pub valid: bool,
    /// Display descriptor carried into event payloads.
    pub name: String,
}

/// Where a caster is looking from, plus their own entity id so target scans
/// can exclude it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasterView {
    pub eye: Vec3,
    /// Unit facing direction.
    pub facing: Vec3,
    pub avatar: TargetId,
}

/// Everything the ability core needs from the host world.
pub trait CombatWorld {
    /// Eye position, facing, and avatar id for a connected actor; `None`
    /// once the actor is gone.
    fn caster_view(&self, actor: ActorId) -> Option<CasterView>;
    /// Whether the actor currently holds the given item key.
    fn actor_holds(&self, actor: ActorId, item: &str) -> bool;
    /// Nearest live entity hit by a forward ray, with `exclude` skipped.
    fn ray_trace_nearest(
        &self,
        origin: Vec3,
        dir: Vec3,
        max_range: f32,
        exclude: TargetId,
    ) -> Option<TargetId>;
    /// Snapshots of entities inside an axis-aligned box of the given
    /// half-extent around `origin`. Enumeration order is host-defined but
    /// must be stable within one tick.
    fn targets_near(&self, origin: Vec3, half_extent: f32) -> Vec<TargetView>;
    /// Fresh snapshot of one entity, `None` once removed.
    fn target(&self, id: TargetId) -> Option<TargetView>;
    /// Current health; 0.0 for removed entities.
    fn health(&self, id: TargetId) -> f32;
    /// Direct health write, bypassing any mitigation; no-op for removed
    /// entities.
    fn set_health(&mut self, id: TargetId, hp: f32);
    /// Fire-and-forget strike visual at a position.
    fn strike_fx(&mut self, pos: Vec3);
    /// Fire-and-forget strike audio at a position.
    fn strike_sound(&mut self, pos: Vec3);
}
