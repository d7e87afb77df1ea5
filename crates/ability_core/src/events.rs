//! Typed notices produced by casts and strike sessions.
//!
//! The host drains these once per tick and renders them however it likes
//! (chat lines, combat log, HUD). Only the triggering conditions are part of
//! the contract; display text is host business.

use crate::actor::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caster stopped holding the focus item mid-sequence.
    FocusLost,
    /// The target was lost and no replacement qualified.
    NoTargets,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbilityEvent {
    /// Cast accepted and the strike session scheduled.
    Activated { actor: ActorId },
    /// No initial target qualified; nothing was scheduled.
    TargetNotFound { actor: ActorId },
    /// Pre-cast focus item check failed; nothing was scheduled.
    FocusMissing { actor: ActorId },
    /// The session lost its target and adopted a replacement.
    TargetSwitched { actor: ActorId, target: String },
    /// One strike landed. `seq` counts strikes across the whole session.
    StrikeLanded {
        actor: ActorId,
        seq: u32,
        of: u32,
        target: String,
    },
    /// The session ended early.
    Cancelled {
        actor: ActorId,
        reason: CancelReason,
    },
}
