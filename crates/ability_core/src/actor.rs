//! Actor identity.

/// Stable id for a player-controlled actor. The host owns the actual actor
/// objects; the core only ever keys state by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);
