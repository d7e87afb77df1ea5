//! Target selection: forward ray first, cone fallback.
//!
//! The cone math operates over plain candidate snapshots so it can be tested
//! without a world; the wrappers below compose [`CombatWorld`].

use glam::Vec3;

use crate::world::{CasterView, CombatWorld, TargetId, TargetView};

/// Cosine of the cone half-angle (~25.8 degrees).
pub const CONE_MIN_DOT: f32 = 0.9;

/// Nearest live candidate inside the forward cone, strictly under
/// `max_range`. Ties keep the first candidate in slice order. A candidate
/// sitting exactly at `origin` normalizes to zero and is never selected.
pub fn cone_target(
    origin: Vec3,
    dir: Vec3,
    max_range: f32,
    exclude: &[TargetId],
    candidates: &[TargetView],
) -> Option<TargetView> {
    let dir = dir.normalize_or_zero();
    let mut best: Option<&TargetView> = None;
    let mut best_dist = max_range;
    for c in candidates {
        if !c.alive || exclude.contains(&c.id) {
            continue;
        }
        let to = c.pos - origin;
        if dir.dot(to.normalize_or_zero()) < CONE_MIN_DOT {
            continue;
        }
        let dist = to.length();
        if dist < best_dist {
            best_dist = dist;
            best = Some(c);
        }
    }
    best.cloned()
}

/// Initial selection for a cast: ray trace along the caster's facing, then
/// fall back to the cone scan when the ray misses.
pub fn primary_target(
    world: &impl CombatWorld,
    caster: &CasterView,
    max_range: f32,
) -> Option<TargetView> {
    if let Some(id) = world.ray_trace_nearest(caster.eye, caster.facing, max_range, caster.avatar)
        && let Some(view) = world.target(id)
        && view.alive
    {
        return Some(view);
    }
    let candidates = world.targets_near(caster.eye, max_range);
    cone_target(
        caster.eye,
        caster.facing,
        max_range,
        &[caster.avatar],
        &candidates,
    )
}

/// Replacement selection after target loss: cone only, with the lost id
/// excluded so a dead-but-still-enumerated entity cannot be re-picked.
pub fn next_target(
    world: &impl CombatWorld,
    caster: &CasterView,
    max_range: f32,
    lost: TargetId,
) -> Option<TargetView> {
    let candidates = world.targets_near(caster.eye, max_range);
    cone_target(
        caster.eye,
        caster.facing,
        max_range,
        &[caster.avatar, lost],
        &candidates,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(id: u64, pos: Vec3) -> TargetView {
        TargetView {
            id: TargetId(id),
            pos,
            alive: true,
            valid: true,
            name: format!("dummy-{id}"),
        }
    }

    #[test]
    fn nearest_in_cone_wins() {
        let cands = vec![tv(1, Vec3::new(0.0, 0.0, 20.0)), tv(2, Vec3::new(0.0, 0.0, 8.0))];
        let got = cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &cands).expect("target");
        assert_eq!(got.id, TargetId(2), "closer in-cone candidate should win");
    }

    #[test]
    fn cone_boundary_is_narrow() {
        // dot ~0.928 at (4, 0, 10) vs ~0.894 at (5, 0, 10)
        let inside = vec![tv(1, Vec3::new(4.0, 0.0, 10.0))];
        let outside = vec![tv(2, Vec3::new(5.0, 0.0, 10.0))];
        assert!(cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &inside).is_some());
        assert!(cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &outside).is_none());
    }

    #[test]
    fn dead_and_excluded_are_skipped() {
        let mut dead = tv(1, Vec3::new(0.0, 0.0, 5.0));
        dead.alive = false;
        let cands = vec![
            dead,
            tv(2, Vec3::new(0.0, 0.0, 9.0)),
            tv(3, Vec3::new(0.0, 0.0, 7.0)),
        ];
        let got =
            cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[TargetId(3)], &cands).expect("target");
        assert_eq!(got.id, TargetId(2), "nearest non-dead non-excluded should win");
    }

    #[test]
    fn candidate_at_origin_never_selected() {
        let cands = vec![tv(1, Vec3::ZERO)];
        assert!(cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &cands).is_none());
    }

    #[test]
    fn beyond_range_rejected_even_when_enumerated() {
        // box enumeration can return corner entities past the range cap
        let at_cap = vec![tv(1, Vec3::new(0.0, 0.0, 50.0))];
        assert!(cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &at_cap).is_none());
        let under_cap = vec![tv(1, Vec3::new(0.0, 0.0, 49.5))];
        assert!(cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &under_cap).is_some());
    }

    #[test]
    fn tie_keeps_first_in_enumeration_order() {
        let a = tv(1, Vec3::new(3.0, 0.0, 10.0));
        let b = tv(2, Vec3::new(-3.0, 0.0, 10.0));
        let got = cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &[a.clone(), b.clone()])
            .expect("target");
        assert_eq!(got.id, a.id);
        let got = cone_target(Vec3::ZERO, Vec3::Z, 50.0, &[], &[b.clone(), a]).expect("target");
        assert_eq!(got.id, b.id);
    }

    #[test]
    fn unnormalized_direction_is_tolerated() {
        let cands = vec![tv(1, Vec3::new(0.0, 0.0, 12.0))];
        let got = cone_target(Vec3::ZERO, Vec3::new(0.0, 0.0, 9.0), 50.0, &[], &cands);
        assert!(got.is_some());
    }
}
