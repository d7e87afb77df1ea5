//! Shared fixture: a small Vec-backed world for driving the ability core
//! without a game engine.
#![allow(dead_code)]

use ability_core::{AbilityState, ActorId, CasterView, CombatWorld, TargetId, TargetView};
use glam::Vec3;

pub struct Dummy {
    pub id: TargetId,
    pub pos: Vec3,
    pub hp: f32,
    pub alive: bool,
    pub valid: bool,
    pub name: String,
}

pub struct StubWorld {
    pub caster: ActorId,
    pub eye: Vec3,
    pub facing: Vec3,
    pub avatar: TargetId,
    pub held_item: Option<String>,
    pub dummies: Vec<Dummy>,
    pub fx: Vec<Vec3>,
    pub sounds: Vec<Vec3>,
}

impl StubWorld {
    pub fn new() -> Self {
        Self {
            caster: ActorId(1),
            eye: Vec3::ZERO,
            facing: Vec3::Z,
            avatar: TargetId(99),
            held_item: Some("storm_sigil".to_string()),
            dummies: Vec::new(),
            fx: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub fn add_dummy(&mut self, id: u64, pos: Vec3, hp: f32) -> TargetId {
        let tid = TargetId(id);
        self.dummies.push(Dummy {
            id: tid,
            pos,
            hp,
            alive: true,
            valid: true,
            name: format!("dummy-{id}"),
        });
        tid
    }

    pub fn kill(&mut self, id: TargetId) {
        if let Some(d) = self.dummies.iter_mut().find(|d| d.id == id) {
            d.hp = 0.0;
            d.alive = false;
        }
    }

    pub fn despawn(&mut self, id: TargetId) {
        if let Some(d) = self.dummies.iter_mut().find(|d| d.id == id) {
            d.valid = false;
        }
    }

    pub fn hp(&self, id: TargetId) -> f32 {
        self.dummies
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.hp)
            .unwrap_or(0.0)
    }

    fn view(d: &Dummy) -> TargetView {
        TargetView {
            id: d.id,
            pos: d.pos,
            alive: d.alive,
            valid: d.valid,
            name: d.name.clone(),
        }
    }
}

impl CombatWorld for StubWorld {
    fn caster_view(&self, actor: ActorId) -> Option<CasterView> {
        (actor == self.caster).then_some(CasterView {
            eye: self.eye,
            facing: self.facing,
            avatar: self.avatar,
        })
    }

    fn actor_holds(&self, actor: ActorId, item: &str) -> bool {
        actor == self.caster && self.held_item.as_deref() == Some(item)
    }

    fn ray_trace_nearest(
        &self,
        origin: Vec3,
        dir: Vec3,
        max_range: f32,
        exclude: TargetId,
    ) -> Option<TargetId> {
        let dir = dir.normalize_or_zero();
        let mut best: Option<(f32, TargetId)> = None;
        for d in &self.dummies {
            if d.id == exclude || !d.alive || !d.valid {
                continue;
            }
            let to = d.pos - origin;
            let t = to.dot(dir);
            if t < 0.0 || t > max_range {
                continue;
            }
            // generous 0.5 m hit radius around the ray
            if (to - dir * t).length() > 0.5 {
                continue;
            }
            if best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, d.id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn targets_near(&self, origin: Vec3, half_extent: f32) -> Vec<TargetView> {
        self.dummies
            .iter()
            .filter(|d| {
                let to = d.pos - origin;
                d.valid
                    && to.x.abs() <= half_extent
                    && to.y.abs() <= half_extent
                    && to.z.abs() <= half_extent
            })
            .map(Self::view)
            .collect()
    }

    fn target(&self, id: TargetId) -> Option<TargetView> {
        self.dummies.iter().find(|d| d.id == id).map(Self::view)
    }

    fn health(&self, id: TargetId) -> f32 {
        self.hp(id)
    }

    fn set_health(&mut self, id: TargetId, hp: f32) {
        if let Some(d) = self.dummies.iter_mut().find(|d| d.id == id) {
            d.hp = hp;
            if d.hp <= 0.0 {
                d.alive = false;
            }
        }
    }

    fn strike_fx(&mut self, pos: Vec3) {
        self.fx.push(pos);
    }

    fn strike_sound(&mut self, pos: Vec3) {
        self.sounds.push(pos);
    }
}

/// Drive the service `n` engine ticks.
pub fn run_ticks(state: &mut AbilityState, world: &mut StubWorld, n: u32) {
    for _ in 0..n {
        state.tick(world);
    }
}
