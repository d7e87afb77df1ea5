//! Headless harness: wires a scripted toy world to the ability service and
//! logs the notices a real host would render to players.

use glam::Vec3;
use stormcall::ability::{
    AbilityEvent, AbilityId, AbilityState, ActorId, CancelReason, CasterView, CombatWorld,
    TargetId, TargetView,
};

const SLOT: AbilityId = AbilityId(1);
const TICK_MS: u64 = 50;

struct Foe {
    id: TargetId,
    name: &'static str,
    pos: Vec3,
    hp: f32,
    alive: bool,
}

struct DemoWorld {
    caster: ActorId,
    avatar: TargetId,
    eye: Vec3,
    facing: Vec3,
    sigil_held: bool,
    foes: Vec<Foe>,
}

impl DemoWorld {
    fn new() -> Self {
        let foes = vec![
            Foe {
                id: TargetId(10),
                name: "Tide Wraith",
                pos: Vec3::new(0.0, 1.2, 9.0),
                hp: 30.0,
                alive: true,
            },
            Foe {
                id: TargetId(11),
                name: "Drift Husk",
                pos: Vec3::new(1.5, 1.2, 14.0),
                hp: 22.0,
                alive: true,
            },
            Foe {
                id: TargetId(12),
                name: "Reef Lurker",
                pos: Vec3::new(30.0, 1.2, 5.0),
                hp: 25.0,
                alive: true,
            },
        ];
        Self {
            caster: ActorId(1),
            avatar: TargetId(0),
            eye: Vec3::new(0.0, 1.6, 0.0),
            facing: Vec3::Z,
            sigil_held: true,
            foes,
        }
    }

    fn kill(&mut self, id: TargetId) {
        if let Some(f) = self.foes.iter_mut().find(|f| f.id == id) {
            f.hp = 0.0;
            f.alive = false;
        }
    }

    fn view(f: &Foe) -> TargetView {
        TargetView {
            id: f.id,
            pos: f.pos,
            alive: f.alive,
            valid: true,
            name: f.name.to_string(),
        }
    }
}

impl CombatWorld for DemoWorld {
    fn caster_view(&self, actor: ActorId) -> Option<CasterView> {
        (actor == self.caster).then_some(CasterView {
            eye: self.eye,
            facing: self.facing,
            avatar: self.avatar,
        })
    }

    fn actor_holds(&self, actor: ActorId, item: &str) -> bool {
        actor == self.caster && self.sigil_held && item == "storm_sigil"
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
        for f in &self.foes {
            if f.id == exclude || !f.alive {
                continue;
            }
            let to = f.pos - origin;
            let t = to.dot(dir);
            if t < 0.0 || t > max_range || (to - dir * t).length() > 0.5 {
                continue;
            }
            if best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, f.id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn targets_near(&self, origin: Vec3, half_extent: f32) -> Vec<TargetView> {
        self.foes
            .iter()
            .filter(|f| {
                let to = f.pos - origin;
                to.x.abs() <= half_extent && to.y.abs() <= half_extent && to.z.abs() <= half_extent
            })
            .map(Self::view)
            .collect()
    }

    fn target(&self, id: TargetId) -> Option<TargetView> {
        self.foes.iter().find(|f| f.id == id).map(Self::view)
    }

    fn health(&self, id: TargetId) -> f32 {
        self.foes
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.hp)
            .unwrap_or(0.0)
    }

    fn set_health(&mut self, id: TargetId, hp: f32) {
        if let Some(f) = self.foes.iter_mut().find(|f| f.id == id) {
            f.hp = hp;
            if f.hp <= 0.0 {
                f.alive = false;
            }
        }
    }

    fn strike_fx(&mut self, pos: Vec3) {
        log::debug!("demo: strike fx at {pos:?}");
    }

    fn strike_sound(&mut self, pos: Vec3) {
        log::debug!("demo: strike sound at {pos:?}");
    }
}

fn render(ev: &AbilityEvent) -> String {
    match ev {
        AbilityEvent::Activated { .. } => "Storm Strike activated!".to_string(),
        AbilityEvent::TargetNotFound { .. } => "No valid target found!".to_string(),
        AbilityEvent::FocusMissing { .. } => "You must hold a storm sigil to cast!".to_string(),
        AbilityEvent::TargetSwitched { target, .. } => format!("The storm shifts to {target}!"),
        AbilityEvent::StrikeLanded {
            seq, of, target, ..
        } => format!("Strike {seq}/{of} hit {target}!"),
        AbilityEvent::Cancelled {
            reason: CancelReason::FocusLost,
            ..
        } => "Cast cancelled! Storm sigil lost.".to_string(),
        AbilityEvent::Cancelled {
            reason: CancelReason::NoTargets,
            ..
        } => "No more valid targets!".to_string(),
    }
}

fn drain(state: &mut AbilityState, tick: u64) {
    for ev in state.drain_events() {
        log::info!("demo: t{tick:02} {}", render(&ev));
    }
}

fn main() {
    let default = "info,stormcall=info";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let mut world = DemoWorld::new();
    let mut state = AbilityState::with_default_book();
    let p = world.caster;

    if !state.use_ability(&mut world, p, SLOT, 0) {
        log::warn!("demo: initial cast unexpectedly denied");
        return;
    }
    drain(&mut state, 0);

    // A second cast during the sequence runs into the gate.
    if !state.can_use(&world, p, SLOT, TICK_MS) {
        let left = state.remaining_cooldown_secs(p, TICK_MS);
        log::info!("demo: re-cast denied, {left}s of cooldown remaining");
    }

    for tick in 0..=24u64 {
        if tick == 4 {
            world.kill(TargetId(10));
            log::info!("demo: t04 the Tide Wraith collapses into foam");
        }
        state.tick(&mut world);
        drain(&mut state, tick);
    }

    let now = 25 * TICK_MS;
    state.on_actor_reconnect(p, now);
    log::info!(
        "demo: after reconnect {}s of cooldown remain",
        state.remaining_cooldown_secs(p, now)
    );

    state.on_actor_death(p);
    log::info!(
        "demo: after death the gate is {}",
        if state.can_use(&world, p, SLOT, now) {
            "open"
        } else {
            "closed"
        }
    );
}
