use ai_core::{AgentId, Behavior, BehaviorContext, BehaviorKind, MemoryKey, Vec3};

use crate::{ActorWorldMut, MoveConfig, MoveSpeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    OnFoot(MoveSpeed),
    /// The actor drives the vehicle it sits in.
    Driver,
}

/// Issues one movement command toward a captured position; the host navigates.
///
/// While active it watches the memory fact the target came from. Once that fact is gone the
/// `arrived` signal is dropped, since there is no longer a target to have arrived at.
#[derive(Debug, Clone)]
pub struct MoveTo<A> {
    target: Vec3,
    mode: MoveMode,
    aim: Option<A>,
    watched: Option<MemoryKey<Vec3>>,
    arrival_distance: f32,
    update_interval_ms: u64,
    arrived: bool,
    aiming: bool,
}

impl<A: AgentId> MoveTo<A> {
    pub fn new(target: Vec3, mode: MoveMode) -> Self {
        let defaults = MoveConfig::default();
        Self {
            target,
            mode,
            aim: None,
            watched: None,
            arrival_distance: defaults.arrival_distance,
            update_interval_ms: defaults.update_interval_ms,
            arrived: false,
            aiming: false,
        }
    }

    pub fn on_foot(target: Vec3, config: &MoveConfig) -> Self {
        Self::new(target, MoveMode::OnFoot(config.speed)).with_config(config)
    }

    pub fn driving(target: Vec3, config: &MoveConfig) -> Self {
        Self::new(target, MoveMode::Driver).with_config(config)
    }

    pub fn with_config(mut self, config: &MoveConfig) -> Self {
        self.arrival_distance = config.arrival_distance;
        self.update_interval_ms = config.update_interval_ms;
        self
    }

    /// Aim at `target` while moving.
    pub fn aiming_at(mut self, target: Option<A>) -> Self {
        self.aim = target;
        self
    }

    /// Track the memory fact this target was read from.
    pub fn watching(mut self, key: MemoryKey<Vec3>) -> Self {
        self.watched = Some(key);
        self
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    pub fn arrived(&self) -> bool {
        self.arrived
    }
}

impl<W> Behavior<W> for MoveTo<W::Agent>
where
    W: ActorWorldMut + 'static,
{
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::MOVE_TO
    }

    fn update_interval_ms(&self) -> u64 {
        self.update_interval_ms
    }

    fn enter(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if !world.is_alive(ctx.agent) {
            return;
        }
        match self.mode {
            MoveMode::OnFoot(speed) => world.move_to(ctx.agent, self.target, speed),
            MoveMode::Driver => world.drive_to(ctx.agent, self.target),
        }
        if let Some(target) = self.aim {
            world.aim_at(ctx.agent, target);
            self.aiming = true;
        }
    }

    fn update(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if let Some(key) = self.watched {
            if !ctx.memory.has(key) {
                self.arrived = false;
                return;
            }
        }
        if let Some(position) = world.position(ctx.agent) {
            self.arrived = position.distance(self.target) <= self.arrival_distance;
        }
    }

    fn exit(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if self.aiming && world.is_alive(ctx.agent) {
            world.clear_aim(ctx.agent);
        }
        self.aiming = false;
    }

    fn target_position(&self) -> Option<Vec3> {
        Some(self.target)
    }
}
