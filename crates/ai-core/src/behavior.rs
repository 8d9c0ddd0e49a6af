use glam::Vec3;

use crate::{Deferred, Memory, TickContext, WorldMut};

/// Explicit type tag carried by every behavior.
///
/// The selector and controller compare tags, never runtime types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BehaviorKind(pub &'static str);

impl BehaviorKind {
    pub const IDLE: BehaviorKind = BehaviorKind("idle");
    pub const MOVE_TO: BehaviorKind = BehaviorKind("move_to");
    pub const DEFEND: BehaviorKind = BehaviorKind("defend");
    pub const FIGHT: BehaviorKind = BehaviorKind("fight");
    pub const FOLLOW: BehaviorKind = BehaviorKind("follow");

    pub fn name(self) -> &'static str {
        self.0
    }
}

/// Everything a behavior hook may touch besides the world.
pub struct BehaviorContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub tick: &'a TickContext,
    pub agent: W::Agent,
    pub memory: &'a mut Memory,
    pub deferred: &'a mut Deferred<W>,
}

impl<W> BehaviorContext<'_, W>
where
    W: WorldMut + 'static,
{
    pub fn now_ms(&self) -> u64 {
        self.tick.now_ms
    }

    /// Queues a continuation `delay_ms` from now.
    pub fn schedule_after(
        &mut self,
        delay_ms: u64,
        label: &'static str,
        run: impl FnOnce(&mut crate::DeferredContext<'_, W>, &mut W) + 'static,
    ) {
        let due = self.tick.now_ms.saturating_add(delay_ms);
        self.deferred.schedule_at(due, label, run);
    }
}

/// A unit of execution with an enter / update / exit lifecycle.
///
/// Behaviors issue world actions; they never arbitrate. Only the [`crate::BehaviorController`]
/// calls the hooks, and it guarantees `enter` and `exit` run at most once per instance.
pub trait Behavior<W>: 'static
where
    W: WorldMut + 'static,
{
    fn kind(&self) -> BehaviorKind;

    /// Minimum logical time between two `update` calls. `0` updates every tick.
    fn update_interval_ms(&self) -> u64 {
        0
    }

    fn enter(&mut self, _ctx: &mut BehaviorContext<'_, W>, _world: &mut W) {}

    fn update(&mut self, _ctx: &mut BehaviorContext<'_, W>, _world: &mut W) {}

    fn exit(&mut self, _ctx: &mut BehaviorContext<'_, W>, _world: &mut W) {}

    /// Position this instance was built around, if any (used for retarget decisions).
    fn target_position(&self) -> Option<Vec3> {
        None
    }
}

/// Does nothing. The fallback when no option scores above zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Idle;

impl<W> Behavior<W> for Idle
where
    W: WorldMut + 'static,
{
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::IDLE
    }
}
