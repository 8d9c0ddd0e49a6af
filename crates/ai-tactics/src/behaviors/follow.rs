use std::cell::RefCell;
use std::rc::Rc;

use ai_core::{Behavior, BehaviorContext, BehaviorKind, Vec3};

use crate::{ActorWorldMut, FollowConfig, MoveSpeed};

/// A position published by someone else (a squad leader, a scripted path) and read by
/// followers.
///
/// Each [`Waypoint::publish`] allocates a fresh value; followers compare allocations, not
/// coordinates, to decide whether a new move command is needed.
#[derive(Debug, Clone, Default)]
pub struct Waypoint {
    slot: Rc<RefCell<Option<Rc<Vec3>>>>,
}

impl Waypoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, position: Vec3) {
        *self.slot.borrow_mut() = Some(Rc::new(position));
    }

    pub fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }

    pub fn current(&self) -> Option<Rc<Vec3>> {
        self.slot.borrow().clone()
    }
}

/// Follows a [`Waypoint`], picking sprint, run or walk from the remaining distance.
#[derive(Debug, Clone)]
pub struct Follow {
    waypoint: Waypoint,
    config: FollowConfig,
    last: Option<Rc<Vec3>>,
    issued: u32,
}

impl Follow {
    pub fn new(waypoint: Waypoint, config: FollowConfig) -> Self {
        Self {
            waypoint,
            config,
            last: None,
            issued: 0,
        }
    }

    /// Move commands issued so far.
    pub fn issued(&self) -> u32 {
        self.issued
    }

    pub fn speed_for(&self, distance: f32) -> MoveSpeed {
        if distance > self.config.sprint_distance {
            MoveSpeed::Sprint
        } else if distance > self.config.run_distance {
            MoveSpeed::Run
        } else {
            MoveSpeed::Walk
        }
    }

    fn refresh<W: ActorWorldMut>(&mut self, agent: W::Agent, world: &mut W) {
        let Some(current) = self.waypoint.current() else {
            self.last = None;
            return;
        };
        if self.last.as_ref().is_some_and(|last| Rc::ptr_eq(last, &current)) {
            return;
        }
        let Some(position) = world.position(agent) else {
            return;
        };

        let speed = self.speed_for(position.distance(*current));
        world.move_to(agent, *current, speed);
        self.issued += 1;
        self.last = Some(current);
    }
}

impl<W> Behavior<W> for Follow
where
    W: ActorWorldMut + 'static,
{
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::FOLLOW
    }

    fn update_interval_ms(&self) -> u64 {
        self.config.update_interval_ms
    }

    fn enter(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if world.is_alive(ctx.agent) {
            self.refresh(ctx.agent, world);
        }
    }

    fn update(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if world.is_alive(ctx.agent) {
            self.refresh(ctx.agent, world);
        }
    }

    fn target_position(&self) -> Option<Vec3> {
        self.waypoint.current().map(|p| *p)
    }
}
