use ai_core::{Behavior, BehaviorContext, BehaviorKind, Vec3};

use crate::{ActorWorldMut, DefendConfig};

/// Holds an area. No timers of its own: it runs until arbitration picks something else,
/// typically when the fact that scored it expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defend {
    center: Vec3,
    min_radius: f32,
    max_radius: f32,
}

impl Defend {
    pub fn new(center: Vec3, config: &DefendConfig) -> Self {
        Self {
            center,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }
}

impl<W> Behavior<W> for Defend
where
    W: ActorWorldMut + 'static,
{
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::DEFEND
    }

    fn enter(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if world.is_alive(ctx.agent) {
            world.defend_area(ctx.agent, self.center, self.min_radius, self.max_radius);
        }
    }

    fn target_position(&self) -> Option<Vec3> {
        Some(self.center)
    }
}
