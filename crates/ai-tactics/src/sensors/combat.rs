use ai_core::{Sensor, SensorContext, SensorEvent, SensorEventKind, SensorKind};

use crate::fields::{hostile, IN_COMBAT};
use crate::{ActorWorldView, CombatSensorConfig};

/// Raises the in-combat flag.
///
/// Triggers: the actor is firing, it took damage, or a line-of-sight check toward its hostile
/// came back as a hit or a near miss. While the flag is live nothing is re-evaluated.
#[derive(Debug, Clone, Default)]
pub struct CombatSensor {
    config: CombatSensorConfig,
}

impl CombatSensor {
    pub const KIND: SensorKind = SensorKind("combat");

    pub fn new(config: CombatSensorConfig) -> Self {
        Self { config }
    }

    fn engage<A: ai_core::AgentId>(&self, ctx: &mut SensorContext<'_, A>, reason: &'static str) {
        ctx.memory.set(IN_COMBAT, true, Some(self.config.ttl_ms));
        tracing::trace!(agent = ?ctx.agent, reason, "in combat");
    }
}

impl<W> Sensor<W> for CombatSensor
where
    W: ActorWorldView + 'static,
{
    fn kind(&self) -> SensorKind {
        Self::KIND
    }

    fn interval_ms(&self) -> u64 {
        self.config.interval_ms
    }

    fn update(&mut self, ctx: &mut SensorContext<'_, W::Agent>, world: &W) {
        if ctx.memory.has(IN_COMBAT) {
            return;
        }
        if world.is_firing(ctx.agent) {
            self.engage(ctx, "firing");
            return;
        }
        if let Some(target) = ctx.memory.get(hostile::<W::Agent>()).copied() {
            world.request_line_of_sight(ctx.agent, target);
        }
    }

    fn interests(&self) -> &'static [SensorEventKind] {
        &[SensorEventKind::Damage, SensorEventKind::LineOfSight]
    }

    fn on_event(
        &mut self,
        ctx: &mut SensorContext<'_, W::Agent>,
        _world: &W,
        event: &SensorEvent<W::Agent>,
    ) {
        if ctx.memory.has(IN_COMBAT) {
            return;
        }
        match event {
            SensorEvent::Damage(_) => self.engage(ctx, "damaged"),
            SensorEvent::LineOfSight(result) => {
                if result.hit || result.miss_distance <= self.config.miss_tolerance {
                    self.engage(ctx, "line of sight");
                }
            }
        }
    }
}
