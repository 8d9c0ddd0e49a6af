use ai_core::{AgentId, DeterministicRng, Sensor, SensorContext, SensorKind};

use crate::fields::{hostile, HOSTILE_POSITION};
use crate::{ActorWorldView, HostileSensorConfig};

/// Chance of noticing a hostile `distance` meters away: `exp(-sensitivity * distance)`.
pub fn detection_probability(distance: f32, sensitivity: f32) -> f32 {
    (-sensitivity.max(0.0) * distance.max(0.0)).exp()
}

/// Tracks the nearest opposing actor.
///
/// A hostile in range is only noticed with [`detection_probability`]. A failed roll, like an
/// empty range, clears both facts at once instead of waiting for their TTL.
#[derive(Debug, Clone, Default)]
pub struct HostileSensor {
    config: HostileSensorConfig,
}

impl HostileSensor {
    pub const KIND: SensorKind = SensorKind("hostile");

    pub fn new(config: HostileSensorConfig) -> Self {
        Self { config }
    }
}

impl<W> Sensor<W> for HostileSensor
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
        let Some(position) = world.position(ctx.agent) else {
            return;
        };

        let Some((target, target_position)) =
            world.nearest_hostile(ctx.agent, self.config.max_distance)
        else {
            forget(ctx);
            return;
        };

        let distance = position.distance(target_position);
        let p = detection_probability(distance, self.config.sensitivity);
        if !ctx.rng.chance(p) {
            tracing::trace!(agent = ?ctx.agent, distance, p, "hostile in range but not noticed");
            forget(ctx);
            return;
        }

        ctx.memory
            .set(hostile::<W::Agent>(), target, Some(self.config.ttl_ms));
        ctx.memory
            .set(HOSTILE_POSITION, target_position, Some(self.config.ttl_ms));
        tracing::trace!(agent = ?ctx.agent, hostile = ?target, distance, "hostile detected");
    }
}

/// Drops both hostile facts regardless of their remaining TTL.
fn forget<A: AgentId>(ctx: &mut SensorContext<'_, A>) {
    ctx.memory.clear(hostile::<A>());
    ctx.memory.clear(HOSTILE_POSITION);
}
