use ai_core::{DeterministicRng, Sensor, SensorContext, SensorKind};

use crate::fields::MOVE_TARGET;
use crate::{ActorWorldView, ObjectiveSensorConfig};

/// Picks an objective the actor's team does not own and remembers it as the move target.
///
/// The two closest candidates are considered and one of them is drawn at random, so squads
/// spawned together do not all converge on the same point.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveSensor {
    config: ObjectiveSensorConfig,
}

impl ObjectiveSensor {
    pub const KIND: SensorKind = SensorKind("objective");

    pub fn new(config: ObjectiveSensorConfig) -> Self {
        Self { config }
    }
}

impl<W> Sensor<W> for ObjectiveSensor
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
        if ctx.memory.has(MOVE_TARGET) {
            return;
        }
        let (Some(team), Some(position)) = (world.team(ctx.agent), world.position(ctx.agent))
        else {
            return;
        };

        let mut candidates: Vec<_> = world
            .objectives()
            .iter()
            .filter(|o| o.owner != Some(team))
            .map(|o| (o.position.distance_squared(position), o))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));

        let chosen = match candidates.as_slice() {
            [] => return,
            [(_, only)] => *only,
            [(_, closest), (_, second), ..] => {
                if ctx.rng.chance(self.config.closest_bias) {
                    *closest
                } else {
                    *second
                }
            }
        };

        ctx.memory
            .set(MOVE_TARGET, chosen.position, Some(self.config.ttl_ms));
        tracing::trace!(agent = ?ctx.agent, objective = chosen.id, "objective selected");
    }
}
