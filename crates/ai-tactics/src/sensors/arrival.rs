use ai_core::{Sensor, SensorContext, SensorKind};

use crate::fields::ARRIVED;
use crate::sensors::PointProvider;
use crate::{ActorWorldView, ArrivalSensorConfig};

/// Notices when the actor reaches one of the provided points.
///
/// Does nothing while an unexpired arrival is remembered, and never fires twice within the
/// cooldown even if the fact expired in between.
pub struct ArrivalSensor<W>
where
    W: ActorWorldView + 'static,
{
    config: ArrivalSensorConfig,
    points: Option<PointProvider<W>>,
    last_arrival_ms: Option<u64>,
    warned: bool,
}

impl<W> ArrivalSensor<W>
where
    W: ActorWorldView + 'static,
{
    pub const KIND: SensorKind = SensorKind("arrival");

    pub fn new(config: ArrivalSensorConfig) -> Self {
        Self {
            config,
            points: None,
            last_arrival_ms: None,
            warned: false,
        }
    }

    pub fn with_points(mut self, points: PointProvider<W>) -> Self {
        self.points = Some(points);
        self
    }

    /// `true` once an update ran without a point provider (logged a single time).
    pub fn warned_missing_points(&self) -> bool {
        self.warned
    }

    fn cooling_down(&self, now_ms: u64) -> bool {
        self.last_arrival_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.config.cooldown_ms)
    }
}

impl<W> Sensor<W> for ArrivalSensor<W>
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
        let Some(points) = self.points.as_ref() else {
            if !self.warned {
                tracing::warn!(agent = ?ctx.agent, "arrival sensor has no point provider");
                self.warned = true;
            }
            return;
        };

        if ctx.memory.has(ARRIVED) || self.cooling_down(ctx.now_ms) {
            return;
        }

        let Some(position) = world.position(ctx.agent) else {
            return;
        };

        let reached = points(world, ctx.agent)
            .into_iter()
            .find(|p| p.distance(position) <= self.config.distance);

        if let Some(point) = reached {
            ctx.memory.set(ARRIVED, point, Some(self.config.ttl_ms));
            self.last_arrival_ms = Some(ctx.now_ms);
            tracing::trace!(agent = ?ctx.agent, ?point, "arrived");
        }
    }

    fn reset(&mut self) {
        self.last_arrival_ms = None;
    }
}
