use crate::rng::stream_id;
use crate::{
    Memory, Sensor, SensorContext, SensorEvent, SensorKind, Throttle, TickContext, WorldView,
};

struct SensorSlot<W>
where
    W: WorldView + 'static,
{
    throttle: Throttle,
    sensor: Box<dyn Sensor<W>>,
}

/// Ordered set of sensors, at most one per [`SensorKind`].
pub struct Perception<W>
where
    W: WorldView + 'static,
{
    sensors: Vec<SensorSlot<W>>,
}

impl<W> Default for Perception<W>
where
    W: WorldView + 'static,
{
    fn default() -> Self {
        Self {
            sensors: Vec::new(),
        }
    }
}

impl<W> Perception<W>
where
    W: WorldView + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `sensor`, replacing in place any sensor of the same kind.
    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor<W>>) {
        let kind = sensor.kind();
        let slot = SensorSlot {
            throttle: Throttle::new(sensor.interval_ms()),
            sensor,
        };
        match self.sensors.iter_mut().find(|s| s.sensor.kind() == kind) {
            Some(existing) => {
                tracing::debug!(sensor = kind.name(), "sensor replaced");
                *existing = slot;
            }
            None => self.sensors.push(slot),
        }
    }

    pub fn remove_sensor(&mut self, kind: SensorKind) -> bool {
        let before = self.sensors.len();
        self.sensors.retain(|s| s.sensor.kind() != kind);
        before != self.sensors.len()
    }

    pub fn clear_sensors(&mut self) {
        self.sensors.clear();
    }

    pub fn has_sensor(&self, kind: SensorKind) -> bool {
        self.sensors.iter().any(|s| s.sensor.kind() == kind)
    }

    /// Registered kinds in tick order.
    pub fn kinds(&self) -> Vec<SensorKind> {
        self.sensors.iter().map(|s| s.sensor.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Ticks every sensor in registration order. Returns how many ran their update.
    pub fn update(
        &mut self,
        tick: &TickContext,
        agent: W::Agent,
        memory: &mut Memory,
        world: &W,
    ) -> usize {
        let mut ran = 0;
        for slot in self.sensors.iter_mut() {
            if !slot.throttle.try_fire(tick.now_ms) {
                continue;
            }
            if !world.is_alive(agent) {
                continue;
            }
            let kind = slot.sensor.kind();
            let mut ctx = SensorContext {
                agent,
                now_ms: tick.now_ms,
                rng: tick.rng_for_agent(agent, stream_id(kind.name())),
                memory: &mut *memory,
            };
            slot.sensor.update(&mut ctx, world);
            ran += 1;
        }
        ran
    }

    /// Routes `event` to every sensor that declared interest in its kind. Returns the number
    /// of receivers.
    pub fn dispatch(
        &mut self,
        tick: &TickContext,
        agent: W::Agent,
        memory: &mut Memory,
        world: &W,
        event: &SensorEvent<W::Agent>,
    ) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for slot in self.sensors.iter_mut() {
            if !slot.sensor.interests().contains(&kind) {
                continue;
            }
            let sensor_kind = slot.sensor.kind();
            let mut ctx = SensorContext {
                agent,
                now_ms: tick.now_ms,
                rng: tick.rng_for_agent(agent, stream_id(sensor_kind.name()) ^ 0xE7E7),
                memory: &mut *memory,
            };
            slot.sensor.on_event(&mut ctx, world, event);
            delivered += 1;
        }
        if delivered == 0 {
            tracing::trace!(?kind, "sensor event had no interested sensor");
        }
        delivered
    }

    /// Re-arms every throttle and clears per-sensor state. Memory is untouched.
    pub fn reset(&mut self) {
        for slot in self.sensors.iter_mut() {
            slot.throttle.reset();
            slot.sensor.reset();
        }
    }
}
