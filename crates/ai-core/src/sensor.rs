use crate::{AgentId, Memory, SensorEvent, SensorEventKind, SplitMix64, WorldView};

/// Explicit type tag for sensors; perception keys its registry on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SensorKind(pub &'static str);

impl SensorKind {
    pub fn name(self) -> &'static str {
        self.0
    }
}

/// What a sensor gets to see of its brain: the actor, the memory and the clock.
pub struct SensorContext<'a, A>
where
    A: AgentId,
{
    pub agent: A,
    pub memory: &'a mut Memory,
    pub now_ms: u64,
    /// Deterministic stream, distinct per agent, tick and sensor kind.
    pub rng: SplitMix64,
}

/// Throttled perceiver that turns world queries into memory facts.
///
/// Sensors only read the world; every decision-relevant output goes through memory.
pub trait Sensor<W>: 'static
where
    W: WorldView + 'static,
{
    fn kind(&self) -> SensorKind;

    fn interval_ms(&self) -> u64;

    /// Runs at most once per interval, and only while the actor is alive.
    fn update(&mut self, ctx: &mut SensorContext<'_, W::Agent>, world: &W);

    /// Event kinds this sensor wants routed to [`Sensor::on_event`].
    fn interests(&self) -> &'static [SensorEventKind] {
        &[]
    }

    fn on_event(
        &mut self,
        _ctx: &mut SensorContext<'_, W::Agent>,
        _world: &W,
        _event: &SensorEvent<W::Agent>,
    ) {
    }

    /// Drops per-sensor state such as cooldowns or cached directions.
    fn reset(&mut self) {}
}
