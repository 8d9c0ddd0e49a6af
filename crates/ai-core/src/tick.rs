use crate::{rng, AgentId, SplitMix64};

/// Per-step input supplied by the host.
///
/// `now_ms` is logical time: the only clock sensors, behaviors and memory expiry ever see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub tick: u64,
    pub now_ms: u64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, now_ms: u64, seed: u64) -> Self {
        Self { tick, now_ms, seed }
    }

    /// Deterministic random stream for `agent`, distinct per tick and per `stream`.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        SplitMix64::new(rng::tick_seed(self.seed, self.tick, agent.stable_id(), stream))
    }
}
