//! Seeded randomness for sensors: detection rolls, objective picks and score jitter.
//!
//! Every stream is derived from the run seed, the agent and a label, so replays with the same
//! seed make the same choices regardless of how many other agents exist. Not cryptographic.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const TICK_GAMMA: u64 = 0xD1B5_4A32_D192_ED03;

/// The sampling surface sensors rely on.
pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, 1)`: 24 bits taken from the low word.
    fn next_f32_unit(&mut self) -> f32 {
        ((self.next_u64() as u32) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform sample in `[lo, hi)`; returns `lo` for empty or inverted ranges.
    fn next_f32_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f32_unit()
    }

    /// Bernoulli trial: `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32_unit() < p.clamp(0.0, 1.0)
    }
}

/// SplitMix64 generator. One instance per sensor run, never shared across agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

/// SplitMix64 finalizer.
pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Seed for one agent's `stream` within a run.
pub fn derive_seed(run_seed: u64, agent_id: u64, stream: u64) -> u64 {
    mix64(run_seed ^ mix64(agent_id.wrapping_add(GOLDEN_GAMMA)) ^ mix64(stream))
}

/// Seed for one agent's `stream` on a given tick, so each tick rolls fresh.
pub fn tick_seed(run_seed: u64, tick: u64, agent_id: u64, stream: u64) -> u64 {
    let stream = stream ^ mix64(tick.wrapping_add(TICK_GAMMA));
    derive_seed(run_seed, agent_id, stream)
}

/// FNV-1a over a label, used to turn kind names into stream ids.
pub fn stream_id(label: &str) -> u64 {
    label.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    })
}
