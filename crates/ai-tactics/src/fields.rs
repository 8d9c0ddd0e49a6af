//! Memory fields written by the tactical sensors.
//!
//! Ids live in `0x1000..0x2000`.

use ai_core::{AgentId, MemoryKey, Vec3};

pub use ai_core::fields::MOVE_TARGET;

/// Nearest detected hostile. Generic over the host's agent handle.
pub const fn hostile<A: AgentId>() -> MemoryKey<A> {
    MemoryKey::new(0x1001, "hostile")
}

pub const HOSTILE_POSITION: MemoryKey<Vec3> = MemoryKey::new(0x1002, "hostile_position");

pub const IN_COMBAT: MemoryKey<bool> = MemoryKey::new(0x1003, "in_combat");

/// The semantic point the actor last arrived at.
pub const ARRIVED: MemoryKey<Vec3> = MemoryKey::new(0x1004, "arrived");
