//! Memory fields the brain itself reads or writes.
//!
//! Subsystem crates define their own fields; ids below `0x1000` are reserved for the core.

use glam::Vec3;

use crate::MemoryKey;

/// Where the actor is currently meant to go. Cleared by the brain when the host reports the
/// movement finished.
pub const MOVE_TARGET: MemoryKey<Vec3> = MemoryKey::new(0x0001, "move_target");
