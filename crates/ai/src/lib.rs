//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! Start with [`core`] for the brain, memory and perception layers, add [`utility`] for scored
//! arbitration and [`tactics`] for the stock combat sensors, behaviors and profiles.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "utility")]
#[cfg_attr(docsrs, doc(cfg(feature = "utility")))]
pub use ai_utility as utility;

#[cfg(feature = "tactics")]
#[cfg_attr(docsrs, doc(cfg(feature = "tactics")))]
pub use ai_tactics as tactics;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

/// The handful of names most hosts need.
#[cfg(feature = "tactics")]
#[cfg_attr(docsrs, doc(cfg(feature = "tactics")))]
pub mod prelude {
    pub use ai_core::{
        Brain, BrainConfig, DamageEvent, LineOfSightResult, MoveOutcome, TickContext, Vec3,
        WorldMut, WorldView,
    };
    pub use ai_tactics::{profiles, ActorWorldMut, ActorWorldView, TacticsConfig};
    pub use ai_utility::{InstallProfile, Profile};
}
