//! Headless arena for running tactical brains end to end.
//!
//! The binary loads a YAML scenario, spawns infantry and vehicle crews, and steps every brain
//! against [`ArenaWorld`] until the tick budget runs out.

#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod sim;

pub use arena::{ArenaActor, ArenaEvent, ArenaRules, ArenaWorld, Order, Vehicle};
pub use config::{ArenaConfig, ObjectiveConfig, SquadConfig};
pub use sim::{Simulation, Summary};
