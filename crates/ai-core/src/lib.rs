//! Deterministic, engine-agnostic decision core.
//!
//! A [`Brain`] drives one actor. Every tick it advances its [`Memory`] clock, lets its
//! [`Perception`] sensors write facts, asks its [`Policy`] for the next [`Behavior`] and runs
//! that behavior through a [`BehaviorController`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod behavior;
pub mod brain;
pub mod controller;
pub mod deferred;
pub mod error;
pub mod events;
pub mod fields;
pub mod memory;
pub mod perception;
pub mod policy;
pub mod rng;
pub mod sensor;
pub mod throttle;
pub mod tick;
pub mod world;

pub use agent::{AgentId, IdGenerator};
pub use behavior::{Behavior, BehaviorContext, BehaviorKind, Idle};
pub use brain::{tick_brains, Brain, BrainConfig};
pub use controller::{BehaviorController, Lifecycle};
pub use deferred::{Deferred, DeferredContext};
pub use error::ConfigError;
pub use events::{
    BrainEvent, BrainObserver, DamageEvent, LineOfSightResult, MoveOutcome, SensorEvent,
    SensorEventKind,
};
pub use memory::{Fact, Memory, MemoryKey};
pub use perception::Perception;
pub use policy::{IdlePolicy, Policy};
pub use rng::{DeterministicRng, SplitMix64};
pub use sensor::{Sensor, SensorContext, SensorKind};
pub use throttle::Throttle;
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};

pub use glam::Vec3;
