//! Events flowing into a brain from the host, and notifications flowing out of it.

use glam::Vec3;

use crate::{AgentId, BehaviorKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Damage the host attributed to the controlled actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent<A> {
    pub attacker: Option<A>,
    pub amount: f32,
    pub origin: Option<Vec3>,
}

/// Outcome of an asynchronous line-of-sight check requested by a sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOfSightResult<A> {
    pub target: A,
    /// The check reached the target without obstruction.
    pub hit: bool,
    /// Distance between the ray end point and the target.
    pub miss_distance: f32,
}

/// Events the host routes into the perception layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent<A> {
    Damage(DamageEvent<A>),
    LineOfSight(LineOfSightResult<A>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensorEventKind {
    Damage,
    LineOfSight,
}

impl<A> SensorEvent<A> {
    pub fn kind(&self) -> SensorEventKind {
        match self {
            SensorEvent::Damage(_) => SensorEventKind::Damage,
            SensorEvent::LineOfSight(_) => SensorEventKind::LineOfSight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveOutcome {
    Succeeded,
    Failed,
}

/// Notifications a brain raises for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrainEvent<A> {
    Deployed {
        agent: A,
    },
    BehaviorChanged {
        agent: A,
        from: BehaviorKind,
        to: BehaviorKind,
    },
    MoveFinished {
        agent: A,
        outcome: MoveOutcome,
    },
    Reset {
        agent: A,
    },
}

impl<A: AgentId> BrainEvent<A> {
    pub fn agent(&self) -> A {
        match *self {
            BrainEvent::Deployed { agent }
            | BrainEvent::BehaviorChanged { agent, .. }
            | BrainEvent::MoveFinished { agent, .. }
            | BrainEvent::Reset { agent } => agent,
        }
    }
}

/// Typed observer for brain notifications.
pub trait BrainObserver<A>: 'static {
    fn notify(&mut self, tick: u64, event: &BrainEvent<A>);
}
