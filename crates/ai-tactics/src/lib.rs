//! Tactical layer on top of the decision core: actor world traits, stock sensors and
//! behaviors, and the profiles that wire them together.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behaviors;
pub mod config;
pub mod fields;
pub mod profiles;
pub mod sensors;
pub mod world;

pub use behaviors::{Defend, Fight, Follow, MoveMode, MoveTo, Waypoint};
pub use config::{
    ArrivalSensorConfig, CombatSensorConfig, DefendConfig, DirectionalConfig, FightConfig,
    FollowConfig, HostileSensorConfig, MoveConfig, ObjectiveSensorConfig, ProfileWeights,
    TacticsConfig,
};
pub use sensors::{
    detection_probability, objective_points, ArrivalSensor, CombatSensor, DirectionalMode,
    DirectionalSensor, HostileSensor, ObjectiveSensor, PointProvider,
};
pub use world::{ActorWorldMut, ActorWorldView, MoveSpeed, Objective, Seat, TeamId};
