//! Tuning for the stock sensors, behaviors and profiles.
//!
//! Every struct has conservative defaults and a `validate` that rejects values the runtime
//! would otherwise have to clamp silently.

use ai_core::ConfigError;

use crate::MoveSpeed;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostileSensorConfig {
    pub interval_ms: u64,
    pub max_distance: f32,
    /// Exponential falloff rate of the detection probability, per meter.
    pub sensitivity: f32,
    pub ttl_ms: u64,
}

impl Default for HostileSensorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            max_distance: 150.0,
            sensitivity: 0.02,
            ttl_ms: 3_000,
        }
    }
}

impl HostileSensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("hostile.max_distance", self.max_distance as f64)?;
        ConfigError::require_non_negative("hostile.sensitivity", self.sensitivity as f64)?;
        ConfigError::require_positive("hostile.ttl_ms", self.ttl_ms as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalSensorConfig {
    pub interval_ms: u64,
    pub distance: f32,
    pub ttl_ms: u64,
    /// Minimum time between two arrivals, independent of the fact's TTL.
    pub cooldown_ms: u64,
}

impl Default for ArrivalSensorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 250,
            distance: 5.0,
            ttl_ms: 8_000,
            cooldown_ms: 15_000,
        }
    }
}

impl ArrivalSensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("arrival.distance", self.distance as f64)?;
        ConfigError::require_positive("arrival.ttl_ms", self.ttl_ms as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjectiveSensorConfig {
    pub interval_ms: u64,
    pub ttl_ms: u64,
    /// Probability of picking the closest candidate over the second closest.
    pub closest_bias: f32,
}

impl Default for ObjectiveSensorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            ttl_ms: 30_000,
            closest_bias: 0.5,
        }
    }
}

impl ObjectiveSensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("objective.ttl_ms", self.ttl_ms as f64)?;
        ConfigError::require_non_negative("objective.closest_bias", self.closest_bias as f64)?;
        ConfigError::require_ordered(
            "objective.closest_bias",
            self.closest_bias as f64,
            "1.0",
            1.0,
        )
    }
}

/// Candidate scoring for the directional movement-target sensor.
///
/// Distance band: below `near_distance` the band score ramps up linearly from zero, up to
/// `far_distance` it is full, and it decays linearly to zero at `outer_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DirectionalConfig {
    pub interval_ms: u64,
    pub ttl_ms: u64,
    pub arrival_distance: f32,
    /// Speed above which velocity defines the forward intent.
    pub moving_speed: f32,
    pub near_distance: f32,
    pub far_distance: f32,
    pub outer_distance: f32,
    pub alignment_weight: f32,
    /// Candidates with `dot(dir, intent)` below this are "behind" while moving.
    pub behind_dot: f32,
    pub cold_jitter: f32,
    pub warm_jitter: f32,
}

impl Default for DirectionalConfig {
    fn default() -> Self {
        Self::vehicle()
    }
}

impl DirectionalConfig {
    pub fn vehicle() -> Self {
        Self {
            interval_ms: 1_000,
            ttl_ms: 20_000,
            arrival_distance: 15.0,
            moving_speed: 2.0,
            near_distance: 40.0,
            far_distance: 250.0,
            outer_distance: 500.0,
            alignment_weight: 0.6,
            behind_dot: 0.0,
            cold_jitter: 0.35,
            warm_jitter: 0.1,
        }
    }

    pub fn on_foot() -> Self {
        Self {
            interval_ms: 1_000,
            ttl_ms: 25_000,
            arrival_distance: 5.0,
            moving_speed: 0.5,
            near_distance: 15.0,
            far_distance: 80.0,
            outer_distance: 200.0,
            alignment_weight: 0.4,
            behind_dot: -0.2,
            cold_jitter: 0.3,
            warm_jitter: 0.08,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("directional.ttl_ms", self.ttl_ms as f64)?;
        ConfigError::require_non_negative(
            "directional.arrival_distance",
            self.arrival_distance as f64,
        )?;
        ConfigError::require_non_negative("directional.moving_speed", self.moving_speed as f64)?;
        ConfigError::require_positive("directional.near_distance", self.near_distance as f64)?;
        ConfigError::require_ordered(
            "directional.near_distance",
            self.near_distance as f64,
            "directional.far_distance",
            self.far_distance as f64,
        )?;
        ConfigError::require_ordered(
            "directional.far_distance",
            self.far_distance as f64,
            "directional.outer_distance",
            self.outer_distance as f64,
        )?;
        ConfigError::require_non_negative("directional.cold_jitter", self.cold_jitter as f64)?;
        ConfigError::require_non_negative("directional.warm_jitter", self.warm_jitter as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatSensorConfig {
    pub interval_ms: u64,
    pub ttl_ms: u64,
    /// A line-of-sight result missing by at most this much still counts as contact.
    pub miss_tolerance: f32,
}

impl Default for CombatSensorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 250,
            ttl_ms: 10_000,
            miss_tolerance: 2.0,
        }
    }
}

impl CombatSensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("combat.ttl_ms", self.ttl_ms as f64)?;
        ConfigError::require_non_negative("combat.miss_tolerance", self.miss_tolerance as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveConfig {
    pub update_interval_ms: u64,
    pub speed: MoveSpeed,
    pub arrival_distance: f32,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 500,
            speed: MoveSpeed::Run,
            arrival_distance: 5.0,
        }
    }
}

impl MoveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("move.arrival_distance", self.arrival_distance as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FollowConfig {
    pub update_interval_ms: u64,
    /// Farther than this: sprint.
    pub sprint_distance: f32,
    /// Farther than this (and not sprinting): run. Otherwise walk.
    pub run_distance: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 250,
            sprint_distance: 40.0,
            run_distance: 12.0,
        }
    }
}

impl FollowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("follow.run_distance", self.run_distance as f64)?;
        ConfigError::require_ordered(
            "follow.run_distance",
            self.run_distance as f64,
            "follow.sprint_distance",
            self.sprint_distance as f64,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefendConfig {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for DefendConfig {
    fn default() -> Self {
        Self {
            min_radius: 2.0,
            max_radius: 12.0,
        }
    }
}

impl DefendConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("defend.min_radius", self.min_radius as f64)?;
        ConfigError::require_ordered(
            "defend.min_radius",
            self.min_radius as f64,
            "defend.max_radius",
            self.max_radius as f64,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FightConfig {
    /// Delay between leaving the driver seat and taking the combat seat.
    pub dismount_delay_ms: u64,
    /// Delay between reseating and engaging.
    pub reseat_delay_ms: u64,
    pub combat_seat: u8,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            dismount_delay_ms: 500,
            reseat_delay_ms: 250,
            combat_seat: 1,
        }
    }
}

impl FightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat_seat == crate::Seat::DRIVER {
            return Err(ConfigError::NotPositive {
                field: "fight.combat_seat",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Utility weights of the stock profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileWeights {
    pub fight: f32,
    pub defend: f32,
    pub move_to: f32,
}

impl Default for ProfileWeights {
    fn default() -> Self {
        Self {
            fight: 200.0,
            defend: 40.0,
            move_to: 20.0,
        }
    }
}

impl ProfileWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("weights.fight", self.fight as f64)?;
        ConfigError::require_non_negative("weights.defend", self.defend as f64)?;
        ConfigError::require_non_negative("weights.move_to", self.move_to as f64)
    }
}

/// Everything the stock profiles are built from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    pub hostile: HostileSensorConfig,
    pub arrival: ArrivalSensorConfig,
    pub objective: ObjectiveSensorConfig,
    pub directional: DirectionalConfig,
    pub combat: CombatSensorConfig,
    pub movement: MoveConfig,
    pub follow: FollowConfig,
    pub defend: DefendConfig,
    pub fight: FightConfig,
    pub weights: ProfileWeights,
}

impl TacticsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hostile.validate()?;
        self.arrival.validate()?;
        self.objective.validate()?;
        self.directional.validate()?;
        self.combat.validate()?;
        self.movement.validate()?;
        self.follow.validate()?;
        self.defend.validate()?;
        self.fight.validate()?;
        self.weights.validate()
    }
}
