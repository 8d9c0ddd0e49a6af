use ai_core::{DeterministicRng, Sensor, SensorContext, SensorKind, Vec3};

use crate::fields::MOVE_TARGET;
use crate::sensors::{flat, PointProvider};
use crate::{ActorWorldView, DirectionalConfig};

/// Which actors the sensor serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionalMode {
    /// Only runs while the actor drives a vehicle.
    Vehicle,
    /// Only runs while the actor is not seated.
    OnFoot,
}

/// Chooses the next move target along the actor's current direction of travel.
///
/// Forward intent comes from velocity when moving, else the last committed intent, else the
/// facing direction. Candidates within arrival distance are skipped; while moving, candidates
/// behind the intent are too. The rest are scored on a distance band plus alignment with the
/// intent plus bounded jitter, which is wider before any intent has been committed.
pub struct DirectionalSensor<W>
where
    W: ActorWorldView + 'static,
{
    config: DirectionalConfig,
    mode: DirectionalMode,
    points: Option<PointProvider<W>>,
    intent: Option<Vec3>,
    warned: bool,
}

impl<W> DirectionalSensor<W>
where
    W: ActorWorldView + 'static,
{
    pub const KIND: SensorKind = SensorKind("directional");

    pub fn new(mode: DirectionalMode, config: DirectionalConfig) -> Self {
        Self {
            config,
            mode,
            points: None,
            intent: None,
            warned: false,
        }
    }

    pub fn vehicle(config: DirectionalConfig) -> Self {
        Self::new(DirectionalMode::Vehicle, config)
    }

    pub fn on_foot(config: DirectionalConfig) -> Self {
        Self::new(DirectionalMode::OnFoot, config)
    }

    pub fn with_points(mut self, points: PointProvider<W>) -> Self {
        self.points = Some(points);
        self
    }

    pub fn mode(&self) -> DirectionalMode {
        self.mode
    }

    /// `true` once an update ran without a point provider (logged a single time).
    pub fn warned_missing_points(&self) -> bool {
        self.warned
    }

    /// Last committed travel direction (unit length, ground plane).
    pub fn intent(&self) -> Option<Vec3> {
        self.intent
    }

    fn applies_to(&self, world: &W, agent: W::Agent) -> bool {
        match self.mode {
            DirectionalMode::Vehicle => world.is_vehicle_driver(agent),
            DirectionalMode::OnFoot => world.seat(agent).is_none(),
        }
    }

    /// Distance band score in `[0, 1]`.
    pub fn band_score(&self, distance: f32) -> f32 {
        let c = &self.config;
        if distance < c.near_distance {
            (distance / c.near_distance).max(0.0)
        } else if distance <= c.far_distance {
            1.0
        } else if distance < c.outer_distance {
            1.0 - (distance - c.far_distance) / (c.outer_distance - c.far_distance)
        } else {
            0.0
        }
    }
}

impl<W> Sensor<W> for DirectionalSensor<W>
where
    W: ActorWorldView + 'static,
{
    fn kind(&self) -> SensorKind {
        Self::KIND
    }

    fn interval_ms(&self) -> u64 {
        self.config.interval_ms
    }

    fn update(&mut self, ctx: &mut SensorContext<'_, W::Agent>, world: &W) {
        let Some(provider) = self.points.clone() else {
            if !self.warned {
                tracing::warn!(agent = ?ctx.agent, "directional sensor has no point provider");
                self.warned = true;
            }
            return;
        };
        if ctx.memory.has(MOVE_TARGET) || !self.applies_to(world, ctx.agent) {
            return;
        }
        let Some(position) = world.position(ctx.agent) else {
            return;
        };

        let velocity = world.velocity(ctx.agent).map(flat).unwrap_or(Vec3::ZERO);
        let moving = velocity.length() > self.config.moving_speed;
        let cold = self.intent.is_none();
        let intent = if moving {
            Some(velocity.normalize_or_zero())
        } else {
            self.intent.or_else(|| {
                world
                    .facing(ctx.agent)
                    .map(|f| flat(f).normalize_or_zero())
                    .filter(|f| *f != Vec3::ZERO)
            })
        };
        let jitter = if cold {
            self.config.cold_jitter
        } else {
            self.config.warm_jitter
        };

        let mut best: Option<(f32, Vec3, Vec3)> = None;
        for point in provider(world, ctx.agent) {
            let offset = flat(point - position);
            let distance = offset.length();
            if distance <= self.config.arrival_distance {
                continue;
            }
            let dir = offset / distance;
            let alignment = intent.map_or(0.0, |i| dir.dot(i));
            if moving && alignment < self.config.behind_dot {
                continue;
            }

            let score = self.band_score(distance)
                + self.config.alignment_weight * alignment
                + ctx.rng.next_f32_range(-jitter, jitter);
            if best.map_or(true, |(s, _, _)| score > s) {
                best = Some((score, point, dir));
            }
        }

        let Some((score, target, dir)) = best else {
            return;
        };
        ctx.memory.set(MOVE_TARGET, target, Some(self.config.ttl_ms));
        self.intent = Some(dir);
        tracing::trace!(agent = ?ctx.agent, ?target, score, moving, "directional target committed");
    }

    fn reset(&mut self) {
        self.intent = None;
    }
}
