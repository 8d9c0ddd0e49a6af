//! Stock profiles.

use ai_core::{Behavior, Idle};
use ai_utility::{Profile, ScoreContext};

use crate::behaviors::{Defend, Fight, MoveTo};
use crate::fields::{hostile, ARRIVED, IN_COMBAT, MOVE_TARGET};
use crate::sensors::{
    objective_points, ArrivalSensor, CombatSensor, DirectionalSensor, HostileSensor,
    ObjectiveSensor,
};
use crate::{ActorWorldMut, TacticsConfig};

pub const INFANTRY: &str = "infantry";
pub const VEHICLE_DRIVER: &str = "vehicle_driver";

fn flag_score<W: ActorWorldMut>(
    weight: f32,
) -> impl Fn(&ScoreContext<'_, W>) -> f32 + 'static {
    move |ctx| {
        if ctx.memory.has(IN_COMBAT) {
            weight
        } else {
            0.0
        }
    }
}

/// Foot soldier: fights when in combat, holds objectives it reached, otherwise heads for the
/// nearest contested objective.
pub fn infantry<W>(config: &TacticsConfig) -> Profile<W>
where
    W: ActorWorldMut + 'static,
{
    let c = *config;
    Profile::new(INFANTRY)
        .with_sensor(move || Box::new(HostileSensor::new(c.hostile)))
        .with_sensor(move || Box::new(CombatSensor::new(c.combat)))
        .with_sensor(move || Box::new(ObjectiveSensor::new(c.objective)))
        .with_sensor(move || {
            Box::new(ArrivalSensor::<W>::new(c.arrival).with_points(objective_points()))
        })
        .with_scored("fight", flag_score(c.weights.fight), move |_| {
            Box::new(Fight::new(c.fight))
        })
        .with_scored(
            "defend",
            move |ctx: &ScoreContext<'_, W>| {
                if ctx.memory.has(ARRIVED) {
                    c.weights.defend
                } else {
                    0.0
                }
            },
            move |ctx: &ScoreContext<'_, W>| -> Box<dyn Behavior<W>> {
                match ctx.memory.get(ARRIVED) {
                    Some(center) => Box::new(Defend::new(*center, &c.defend)),
                    None => Box::new(Idle),
                }
            },
        )
        .with_scored(
            "move",
            move |ctx: &ScoreContext<'_, W>| {
                if ctx.memory.has(MOVE_TARGET) {
                    c.weights.move_to
                } else {
                    0.0
                }
            },
            move |ctx: &ScoreContext<'_, W>| -> Box<dyn Behavior<W>> {
                let Some(target) = ctx.memory.get(MOVE_TARGET) else {
                    return Box::new(Idle);
                };
                let aim = ctx.memory.get(hostile::<W::Agent>()).copied();
                Box::new(
                    MoveTo::on_foot(*target, &c.movement)
                        .aiming_at(aim)
                        .watching(MOVE_TARGET),
                )
            },
        )
}

/// Vehicle driver: drives toward objectives ahead of it and bails into the combat seat when
/// contact is made.
pub fn vehicle_driver<W>(config: &TacticsConfig) -> Profile<W>
where
    W: ActorWorldMut + 'static,
{
    let c = *config;
    Profile::new(VEHICLE_DRIVER)
        .with_sensor(move || Box::new(HostileSensor::new(c.hostile)))
        .with_sensor(move || Box::new(CombatSensor::new(c.combat)))
        .with_sensor(move || {
            let sensor = DirectionalSensor::<W>::vehicle(c.directional);
            Box::new(sensor.with_points(objective_points()))
        })
        .with_scored("fight", flag_score(c.weights.fight), move |_| {
            Box::new(Fight::new(c.fight))
        })
        .with_scored(
            "drive",
            move |ctx: &ScoreContext<'_, W>| {
                if ctx.memory.has(MOVE_TARGET) && ctx.world.is_vehicle_driver(ctx.agent) {
                    c.weights.move_to
                } else {
                    0.0
                }
            },
            move |ctx: &ScoreContext<'_, W>| -> Box<dyn Behavior<W>> {
                match ctx.memory.get(MOVE_TARGET) {
                    Some(target) => Box::new(
                        MoveTo::<W::Agent>::driving(*target, &c.movement).watching(MOVE_TARGET),
                    ),
                    None => Box::new(Idle),
                }
            },
        )
}
