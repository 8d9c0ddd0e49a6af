mod arrival;
mod combat;
mod directional;
mod hostile;
mod objective;

use std::rc::Rc;

use ai_core::{Vec3, WorldView};

use crate::ActorWorldView;

pub use arrival::ArrivalSensor;
pub use combat::CombatSensor;
pub use directional::{DirectionalMode, DirectionalSensor};
pub use hostile::{detection_probability, HostileSensor};
pub use objective::ObjectiveSensor;

/// Supplies candidate points for a sensor. Shared between the sensor instances a profile builds.
pub type PointProvider<W> = Rc<dyn Fn(&W, <W as WorldView>::Agent) -> Vec<Vec3>>;

/// Positions of every objective, owned or not.
pub fn objective_points<W>() -> PointProvider<W>
where
    W: ActorWorldView + 'static,
{
    Rc::new(|world: &W, _agent: W::Agent| -> Vec<Vec3> {
        world.objectives().iter().map(|o| o.position).collect()
    })
}

/// Projection on the ground plane.
pub(crate) fn flat(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
