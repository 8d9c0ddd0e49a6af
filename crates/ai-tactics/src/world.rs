use ai_core::{Vec3, WorldMut, WorldView};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeamId(pub u16);

/// A capturable point of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Objective {
    pub id: u32,
    pub position: Vec3,
    pub owner: Option<TeamId>,
}

/// A vehicle seat. Seat `0` is the driver's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Seat {
    pub vehicle: u64,
    pub index: u8,
}

impl Seat {
    pub const DRIVER: u8 = 0;

    pub fn is_driver(self) -> bool {
        self.index == Self::DRIVER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveSpeed {
    Sprint,
    Run,
    Walk,
}

/// Queries consumed by the tactical sensors and behaviors.
///
/// Every query answers `None` (or an empty/false value) for stale handles.
pub trait ActorWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;
    fn velocity(&self, agent: Self::Agent) -> Option<Vec3>;
    fn facing(&self, agent: Self::Agent) -> Option<Vec3>;
    fn team(&self, agent: Self::Agent) -> Option<TeamId>;

    /// Closest living actor of another team within `max_distance`.
    fn nearest_hostile(&self, agent: Self::Agent, max_distance: f32)
        -> Option<(Self::Agent, Vec3)>;

    fn objectives(&self) -> &[Objective];

    fn is_firing(&self, agent: Self::Agent) -> bool;

    fn seat(&self, agent: Self::Agent) -> Option<Seat>;

    /// Starts an asynchronous line-of-sight check. The host delivers the result later through
    /// `Brain::on_line_of_sight`.
    fn request_line_of_sight(&self, agent: Self::Agent, target: Self::Agent);

    fn is_vehicle_driver(&self, agent: Self::Agent) -> bool {
        self.seat(agent).is_some_and(Seat::is_driver)
    }
}

/// Fire-and-forget commands. Completion (if any) comes back as a brain event.
pub trait ActorWorldMut: WorldMut + ActorWorldView {
    fn move_to(&mut self, agent: Self::Agent, target: Vec3, speed: MoveSpeed);
    fn drive_to(&mut self, agent: Self::Agent, target: Vec3);
    fn aim_at(&mut self, agent: Self::Agent, target: Self::Agent);
    fn clear_aim(&mut self, agent: Self::Agent);
    fn defend_area(&mut self, agent: Self::Agent, center: Vec3, min_radius: f32, max_radius: f32);

    /// Hands the actor over to the host's own combat execution.
    fn engage(&mut self, agent: Self::Agent);

    fn exit_vehicle(&mut self, agent: Self::Agent);
    fn enter_vehicle(&mut self, agent: Self::Agent, seat: Seat);
}
