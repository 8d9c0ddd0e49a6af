mod defend;
mod fight;
mod follow;
mod move_to;

pub use defend::Defend;
pub use fight::Fight;
pub use follow::{Follow, Waypoint};
pub use move_to::{MoveMode, MoveTo};
