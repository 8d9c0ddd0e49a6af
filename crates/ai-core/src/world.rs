use crate::AgentId;

/// Read-only world access.
///
/// The core only needs liveness; concrete subsystems (movement, combat, perception) define
/// extension traits with the queries they consume.
pub trait WorldView: 'static {
    type Agent: AgentId;

    /// `false` once the actor died, despawned or the handle went stale.
    fn is_alive(&self, agent: Self::Agent) -> bool;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
