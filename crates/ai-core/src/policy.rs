use crate::{Behavior, BehaviorKind, Idle, Memory, TickContext, WorldMut};

/// Arbitration seam: decides what the brain should be doing next.
///
/// Returning `None` keeps the current behavior running untouched; returning a behavior makes
/// the controller exit the current one and enter the new one.
pub trait Policy<W>: 'static
where
    W: WorldMut + 'static,
{
    fn choose_next_behavior(
        &mut self,
        tick: &TickContext,
        agent: W::Agent,
        world: &W,
        memory: &Memory,
        current: &dyn Behavior<W>,
    ) -> Option<Box<dyn Behavior<W>>>;

    /// Label for logs and traces (usually the installed profile's name).
    fn name(&self) -> &str {
        "policy"
    }
}

/// Policy of a brain with no profile installed: settle into [`Idle`] and stay there.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePolicy;

impl<W> Policy<W> for IdlePolicy
where
    W: WorldMut + 'static,
{
    fn choose_next_behavior(
        &mut self,
        _tick: &TickContext,
        _agent: W::Agent,
        _world: &W,
        _memory: &Memory,
        current: &dyn Behavior<W>,
    ) -> Option<Box<dyn Behavior<W>>> {
        if current.kind() == BehaviorKind::IDLE {
            None
        } else {
            Some(Box::new(Idle))
        }
    }

    fn name(&self) -> &str {
        "idle"
    }
}
