use crate::{Behavior, BehaviorContext, BehaviorKind, Idle, Throttle, WorldMut};

/// Per-instance lifecycle: `NotEntered -> Active -> Exited`. `Exited` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    NotEntered,
    Active,
    Exited,
}

/// Owns the single current behavior and drives its lifecycle hooks.
///
/// Starts with an [`Idle`] that counts as already entered.
pub struct BehaviorController<W>
where
    W: WorldMut + 'static,
{
    current: Box<dyn Behavior<W>>,
    state: Lifecycle,
    throttle: Throttle,
    enters: u64,
    exits: u64,
}

impl<W> Default for BehaviorController<W>
where
    W: WorldMut + 'static,
{
    fn default() -> Self {
        Self {
            current: Box::new(Idle),
            state: Lifecycle::Active,
            throttle: Throttle::new(0),
            enters: 0,
            exits: 0,
        }
    }
}

impl<W> BehaviorController<W>
where
    W: WorldMut + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &dyn Behavior<W> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> BehaviorKind {
        self.current.kind()
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Number of `enter` hooks run so far (the initial idle is not counted).
    pub fn enters(&self) -> u64 {
        self.enters
    }

    pub fn exits(&self) -> u64 {
        self.exits
    }

    /// Exits the current behavior, installs `next` and enters it.
    pub fn change(
        &mut self,
        next: Box<dyn Behavior<W>>,
        ctx: &mut BehaviorContext<'_, W>,
        world: &mut W,
    ) {
        let from = self.current.kind();
        self.exit_current(ctx, world);

        self.throttle = Throttle::new(next.update_interval_ms());
        self.current = next;
        self.state = Lifecycle::NotEntered;

        tracing::debug!(
            agent = ?ctx.agent,
            from = from.name(),
            to = self.current.kind().name(),
            "behavior change"
        );
        self.enter_current(ctx, world);
    }

    /// Hard reset: exits whatever runs and enters a fresh [`Idle`].
    pub fn reset_all(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        self.exit_current(ctx, world);
        self.throttle = Throttle::new(0);
        self.current = Box::new(Idle);
        self.state = Lifecycle::NotEntered;
        self.enter_current(ctx, world);
    }

    /// Throttled `update` of the current behavior.
    pub fn update(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if self.state != Lifecycle::Active {
            return;
        }
        if self.throttle.try_fire(ctx.now_ms()) {
            self.current.update(ctx, world);
        }
    }

    fn enter_current(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if self.state != Lifecycle::NotEntered {
            tracing::warn!(
                behavior = self.current.kind().name(),
                state = ?self.state,
                "refusing to enter a behavior twice"
            );
            return;
        }
        self.current.enter(ctx, world);
        self.state = Lifecycle::Active;
        self.enters += 1;
    }

    fn exit_current(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if self.state != Lifecycle::Active {
            return;
        }
        self.current.exit(ctx, world);
        self.state = Lifecycle::Exited;
        self.exits += 1;
    }
}
