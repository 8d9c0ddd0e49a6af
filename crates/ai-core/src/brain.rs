use crate::fields::MOVE_TARGET;
use crate::{
    AgentId, BehaviorContext, BehaviorController, BehaviorKind, BrainEvent, BrainObserver,
    DamageEvent, Deferred, IdlePolicy, LineOfSightResult, Memory, MoveOutcome, Perception,
    Policy, Sensor, SensorEvent, TickContext, WorldMut,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How often the brain re-runs arbitration.
///
/// Sensors and the current behavior still tick every step; only the policy is staggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrainConfig {
    pub decide_every_ticks: u32,
    pub decide_offset_ticks: u32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            decide_every_ticks: 1,
            decide_offset_ticks: 0,
        }
    }
}

impl BrainConfig {
    /// Spreads brains sharing `decide_every_ticks` over different ticks by agent id.
    pub fn deterministic(agent: impl AgentId, decide_every_ticks: u32) -> Self {
        let every = decide_every_ticks.max(1);
        let offset = (agent.stable_id() % (every as u64)) as u32;
        Self {
            decide_every_ticks: every,
            decide_offset_ticks: offset,
        }
    }

    pub fn should_decide(&self, tick: u64) -> bool {
        let every = self.decide_every_ticks.max(1) as u64;
        ((tick + (self.decide_offset_ticks as u64)) % every) == 0
    }
}

/// Per-actor decision aggregate.
///
/// Owns memory, perception, the behavior controller and the arbitration policy. The host
/// calls [`Brain::tick`] once per simulation step and routes per-actor events into the
/// `on_*` entry points.
pub struct Brain<W>
where
    W: WorldMut + 'static,
{
    pub agent: W::Agent,
    pub config: BrainConfig,
    pub memory: Memory,
    pub perception: Perception<W>,
    pub controller: BehaviorController<W>,
    policy: Box<dyn Policy<W>>,
    deferred: Deferred<W>,
    observers: Vec<Box<dyn BrainObserver<W::Agent>>>,
}

impl<W> Brain<W>
where
    W: WorldMut + 'static,
{
    pub fn new(agent: W::Agent, policy: Box<dyn Policy<W>>) -> Self {
        Self {
            agent,
            config: BrainConfig::default(),
            memory: Memory::new(),
            perception: Perception::new(),
            controller: BehaviorController::new(),
            policy,
            deferred: Deferred::new(),
            observers: Vec::new(),
        }
    }

    /// A brain with no sensors that idles until a profile is installed.
    pub fn idle(agent: W::Agent) -> Self {
        Self::new(agent, Box::new(IdlePolicy))
    }

    pub fn with_config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn BrainObserver<W::Agent>>) {
        self.observers.push(observer);
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn current_kind(&self) -> BehaviorKind {
        self.controller.current_kind()
    }

    pub fn deferred(&self) -> &Deferred<W> {
        &self.deferred
    }

    /// Atomically swaps the sensor set and the arbitration policy.
    ///
    /// Memory and the running behavior are left alone; the next arbitration decides whether
    /// the running behavior survives.
    pub fn install(&mut self, sensors: Vec<Box<dyn Sensor<W>>>, policy: Box<dyn Policy<W>>) {
        self.perception.clear_sensors();
        for sensor in sensors {
            self.perception.add_sensor(sensor);
        }
        self.policy = policy;
        tracing::debug!(
            agent = ?self.agent,
            policy = self.policy.name(),
            sensors = self.perception.len(),
            "policy installed"
        );
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        self.memory.advance_to(ctx.now_ms);
        self.memory.prune();

        if !world.is_alive(self.agent) {
            return;
        }

        self.deferred.run_due(ctx, self.agent, world);
        self.perception
            .update(ctx, self.agent, &mut self.memory, &*world);

        if self.config.should_decide(ctx.tick) {
            let next = self.policy.choose_next_behavior(
                ctx,
                self.agent,
                &*world,
                &self.memory,
                self.controller.current(),
            );

            if let Some(next) = next {
                let from = self.controller.current_kind();
                let mut bctx = BehaviorContext {
                    tick: ctx,
                    agent: self.agent,
                    memory: &mut self.memory,
                    deferred: &mut self.deferred,
                };
                self.controller.change(next, &mut bctx, world);
                let to = self.controller.current_kind();
                if from != to {
                    self.notify(
                        ctx.tick,
                        BrainEvent::BehaviorChanged {
                            agent: self.agent,
                            from,
                            to,
                        },
                    );
                }
            }
        }

        let mut bctx = BehaviorContext {
            tick: ctx,
            agent: self.agent,
            memory: &mut self.memory,
            deferred: &mut self.deferred,
        };
        self.controller.update(&mut bctx, world);
    }

    /// Hook for when the actor enters play. Only notifies observers.
    pub fn on_deploy(&mut self, ctx: &TickContext) {
        self.notify(ctx.tick, BrainEvent::Deployed { agent: self.agent });
    }

    /// Routes a damage report to interested sensors. Returns the number of receivers.
    pub fn on_damage(
        &mut self,
        ctx: &TickContext,
        world: &W,
        event: DamageEvent<W::Agent>,
    ) -> usize {
        self.dispatch(ctx, world, SensorEvent::Damage(event))
    }

    /// Routes a line-of-sight query result to interested sensors.
    pub fn on_line_of_sight(
        &mut self,
        ctx: &TickContext,
        world: &W,
        result: LineOfSightResult<W::Agent>,
    ) -> usize {
        self.dispatch(ctx, world, SensorEvent::LineOfSight(result))
    }

    /// The host's navigation finished (or gave up on) the current movement.
    pub fn on_move_finished(&mut self, ctx: &TickContext, outcome: MoveOutcome) {
        self.memory.clear(MOVE_TARGET);
        self.notify(
            ctx.tick,
            BrainEvent::MoveFinished {
                agent: self.agent,
                outcome,
            },
        );
    }

    pub fn on_death(&mut self, ctx: &TickContext, world: &mut W) {
        self.reset(ctx, world);
    }

    pub fn on_undeploy(&mut self, ctx: &TickContext, world: &mut W) {
        self.reset(ctx, world);
    }

    /// Full reset, then drop the brain.
    pub fn destroy(mut self, ctx: &TickContext, world: &mut W) {
        self.reset(ctx, world);
        self.perception.clear_sensors();
        self.observers.clear();
    }

    fn reset(&mut self, ctx: &TickContext, world: &mut W) {
        self.perception.reset();
        self.memory.reset();
        self.deferred.clear();

        let mut bctx = BehaviorContext {
            tick: ctx,
            agent: self.agent,
            memory: &mut self.memory,
            deferred: &mut self.deferred,
        };
        self.controller.reset_all(&mut bctx, world);
        self.notify(ctx.tick, BrainEvent::Reset { agent: self.agent });
    }

    fn dispatch(&mut self, ctx: &TickContext, world: &W, event: SensorEvent<W::Agent>) -> usize {
        if !world.is_alive(self.agent) {
            return 0;
        }
        self.perception
            .dispatch(ctx, self.agent, &mut self.memory, world, &event)
    }

    fn notify(&mut self, tick: u64, event: BrainEvent<W::Agent>) {
        for observer in self.observers.iter_mut() {
            observer.notify(tick, &event);
        }
    }
}

/// Ticks brains in stable agent order.
pub fn tick_brains<W>(ctx: &TickContext, world: &mut W, brains: &mut [Brain<W>])
where
    W: WorldMut + 'static,
{
    brains.sort_by_key(|b| b.agent.stable_id());
    for brain in brains.iter_mut() {
        brain.tick(ctx, world);
    }
}
