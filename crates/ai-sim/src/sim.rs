use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use ai_core::{tick_brains, Brain, BrainConfig, IdGenerator, TickContext};
use ai_tactics::{profiles, Objective, Seat, TeamId};
use ai_tools::{TraceLog, TraceObserver};
use ai_utility::InstallProfile;
use anyhow::Result;
use serde::Serialize;

use crate::arena::{ArenaActor, ArenaEvent, ArenaWorld};
use crate::config::ArenaConfig;

/// End-of-run snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub ticks: u64,
    pub survivors: BTreeMap<u16, usize>,
    pub objectives: BTreeMap<u32, Option<u16>>,
    pub behavior_changes: usize,
    pub captures: usize,
}

pub struct Simulation {
    config: ArenaConfig,
    world: ArenaWorld,
    brains: Vec<Brain<ArenaWorld>>,
    trace: Rc<RefCell<TraceLog>>,
    tick: u64,
    captures: usize,
}

impl Simulation {
    pub fn new(config: ArenaConfig) -> Result<Self> {
        config.validate()?;

        let mut world = ArenaWorld::new(config.rules);
        world.objectives = config
            .objectives
            .iter()
            .map(|o| Objective {
                id: o.id,
                position: o.position,
                owner: o.owner.map(TeamId),
            })
            .collect();

        let infantry = profiles::infantry::<ArenaWorld>(&config.tactics);
        let driver = profiles::vehicle_driver::<ArenaWorld>(&config.tactics);
        let trace = Rc::new(RefCell::new(TraceLog::default()));
        let mut ids = IdGenerator::new();
        let mut brains = Vec::new();

        for squad in &config.squads {
            let team = TeamId(squad.team);
            for i in 0..squad.infantry {
                let id = ids.next_id();
                let offset = ai_core::Vec3::new(0.0, 0.0, i as f32 * 3.0);
                world.spawn(
                    id,
                    ArenaActor::new(team, squad.spawn + offset, config.rules.health),
                );
                let mut brain = Brain::idle(id);
                brain.install_profile(&infantry);
                brains.push(brain);
            }
            for i in 0..squad.vehicles {
                let vehicle = ids.next_id();
                let position = squad.spawn + ai_core::Vec3::new(0.0, 0.0, -10.0 - i as f32 * 8.0);
                world.spawn_vehicle(vehicle, position);

                let id = ids.next_id();
                let mut actor = ArenaActor::new(team, position, config.rules.health);
                actor.seat = Some(Seat {
                    vehicle,
                    index: Seat::DRIVER,
                });
                world.spawn(id, actor);
                let mut brain = Brain::idle(id);
                brain.install_profile(&driver);
                brains.push(brain);
            }
        }

        let deploy = TickContext::new(0, 0, config.seed);
        for brain in brains.iter_mut() {
            brain.config = BrainConfig::deterministic(brain.agent, config.decide_every_ticks);
            brain.add_observer(Box::new(TraceObserver::new(trace.clone())));
            brain.on_deploy(&deploy);
        }
        tracing::info!(
            actors = brains.len(),
            objectives = world.objectives.len(),
            seed = config.seed,
            "arena ready"
        );

        Ok(Self {
            config,
            world,
            brains,
            trace,
            tick: 0,
            captures: 0,
        })
    }

    pub fn world(&self) -> &ArenaWorld {
        &self.world
    }

    pub fn brains(&self) -> &[Brain<ArenaWorld>] {
        &self.brains
    }

    pub fn trace(&self) -> Ref<'_, TraceLog> {
        self.trace.borrow()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// One simulation step: brains decide, then the arena moves and shoots.
    pub fn step(&mut self) {
        self.tick += 1;
        let ctx = TickContext::new(
            self.tick,
            self.tick * self.config.tick_ms,
            self.config.seed,
        );
        tick_brains(&ctx, &mut self.world, &mut self.brains);

        for event in self.world.step(self.config.tick_ms) {
            self.route(&ctx, event);
        }
    }

    pub fn run(&mut self) -> Summary {
        while self.tick < self.config.ticks {
            self.step();
        }
        self.summary()
    }

    fn route(&mut self, ctx: &TickContext, event: ArenaEvent) {
        let agent = match event {
            ArenaEvent::Captured { objective, team } => {
                self.captures += 1;
                tracing::info!(tick = ctx.tick, objective, team = team.0, "objective captured");
                return;
            }
            ArenaEvent::MoveFinished { agent, .. }
            | ArenaEvent::Damaged { agent, .. }
            | ArenaEvent::LineOfSight { agent, .. }
            | ArenaEvent::Died { agent } => agent,
        };
        let Ok(index) = self.brains.binary_search_by_key(&agent, |b| b.agent) else {
            tracing::warn!(agent, "event for an actor without a brain");
            return;
        };
        let brain = &mut self.brains[index];

        match event {
            ArenaEvent::MoveFinished { outcome, .. } => brain.on_move_finished(ctx, outcome),
            ArenaEvent::Damaged { event, .. } => {
                brain.on_damage(ctx, &self.world, event);
            }
            ArenaEvent::LineOfSight { result, .. } => {
                brain.on_line_of_sight(ctx, &self.world, result);
            }
            ArenaEvent::Died { .. } => brain.on_death(ctx, &mut self.world),
            ArenaEvent::Captured { .. } => {}
        }
    }

    pub fn summary(&self) -> Summary {
        let mut survivors = BTreeMap::new();
        for squad in &self.config.squads {
            survivors.entry(squad.team).or_insert(0);
        }
        for actor in self.world.actors.values().filter(|a| a.is_alive()) {
            *survivors.entry(actor.team.0).or_insert(0) += 1;
        }
        Summary {
            ticks: self.tick,
            survivors,
            objectives: self
                .world
                .objectives
                .iter()
                .map(|o| (o.id, o.owner.map(|t| t.0)))
                .collect(),
            behavior_changes: self
                .trace
                .borrow()
                .events
                .iter()
                .filter(|e| e.tag == "brain.behavior_changed")
                .count(),
            captures: self.captures,
        }
    }
}
