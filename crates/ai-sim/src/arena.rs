//! A flat, obstacle-free arena: enough world to exercise every tactical command.

use std::cell::RefCell;
use std::collections::BTreeMap;

use ai_core::{DamageEvent, LineOfSightResult, MoveOutcome, Vec3, WorldMut, WorldView};
use ai_tactics::{ActorWorldMut, ActorWorldView, MoveSpeed, Objective, Seat, TeamId};
use serde::{Deserialize, Serialize};

/// Physical constants of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaRules {
    pub health: f32,
    pub sight_range: f32,
    pub weapon_range: f32,
    pub damage_per_second: f32,
    pub capture_radius: f32,
    pub sprint_speed: f32,
    pub run_speed: f32,
    pub walk_speed: f32,
    pub drive_speed: f32,
    /// Seats per vehicle, driver included.
    pub vehicle_seats: u8,
}

impl Default for ArenaRules {
    fn default() -> Self {
        Self {
            health: 100.0,
            sight_range: 120.0,
            weapon_range: 60.0,
            damage_per_second: 20.0,
            capture_radius: 10.0,
            sprint_speed: 6.0,
            run_speed: 4.0,
            walk_speed: 1.5,
            drive_speed: 14.0,
            vehicle_seats: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Order {
    Hold,
    Move {
        target: Vec3,
        speed: f32,
        driving: bool,
    },
    Defend {
        center: Vec3,
        max_radius: f32,
    },
    Engage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaActor {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: Vec3,
    pub team: TeamId,
    pub health: f32,
    pub seat: Option<Seat>,
    pub order: Order,
    pub aim: Option<u64>,
}

impl ArenaActor {
    pub fn new(team: TeamId, position: Vec3, health: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            facing: Vec3::Z,
            team,
            health,
            seat: None,
            order: Order::Hold,
            aim: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    pub position: Vec3,
}

/// Things that happened during [`ArenaWorld::step`] that brains need to hear about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaEvent {
    MoveFinished {
        agent: u64,
        outcome: MoveOutcome,
    },
    Damaged {
        agent: u64,
        event: DamageEvent<u64>,
    },
    LineOfSight {
        agent: u64,
        result: LineOfSightResult<u64>,
    },
    Died {
        agent: u64,
    },
    Captured {
        objective: u32,
        team: TeamId,
    },
}

#[derive(Debug, Default)]
pub struct ArenaWorld {
    pub rules: ArenaRules,
    pub actors: BTreeMap<u64, ArenaActor>,
    pub vehicles: BTreeMap<u64, Vehicle>,
    pub objectives: Vec<Objective>,
    los_requests: RefCell<Vec<(u64, u64)>>,
}

impl ArenaWorld {
    pub fn new(rules: ArenaRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn spawn(&mut self, id: u64, actor: ArenaActor) {
        self.actors.insert(id, actor);
    }

    pub fn spawn_vehicle(&mut self, id: u64, position: Vec3) {
        self.vehicles.insert(id, Vehicle { position });
    }

    pub fn pending_line_of_sight(&self) -> usize {
        self.los_requests.borrow().len()
    }

    fn live(&self, id: u64) -> Option<&ArenaActor> {
        self.actors.get(&id).filter(|a| a.is_alive())
    }

    fn live_mut(&mut self, id: u64) -> Option<&mut ArenaActor> {
        self.actors.get_mut(&id).filter(|a| a.is_alive())
    }

    fn speed(&self, speed: MoveSpeed) -> f32 {
        match speed {
            MoveSpeed::Sprint => self.rules.sprint_speed,
            MoveSpeed::Run => self.rules.run_speed,
            MoveSpeed::Walk => self.rules.walk_speed,
        }
    }

    fn seat_taken(&self, seat: Seat) -> bool {
        self.actors
            .values()
            .any(|a| a.is_alive() && a.seat == Some(seat))
    }

    /// Advances the arena by `dt_ms` and reports what brains should be told.
    pub fn step(&mut self, dt_ms: u64) -> Vec<ArenaEvent> {
        let dt = dt_ms as f32 / 1000.0;
        let mut events = Vec::new();
        self.resolve_line_of_sight(&mut events);
        self.advance_movement(dt, &mut events);
        self.resolve_fire(dt, &mut events);
        self.update_ownership(&mut events);
        events
    }

    fn resolve_line_of_sight(&mut self, events: &mut Vec<ArenaEvent>) {
        let requests = std::mem::take(&mut *self.los_requests.borrow_mut());
        for (agent, target) in requests {
            let (Some(me), Some(other)) = (self.live(agent), self.live(target)) else {
                continue;
            };
            let distance = me.position.distance(other.position);
            events.push(ArenaEvent::LineOfSight {
                agent,
                result: LineOfSightResult {
                    target,
                    hit: distance <= self.rules.sight_range,
                    miss_distance: (distance - self.rules.sight_range).max(0.0),
                },
            });
        }
    }

    fn advance_movement(&mut self, dt: f32, events: &mut Vec<ArenaEvent>) {
        let ids: Vec<u64> = self.actors.keys().copied().collect();
        for id in ids {
            let Some(actor) = self.live(id).cloned() else {
                continue;
            };
            let (target, speed, driving) = match actor.order {
                Order::Move {
                    target,
                    speed,
                    driving,
                } => (target, speed, driving),
                Order::Defend { center, max_radius }
                    if actor.position.distance(center) > max_radius =>
                {
                    (center, self.rules.walk_speed, false)
                }
                _ => {
                    if let Some(actor) = self.live_mut(id) {
                        actor.velocity = Vec3::ZERO;
                    }
                    continue;
                }
            };

            let vehicle = actor.seat.filter(|s| s.is_driver()).map(|s| s.vehicle);
            if driving && vehicle.is_none() {
                if let Some(actor) = self.live_mut(id) {
                    actor.order = Order::Hold;
                    actor.velocity = Vec3::ZERO;
                }
                events.push(ArenaEvent::MoveFinished {
                    agent: id,
                    outcome: MoveOutcome::Failed,
                });
                continue;
            }

            let offset = target - actor.position;
            let distance = offset.length();
            let stride = speed * dt;
            let arrived = distance <= stride.max(0.5);
            let delta = if arrived {
                offset
            } else {
                offset / distance * stride
            };

            if let Some(actor) = self.live_mut(id) {
                actor.position += delta;
                actor.velocity = if arrived || dt <= 0.0 {
                    Vec3::ZERO
                } else {
                    delta / dt
                };
                if delta.length_squared() > 0.0 {
                    actor.facing = delta.normalize();
                }
                if arrived && matches!(actor.order, Order::Move { .. }) {
                    actor.order = Order::Hold;
                    events.push(ArenaEvent::MoveFinished {
                        agent: id,
                        outcome: MoveOutcome::Succeeded,
                    });
                }
            }

            if let Some(vehicle) = vehicle {
                self.carry_vehicle(vehicle, id, delta);
            }
        }
    }

    fn carry_vehicle(&mut self, vehicle: u64, driver: u64, delta: Vec3) {
        if let Some(v) = self.vehicles.get_mut(&vehicle) {
            v.position += delta;
        }
        for (id, actor) in self.actors.iter_mut() {
            if *id != driver && actor.seat.is_some_and(|s| s.vehicle == vehicle) {
                actor.position += delta;
            }
        }
    }

    fn resolve_fire(&mut self, dt: f32, events: &mut Vec<ArenaEvent>) {
        let mut hits: Vec<(u64, u64, Vec3)> = Vec::new();
        for (&id, actor) in &self.actors {
            if !actor.is_alive() || actor.order != Order::Engage {
                continue;
            }
            let target = actor
                .aim
                .filter(|t| {
                    self.live(*t).is_some_and(|o| {
                        o.position.distance(actor.position) <= self.rules.weapon_range
                    })
                })
                .or_else(|| {
                    self.nearest_hostile(id, self.rules.weapon_range)
                        .map(|(t, _)| t)
                });
            if let Some(target) = target {
                hits.push((id, target, actor.position));
            }
        }

        let amount = self.rules.damage_per_second * dt;
        for (attacker, victim, origin) in hits {
            let Some(actor) = self.live_mut(victim) else {
                continue;
            };
            actor.health -= amount;
            let died = !actor.is_alive();
            if died {
                actor.seat = None;
                actor.velocity = Vec3::ZERO;
            }
            events.push(ArenaEvent::Damaged {
                agent: victim,
                event: DamageEvent {
                    attacker: Some(attacker),
                    amount,
                    origin: Some(origin),
                },
            });
            if died {
                tracing::info!(agent = victim, attacker, "actor killed");
                events.push(ArenaEvent::Died { agent: victim });
            }
        }
    }

    fn update_ownership(&mut self, events: &mut Vec<ArenaEvent>) {
        let radius = self.rules.capture_radius;
        for objective in self.objectives.iter_mut() {
            let mut present = self
                .actors
                .values()
                .filter(|a| a.is_alive() && a.position.distance(objective.position) <= radius)
                .map(|a| a.team);
            let Some(first) = present.next() else {
                continue;
            };
            if present.all(|t| t == first) && objective.owner != Some(first) {
                objective.owner = Some(first);
                events.push(ArenaEvent::Captured {
                    objective: objective.id,
                    team: first,
                });
            }
        }
    }
}

impl WorldView for ArenaWorld {
    type Agent = u64;

    fn is_alive(&self, agent: u64) -> bool {
        self.live(agent).is_some()
    }
}

impl WorldMut for ArenaWorld {}

impl ActorWorldView for ArenaWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.live(agent).map(|a| a.position)
    }

    fn velocity(&self, agent: u64) -> Option<Vec3> {
        self.live(agent).map(|a| a.velocity)
    }

    fn facing(&self, agent: u64) -> Option<Vec3> {
        self.live(agent).map(|a| a.facing)
    }

    fn team(&self, agent: u64) -> Option<TeamId> {
        self.live(agent).map(|a| a.team)
    }

    fn nearest_hostile(&self, agent: u64, max_distance: f32) -> Option<(u64, Vec3)> {
        let me = self.live(agent)?;
        self.actors
            .iter()
            .filter(|(id, other)| **id != agent && other.is_alive() && other.team != me.team)
            .map(|(id, other)| (*id, other.position, other.position.distance(me.position)))
            .filter(|(_, _, d)| *d <= max_distance)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(id, position, _)| (id, position))
    }

    fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    fn is_firing(&self, agent: u64) -> bool {
        self.live(agent).is_some_and(|a| a.order == Order::Engage)
            && self.nearest_hostile(agent, self.rules.weapon_range).is_some()
    }

    fn seat(&self, agent: u64) -> Option<Seat> {
        self.live(agent).and_then(|a| a.seat)
    }

    fn request_line_of_sight(&self, agent: u64, target: u64) {
        self.los_requests.borrow_mut().push((agent, target));
    }
}

impl ActorWorldMut for ArenaWorld {
    fn move_to(&mut self, agent: u64, target: Vec3, speed: MoveSpeed) {
        let speed = self.speed(speed);
        if let Some(actor) = self.live_mut(agent) {
            actor.order = Order::Move {
                target,
                speed,
                driving: false,
            };
        }
    }

    fn drive_to(&mut self, agent: u64, target: Vec3) {
        let speed = self.rules.drive_speed;
        if let Some(actor) = self.live_mut(agent) {
            actor.order = Order::Move {
                target,
                speed,
                driving: true,
            };
        }
    }

    fn aim_at(&mut self, agent: u64, target: u64) {
        if let Some(actor) = self.live_mut(agent) {
            actor.aim = Some(target);
        }
    }

    fn clear_aim(&mut self, agent: u64) {
        if let Some(actor) = self.live_mut(agent) {
            actor.aim = None;
        }
    }

    fn defend_area(&mut self, agent: u64, center: Vec3, _min_radius: f32, max_radius: f32) {
        if let Some(actor) = self.live_mut(agent) {
            actor.order = Order::Defend { center, max_radius };
        }
    }

    fn engage(&mut self, agent: u64) {
        if let Some(actor) = self.live_mut(agent) {
            actor.order = Order::Engage;
        }
    }

    fn exit_vehicle(&mut self, agent: u64) {
        if let Some(actor) = self.live_mut(agent) {
            actor.seat = None;
            actor.order = Order::Hold;
            actor.velocity = Vec3::ZERO;
        }
    }

    fn enter_vehicle(&mut self, agent: u64, seat: Seat) {
        let Some(vehicle) = self.vehicles.get(&seat.vehicle).copied() else {
            tracing::debug!(agent, vehicle = seat.vehicle, "no such vehicle");
            return;
        };
        if seat.index >= self.rules.vehicle_seats || self.seat_taken(seat) {
            tracing::debug!(agent, ?seat, "seat unavailable");
            return;
        }
        if let Some(actor) = self.live_mut(agent) {
            actor.seat = Some(seat);
            actor.position = vehicle.position;
        }
    }
}
