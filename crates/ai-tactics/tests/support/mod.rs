#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use ai_core::{Vec3, WorldMut, WorldView};
use ai_tactics::{ActorWorldMut, ActorWorldView, MoveSpeed, Objective, Seat, TeamId};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveTo(u64, Vec3, MoveSpeed),
    DriveTo(u64, Vec3),
    AimAt(u64, u64),
    ClearAim(u64),
    Defend(u64, Vec3, f32, f32),
    Engage(u64),
    ExitVehicle(u64),
    EnterVehicle(u64, Seat),
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: Vec3,
    pub team: TeamId,
    pub alive: bool,
    pub firing: bool,
    pub seat: Option<Seat>,
}

impl Actor {
    pub fn at(team: u16, position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            facing: Vec3::Z,
            team: TeamId(team),
            alive: true,
            firing: false,
            seat: None,
        }
    }

    pub fn driving(mut self, vehicle: u64) -> Self {
        self.seat = Some(Seat {
            vehicle,
            index: Seat::DRIVER,
        });
        self
    }
}

/// Scripted world: actors by id, objectives, and a log of every command issued.
#[derive(Debug, Default)]
pub struct TestWorld {
    pub actors: BTreeMap<u64, Actor>,
    pub objectives: Vec<Objective>,
    pub commands: Vec<Command>,
    pub los_requests: RefCell<Vec<(u64, u64)>>,
}

impl TestWorld {
    pub fn with_actor(mut self, id: u64, actor: Actor) -> Self {
        self.actors.insert(id, actor);
        self
    }

    pub fn with_objective(mut self, id: u32, position: Vec3, owner: Option<u16>) -> Self {
        self.objectives.push(Objective {
            id,
            position,
            owner: owner.map(TeamId),
        });
        self
    }

    pub fn actor_mut(&mut self, id: u64) -> &mut Actor {
        self.actors.get_mut(&id).expect("actor exists")
    }

    fn live(&self, id: u64) -> Option<&Actor> {
        self.actors.get(&id).filter(|a| a.alive)
    }
}

impl WorldView for TestWorld {
    type Agent = u64;

    fn is_alive(&self, agent: u64) -> bool {
        self.live(agent).is_some()
    }
}

impl WorldMut for TestWorld {}

impl ActorWorldView for TestWorld {
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
            .filter(|(id, other)| **id != agent && other.alive && other.team != me.team)
            .map(|(id, other)| (*id, other.position, other.position.distance(me.position)))
            .filter(|(_, _, d)| *d <= max_distance)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(id, pos, _)| (id, pos))
    }

    fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    fn is_firing(&self, agent: u64) -> bool {
        self.live(agent).is_some_and(|a| a.firing)
    }

    fn seat(&self, agent: u64) -> Option<Seat> {
        self.live(agent).and_then(|a| a.seat)
    }

    fn request_line_of_sight(&self, agent: u64, target: u64) {
        self.los_requests.borrow_mut().push((agent, target));
    }
}

impl ActorWorldMut for TestWorld {
    fn move_to(&mut self, agent: u64, target: Vec3, speed: MoveSpeed) {
        self.commands.push(Command::MoveTo(agent, target, speed));
    }

    fn drive_to(&mut self, agent: u64, target: Vec3) {
        self.commands.push(Command::DriveTo(agent, target));
    }

    fn aim_at(&mut self, agent: u64, target: u64) {
        self.commands.push(Command::AimAt(agent, target));
    }

    fn clear_aim(&mut self, agent: u64) {
        self.commands.push(Command::ClearAim(agent));
    }

    fn defend_area(&mut self, agent: u64, center: Vec3, min_radius: f32, max_radius: f32) {
        self.commands
            .push(Command::Defend(agent, center, min_radius, max_radius));
    }

    fn engage(&mut self, agent: u64) {
        self.commands.push(Command::Engage(agent));
    }

    fn exit_vehicle(&mut self, agent: u64) {
        if let Some(actor) = self.actors.get_mut(&agent) {
            actor.seat = None;
        }
        self.commands.push(Command::ExitVehicle(agent));
    }

    fn enter_vehicle(&mut self, agent: u64, seat: Seat) {
        if let Some(actor) = self.actors.get_mut(&agent) {
            actor.seat = Some(seat);
        }
        self.commands.push(Command::EnterVehicle(agent, seat));
    }
}
