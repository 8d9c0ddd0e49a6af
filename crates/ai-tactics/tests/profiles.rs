mod support;

use ai_core::{BehaviorKind, Brain, DamageEvent, MoveOutcome, TickContext, Vec3};
use ai_tactics::fields::{ARRIVED, IN_COMBAT, MOVE_TARGET};
use ai_tactics::profiles::{infantry, vehicle_driver, INFANTRY, VEHICLE_DRIVER};
use ai_tactics::{MoveSpeed, Seat, TacticsConfig};
use ai_utility::InstallProfile;
use support::{Actor, Command, TestWorld};

const ME: u64 = 1;

fn at(tick: u64) -> TickContext {
    TickContext::new(tick, tick * 250, 0xC0FFEE)
}

fn infantry_brain() -> Brain<TestWorld> {
    let mut brain = Brain::idle(ME);
    brain.install_profile(&infantry(&TacticsConfig::default()));
    brain
}

#[test]
fn infantry_moves_then_defends_then_fights() {
    let objective = Vec3::new(60.0, 0.0, 0.0);
    let mut world = TestWorld::default()
        .with_actor(ME, Actor::at(0, Vec3::ZERO))
        .with_objective(1, objective, None);
    let mut brain = infantry_brain();
    assert_eq!(brain.policy_name(), INFANTRY);
    assert_eq!(brain.perception.len(), 4);

    brain.tick(&at(0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::MOVE_TO);
    assert_eq!(brain.memory.get(MOVE_TARGET), Some(&objective));
    assert_eq!(
        world.commands,
        vec![Command::MoveTo(ME, objective, MoveSpeed::Run)]
    );

    // The host moves the actor; the same target keeps the running move.
    world.actor_mut(ME).position = Vec3::new(30.0, 0.0, 0.0);
    brain.tick(&at(1), &mut world);
    assert_eq!(world.commands.len(), 1);

    world.actor_mut(ME).position = Vec3::new(58.0, 0.0, 0.0);
    brain.on_move_finished(&at(2), MoveOutcome::Succeeded);
    brain.tick(&at(2), &mut world);
    assert!(brain.memory.has(ARRIVED));
    assert_eq!(brain.current_kind(), BehaviorKind::DEFEND);

    world.actor_mut(ME).firing = true;
    brain.tick(&at(3), &mut world);
    assert!(brain.memory.has(IN_COMBAT));
    assert_eq!(brain.current_kind(), BehaviorKind::FIGHT);
    assert_eq!(world.commands.last(), Some(&Command::Engage(ME)));
}

#[test]
fn damage_routes_through_the_brain_into_combat() {
    let mut world = TestWorld::default().with_actor(ME, Actor::at(0, Vec3::ZERO));
    let mut brain = infantry_brain();

    brain.tick(&at(0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::IDLE);

    let receivers = brain.on_damage(
        &at(1),
        &world,
        DamageEvent {
            attacker: Some(5),
            amount: 12.0,
            origin: Some(Vec3::X),
        },
    );
    assert_eq!(receivers, 1);
    brain.tick(&at(1), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::FIGHT);
}

#[test]
fn combat_ends_when_the_flag_expires() {
    let mut world = TestWorld::default().with_actor(ME, Actor::at(0, Vec3::ZERO));
    let mut brain = infantry_brain();
    brain.tick(&TickContext::new(0, 0, 1), &mut world);

    brain.on_damage(
        &TickContext::new(1, 0, 1),
        &world,
        DamageEvent {
            attacker: None,
            amount: 1.0,
            origin: None,
        },
    );
    brain.tick(&TickContext::new(1, 0, 1), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::FIGHT);

    brain.tick(&TickContext::new(2, 9_999, 1), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::FIGHT);

    brain.tick(&TickContext::new(3, 10_000, 1), &mut world);
    assert!(!brain.memory.has(IN_COMBAT));
    assert_eq!(brain.current_kind(), BehaviorKind::IDLE);
}

#[test]
fn death_resets_and_dead_actors_do_nothing() {
    let mut world = TestWorld::default()
        .with_actor(ME, Actor::at(0, Vec3::ZERO))
        .with_objective(1, Vec3::new(40.0, 0.0, 0.0), None);
    let mut brain = infantry_brain();

    brain.tick(&at(0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::MOVE_TO);

    world.actor_mut(ME).alive = false;
    brain.on_death(&at(1), &mut world);
    assert!(brain.memory.is_empty());
    assert_eq!(brain.current_kind(), BehaviorKind::IDLE);

    let issued = world.commands.len();
    for tick in 2..10 {
        brain.tick(&at(tick), &mut world);
    }
    assert_eq!(world.commands.len(), issued);
    assert_eq!(brain.current_kind(), BehaviorKind::IDLE);
}

#[test]
fn driver_drives_forward_then_bails_into_the_combat_seat() {
    let mut actor = Actor::at(0, Vec3::ZERO).driving(4);
    actor.facing = Vec3::X;
    let mut world = TestWorld::default()
        .with_actor(ME, actor)
        .with_objective(1, Vec3::new(150.0, 0.0, 0.0), None)
        .with_objective(2, Vec3::new(-150.0, 0.0, 0.0), None);
    let mut brain = Brain::idle(ME);
    brain.install_profile(&vehicle_driver(&TacticsConfig::default()));
    assert_eq!(brain.policy_name(), VEHICLE_DRIVER);

    brain.tick(&at(0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::MOVE_TO);
    let target = *brain.memory.get(MOVE_TARGET).expect("directional target");
    assert_eq!(world.commands, vec![Command::DriveTo(ME, target)]);

    world.actor_mut(ME).firing = true;
    brain.tick(&at(1), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind::FIGHT);
    assert_eq!(world.commands.last(), Some(&Command::ExitVehicle(ME)));

    // 250 ms per tick: reseat after 500 ms, engage 250 ms later.
    for tick in 2..=5 {
        brain.tick(&at(tick), &mut world);
    }
    let seat = Seat {
        vehicle: 4,
        index: 1,
    };
    assert_eq!(world.actors[&ME].seat, Some(seat));
    assert_eq!(
        &world.commands[1..],
        &[
            Command::ExitVehicle(ME),
            Command::EnterVehicle(ME, seat),
            Command::Engage(ME),
        ]
    );
}

#[test]
fn reinstalling_keeps_the_running_behavior() {
    let mut world = TestWorld::default()
        .with_actor(ME, Actor::at(0, Vec3::ZERO))
        .with_objective(1, Vec3::new(40.0, 0.0, 0.0), None);
    let mut brain = infantry_brain();
    brain.tick(&at(0), &mut world);
    let enters = brain.controller.enters();

    brain.install_profile(&infantry(&TacticsConfig::default()));
    assert_eq!(brain.current_kind(), BehaviorKind::MOVE_TO);
    brain.tick(&at(1), &mut world);
    assert_eq!(brain.controller.enters(), enters);
}
