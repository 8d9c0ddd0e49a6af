use ai_core::{
    Behavior, BehaviorContext, BehaviorKind, Brain, Idle, Memory, MemoryKey, Sensor,
    SensorContext, SensorKind, TickContext, Vec3, WorldMut, WorldView,
};
use ai_utility::{InstallProfile, Profile, ScoreContext, ScoringEntry, TaskSelector};

const IN_COMBAT: MemoryKey<bool> = MemoryKey::new(300, "in_combat");

#[derive(Default)]
struct World {
    target: Vec3,
    hostile: bool,
    log: Vec<String>,
}

impl WorldView for World {
    type Agent = u64;

    fn is_alive(&self, _agent: u64) -> bool {
        true
    }
}

impl WorldMut for World {}

struct Tagged(&'static str);

impl Behavior<World> for Tagged {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind(self.0)
    }

    fn enter(&mut self, _ctx: &mut BehaviorContext<'_, World>, world: &mut World) {
        world.log.push(format!("enter:{}", self.0));
    }

    fn exit(&mut self, _ctx: &mut BehaviorContext<'_, World>, world: &mut World) {
        world.log.push(format!("exit:{}", self.0));
    }
}

struct Goto(Vec3);

impl Behavior<World> for Goto {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::MOVE_TO
    }

    fn enter(&mut self, _ctx: &mut BehaviorContext<'_, World>, world: &mut World) {
        world.log.push(format!("enter:goto:{}", self.0.x));
    }

    fn exit(&mut self, _ctx: &mut BehaviorContext<'_, World>, world: &mut World) {
        world.log.push(format!("exit:goto:{}", self.0.x));
    }

    fn target_position(&self) -> Option<Vec3> {
        Some(self.0)
    }
}

/// Marks the actor in combat for ten seconds whenever the world reports a hostile.
struct CombatSensor;

impl Sensor<World> for CombatSensor {
    fn kind(&self) -> SensorKind {
        SensorKind("combat")
    }

    fn interval_ms(&self) -> u64 {
        0
    }

    fn update(&mut self, ctx: &mut SensorContext<'_, u64>, world: &World) {
        if world.hostile {
            ctx.memory.set(IN_COMBAT, true, Some(10_000));
        }
    }
}

fn constant(label: &'static str, score: f32) -> ScoringEntry<World> {
    ScoringEntry::new(label, move |_| score, move |_| Box::new(Tagged(label)))
}

fn decide(
    selector: &mut TaskSelector<World>,
    world: &World,
    memory: &Memory,
    current: &dyn Behavior<World>,
) -> Option<Box<dyn Behavior<World>>> {
    let tick = TickContext::new(0, 0, 0);
    selector.choose_next_behavior(&tick, 1, world, memory, current)
}

#[test]
fn highest_score_wins() {
    let profile = Profile::new("p")
        .with_entry(constant("low", 1.0))
        .with_entry(constant("high", 9.0))
        .with_entry(constant("mid", 4.0));
    let mut selector = profile.selector();
    let world = World::default();
    let memory = Memory::new();

    let next = decide(&mut selector, &world, &memory, &Idle).expect("switch");
    assert_eq!(next.kind(), BehaviorKind("high"));
    assert_eq!(selector.last_winner(), Some("high"));
    assert_eq!(
        selector.last_scores(),
        &[("low", 1.0), ("high", 9.0), ("mid", 4.0)]
    );
}

#[test]
fn ties_resolve_to_the_first_entry() {
    let profile = Profile::new("p")
        .with_entry(constant("first", 5.0))
        .with_entry(constant("second", 5.0));
    let mut selector = profile.selector();
    let world = World::default();
    let memory = Memory::new();

    for _ in 0..10 {
        let next = decide(&mut selector, &world, &memory, &Idle).expect("switch");
        assert_eq!(next.kind(), BehaviorKind("first"));
    }
}

#[test]
fn no_positive_score_falls_back_to_idle() {
    let profile = Profile::new("p")
        .with_entry(constant("zero", 0.0))
        .with_entry(constant("negative", -3.0));
    let mut selector = profile.selector();
    let world = World::default();
    let memory = Memory::new();

    // Already idle: nothing to do.
    assert!(decide(&mut selector, &world, &memory, &Idle).is_none());
    assert_eq!(selector.last_winner(), None);

    let next = decide(&mut selector, &world, &memory, &Tagged("fight")).expect("idle");
    assert_eq!(next.kind(), BehaviorKind::IDLE);
}

#[test]
fn empty_profile_idles() {
    let mut selector: TaskSelector<World> = Profile::new("empty").selector();
    let world = World::default();
    let memory = Memory::new();

    assert!(decide(&mut selector, &world, &memory, &Idle).is_none());
    let next = decide(&mut selector, &world, &memory, &Tagged("defend")).expect("idle");
    assert_eq!(next.kind(), BehaviorKind::IDLE);
    assert!(selector.last_scores().is_empty());
}

#[test]
fn nan_scores_never_win() {
    let profile = Profile::new("p")
        .with_entry(constant("broken", f32::NAN))
        .with_entry(constant("fine", 0.5));
    let mut selector = profile.selector();
    let world = World::default();
    let memory = Memory::new();

    let next = decide(&mut selector, &world, &memory, &Idle).expect("switch");
    assert_eq!(next.kind(), BehaviorKind("fine"));
    assert_eq!(selector.last_scores()[0].1, f32::NEG_INFINITY);
}

#[test]
fn same_kind_winner_keeps_running_behavior() {
    let profile = Profile::new("p").with_entry(constant("defend", 40.0));
    let mut selector = profile.selector();
    let world = World::default();
    let memory = Memory::new();

    assert!(decide(&mut selector, &world, &memory, &Tagged("defend")).is_none());
    assert_eq!(selector.last_winner(), Some("defend"));
}

#[test]
fn scores_read_memory_and_world() {
    let profile = Profile::new("p")
        .with_scored(
            "fight",
            |ctx: &ScoreContext<'_, World>| {
                if ctx.memory.get(IN_COMBAT).copied().unwrap_or(false) {
                    200.0
                } else {
                    0.0
                }
            },
            |_| Box::new(Tagged("fight")),
        )
        .with_scored(
            "move",
            |ctx: &ScoreContext<'_, World>| if ctx.world.target.x > 0.0 { 20.0 } else { 0.0 },
            |ctx: &ScoreContext<'_, World>| Box::new(Goto(ctx.world.target)),
        );
    let mut selector = profile.selector();
    let mut world = World::default();
    let mut memory = Memory::new();

    assert!(decide(&mut selector, &world, &memory, &Idle).is_none());

    world.target = Vec3::new(5.0, 0.0, 0.0);
    let next = decide(&mut selector, &world, &memory, &Idle).expect("move");
    assert_eq!(next.target_position(), Some(world.target));

    memory.set(IN_COMBAT, true, None);
    let next = decide(&mut selector, &world, &memory, &Idle).expect("fight");
    assert_eq!(next.kind(), BehaviorKind("fight"));
}

fn move_profile() -> Profile<World> {
    Profile::new("mover").with_scored(
        "move",
        |_| 20.0,
        |ctx: &ScoreContext<'_, World>| Box::new(Goto(ctx.world.target)),
    )
}

#[test]
fn move_to_retarget_replaces_running_move() {
    let mut brain: Brain<World> = Brain::idle(1);
    brain.install_profile(&move_profile());
    let mut world = World {
        target: Vec3::new(1.0, 0.0, 0.0),
        ..World::default()
    };

    brain.tick(&TickContext::new(0, 0, 0), &mut world);
    brain.tick(&TickContext::new(1, 100, 0), &mut world);
    assert_eq!(world.log, vec!["enter:goto:1"]);

    world.target = Vec3::new(2.0, 0.0, 0.0);
    brain.tick(&TickContext::new(2, 200, 0), &mut world);
    assert_eq!(world.log, vec!["enter:goto:1", "exit:goto:1", "enter:goto:2"]);
    // The initial idle's exit counts too.
    assert_eq!(brain.controller.enters(), 2);
    assert_eq!(brain.controller.exits(), 2);
}

#[test]
fn move_to_with_unchanged_target_is_not_restarted() {
    let mut brain: Brain<World> = Brain::idle(1);
    brain.install_profile(&move_profile());
    let mut world = World {
        target: Vec3::new(3.0, 0.0, 0.0),
        ..World::default()
    };

    for tick in 0..20 {
        brain.tick(&TickContext::new(tick, tick * 100, 0), &mut world);
    }
    assert_eq!(world.log, vec!["enter:goto:3"]);
    assert_eq!(brain.controller.enters(), 1);
}

#[test]
fn combat_flag_expiry_drops_back_to_lower_priority() {
    let profile = Profile::new("infantry")
        .with_sensor(|| Box::new(CombatSensor))
        .with_scored(
            "fight",
            |ctx: &ScoreContext<'_, World>| {
                if ctx.memory.has(IN_COMBAT) {
                    200.0
                } else {
                    0.0
                }
            },
            |_| Box::new(Tagged("fight")),
        )
        .with_entry(constant("defend", 40.0));

    let mut brain: Brain<World> = Brain::idle(1);
    brain.install_profile(&profile);
    assert_eq!(brain.policy_name(), "infantry");
    assert!(brain.perception.has_sensor(SensorKind("combat")));

    let mut world = World {
        hostile: true,
        ..World::default()
    };
    brain.tick(&TickContext::new(0, 0, 0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind("fight"));

    world.hostile = false;
    brain.tick(&TickContext::new(1, 9_999, 0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind("fight"));

    brain.tick(&TickContext::new(2, 10_000, 0), &mut world);
    assert_eq!(brain.current_kind(), BehaviorKind("defend"));
    assert_eq!(world.log, vec!["enter:fight", "exit:fight", "enter:defend"]);
}

#[test]
fn identical_inputs_produce_identical_decisions() {
    let run = || {
        let profile = Profile::new("p")
            .with_scored(
                "a",
                |ctx: &ScoreContext<'_, World>| (ctx.tick.tick % 3) as f32,
                |_| Box::new(Tagged("a")),
            )
            .with_scored(
                "b",
                |ctx: &ScoreContext<'_, World>| (ctx.tick.tick % 5) as f32 * 0.5,
                |_| Box::new(Tagged("b")),
            );
        let mut brain: Brain<World> = Brain::idle(7);
        brain.install_profile(&profile);
        let mut world = World::default();
        let mut kinds = Vec::new();
        for tick in 0..50 {
            brain.tick(&TickContext::new(tick, tick * 50, 42), &mut world);
            kinds.push(brain.current_kind());
        }
        (kinds, world.log)
    };

    assert_eq!(run(), run());
}

#[test]
fn installing_a_profile_builds_fresh_sensors_per_brain() {
    let profile = Profile::new("shared").with_sensor(|| Box::new(CombatSensor));
    let mut a: Brain<World> = Brain::idle(1);
    let mut b: Brain<World> = Brain::idle(2);
    a.install_profile(&profile);
    b.install_profile(&profile);

    assert_eq!(profile.sensor_count(), 1);
    assert_eq!(a.perception.len(), 1);
    assert_eq!(b.perception.len(), 1);
    assert_eq!(b.policy_name(), "shared");
}
