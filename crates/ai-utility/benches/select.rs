use ai_core::{Behavior, BehaviorKind, Idle, Memory, MemoryKey, TickContext, WorldMut, WorldView};
use ai_utility::{Profile, ScoreContext};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const THREAT: MemoryKey<f32> = MemoryKey::new(1_000, "threat");

struct World;

impl WorldView for World {
    type Agent = u64;

    fn is_alive(&self, _agent: u64) -> bool {
        true
    }
}

impl WorldMut for World {}

struct Choice(&'static str);

impl Behavior<World> for Choice {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind(self.0)
    }
}

const LABELS: [&str; 16] = [
    "o0", "o1", "o2", "o3", "o4", "o5", "o6", "o7", "o8", "o9", "o10", "o11", "o12", "o13",
    "o14", "o15",
];

fn bench_select(c: &mut Criterion) {
    let mut profile: Profile<World> = Profile::new("bench");
    for (i, label) in LABELS.iter().copied().enumerate() {
        profile = profile.with_scored(
            label,
            move |ctx: &ScoreContext<'_, World>| {
                let threat = ctx.memory.get(THREAT).copied().unwrap_or(0.0);
                threat * (i as f32 + 1.0) - (i as f32) * 0.5
            },
            move |_| Box::new(Choice(label)),
        );
    }
    let mut selector = profile.selector();
    let mut memory = Memory::new();
    memory.set(THREAT, 0.75, None);
    let world = World;

    let mut tick: u64 = 0;
    c.bench_function("ai-utility/select(options=16)", |b| {
        b.iter(|| {
            let ctx = TickContext::new(tick, tick * 33, 0);
            let next = selector.choose_next_behavior(&ctx, 1, &world, &memory, &Idle);
            black_box(next.map(|b| b.kind()));
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
