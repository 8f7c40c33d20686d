use criterion::{Criterion, criterion_group, criterion_main};
use rig_anim::{ArchetypeRegistry, DEFAULT_TICK, evaluate};
use std::hint::black_box;

fn bench_evaluate(c: &mut Criterion) {
    let registry = ArchetypeRegistry::builtin().unwrap();
    let library = registry.get("aaron").unwrap().library();
    let clip = library.get("combo_attack").unwrap();

    c.bench_function("evaluate_combo_attack", |b| {
        b.iter(|| evaluate(black_box(clip), black_box(0.73)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let registry = ArchetypeRegistry::builtin().unwrap();
    let mut rig = registry.create_rig("mani").unwrap();
    rig.play("idle").unwrap();

    c.bench_function("tick_and_world_transforms", |b| {
        b.iter(|| {
            rig.tick(black_box(DEFAULT_TICK));
            black_box(rig.world_transforms())
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_tick);
criterion_main!(benches);
