use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use dice_race::core::{DieFace, GameConfig, GameState, Phase};
use dice_race::rules::{resolve_roll, TurnEngine};

fn bench_resolve_roll(c: &mut Criterion) {
    let config = GameConfig::new(4).with_target_score(u32::MAX);
    let state = GameState::playing(config.player_count);
    let face = DieFace::new(4).unwrap();

    c.bench_function("resolve_roll", |b| {
        b.iter_batched(
            || state.clone(),
            |mut state| resolve_roll(&mut state, &config, black_box(face)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("full_game_4p_target_100", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut engine = TurnEngine::new(GameConfig::new(4).with_target_score(100), seed);
            engine.start();
            while engine.phase() == Phase::Playing {
                let _ = engine.roll_dice();
            }
            black_box(engine.winner())
        })
    });
}

criterion_group!(benches, bench_resolve_roll, bench_full_game);
criterion_main!(benches);
