use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use umabot_core::{
    BarColor, CareerDate, Mood, Stat, SupportCard, TrainingEngine, TrainingTile, TurnObservation,
};

fn gen_boards(n: usize) -> Vec<Vec<TrainingTile>> {
    // xorshift64 keeps the boards reproducible without a rand dependency
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move |m: u64| {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x % m
    };
    let colors = [BarColor::Blue, BarColor::Green, BarColor::Orange, BarColor::Yellow];
    (0..n)
        .map(|_| {
            (0..5)
                .map(|idx| {
                    let mut tile = TrainingTile::new(idx, next(40) as i32);
                    for _ in 0..next(5) {
                        let mut card = SupportCard::standard(colors[next(4) as usize]);
                        card.has_hint = next(5) == 0;
                        card.has_rainbow = next(4) == 0;
                        tile = tile.with_support(card);
                    }
                    tile
                })
                .collect()
        })
        .collect()
}

fn observation() -> TurnObservation {
    TurnObservation {
        mood: Mood::Good,
        career_date: CareerDate::new(3, 5, 2),
        energy_pct: Some(64),
        turns_left: 20,
        stats: Stat::ALL.into_iter().zip([780, 520, 610, 300, 450]).collect(),
        ..Default::default()
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = TrainingEngine::default();
    let mut g = c.benchmark_group("umabot_decision");
    for &n in &[64usize, 1024usize] {
        let boards = gen_boards(n);
        g.bench_with_input(BenchmarkId::new("score_and_decide", n), &boards, |b, boards| {
            b.iter(|| {
                for tiles in boards.iter() {
                    black_box(engine.evaluate(black_box(tiles), observation()));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
