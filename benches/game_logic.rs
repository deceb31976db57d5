use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3::core::{
    best_possible_move, has_possible_move, initialize_board, Board, CascadeResolver, GameSession,
    SimpleRng,
};
use match3::types::{ItemType, LevelDefinition, TargetType};

const CATALOG: [ItemType; 6] = [
    ItemType::Red,
    ItemType::Orange,
    ItemType::Yellow,
    ItemType::Green,
    ItemType::Blue,
    ItemType::Purple,
];

fn level(width: usize, height: usize) -> LevelDefinition {
    LevelDefinition {
        width,
        height,
        cell_size: 1.0,
        item_size: 0.8,
        items: CATALOG.to_vec(),
        random_fill: true,
        moves: 30,
        target: TargetType::Score,
        target_score: 1_000_000,
        grid_cells: Vec::new(),
    }
}

fn bench_initialize(c: &mut Criterion) {
    let level = level(16, 13);

    c.bench_function("initialize_16x13", |b| {
        b.iter(|| {
            let mut rng = SimpleRng::new(12345);
            initialize_board(black_box(&level), &mut rng)
        })
    });
}

fn bench_has_possible_move(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut board = initialize_board(&level(16, 13), &mut rng).unwrap().board;

    c.bench_function("has_possible_move_16x13", |b| {
        b.iter(|| has_possible_move(black_box(&mut board)))
    });
}

fn bench_best_move(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut board = initialize_board(&level(9, 9), &mut rng).unwrap().board;

    c.bench_function("best_possible_move_9x9", |b| {
        b.iter(|| best_possible_move(black_box(&mut board), false))
    });
}

fn bench_cascade(c: &mut Criterion) {
    // Every column holds one kind, so the first pass clears the whole board.
    let rows = ["ROYGBPRO"; 8];

    c.bench_function("cascade_full_clear_8x8", |b| {
        b.iter(|| {
            let mut board = Board::parse(&rows, &CATALOG).unwrap();
            let mut rng = SimpleRng::new(7);
            CascadeResolver::new().run_to_quiescence(&mut board, &CATALOG, &mut rng)
        })
    });
}

fn bench_bot_turn(c: &mut Criterion) {
    c.bench_function("session_bot_turn_9x9", |b| {
        b.iter(|| {
            let mut session = GameSession::new(0, level(9, 9), 12345).unwrap();
            if session.request_bot_move().is_some() {
                session.resolve_until_quiescent();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_initialize,
    bench_has_possible_move,
    bench_best_move,
    bench_cascade,
    bench_bot_turn
);
criterion_main!(benches);
