use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::cascade::settle;
use tui_match3::core::{fill_board, find_valid_move, GameState, Grid, LevelConfig, SimpleRng, SwapOutcome};
use tui_match3::types::{ItemKind, Pos};

fn bench_fill_board(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut grid = Grid::new(8, 8);

    c.bench_function("fill_board_8x8", |b| {
        b.iter(|| fill_board(black_box(&mut grid), &ItemKind::CLASSIC, &mut rng))
    });
}

fn bench_valid_move_search(c: &mut Criterion) {
    let game = GameState::new(LevelConfig::default(), 12345);

    c.bench_function("find_valid_move_8x8", |b| {
        b.iter(|| find_valid_move(black_box(game.grid())))
    });
}

fn bench_settle_half_board(c: &mut Criterion) {
    let obstacles = [Pos::new(2, 2), Pos::new(2, 5), Pos::new(5, 2), Pos::new(5, 5)];
    let mut rng = SimpleRng::new(7);
    let mut steps = Vec::new();

    c.bench_function("settle_empty_top_half", |b| {
        b.iter(|| {
            let mut grid = Grid::with_obstacles(8, 8, &obstacles);
            fill_board(&mut grid, &ItemKind::CLASSIC, &mut rng);
            for row in 0..4 {
                for col in 0..8 {
                    let pos = Pos::new(row, col);
                    if !grid.is_obstacle(pos) {
                        grid.set(pos, None);
                    }
                }
            }
            steps.clear();
            settle(&mut grid, &ItemKind::CLASSIC, &mut rng, &mut steps);
            grid
        })
    });
}

fn bench_full_turn(c: &mut Criterion) {
    c.bench_function("resolve_turn", |b| {
        b.iter(|| {
            let mut game = GameState::new(LevelConfig::default(), 99);
            let (from, to) = find_valid_move(game.grid()).unwrap_or((Pos::new(0, 0), Pos::new(0, 1)));
            matches!(game.attempt_swap(from, to), SwapOutcome::Resolved(_))
        })
    });
}

criterion_group!(
    benches,
    bench_fill_board,
    bench_valid_move_search,
    bench_settle_half_board,
    bench_full_turn
);
criterion_main!(benches);
