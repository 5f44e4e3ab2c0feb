//! Property tests for the board invariants.
//!
//! Invariants covered:
//! - After every settled turn no run of 3+ remains (quiescence).
//! - At most one figurine is ever on the board.
//! - Obstacles never move.
//! - Settling a settled board changes nothing.
//! - An idle board has a valid move unless generation gave up.

use proptest::prelude::*;
use tui_match3::core::cascade::settle;
use tui_match3::core::{find_valid_move, has_valid_move, is_quiescent, GameState, LevelConfig, Phase, SimpleRng};
use tui_match3::types::{ItemKind, Pos};

fn level(width: u8, height: u8, kinds: usize, obstacles: &[Pos]) -> LevelConfig {
    LevelConfig::new(width, height, 15, &ItemKind::ALL[..kinds])
        .unwrap()
        .with_obstacles(obstacles)
        .unwrap()
}

fn obstacle_strategy() -> impl Strategy<Value = Vec<Pos>> {
    prop::collection::vec((1u8..5, 0u8..5).prop_map(|(r, c)| Pos::new(r, c)), 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_sessions_respect_board_invariants(
        seed in any::<u32>(),
        width in 5u8..9,
        height in 5u8..9,
        kinds in 4usize..7,
        obstacles in obstacle_strategy(),
        picks in prop::collection::vec((0u8..8, 0u8..8, any::<bool>()), 1..12),
    ) {
        let mut game = GameState::new(level(width, height, kinds, &obstacles), seed);
        let walls: Vec<Pos> = game.grid().positions().filter(|&p| game.grid().is_obstacle(p)).collect();

        for (row, col, down) in picks {
            if game.game_over() {
                break;
            }
            // Alternate arbitrary swaps with known-good ones.
            let a = Pos::new(row % height, col % width);
            let b = if down { Pos::new(a.row + 1, a.col) } else { Pos::new(a.row, a.col + 1) };
            game.attempt_swap(a, b);
            if let Some((a, b)) = find_valid_move(game.grid()) {
                game.attempt_swap(a, b);
            }

            let grid = game.grid();
            prop_assert!(is_quiescent(grid));
            prop_assert!(grid.figurine_count() <= 1);
            let now: Vec<Pos> = grid.positions().filter(|&p| grid.is_obstacle(p)).collect();
            prop_assert_eq!(&now, &walls);
            if game.phase() == Phase::Idle {
                prop_assert!(has_valid_move(grid) || game.is_stuck());
            }

            let mut again = grid.clone();
            let mut steps = Vec::new();
            settle(&mut again, &game.level().kinds, &mut SimpleRng::new(seed), &mut steps);
            prop_assert!(steps.is_empty());
            prop_assert_eq!(&again, grid);
        }
    }
}
