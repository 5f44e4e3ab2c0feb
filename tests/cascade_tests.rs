//! Match detection, special effects and cascade settling

use tui_match3::core::cascade::{apply_gravity, horizontal_pull, settle};
use tui_match3::core::effects::resolve;
use tui_match3::core::{find_matches, find_valid_move, has_valid_move, is_quiescent, CascadeStep, Grid, SimpleRng};
use tui_match3::types::{EffectCue, ItemKind, Orientation, Pos};

fn grid(rows: &[&str]) -> Grid {
    Grid::from_rows(rows).unwrap()
}

#[test]
fn test_detects_horizontal_and_vertical_runs() {
    let g = grid(&["AAAB", "CDEB", "CEDB"]);
    let groups = find_matches(&g);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].orientation, Orientation::Horizontal);
    assert_eq!(groups[0].kind, ItemKind::Chicken);
    assert_eq!(groups[0].len, 3);
    assert_eq!(groups[1].orientation, Orientation::Vertical);
    assert_eq!(groups[1].anchor, Pos::new(0, 3));
}

#[test]
fn test_obstacles_and_figurines_break_runs() {
    assert!(find_matches(&grid(&["AA#A"])).is_empty());
    assert!(find_matches(&grid(&["AA*A"])).is_empty());
    assert!(is_quiescent(&grid(&["A.AA"])));
}

#[test]
fn test_four_run_clears_whole_row() {
    let g = grid(&["BCD#E", "AAAAC", "CDECD"]);
    let res = resolve(&g, find_matches(&g));
    assert_eq!(res.cells, (0..5).map(|c| Pos::new(1, c)).collect::<Vec<_>>());
    assert_eq!(res.four_matches, 1);
    assert_eq!(
        res.cues,
        vec![EffectCue::LineClear {
            orientation: Orientation::Horizontal,
            index: 1
        }]
    );
}

#[test]
fn test_vertical_four_run_clears_column_but_not_obstacles() {
    let g = grid(&["BA", "CA", "#A", "DA", "EB"]);
    let res = resolve(&g, find_matches(&g));
    assert!(res.cells.contains(&Pos::new(4, 1)));
    assert!(!res.cells.iter().any(|p| p.col == 0));
}

#[test]
fn test_five_run_clears_all_of_kind() {
    let g = grid(&["AAAAA", "BCACB", "CBDBA"]);
    let res = resolve(&g, find_matches(&g));
    assert_eq!(res.five_matches, 1);
    assert!(res.cells.contains(&Pos::new(1, 2)));
    assert!(res.cells.contains(&Pos::new(2, 4)));
    assert_eq!(res.cells.len(), 7);
    assert_eq!(
        res.cues,
        vec![EffectCue::ClearAllOfType {
            kind: ItemKind::Chicken,
            centroid: Pos::new(0, 2)
        }]
    );
}

#[test]
fn test_figurine_next_to_removal_is_swept() {
    let g = grid(&["AAAB", "C*DE", "*CDE"]);
    let res = resolve(&g, find_matches(&g));
    assert_eq!(res.figurines, vec![Pos::new(1, 1)]);
}

#[test]
fn test_two_plain_runs_cue_double() {
    let g = grid(&["AAAB", "CDEF", "BBBC"]);
    let res = resolve(&g, find_matches(&g));
    assert!(res.double_match);
    assert_eq!(res.cues, vec![EffectCue::DoubleMatch]);
}

#[test]
fn test_gravity_never_crosses_obstacles() {
    let mut g = grid(&["A.", "#B", ".."]);
    apply_gravity(&mut g);
    assert_eq!(g.to_rows(), vec!["A.", "#.", ".B"]);
}

#[test]
fn test_pull_fills_cell_capped_by_obstacle() {
    let mut g = grid(&["#B", ".C"]);
    let moves = horizontal_pull(&mut g);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].from, Pos::new(1, 1));
    assert_eq!(moves[0].to, Pos::new(1, 0));
    assert_eq!(g.to_rows(), vec!["#B", "C."]);
}

#[test]
fn test_pull_does_not_scan_past_obstacles() {
    let mut g = grid(&["#.A", ".#B"]);
    assert!(horizontal_pull(&mut g).is_empty());
}

#[test]
fn test_settle_fills_every_reachable_cell() {
    let mut g = grid(&["....", "#...", "....", "A..B"]);
    let mut steps = Vec::new();
    settle(&mut g, &ItemKind::CLASSIC, &mut SimpleRng::new(4), &mut steps);
    assert_eq!(g.empty_count(), 0);
    assert!(steps.iter().any(|s| matches!(s, CascadeStep::Spawned(_))));
    assert!(steps.iter().any(|s| matches!(s, CascadeStep::Pulled(_))));
}

#[test]
fn test_settle_leaves_enclosed_cells_empty() {
    let mut g = grid(&["B#C", "#.#", "CBD"]);
    let mut steps = Vec::new();
    settle(&mut g, &ItemKind::CLASSIC, &mut SimpleRng::new(4), &mut steps);
    assert!(g.is_empty(Pos::new(1, 1)));
    assert!(steps.is_empty());
}

#[test]
fn test_valid_move_search() {
    let live = grid(&["AAB", "CDA", "DCD"]);
    assert_eq!(find_valid_move(&live), Some((Pos::new(0, 2), Pos::new(1, 2))));
    let dead = grid(&["ABC", "BCA", "CAB"]);
    assert!(!has_valid_move(&dead));
}
