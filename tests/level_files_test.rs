//! The shipped level files parse and start playable sessions

use std::path::Path;

use tui_match3::core::{GameState, LevelConfig, TargetKind};
use tui_match3::types::{ItemKind, Pos, Tile};

fn load(name: &str) -> LevelConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels").join(name);
    let text = std::fs::read_to_string(&path).unwrap();
    LevelConfig::from_json(&text).unwrap()
}

#[test]
fn test_all_levels_parse() {
    let expected = [
        ("level1.json", "Space Breakfast", 25, 0),
        ("level2.json", "Star Snack", 22, 0),
        ("level3.json", "In Orbit", 24, 8),
        ("level4.json", "Gravity", 26, 16),
        ("level5.json", "Chef's Mission", 30, 14),
    ];
    for (file, name, moves, obstacles) in expected {
        let level = load(file);
        assert_eq!(level.name, name);
        assert_eq!((level.width, level.height), (7, 7));
        assert_eq!(level.max_moves, moves);
        assert_eq!(level.obstacles.len(), obstacles, "{file}");
        assert_eq!(level.kinds.len(), 8);
        assert!(level.kinds.contains(&ItemKind::Drumstick));
    }
}

#[test]
fn test_level_targets() {
    let level = load("level2.json");
    assert_eq!(level.targets.min_score, Some(800));
    assert_eq!(level.targets.collect.get(&Tile::Item(ItemKind::Fries)), Some(&8));

    let game = GameState::new(level, 3);
    let progress = game.progress();
    assert!(!progress.met);
    assert!(progress
        .entries
        .iter()
        .any(|e| e.kind == TargetKind::Score && e.required == 800));
}

#[test]
fn test_obstacle_levels_start_with_obstacles_in_place() {
    for file in ["level3.json", "level4.json", "level5.json"] {
        let level = load(file);
        let obstacles = level.obstacles.clone();
        let game = GameState::new(level, 9);
        for pos in obstacles {
            assert!(game.grid().is_obstacle(pos), "{file} {pos:?}");
        }
        assert!(game.grid().tile(Pos::new(0, 0)).is_some());
        assert_eq!(game.grid().empty_count(), 0);
    }
}
