//! Level tests - loading, fill policy and the anti-starting-match repair

use match3::core::{initialize_board, level_from_json, SimpleRng};
use match3::types::{AuthoredCell, ItemType, LevelDefinition, TargetType};

const THREE: [ItemType; 3] = [ItemType::Red, ItemType::Green, ItemType::Blue];

/// Authored level from text rows, top row first; lowercase marks glass
fn authored_level(rows: &[&str], items: &[ItemType]) -> LevelDefinition {
    let height = rows.len();
    let mut grid_cells = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let index = items
                .iter()
                .position(|k| k.as_char() == ch.to_ascii_uppercase())
                .unwrap();
            grid_cells.push(AuthoredCell {
                x,
                y: height - 1 - row,
                kind: items[index],
                index,
                has_glass: ch.is_ascii_lowercase(),
            });
        }
    }

    LevelDefinition {
        width: rows[0].len(),
        height,
        cell_size: 1.0,
        item_size: 0.9,
        items: items.to_vec(),
        random_fill: false,
        moves: 10,
        target: TargetType::Score,
        target_score: 500,
        grid_cells,
    }
}

fn assert_no_starting_match(board: &match3::core::Board) {
    for x in 0..board.width() {
        for y in 0..board.height() {
            assert!(board.right_run_length(x, y) <= 2, "horizontal run at ({}, {})", x, y);
            assert!(board.up_run_length(x, y) <= 2, "vertical run at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_authored_row_triple_is_repaired() {
    // Row 0, columns 0-2 are three Reds; everything else is match-free.
    let level = authored_level(
        &["GBRGBR", "BRGBRG", "RGBRGB", "GBRGBR", "BRGBRG", "RRRBRG"],
        &THREE,
    );

    for seed in 1..20 {
        let mut rng = SimpleRng::new(seed);
        let init = initialize_board(&level, &mut rng).unwrap();
        let board = &init.board;

        let row: Vec<_> = (0..3).map(|x| board.kind_at(x, 0)).collect();
        assert!(!(row[0] == row[1] && row[1] == row[2]));
        // (0, 0) borders Red and Blue, so Green is the only replacement.
        assert_eq!(board.kind_at(0, 0), Some(ItemType::Green));
        assert_eq!(init.replaced.len(), 1);
        assert_no_starting_match(board);
    }
}

#[test]
fn test_random_levels_start_match_free() {
    let items = vec![
        ItemType::Red,
        ItemType::Orange,
        ItemType::Yellow,
        ItemType::Green,
        ItemType::Blue,
    ];
    for (width, height) in [(6, 6), (16, 13), (9, 7)] {
        for seed in 1..15 {
            let level = LevelDefinition {
                width,
                height,
                cell_size: 0.75,
                item_size: 0.7,
                items: items.clone(),
                random_fill: true,
                moves: 20,
                target: TargetType::Score,
                target_score: 1000,
                grid_cells: Vec::new(),
            };
            let mut rng = SimpleRng::new(seed);
            let init = initialize_board(&level, &mut rng).unwrap();
            assert_eq!(init.board.width(), width);
            assert_eq!(init.board.height(), height);
            assert!(init.board.empty_cells().is_empty());
            assert_no_starting_match(&init.board);
        }
    }
}

#[test]
fn test_glass_target_counts_authored_glass() {
    let level = authored_level(
        &["GBRGBR", "BRGBRG", "RGBRGB", "GBRGBR", "bRGBRG", "rrrBRG"],
        &THREE,
    );
    let mut rng = SimpleRng::new(3);
    let init = initialize_board(&level, &mut rng).unwrap();

    // Repair swaps the item at (0, 0) but leaves its glass.
    assert_eq!(init.glass_target, 4);
    assert_eq!(init.board.glass_count(), 4);
    assert!(init.board.cell(0, 0).has_glass);
}

#[test]
fn test_json_level_roundtrip() {
    let level = authored_level(
        &["GBRGBR", "BRGBRG", "RGBRGB", "GBRGBR", "BRGBRG", "RRRBRG"],
        &THREE,
    );
    let json = serde_json::to_string(&level).unwrap();
    let parsed = level_from_json(&json).unwrap();
    assert_eq!(parsed, level);
}

#[test]
fn test_json_level_errors_have_codes() {
    let json = serde_json::json!({
        "width": 6,
        "height": 20,
        "cell_size": 1.0,
        "item_size": 1.0,
        "items": ["red", "green"],
        "moves": 5
    })
    .to_string();
    let err = level_from_json(&json).unwrap_err();
    assert_eq!(err.code(), "invalid_dimensions");

    let json = serde_json::json!({
        "width": 6,
        "height": 6,
        "cell_size": 1.0,
        "item_size": 1.0,
        "items": [],
        "moves": 5
    })
    .to_string();
    assert_eq!(level_from_json(&json).unwrap_err().code(), "empty_catalog");

    assert_eq!(level_from_json("[1, 2]").unwrap_err().code(), "parse_error");
}
