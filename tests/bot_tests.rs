//! Bot tests - best-move selection and automated play

use match3::core::{best_possible_move, evaluate_moves, has_possible_move, Board, GameSession};
use match3::engine::{autoplay, take_bot_turn, BotError};
use match3::types::{GameOutcome, ItemType, LevelDefinition, PossibleMove, TargetType};

const CATALOG: [ItemType; 5] = [
    ItemType::Red,
    ItemType::Green,
    ItemType::Blue,
    ItemType::Yellow,
    ItemType::Purple,
];

#[test]
fn test_single_scoring_swap_is_selected() {
    // Only swapping (4, 0) and (5, 0) makes a match: three Purples in column 5.
    let mut board = Board::parse(
        &["RGBYPR", "YPRGBY", "GBYPRG", "PRGBYP", "BYPRGP", "RGBYPR"],
        &CATALOG,
    )
    .unwrap();
    let before = board.clone();

    assert!(!board.has_match());
    assert!(has_possible_move(&mut board));
    let mv = best_possible_move(&mut board, false).unwrap();
    assert!(mv.same_swap(&PossibleMove::new(4, 0, 5, 0)));
    assert_eq!(board, before);

    let eval = evaluate_moves(&mut board);
    assert_eq!(eval.best_score_move.map(|(_, score)| score), Some(100));
}

#[test]
fn test_glass_level_bot_prefers_glass() {
    // A Red triple on row 0 scores the same as a Green triple over glass on
    // row 1, and the Red one is found first.
    let board = Board::parse(&["BYBYB", "ggYgP", "RRPRY"], &CATALOG).unwrap();
    let level = LevelDefinition {
        width: 6,
        height: 6,
        cell_size: 1.0,
        item_size: 0.8,
        items: CATALOG.to_vec(),
        random_fill: true,
        moves: 10,
        target: TargetType::Glass,
        target_score: 0,
        grid_cells: Vec::new(),
    };
    let mut session = GameSession::from_board(0, level, board, 5).unwrap();
    assert_eq!(session.target_score(), 3);

    let turn = take_bot_turn(&mut session).unwrap();
    assert!(turn.mv.same_swap(&PossibleMove::new(2, 1, 3, 1)));
    assert!(turn.cascade.glass_broken >= 2);
}

#[test]
fn test_autoplay_ends_every_session() {
    for seed in 1..20 {
        let level = LevelDefinition {
            width: 6,
            height: 6,
            cell_size: 1.0,
            item_size: 0.8,
            items: CATALOG.to_vec(),
            random_fill: true,
            moves: 5,
            target: TargetType::Score,
            target_score: 100_000,
            grid_cells: Vec::new(),
        };
        let mut session = GameSession::new(0, level, seed).unwrap();
        let summary = autoplay(&mut session, 1000);

        assert_eq!(summary.outcome, Some(GameOutcome::Lose));
        assert_eq!(summary.stopped, None);
        assert!(summary.turns >= 1 && summary.turns <= 5);
        assert_eq!(take_bot_turn(&mut session), Err(BotError::NotPlayable));
    }
}
