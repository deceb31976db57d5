//! Move search - legality checks and best-move evaluation
//!
//! Both searches enumerate every cell and its four orthogonal neighbours in
//! [`SWAP_OFFSETS`] order, simulate the swap, measure the whole board and
//! restore it. Simulation goes through [`SimulatedSwap`], which restores the
//! board when dropped, so an early return can never leave a swapped board.

use std::ops::Deref;

use crate::board::Board;
use crate::types::{PossibleMove, SWAP_OFFSETS};

/// A swap applied to a board for measurement, undone on drop
pub struct SimulatedSwap<'a> {
    board: &'a mut Board,
    a: (usize, usize),
    b: (usize, usize),
}

impl<'a> SimulatedSwap<'a> {
    /// Apply `mv` to `board`. Returns `None` when either endpoint is off the board.
    pub fn new(board: &'a mut Board, mv: PossibleMove) -> Option<Self> {
        if !is_valid_position(board, mv.start_x, mv.start_y)
            || !is_valid_position(board, mv.end_x, mv.end_y)
        {
            return None;
        }
        let a = (mv.start_x as usize, mv.start_y as usize);
        let b = (mv.end_x as usize, mv.end_y as usize);
        board.swap_items(a, b);
        Some(Self { board, a, b })
    }
}

impl Deref for SimulatedSwap<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for SimulatedSwap<'_> {
    fn drop(&mut self) {
        self.board.swap_items(self.a, self.b);
    }
}

/// Bounds check for signed player coordinates. Everything that indexes the
/// board with outside input goes through here first.
pub fn is_valid_position(board: &Board, x: i32, y: i32) -> bool {
    board.contains(x, y)
}

/// Every in-range candidate swap, in search order
pub fn candidate_moves(board: &Board) -> impl Iterator<Item = PossibleMove> + '_ {
    board.grid().coords().flat_map(move |(x, y)| {
        let (x, y) = (x as i32, y as i32);
        SWAP_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| PossibleMove::new(x, y, x + dx, y + dy))
            .filter(move |mv| is_valid_position(board, mv.end_x, mv.end_y))
    })
}

/// Whether any single swap would produce a match anywhere on the board
pub fn has_possible_move(board: &mut Board) -> bool {
    let moves: Vec<PossibleMove> = candidate_moves(board).collect();
    moves.into_iter().any(|mv| {
        SimulatedSwap::new(board, mv)
            .map(|sim| sim.has_match())
            .unwrap_or(false)
    })
}

/// Best score-maximizing and glass-maximizing swaps found by [`evaluate_moves`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveEvaluation {
    pub best_score_move: Option<(PossibleMove, u32)>,
    pub best_glass_move: Option<(PossibleMove, u32)>,
}

/// Score every candidate swap. Ties keep the first move found.
pub fn evaluate_moves(board: &mut Board) -> MoveEvaluation {
    let moves: Vec<PossibleMove> = candidate_moves(board).collect();
    let mut eval = MoveEvaluation::default();
    let mut max_score = 0;
    let mut max_glass = 0;

    for mv in moves {
        let Some(sim) = SimulatedSwap::new(board, mv) else {
            continue;
        };

        let score = sim.match_score();
        if score > max_score {
            max_score = score;
            eval.best_score_move = Some((mv, score));
        }

        let glass = sim.match_glass_count();
        if glass > max_glass {
            max_glass = glass;
            eval.best_glass_move = Some((mv, glass));
        }
    }

    eval
}

/// Pick the swap an automated player should make.
///
/// With `prefer_glass`, the move breaking the most glass wins if it breaks
/// any; otherwise the highest-scoring move. `None` when no swap scores.
pub fn best_possible_move(board: &mut Board, prefer_glass: bool) -> Option<PossibleMove> {
    let eval = evaluate_moves(board);
    if prefer_glass {
        if let Some((mv, _)) = eval.best_glass_move {
            return Some(mv);
        }
    }
    eval.best_score_move.map(|(mv, _)| mv)
}
