//! Level module - validation, loading and initial board construction
//!
//! Initialization fills the board (randomly or from authored records), lays
//! glass from the authored records, counts the glass target, and finally runs
//! a single repair pass so the board starts without any match.
//!
//! The repair pass is also exported on its own for level authoring tools.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::error::LevelError;
use crate::rng::{random_item, SimpleRng};
use crate::types::{
    Cell, Item, ItemType, LevelDefinition, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_MATCH_LEN,
    MIN_WIDTH,
};

/// A freshly built board plus the bookkeeping the session needs
#[derive(Debug, Clone)]
pub struct InitializedBoard {
    pub board: Board,
    /// Glass cells present right after filling
    pub glass_target: u32,
    /// Items swapped in by the repair pass
    pub replaced: Vec<(usize, usize, Item)>,
}

/// Reject degenerate levels before any grid is built
pub fn validate_level(level: &LevelDefinition) -> Result<(), LevelError> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&level.width) {
        return Err(LevelError::WidthOutOfRange { width: level.width });
    }
    if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&level.height) {
        return Err(LevelError::HeightOutOfRange {
            height: level.height,
        });
    }
    if level.items.is_empty() {
        return Err(LevelError::EmptyCatalog);
    }
    if !(level.cell_size > 0.0) {
        return Err(LevelError::InvalidCellSize(level.cell_size));
    }
    if !(level.item_size > 0.0) {
        return Err(LevelError::InvalidItemSize(level.item_size));
    }

    for cell in &level.grid_cells {
        let (x, y) = (cell.x, cell.y);
        if x >= level.width || y >= level.height {
            return Err(LevelError::AuthoredCellOutOfRange { x, y });
        }
        match level.items.get(cell.index) {
            None => {
                return Err(LevelError::AuthoredItemOutOfCatalog {
                    x,
                    y,
                    index: cell.index,
                })
            }
            Some(kind) if *kind != cell.kind => {
                return Err(LevelError::AuthoredKindMismatch {
                    x,
                    y,
                    index: cell.index,
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Parse a level definition from JSON and validate it
pub fn level_from_json(json: &str) -> Result<LevelDefinition, LevelError> {
    let level: LevelDefinition = serde_json::from_str(json)?;
    validate_level(&level)?;
    Ok(level)
}

/// Fill a board per the level's fill policy and lay its glass.
///
/// Random fill applies when requested or when there are no authored cells.
/// Otherwise authored items are copied; any coordinate without a record gets
/// a random item. Glass comes from authored records in both modes.
pub fn fill_board(level: &LevelDefinition, rng: &mut SimpleRng) -> Result<Board, LevelError> {
    let use_random = level.random_fill || level.grid_cells.is_empty();
    let mut board = Board::new(level.width, level.height, level.cell_size);

    if !use_random {
        for authored in &level.grid_cells {
            board
                .cell_mut(authored.x, authored.y)
                .set_item(Item::new(authored.kind, authored.index));
        }
    }

    for (x, y) in board.empty_cells() {
        let item = random_item(rng, &level.items).ok_or(LevelError::EmptyCatalog)?;
        board.cell_mut(x, y).set_item(item);
    }

    for authored in level.grid_cells.iter().filter(|c| c.has_glass) {
        board.cell_mut(authored.x, authored.y).has_glass = true;
    }

    Ok(board)
}

/// Catalog indices that share no kind with any in-range orthogonal neighbour of (x, y)
fn replacement_candidates(board: &Board, catalog: &[ItemType], x: usize, y: usize) -> Vec<usize> {
    let mut neighbour_kinds: ArrayVec<ItemType, 4> = ArrayVec::new();
    for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        if let Some(kind) = board.grid().try_get(nx, ny).and_then(Cell::kind) {
            neighbour_kinds.push(kind);
        }
    }

    catalog
        .iter()
        .enumerate()
        .filter(|(_, kind)| !neighbour_kinds.contains(kind))
        .map(|(index, _)| index)
        .collect()
}

/// Single-pass anti-starting-match repair.
///
/// Every cell whose right or up run exceeds 2 gets a random catalog item that
/// differs from all four neighbours. Replacements are not re-verified; since a
/// replacement can never extend a run, runs only shrink and one pass suffices.
pub fn repair_board(
    board: &mut Board,
    catalog: &[ItemType],
    rng: &mut SimpleRng,
) -> Result<Vec<(usize, usize, Item)>, LevelError> {
    let mut replaced = Vec::new();
    let coords: Vec<(usize, usize)> = board.grid().coords().collect();

    for (x, y) in coords {
        if board.right_run_length(x, y) < MIN_MATCH_LEN && board.up_run_length(x, y) < MIN_MATCH_LEN
        {
            continue;
        }

        let candidates = replacement_candidates(board, catalog, x, y);
        let pick = rng
            .pick_index(candidates.len())
            .ok_or(LevelError::NoReplacementItem { x, y })?;
        let index = candidates[pick];
        let item = Item::new(catalog[index], index);

        debug!(x, y, kind = item.kind.as_str(), "repair replaced starting match item");
        board.cell_mut(x, y).set_item(item);
        replaced.push((x, y, item));
    }

    Ok(replaced)
}

/// Validate, fill, count glass and repair
pub fn initialize_board(
    level: &LevelDefinition,
    rng: &mut SimpleRng,
) -> Result<InitializedBoard, LevelError> {
    validate_level(level)?;

    let mut board = fill_board(level, rng)?;
    let glass_target = board.glass_count();
    let replaced = repair_board(&mut board, &level.items, rng)?;

    Ok(InitializedBoard {
        board,
        glass_target,
        replaced,
    })
}
