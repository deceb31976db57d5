//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic attached, making them usable
//! in any context (rules engine, bot driver, renderers, level tooling).
//!
//! # Board Dimensions
//!
//! Level dimensions are configurable per level within fixed bounds:
//!
//! - **Width**: 6..=16 columns
//! - **Height**: 6..=13 rows
//! - **Origin**: (0, 0) is the bottom-left cell; `y` grows upward and items fall
//!   toward decreasing `y`
//!
//! # Match Scoring
//!
//! | Run length | Points |
//! |------------|--------|
//! | 3 | 100 |
//! | 4 | 150 |
//! | 5 | 200 |
//! | 6+ | 250 |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Item, ItemType, PossibleMove, MAX_WIDTH, MIN_WIDTH};
//!
//! // Parse an item type (case-insensitive)
//! let kind = ItemType::from_str("Blue").unwrap();
//! assert_eq!(kind, ItemType::Blue);
//!
//! // Items match on kind, not on catalog index
//! let a = Item::new(ItemType::Blue, 0);
//! let b = Item::new(ItemType::Blue, 3);
//! assert!(a.matches(&b));
//!
//! // A swap is the same swap in either direction
//! let m = PossibleMove::new(1, 2, 2, 2);
//! assert!(m.same_swap(&PossibleMove::new(2, 2, 1, 2)));
//!
//! assert_eq!(MIN_WIDTH, 6);
//! assert_eq!(MAX_WIDTH, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Minimum level width in cells
pub const MIN_WIDTH: usize = 6;

/// Maximum level width in cells
pub const MAX_WIDTH: usize = 16;

/// Minimum level height in cells
pub const MIN_HEIGHT: usize = 6;

/// Maximum level height in cells
pub const MAX_HEIGHT: usize = 13;

/// Shortest run that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Points per run, indexed by `run_length - MIN_MATCH_LEN`.
///
/// Runs longer than the table use the last entry (flat cap).
pub const MATCH_SCORES: [u32; 4] = [100, 150, 200, 250];

/// Orthogonal neighbour offsets in the order the move search visits them.
pub const SWAP_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bounds_defaults() {
        assert_eq!(MIN_WIDTH, 6);
        assert_eq!(MAX_WIDTH, 16);
        assert_eq!(MIN_HEIGHT, 6);
        assert_eq!(MAX_HEIGHT, 13);
        assert_eq!(MIN_MATCH_LEN, 3);
    }

    #[test]
    fn item_type_string_roundtrip() {
        for kind in ItemType::ALL {
            assert_eq!(ItemType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ItemType::from_str("PURPLE"), Some(ItemType::Purple));
        assert_eq!(ItemType::from_str("teal"), None);
    }

    #[test]
    fn cell_glass_breaks_once() {
        let mut cell = Cell::with_item(Item::new(ItemType::Red, 0));
        cell.has_glass = true;

        assert!(cell.break_glass());
        assert!(!cell.break_glass());
        assert!(!cell.has_glass);
        // Glass is independent of the item.
        assert!(!cell.is_empty());
    }

    #[test]
    fn possible_move_same_swap_ignores_direction() {
        let m = PossibleMove::new(0, 0, 0, 1);
        assert!(m.same_swap(&PossibleMove::new(0, 1, 0, 0)));
        assert!(!m.same_swap(&PossibleMove::new(0, 0, 1, 0)));
    }
}

/// The match categories an item can belong to
///
/// A level's catalog uses a subset of these (typically 5-8 entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    White,
}

impl ItemType {
    /// Every item type, in declaration order
    pub const ALL: [ItemType; 8] = [
        ItemType::Red,
        ItemType::Orange,
        ItemType::Yellow,
        ItemType::Green,
        ItemType::Blue,
        ItemType::Purple,
        ItemType::Pink,
        ItemType::White,
    ];

    /// Parse item type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::ItemType;
    ///
    /// assert_eq!(ItemType::from_str("red"), Some(ItemType::Red));
    /// assert_eq!(ItemType::from_str("WHITE"), Some(ItemType::White));
    /// assert_eq!(ItemType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(ItemType::Red),
            "orange" => Some(ItemType::Orange),
            "yellow" => Some(ItemType::Yellow),
            "green" => Some(ItemType::Green),
            "blue" => Some(ItemType::Blue),
            "purple" => Some(ItemType::Purple),
            "pink" => Some(ItemType::Pink),
            "white" => Some(ItemType::White),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Red => "red",
            ItemType::Orange => "orange",
            ItemType::Yellow => "yellow",
            ItemType::Green => "green",
            ItemType::Blue => "blue",
            ItemType::Purple => "purple",
            ItemType::Pink => "pink",
            ItemType::White => "white",
        }
    }

    /// Single-letter tag, handy for text dumps of a board
    pub fn as_char(&self) -> char {
        match self {
            ItemType::Red => 'R',
            ItemType::Orange => 'O',
            ItemType::Yellow => 'Y',
            ItemType::Green => 'G',
            ItemType::Blue => 'B',
            ItemType::Purple => 'P',
            ItemType::Pink => 'K',
            ItemType::White => 'W',
        }
    }
}

/// An item placed in a cell: its match category plus the catalog slot it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemType,
    pub index: usize,
}

impl Item {
    pub fn new(kind: ItemType, index: usize) -> Self {
        Self { kind, index }
    }

    /// Two items are match-equivalent iff their kinds are equal
    pub fn matches(&self, other: &Item) -> bool {
        self.kind == other.kind
    }
}

/// A cell on the game board
///
/// - `item == None`: empty cell (only observable mid-cascade)
/// - `has_glass`: overlay obstacle, orthogonal to the item, cleared permanently when broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub item: Option<Item>,
    pub has_glass: bool,
}

impl Cell {
    /// Cell holding `item` without glass
    pub fn with_item(item: Item) -> Self {
        Self {
            item: Some(item),
            has_glass: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub fn kind(&self) -> Option<ItemType> {
        self.item.map(|item| item.kind)
    }

    pub fn set_item(&mut self, item: Item) {
        self.item = Some(item);
    }

    /// Empty the cell, returning what it held
    pub fn clear_item(&mut self) -> Option<Item> {
        self.item.take()
    }

    /// Break the glass overlay. Returns true if there was glass to break.
    pub fn break_glass(&mut self) -> bool {
        std::mem::replace(&mut self.has_glass, false)
    }
}

/// Which win condition a level uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Reach `target_score` points
    #[default]
    Score,
    /// Break every glass overlay present at level start
    Glass,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Score => "score",
            TargetType::Glass => "glass",
        }
    }
}

/// One pre-authored grid cell of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredCell {
    pub x: usize,
    pub y: usize,
    pub kind: ItemType,
    /// Catalog index of the item
    pub index: usize,
    #[serde(default)]
    pub has_glass: bool,
}

/// Immutable per-session level configuration
///
/// Read once when a session starts and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub width: usize,
    pub height: usize,
    /// World-space edge length of one cell
    pub cell_size: f32,
    /// World-space edge length of an item sprite (renderer hint)
    pub item_size: f32,
    /// Item catalog; cells reference entries by index
    pub items: Vec<ItemType>,
    /// Ignore `grid_cells` items and fill the board randomly
    #[serde(default)]
    pub random_fill: bool,
    /// Move budget
    pub moves: u32,
    #[serde(default)]
    pub target: TargetType,
    /// Points needed to win a score level (unused for glass levels)
    #[serde(default)]
    pub target_score: u32,
    #[serde(default)]
    pub grid_cells: Vec<AuthoredCell>,
}

/// A candidate orthogonal swap between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PossibleMove {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

impl PossibleMove {
    pub fn new(start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Whether `other` exchanges the same two cells, in either direction
    pub fn same_swap(&self, other: &PossibleMove) -> bool {
        let a = ((self.start_x, self.start_y), (self.end_x, self.end_y));
        let b = ((other.start_x, other.start_y), (other.end_x, other.end_y));
        a == b || a == (b.1, b.0)
    }
}

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Win,
    Lose,
}

impl GameOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, GameOutcome::Win)
    }
}

/// Turn lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Ready for a swap request
    AwaitingInput,
    /// A swap consumed a move; the cascade has not reached quiescence yet
    Resolving,
    /// Terminal; only a new session restarts play
    Finished(GameOutcome),
}

/// What happened to a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapOutcome {
    /// Swap produced a match; one move consumed, cascade pending
    Accepted,
    /// Both cells valid but no match; items restored, no move consumed
    Rejected,
    /// An endpoint was outside the grid; nothing changed
    SnappedBack,
    /// Session is resolving or finished
    NotAccepting,
}

/// Outbound notifications for renderers, audio and UI collaborators.
///
/// Emitted in the order the engine performs the steps, so a consumer can
/// replay them to animate a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    LevelInitialized {
        level_index: usize,
        width: usize,
        height: usize,
    },
    /// Anti-starting-match repair replaced a cell's item
    ItemReplaced { x: usize, y: usize, item: Item },
    SwapPerformed { from: (i32, i32), to: (i32, i32) },
    SwapRejected { from: (i32, i32), to: (i32, i32) },
    SwapSnappedBack { from: (i32, i32), to: (i32, i32) },
    MoveConsumed { remaining: u32 },
    CellCleared { x: usize, y: usize, item: Item },
    GlassBroken { x: usize, y: usize },
    ItemFell {
        from: (usize, usize),
        to: (usize, usize),
    },
    ItemSpawned { x: usize, y: usize, item: Item },
    /// Score as exposed by the session (points or broken glass, per target)
    ScoreChanged { score: u32 },
    GameOver { win: bool },
    LevelUnlocked { level_index: usize },
}
