//! Board module - cells, run detection, clearing and gravity
//!
//! The board wraps a [`Grid`] of [`Cell`]s and hosts the match engine.
//! Coordinates: (x, y) with (0, 0) at the bottom-left; `y` grows upward and
//! items fall toward decreasing `y`.
//!
//! A *run* is a maximal sequence of same-kind items along one axis. Runs of
//! length >= 3 are matches. A run of 5 is one run (200 points), never three
//! overlapping triples.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::LevelError;
use crate::grid::Grid;
use crate::scoring::{run_score, total_run_score};
use crate::types::{Cell, Item, ItemType, MIN_MATCH_LEN};

/// Direction a run extends in from its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Toward increasing x
    Horizontal,
    /// Toward increasing y
    Vertical,
}

/// A maximal run of at least [`MIN_MATCH_LEN`] same-kind items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub x: usize,
    pub y: usize,
    pub len: usize,
    pub axis: Axis,
}

impl Run {
    /// Coordinates covered by the run, starting at its origin
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Run { x, y, len, axis } = *self;
        (0..len).map(move |i| match axis {
            Axis::Horizontal => (x + i, y),
            Axis::Vertical => (x, y + i),
        })
    }

    pub fn score(&self) -> u32 {
        run_score(self.len)
    }
}

/// Result of one clearing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Sum of per-run points
    pub score: u32,
    /// Runs found in this pass
    pub runs: Vec<Run>,
    /// Each removed item, once per cell
    pub cleared: Vec<(usize, usize, Item)>,
    /// Cells whose glass broke in this pass
    pub broken_glass: Vec<(usize, usize)>,
}

impl ClearReport {
    pub fn has_matches(&self) -> bool {
        !self.cleared.is_empty()
    }

    pub fn glass_broken(&self) -> u32 {
        self.broken_glass.len() as u32
    }
}

/// One item moved by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fall {
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: Grid<Cell>,
}

impl Board {
    /// Create a board of empty cells without glass
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            grid: Grid::new(width, height, cell_size, |_, _| Cell::default()),
        }
    }

    /// Create a board from a per-coordinate cell factory
    pub fn from_fn(
        width: usize,
        height: usize,
        cell_size: f32,
        factory: impl FnMut(usize, usize) -> Cell,
    ) -> Self {
        Self {
            grid: Grid::new(width, height, cell_size, factory),
        }
    }

    /// Build a board from text rows, top row (highest `y`) first.
    ///
    /// Each character is an [`ItemType::as_char`] tag; lowercase marks glass
    /// and `.` an empty cell. Catalog indices are resolved against `catalog`.
    ///
    /// ```
    /// use match3_core::Board;
    /// use match3_core::types::ItemType;
    ///
    /// let catalog = [ItemType::Red, ItemType::Green, ItemType::Blue];
    /// let board = Board::parse(&["GBR", "rRR"], &catalog).unwrap();
    /// assert_eq!(board.right_run_length(0, 0), 3);
    /// assert!(board.cell(0, 0).has_glass);
    /// assert_eq!(board.cell(1, 1).kind(), Some(ItemType::Blue));
    /// ```
    pub fn parse(rows: &[&str], catalog: &[ItemType]) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 || rows.iter().any(|r| r.chars().count() != width) {
            return Err(LevelError::MalformedLayout);
        }

        let mut board = Board::new(width, height, 1.0);
        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row;
            for (x, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let tag = ch.to_ascii_uppercase();
                let index = catalog
                    .iter()
                    .position(|kind| kind.as_char() == tag)
                    .ok_or(LevelError::UnknownItemTag(ch))?;
                let cell = board.cell_mut(x, y);
                cell.set_item(Item::new(catalog[index], index));
                cell.has_glass = ch.is_ascii_lowercase();
            }
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Check signed coordinates against the board bounds
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.grid.contains(x, y)
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        self.grid.get(x, y)
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        self.grid.get_mut(x, y)
    }

    pub fn kind_at(&self, x: usize, y: usize) -> Option<ItemType> {
        self.cell(x, y).kind()
    }

    /// Both cells hold an item of the same kind. Empty cells never match.
    fn same_kind(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        match (self.kind_at(a.0, a.1), self.kind_at(b.0, b.1)) {
            (Some(ka), Some(kb)) => ka == kb,
            _ => false,
        }
    }

    /// Length of the same-kind run starting at (x, y) toward increasing x.
    /// Always >= 1 (the origin counts itself).
    pub fn right_run_length(&self, x: usize, y: usize) -> usize {
        let mut len = 1;
        while x + len < self.width() && self.same_kind((x, y), (x + len, y)) {
            len += 1;
        }
        len
    }

    /// Length of the same-kind run starting at (x, y) toward increasing y.
    /// Always >= 1 (the origin counts itself).
    pub fn up_run_length(&self, x: usize, y: usize) -> usize {
        let mut len = 1;
        while y + len < self.height() && self.same_kind((x, y), (x, y + len)) {
            len += 1;
        }
        len
    }

    /// Whether (x, y) begins a match in either direction
    pub fn starts_match(&self, x: usize, y: usize) -> bool {
        self.right_run_length(x, y) >= MIN_MATCH_LEN || self.up_run_length(x, y) >= MIN_MATCH_LEN
    }

    /// Whether any match exists anywhere on the board
    pub fn has_match(&self) -> bool {
        self.grid.coords().any(|(x, y)| self.starts_match(x, y))
    }

    /// All maximal matching runs, horizontal before vertical per origin cell
    pub fn runs(&self) -> Vec<Run> {
        let mut runs = Vec::new();
        for (x, y) in self.grid.coords() {
            // Only count a run from its first cell so longer runs are not split.
            if x == 0 || !self.same_kind((x - 1, y), (x, y)) {
                let len = self.right_run_length(x, y);
                if len >= MIN_MATCH_LEN {
                    runs.push(Run {
                        x,
                        y,
                        len,
                        axis: Axis::Horizontal,
                    });
                }
            }
            if y == 0 || !self.same_kind((x, y - 1), (x, y)) {
                let len = self.up_run_length(x, y);
                if len >= MIN_MATCH_LEN {
                    runs.push(Run {
                        x,
                        y,
                        len,
                        axis: Axis::Vertical,
                    });
                }
            }
        }
        runs
    }

    /// Points the current board would award if cleared now
    pub fn match_score(&self) -> u32 {
        total_run_score(self.runs().iter().map(|run| run.len))
    }

    /// Distinct glass cells inside any current run
    pub fn match_glass_count(&self) -> u32 {
        self.matched_cells()
            .into_iter()
            .filter(|&(x, y)| self.cell(x, y).has_glass)
            .count() as u32
    }

    /// Coordinate-deduplicated union of all cells in any current run
    pub fn matched_cells(&self) -> BTreeSet<(usize, usize)> {
        self.runs().iter().flat_map(|run| run.cells()).collect()
    }

    /// Single clearing pass: score every run, break glass and empty every matched cell.
    ///
    /// Score is per run; removal and glass breaking are per cell. This does not
    /// loop; the caller drives repetition.
    pub fn find_and_clear_matches(&mut self) -> ClearReport {
        let runs = self.runs();
        let score = total_run_score(runs.iter().map(|run| run.len));
        let matched: BTreeSet<(usize, usize)> = runs.iter().flat_map(|run| run.cells()).collect();

        let mut cleared = Vec::with_capacity(matched.len());
        let mut broken_glass = Vec::new();
        for (x, y) in matched {
            let cell = self.cell_mut(x, y);
            if cell.break_glass() {
                broken_glass.push((x, y));
            }
            if let Some(item) = cell.clear_item() {
                cleared.push((x, y, item));
            }
        }

        ClearReport {
            score,
            runs,
            cleared,
            broken_glass,
        }
    }

    /// Exchange the items of two cells. Glass stays where it is.
    pub fn swap_items(&mut self, a: (usize, usize), b: (usize, usize)) {
        let item_a = self.cell(a.0, a.1).item;
        let item_b = self.cell(b.0, b.1).item;
        self.cell_mut(a.0, a.1).item = item_b;
        self.cell_mut(b.0, b.1).item = item_a;
    }

    /// Drop every item onto the first non-empty cell (or floor) below it.
    ///
    /// Columns are scanned from low `y` upward so lower items settle first and
    /// a single pass fully compacts each column.
    pub fn apply_gravity(&mut self) -> Vec<Fall> {
        let mut falls = Vec::new();
        for x in 0..self.width() {
            for y in 1..self.height() {
                if self.cell(x, y).is_empty() || !self.cell(x, y - 1).is_empty() {
                    continue;
                }
                let mut drop = 1;
                while drop < y && self.cell(x, y - drop - 1).is_empty() {
                    drop += 1;
                }
                let target = y - drop;
                let item = self.cell_mut(x, y).clear_item();
                self.cell_mut(x, target).item = item;
                falls.push(Fall {
                    from: (x, y),
                    to: (x, target),
                });
            }
        }
        falls
    }

    /// Coordinates of every empty cell, x-major
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.grid
            .coords()
            .filter(|&(x, y)| self.cell(x, y).is_empty())
            .collect()
    }

    /// Number of cells still covered by glass
    pub fn glass_count(&self) -> u32 {
        self.grid.cells().iter().filter(|c| c.has_glass).count() as u32
    }
}

impl fmt::Display for Board {
    /// Text layout in the [`Board::parse`] format, top row first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let cell = self.cell(x, y);
                let ch = match cell.kind() {
                    None => '.',
                    Some(kind) if cell.has_glass => kind.as_char().to_ascii_lowercase(),
                    Some(kind) => kind.as_char(),
                };
                write!(f, "{}", ch)?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
