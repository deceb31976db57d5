//! Error types for level loading and board construction.
//!
//! Gameplay itself is total: invalid swap coordinates are rejected requests,
//! not errors. Only a degenerate level (or a board that cannot be repaired)
//! fails, and it fails before a session exists.

use crate::types::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

/// Errors raised while validating or initializing a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level width {width} outside {}..={}", MIN_WIDTH, MAX_WIDTH)]
    WidthOutOfRange { width: usize },

    #[error("level height {height} outside {}..={}", MIN_HEIGHT, MAX_HEIGHT)]
    HeightOutOfRange { height: usize },

    #[error("level item catalog is empty")]
    EmptyCatalog,

    #[error("cell size must be positive (got {0})")]
    InvalidCellSize(f32),

    #[error("item size must be positive (got {0})")]
    InvalidItemSize(f32),

    #[error("authored cell ({x}, {y}) lies outside the level")]
    AuthoredCellOutOfRange { x: usize, y: usize },

    #[error("authored cell ({x}, {y}) references catalog index {index} outside the catalog")]
    AuthoredItemOutOfCatalog { x: usize, y: usize, index: usize },

    #[error("authored cell ({x}, {y}) kind does not match catalog entry {index}")]
    AuthoredKindMismatch { x: usize, y: usize, index: usize },

    /// Every catalog entry is already used by a neighbour of the cell being repaired.
    #[error("no catalog item can replace ({x}, {y}) without matching a neighbour; add item types to the level")]
    NoReplacementItem { x: usize, y: usize },

    #[error("unknown item tag '{0}' in board layout")]
    UnknownItemTag(char),

    #[error("board layout rows must be non-empty and equally long")]
    MalformedLayout,

    #[error("failed to parse level definition: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LevelError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            LevelError::WidthOutOfRange { .. }
            | LevelError::HeightOutOfRange { .. }
            | LevelError::InvalidCellSize(_)
            | LevelError::InvalidItemSize(_) => "invalid_dimensions",
            LevelError::EmptyCatalog => "empty_catalog",
            LevelError::AuthoredCellOutOfRange { .. }
            | LevelError::AuthoredItemOutOfCatalog { .. }
            | LevelError::AuthoredKindMismatch { .. } => "invalid_authored_cell",
            LevelError::NoReplacementItem { .. } => "unrepairable_board",
            LevelError::UnknownItemTag(_) | LevelError::MalformedLayout => "invalid_layout",
            LevelError::Parse(_) => "parse_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_bounds() {
        let err = LevelError::WidthOutOfRange { width: 3 };
        assert_eq!(err.to_string(), "level width 3 outside 6..=16");

        let err = LevelError::HeightOutOfRange { height: 20 };
        assert_eq!(err.to_string(), "level height 20 outside 6..=13");
    }

    #[test]
    fn test_codes() {
        assert_eq!(LevelError::EmptyCatalog.code(), "empty_catalog");
        assert_eq!(
            LevelError::NoReplacementItem { x: 1, y: 2 }.code(),
            "unrepairable_board"
        );
        assert_eq!(LevelError::MalformedLayout.code(), "invalid_layout");
    }
}
