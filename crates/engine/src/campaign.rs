//! Campaign progression - level selection and unlocking
//!
//! A campaign is an ordered list of levels plus a [`ProgressStore`] holding
//! the highest unlocked level. The store is a seam: the engine decides when a
//! level unlocks; where the number lives is up to the application.

use thiserror::Error;
use tracing::info;

use match3_core::{validate_level, GameSession, LevelError};
use match3_types::{CoreEvent, LevelDefinition};

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("campaign has no levels")]
    NoLevels,

    #[error("level {index} is invalid: {source}")]
    InvalidLevel {
        index: usize,
        #[source]
        source: LevelError,
    },

    #[error("stored level {index} is outside the campaign ({count} levels)")]
    LevelOutOfRange { index: usize, count: usize },

    #[error("failed to start level: {0}")]
    Session(#[from] LevelError),

    /// Returned by a [`ProgressStore`] that failed to persist
    #[error("progress store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CampaignError>;

/// Where the highest unlocked level is kept
pub trait ProgressStore {
    /// Index of the level the player is on
    fn current_level(&self) -> usize;

    /// Persist `level`. Implementations must never overwrite a higher
    /// stored level with a lower one.
    fn store_level(&mut self, level: usize) -> Result<()>;
}

/// In-process progress store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryProgress {
    level: usize,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously saved level
    pub fn starting_at(level: usize) -> Self {
        Self { level }
    }
}

impl ProgressStore for MemoryProgress {
    fn current_level(&self) -> usize {
        self.level
    }

    fn store_level(&mut self, level: usize) -> Result<()> {
        if level >= self.level {
            self.level = level;
        }
        Ok(())
    }
}

/// Ordered levels plus the player's progress through them
#[derive(Debug, Clone)]
pub struct Campaign<P> {
    levels: Vec<LevelDefinition>,
    progress: P,
}

impl<P: ProgressStore> Campaign<P> {
    /// Build a campaign, validating every level up front
    pub fn new(levels: Vec<LevelDefinition>, progress: P) -> Result<Self> {
        if levels.is_empty() {
            return Err(CampaignError::NoLevels);
        }
        for (index, level) in levels.iter().enumerate() {
            validate_level(level).map_err(|source| CampaignError::InvalidLevel { index, source })?;
        }
        Ok(Self { levels, progress })
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn current_level(&self) -> usize {
        self.progress.current_level()
    }

    pub fn is_last_level(&self) -> bool {
        self.current_level() + 1 >= self.levels.len()
    }

    /// Start a fresh session on the current level
    pub fn start_session(&self, seed: u32) -> Result<GameSession> {
        let index = self.current_level();
        let level = self
            .levels
            .get(index)
            .ok_or(CampaignError::LevelOutOfRange {
                index,
                count: self.levels.len(),
            })?;
        Ok(GameSession::new(index, level.clone(), seed)?)
    }

    /// Leave the current level, unlocking the next one when asked.
    ///
    /// Nothing unlocks past the last level. Returns the `LevelUnlocked`
    /// event when progress advanced.
    pub fn finish_level(&mut self, is_next_level: bool) -> Result<Option<CoreEvent>> {
        if !is_next_level || self.is_last_level() {
            return Ok(None);
        }

        let level_index = self.current_level() + 1;
        self.progress.store_level(level_index)?;
        info!(level_index, "level unlocked");
        Ok(Some(CoreEvent::LevelUnlocked { level_index }))
    }
}
