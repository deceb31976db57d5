use crate::types::{ItemType, SessionPhase, TargetType};

/// Copy-out view of a session for renderers and UI panels.
///
/// Cells are stored x-major like the board grid: index `x * height + y`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub kinds: Vec<Option<ItemType>>,
    pub glass: Vec<bool>,
    pub level_index: usize,
    pub target: TargetType,
    pub score: u32,
    pub target_score: u32,
    pub moves: u32,
    pub phase: SessionPhase,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.kinds.clear();
        self.glass.clear();
        self.level_index = 0;
        self.target = TargetType::Score;
        self.score = 0;
        self.target_score = 0;
        self.moves = 0;
        self.phase = SessionPhase::AwaitingInput;
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x * self.height + y)
    }

    pub fn kind_at(&self, x: usize, y: usize) -> Option<ItemType> {
        self.index(x, y).and_then(|i| self.kinds.get(i).copied().flatten())
    }

    pub fn glass_at(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|i| self.glass.get(i).copied())
            .unwrap_or(false)
    }

    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::AwaitingInput
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            kinds: Vec::new(),
            glass: Vec::new(),
            level_index: 0,
            target: TargetType::Score,
            score: 0,
            target_score: 0,
            moves: 0,
            phase: SessionPhase::AwaitingInput,
        }
    }
}
