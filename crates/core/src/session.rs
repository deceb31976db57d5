//! Game session module - turn lifecycle state machine
//!
//! A session owns the board, the RNG and all counters for one play-through
//! of a level:
//!
//! ```text
//! AwaitingInput --(swap makes a match)--> Resolving --(quiescent)--> AwaitingInput
//!                                             |
//!                                             +--> Finished(Win | Lose)
//! ```
//!
//! A swap that makes no match is undone and costs nothing. An accepted swap
//! consumes its move immediately; the cascade then has to run to quiescence
//! before the next swap is accepted. The terminal check runs after every
//! cascade and tests Win before Lose.
//!
//! Everything observable is pushed to an outbound [`CoreEvent`] queue that the
//! embedding application drains; the session never knows who listens.

use tracing::info;

use crate::board::Board;
use crate::cascade::{CascadeResolver, CascadeStep, CascadeSummary};
use crate::error::LevelError;
use crate::level::initialize_board;
use crate::moves::{best_possible_move, has_possible_move, is_valid_position};
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::{
    CoreEvent, GameOutcome, LevelDefinition, PossibleMove, SessionPhase, SwapOutcome, TargetType,
};

/// One play-through of a level
#[derive(Debug, Clone)]
pub struct GameSession {
    level: LevelDefinition,
    level_index: usize,
    board: Board,
    rng: SimpleRng,
    seed: u32,
    resolver: CascadeResolver,
    raw_score: u32,
    glass_score: u32,
    /// Glass present when the level started
    glass_target: u32,
    moves: u32,
    phase: SessionPhase,
    events: Vec<CoreEvent>,
}

impl GameSession {
    /// Start a session: validate the level, fill and repair the board.
    ///
    /// The initial events are `LevelInitialized` followed by one
    /// `ItemReplaced` per repaired cell.
    pub fn new(level_index: usize, level: LevelDefinition, seed: u32) -> Result<Self, LevelError> {
        let mut rng = SimpleRng::new(seed);
        let init = initialize_board(&level, &mut rng)?;

        let mut events = Vec::with_capacity(1 + init.replaced.len());
        events.push(CoreEvent::LevelInitialized {
            level_index,
            width: level.width,
            height: level.height,
        });
        events.extend(
            init.replaced
                .iter()
                .map(|&(x, y, item)| CoreEvent::ItemReplaced { x, y, item }),
        );

        info!(
            level_index,
            width = level.width,
            height = level.height,
            moves = level.moves,
            target = level.target.as_str(),
            glass = init.glass_target,
            seed,
            "session started"
        );

        Ok(Self {
            moves: level.moves,
            level,
            level_index,
            board: init.board,
            rng,
            seed,
            resolver: CascadeResolver::new(),
            raw_score: 0,
            glass_score: 0,
            glass_target: init.glass_target,
            phase: SessionPhase::AwaitingInput,
            events,
        })
    }

    /// Start a session on a prepared board (scripted scenarios, resumed games).
    ///
    /// The board is used as-is: no fill, no repair, and its own dimensions
    /// take precedence over the level's. The level still supplies the catalog
    /// for refills, the move budget and the target. The glass target is the
    /// glass currently on the board.
    pub fn from_board(
        level_index: usize,
        level: LevelDefinition,
        board: Board,
        seed: u32,
    ) -> Result<Self, LevelError> {
        if level.items.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }

        let events = vec![CoreEvent::LevelInitialized {
            level_index,
            width: board.width(),
            height: board.height(),
        }];

        Ok(Self {
            moves: level.moves,
            glass_target: board.glass_count(),
            level,
            level_index,
            board,
            rng: SimpleRng::new(seed),
            seed,
            resolver: CascadeResolver::new(),
            raw_score: 0,
            glass_score: 0,
            phase: SessionPhase::AwaitingInput,
            events,
        })
    }

    // Accessors

    /// Progress toward the target: points for score levels, broken glass
    /// for glass levels
    pub fn score(&self) -> u32 {
        match self.level.target {
            TargetType::Score => self.raw_score,
            TargetType::Glass => self.glass_score,
        }
    }

    /// Goal matching [`GameSession::score`]
    pub fn target_score(&self) -> u32 {
        match self.level.target {
            TargetType::Score => self.level.target_score,
            TargetType::Glass => self.glass_target,
        }
    }

    /// Points earned, regardless of target type
    pub fn raw_score(&self) -> u32 {
        self.raw_score
    }

    /// Glass broken, regardless of target type
    pub fn glass_score(&self) -> u32 {
        self.glass_score
    }

    pub fn glass_target(&self) -> u32 {
        self.glass_target
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn target(&self) -> TargetType {
        self.level.target
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            SessionPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished(_))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seed the session was started with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        is_valid_position(&self.board, x, y)
    }

    /// Events emitted since the last drain, oldest first
    pub fn events(&self) -> &[CoreEvent] {
        &self.events
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.kinds.clear();
        out.glass.clear();
        for cell in self.board.grid().cells() {
            out.kinds.push(cell.kind());
            out.glass.push(cell.has_glass);
        }
        out.level_index = self.level_index;
        out.target = self.level.target;
        out.score = self.score();
        out.target_score = self.target_score();
        out.moves = self.moves;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    // Turn lifecycle

    /// Ask to swap the items at (x1, y1) and (x2, y2).
    ///
    /// Only orthogonally adjacent in-range cells can be swapped; anything
    /// else snaps back. With no moves left nothing is swapped and the
    /// session settles its outcome instead.
    pub fn request_swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> SwapOutcome {
        if self.phase != SessionPhase::AwaitingInput {
            return SwapOutcome::NotAccepting;
        }
        if self.moves == 0 {
            self.finish_turn();
            return SwapOutcome::NotAccepting;
        }

        let from = (x1, y1);
        let to = (x2, y2);
        let in_range = self.is_valid_position(x1, y1) && self.is_valid_position(x2, y2);
        if !in_range || x1.abs_diff(x2) + y1.abs_diff(y2) != 1 {
            self.events.push(CoreEvent::SwapSnappedBack { from, to });
            return SwapOutcome::SnappedBack;
        }

        let a = (x1 as usize, y1 as usize);
        let b = (x2 as usize, y2 as usize);
        self.board.swap_items(a, b);
        if !self.board.has_match() {
            self.board.swap_items(a, b);
            self.events.push(CoreEvent::SwapRejected { from, to });
            return SwapOutcome::Rejected;
        }

        self.moves -= 1;
        self.phase = SessionPhase::Resolving;
        self.events.push(CoreEvent::SwapPerformed { from, to });
        self.events.push(CoreEvent::MoveConsumed {
            remaining: self.moves,
        });
        SwapOutcome::Accepted
    }

    /// Let the session pick and request the best swap itself.
    ///
    /// Glass levels prefer the move breaking the most glass. Returns the
    /// accepted move, or `None` when the session is not awaiting input or no
    /// swap makes a match.
    ///
    /// The outcome is only settled after a cascade, so a fresh board with no
    /// possible move stays in `AwaitingInput` with `outcome() == None`.
    /// Callers must treat a `None` here on such a board as a dead start.
    pub fn request_bot_move(&mut self) -> Option<PossibleMove> {
        if self.phase != SessionPhase::AwaitingInput {
            return None;
        }
        if self.moves == 0 {
            self.finish_turn();
            return None;
        }

        let prefer_glass = self.level.target == TargetType::Glass;
        let mv = best_possible_move(&mut self.board, prefer_glass)?;
        match self.request_swap(mv.start_x, mv.start_y, mv.end_x, mv.end_y) {
            SwapOutcome::Accepted => Some(mv),
            _ => None,
        }
    }

    /// Run one cascade phase. Returns `None` unless the session is resolving.
    pub fn resolve_step(&mut self) -> Option<CascadeStep> {
        if self.phase != SessionPhase::Resolving {
            return None;
        }

        let step = self
            .resolver
            .step(&mut self.board, &self.level.items, &mut self.rng);

        match &step {
            CascadeStep::Cleared(report) => {
                for &(x, y, item) in &report.cleared {
                    self.events.push(CoreEvent::CellCleared { x, y, item });
                }
                for &(x, y) in &report.broken_glass {
                    self.events.push(CoreEvent::GlassBroken { x, y });
                }
                self.raw_score = self.raw_score.saturating_add(report.score);
                self.glass_score += report.glass_broken();
                self.events.push(CoreEvent::ScoreChanged {
                    score: self.score(),
                });
            }
            CascadeStep::Settled(falls) => {
                self.events.extend(falls.iter().map(|fall| CoreEvent::ItemFell {
                    from: fall.from,
                    to: fall.to,
                }));
            }
            CascadeStep::Refilled(spawned) => {
                self.events.extend(
                    spawned
                        .iter()
                        .map(|&(x, y, item)| CoreEvent::ItemSpawned { x, y, item }),
                );
            }
            CascadeStep::Quiescent => self.finish_turn(),
        }

        Some(step)
    }

    /// Run the pending cascade to completion
    pub fn resolve_until_quiescent(&mut self) -> CascadeSummary {
        let mut summary = CascadeSummary::default();
        while let Some(step) = self.resolve_step() {
            match step {
                CascadeStep::Cleared(report) => {
                    summary.score = summary.score.saturating_add(report.score);
                    summary.glass_broken += report.glass_broken();
                    summary.passes += 1;
                }
                CascadeStep::Quiescent => break,
                _ => {}
            }
        }
        summary
    }

    /// Request a swap and, if accepted, resolve it completely
    pub fn play_swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> SwapOutcome {
        let outcome = self.request_swap(x1, y1, x2, y2);
        if outcome == SwapOutcome::Accepted {
            self.resolve_until_quiescent();
        }
        outcome
    }

    fn target_reached(&self) -> bool {
        self.score() >= self.target_score()
    }

    /// Terminal check after a cascade: Win first, then Lose, else back to input
    fn finish_turn(&mut self) {
        let outcome = if self.target_reached() {
            Some(GameOutcome::Win)
        } else if self.moves < 1 || !has_possible_move(&mut self.board) {
            Some(GameOutcome::Lose)
        } else {
            None
        };

        match outcome {
            Some(outcome) => {
                self.phase = SessionPhase::Finished(outcome);
                self.events.push(CoreEvent::GameOver {
                    win: outcome.is_win(),
                });
                info!(
                    level_index = self.level_index,
                    win = outcome.is_win(),
                    score = self.score(),
                    target = self.target_score(),
                    moves = self.moves,
                    "game over"
                );
            }
            None => self.phase = SessionPhase::AwaitingInput,
        }
    }
}
