//! Automated player - picks the best simulated swap and plays it out

use tracing::{debug, warn};

use match3_core::{CascadeSummary, GameSession};
use match3_types::{GameOutcome, PossibleMove, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotError {
    NotPlayable,
    NoMove,
}

impl BotError {
    pub fn code(self) -> &'static str {
        match self {
            BotError::NotPlayable => "not_playable",
            BotError::NoMove => "no_move",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BotError::NotPlayable => "session is not awaiting input",
            BotError::NoMove => "no swap on the board makes a match",
        }
    }
}

/// One completed bot turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTurn {
    pub mv: PossibleMove,
    pub cascade: CascadeSummary,
    /// Set when the turn ended the session
    pub outcome: Option<GameOutcome>,
}

/// Pick the best move, play it, and resolve the cascade.
///
/// Glass levels prefer the move breaking the most glass. A fresh board with
/// no possible move returns [`BotError::NoMove`] and leaves the session
/// awaiting input with no outcome; the caller decides how to end it.
pub fn take_bot_turn(session: &mut GameSession) -> Result<BotTurn, BotError> {
    if session.phase() != SessionPhase::AwaitingInput {
        return Err(BotError::NotPlayable);
    }

    let Some(mv) = session.request_bot_move() else {
        // An exhausted move budget settles the session instead of moving.
        if session.is_finished() {
            return Err(BotError::NotPlayable);
        }
        warn!(
            level_index = session.level_index(),
            moves = session.moves(),
            "bot found no possible move"
        );
        return Err(BotError::NoMove);
    };

    let cascade = session.resolve_until_quiescent();
    debug!(
        start = ?(mv.start_x, mv.start_y),
        end = ?(mv.end_x, mv.end_y),
        points = cascade.score,
        glass = cascade.glass_broken,
        passes = cascade.passes,
        "bot turn"
    );

    Ok(BotTurn {
        mv,
        cascade,
        outcome: session.outcome(),
    })
}

/// Result of [`autoplay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplaySummary {
    pub turns: u32,
    pub score: u32,
    pub moves_left: u32,
    pub outcome: Option<GameOutcome>,
    /// Why play stopped before a terminal outcome, if it did
    pub stopped: Option<BotError>,
}

/// Let the bot play until the session ends, it gets stuck, or `max_turns` pass
pub fn autoplay(session: &mut GameSession, max_turns: u32) -> AutoplaySummary {
    let mut turns = 0;
    let mut stopped = None;

    while turns < max_turns && !session.is_finished() {
        match take_bot_turn(session) {
            Ok(_) => turns += 1,
            Err(err) => {
                stopped = Some(err);
                break;
            }
        }
    }

    AutoplaySummary {
        turns,
        score: session.score(),
        moves_left: session.moves(),
        outcome: session.outcome(),
        stopped: if session.is_finished() { None } else { stopped },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::Board;
    use match3_types::{Cell, Item, ItemType, LevelDefinition, TargetType};

    const CATALOG: [ItemType; 5] = [
        ItemType::Red,
        ItemType::Green,
        ItemType::Blue,
        ItemType::Yellow,
        ItemType::Purple,
    ];

    fn level(moves: u32, target_score: u32) -> LevelDefinition {
        LevelDefinition {
            width: 6,
            height: 6,
            cell_size: 1.0,
            item_size: 0.8,
            items: CATALOG.to_vec(),
            random_fill: true,
            moves,
            target: TargetType::Score,
            target_score,
            grid_cells: Vec::new(),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(BotError::NotPlayable.code(), "not_playable");
        assert_eq!(BotError::NoMove.code(), "no_move");
        assert!(!BotError::NoMove.message().is_empty());
    }

    #[test]
    fn test_bot_turn_plays_only_move() {
        let board = Board::parse(
            &["RGBYPR", "YPRGBY", "GBYPRG", "PRGBYP", "BRPRGB", "RGBYPR"],
            &CATALOG,
        )
        .unwrap();
        let mut session = GameSession::from_board(0, level(10, 100), board, 2).unwrap();

        let turn = take_bot_turn(&mut session).unwrap();
        assert!(turn.mv.same_swap(&PossibleMove::new(0, 0, 1, 0)));
        assert_eq!(turn.cascade.score, 100);
        assert_eq!(turn.outcome, Some(GameOutcome::Win));

        assert_eq!(take_bot_turn(&mut session), Err(BotError::NotPlayable));
    }

    #[test]
    fn test_bot_reports_stuck_board() {
        let board = Board::from_fn(6, 6, 1.0, |x, y| {
            let index = (x + 2 * y) % CATALOG.len();
            Cell::with_item(Item::new(CATALOG[index], index))
        });
        let mut session = GameSession::from_board(0, level(10, 100), board, 2).unwrap();

        assert_eq!(take_bot_turn(&mut session), Err(BotError::NoMove));
        let summary = autoplay(&mut session, 10);
        assert_eq!(summary.turns, 0);
        assert_eq!(summary.stopped, Some(BotError::NoMove));
        assert_eq!(summary.outcome, None);
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn test_autoplay_stays_within_budget() {
        for seed in 1..10 {
            let mut session = GameSession::new(0, level(5, 100_000), seed).unwrap();
            let summary = autoplay(&mut session, 100);

            assert!(summary.turns <= 5);
            assert_eq!(summary.moves_left, 5 - summary.turns);
            if summary.stopped.is_none() {
                assert_eq!(summary.outcome, Some(GameOutcome::Lose));
            }
        }
    }

    #[test]
    fn test_autoplay_respects_turn_cap() {
        let mut session = GameSession::new(0, level(30, 100_000), 3).unwrap();
        let summary = autoplay(&mut session, 2);
        assert!(summary.turns <= 2);
        assert_eq!(summary.moves_left, 30 - summary.turns);
    }
}
