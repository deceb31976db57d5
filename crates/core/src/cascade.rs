//! Cascade resolver - match, settle, refill until quiescent
//!
//! One validated swap starts a cascade. The resolver cycles through three
//! phases, one per [`CascadeResolver::step`]:
//!
//! 1. **Match**: one clearing pass. No matches means the cascade is over.
//! 2. **Gravity**: items drop into the cells the match phase emptied.
//! 3. **Refill**: every remaining empty cell gets a random catalog item.
//!
//! then back to Match. Points and broken glass are only produced by the
//! match phase; gravity and refill never score and never cost a move.

use tracing::debug;

use crate::board::{Board, ClearReport, Fall};
use crate::rng::{random_item, SimpleRng};
use crate::types::{Item, ItemType};

/// Which phase the next [`CascadeResolver::step`] runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CascadePhase {
    #[default]
    Match,
    Gravity,
    Refill,
}

/// What a single resolver step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeStep {
    /// Match phase cleared at least one run
    Cleared(ClearReport),
    /// Gravity phase moved these items
    Settled(Vec<Fall>),
    /// Refill phase spawned these items
    Refilled(Vec<(usize, usize, Item)>),
    /// Match phase found nothing; the board is stable
    Quiescent,
}

/// Totals for a cascade driven to completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub score: u32,
    pub glass_broken: u32,
    /// Match phases that cleared something
    pub passes: u32,
}

/// Phase-sequenced cascade driver
#[derive(Debug, Clone, Default)]
pub struct CascadeResolver {
    phase: CascadePhase,
}

impl CascadeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    /// Run exactly one phase and advance to the next.
    ///
    /// After [`CascadeStep::Quiescent`] the resolver is back at the match
    /// phase, ready for the next cascade.
    pub fn step(
        &mut self,
        board: &mut Board,
        catalog: &[ItemType],
        rng: &mut SimpleRng,
    ) -> CascadeStep {
        match self.phase {
            CascadePhase::Match => {
                let report = board.find_and_clear_matches();
                if !report.has_matches() {
                    debug!("cascade quiescent");
                    return CascadeStep::Quiescent;
                }
                debug!(
                    runs = report.runs.len(),
                    cleared = report.cleared.len(),
                    score = report.score,
                    "cascade match phase"
                );
                self.phase = CascadePhase::Gravity;
                CascadeStep::Cleared(report)
            }
            CascadePhase::Gravity => {
                let falls = board.apply_gravity();
                debug!(falls = falls.len(), "cascade gravity phase");
                self.phase = CascadePhase::Refill;
                CascadeStep::Settled(falls)
            }
            CascadePhase::Refill => {
                let mut spawned = Vec::new();
                for (x, y) in board.empty_cells() {
                    if let Some(item) = random_item(rng, catalog) {
                        board.cell_mut(x, y).set_item(item);
                        spawned.push((x, y, item));
                    }
                }
                debug!(spawned = spawned.len(), "cascade refill phase");
                self.phase = CascadePhase::Match;
                CascadeStep::Refilled(spawned)
            }
        }
    }

    /// Step until the board is quiescent, totalling score and glass
    pub fn run_to_quiescence(
        &mut self,
        board: &mut Board,
        catalog: &[ItemType],
        rng: &mut SimpleRng,
    ) -> CascadeSummary {
        let mut summary = CascadeSummary::default();
        loop {
            match self.step(board, catalog, rng) {
                CascadeStep::Cleared(report) => {
                    summary.score = summary.score.saturating_add(report.score);
                    summary.glass_broken += report.glass_broken();
                    summary.passes += 1;
                }
                CascadeStep::Settled(_) | CascadeStep::Refilled(_) => {}
                CascadeStep::Quiescent => return summary,
            }
        }
    }
}
