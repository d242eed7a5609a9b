use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a hint or demo tick found on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// No tiles left
    Cleared,
    /// A legal move, both cells marked `Selected`
    OneMove(Path),
    /// Tiles remain but none of them can be matched
    NoMove,
}

impl SolveStatus {
    pub const fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::OneMove(path) => Some(path),
            _ => None,
        }
    }
}

/// Result of playing a board to the end on a private copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    Cleared,
    /// A round found no move with tiles still on the board
    Stuck { remaining: CellCount },
    /// The iteration bound ran out first
    Exhausted { remaining: CellCount },
}

impl SolveOutcome {
    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared)
    }

    /// Collapses to the status a hint would report once play stops.
    pub fn status(self) -> SolveStatus {
        match self {
            Self::Cleared => SolveStatus::Cleared,
            Self::Stuck { .. } | Self::Exhausted { .. } => SolveStatus::NoMove,
        }
    }
}

/// Finds the first matchable pair and marks both cells `Selected`.
///
/// Sources are tried in ascending index order, and for each source every other
/// destination in ascending index order; the first connectable pair wins.
pub fn find_one_move(board: &mut Board) -> Option<Path> {
    let active: Vec<Coord2> = board.iter_active().collect();

    for &source in &active {
        for &destination in &active {
            if source == destination || board.face_at(source) != board.face_at(destination) {
                continue;
            }

            let found = PathFinder::new(board, source, destination)
                .ok()
                .and_then(|finder| finder.find());
            if let Some(path) = found {
                board.select(source);
                board.select(destination);
                return Some(path);
            }
        }
    }

    None
}

/// Reports the next move on the live board, leaving its cells `Selected`.
pub fn hint(board: &mut Board) -> SolveStatus {
    if let Some(path) = find_one_move(board) {
        return SolveStatus::OneMove(path);
    }

    if board.active_count() == 0 {
        SolveStatus::Cleared
    } else {
        SolveStatus::NoMove
    }
}

/// Plays the board to the end on a snapshot; the caller's board is untouched.
pub fn simulate_full_solve(board: &Board) -> SolveOutcome {
    let mut scratch = board.clone();
    scratch.unselect_all();

    let rounds = board.total_cells() / 2;
    for round in 0..rounds {
        let active_before = scratch.active_count();
        if active_before == 0 {
            log::trace!("Simulation cleared the board after {} moves", round);
            return SolveOutcome::Cleared;
        }

        match find_one_move(&mut scratch) {
            Some(path) => {
                log::trace!("Simulation move {}: {:?} -> {:?}", round, path.start(), path.end());
                scratch.remove_pair(path.start(), path.end());
            }
            None => {
                log::trace!(
                    "Simulation stuck after {} moves with {} tiles left",
                    round,
                    active_before
                );
                return SolveOutcome::Stuck {
                    remaining: active_before,
                };
            }
        }
    }

    match scratch.active_count() {
        0 => SolveOutcome::Cleared,
        remaining => SolveOutcome::Exhausted { remaining },
    }
}
