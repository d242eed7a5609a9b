use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleOutcome {
    /// Board is solvable again; every swap made on the way, in order
    Shuffled {
        swaps: Vec<(Coord2, Coord2)>,
        attempts: u32,
    },
    /// No two active tiles with different faces, board restored
    NoSwappablePair,
    /// Attempts ran out before a solvable arrangement came up, board restored
    Unsolvable { attempts: u32 },
}

impl ShuffleOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Shuffled { .. })
    }
}

/// Swaps faces of random active tiles until the board can be cleared again.
///
/// A swap that does not verify is kept and the next attempt swaps another
/// pair on top of it. Any pending selection is released first, and on failure
/// the board is restored to that released state.
pub fn shuffle<R: Rng + ?Sized>(board: &mut Board, rng: &mut R, max_attempts: u32) -> ShuffleOutcome {
    board.unselect_all();
    let snapshot = board.snapshot();
    let mut swaps = Vec::new();

    for attempt in 1..=max_attempts {
        let Some((first, second)) = pick_swap(board, rng) else {
            log::warn!("Attempt {}: unable to find any tiles to swap", attempt);
            board.restore(snapshot);
            return ShuffleOutcome::NoSwappablePair;
        };

        board.swap_faces(first, second);
        swaps.push((first, second));

        if simulate_full_solve(board).is_cleared() {
            log::debug!("Attempt {}: shuffled with {} swaps", attempt, swaps.len());
            return ShuffleOutcome::Shuffled {
                swaps,
                attempts: attempt,
            };
        }
        log::debug!("Attempt {}: not solvable, re-shuffling", attempt);
    }

    log::warn!("Shuffle gave up after {} attempts", max_attempts);
    board.restore(snapshot);
    ShuffleOutcome::Unsolvable {
        attempts: max_attempts,
    }
}

/// One random active tile and, within `total_cells` draws, another active tile
/// with a different face.
fn pick_swap<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(Coord2, Coord2)> {
    let active: Vec<Coord2> = board.iter_active().collect();
    if active.len() < 2 {
        return None;
    }

    let first = active[rng.random_range(0..active.len())];
    let first_face = board.face_at(first);

    (0..board.total_cells())
        .map(|_| active[rng.random_range(0..active.len())])
        .find(|&candidate| candidate != first && board.face_at(candidate) != first_face)
        .map(|second| (first, second))
}
