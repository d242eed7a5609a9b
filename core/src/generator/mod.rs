use rand::Rng;

use crate::*;
pub use faces::*;
pub use random::*;
pub use shuffle::*;

mod faces;
mod random;
mod shuffle;

/// Source of tile faces for layout generation.
pub trait FaceSupply {
    /// A face that is never reserved.
    fn random_face<R: Rng + ?Sized>(&self, rng: &mut R) -> Face;

    fn is_reserved(&self, face: Face) -> bool;

    /// Sentinel face carried by border and unused cells.
    fn border_face(&self) -> Face;
}

pub trait LayoutGenerator {
    /// Turns unused interior cells into active pairs, returning the pair count.
    fn generate<F, R>(&self, board: &mut Board, faces: &F, rng: &mut R) -> CellCount
    where
        F: FaceSupply,
        R: Rng + ?Sized;
}

/// Builds fresh layouts until one can be cleared completely, giving up after
/// `config.max_generate_attempts`.
pub fn generate_solvable<G, F, R>(
    config: &GameConfig,
    generator: &G,
    faces: &F,
    rng: &mut R,
) -> Result<Board>
where
    G: LayoutGenerator,
    F: FaceSupply,
    R: Rng + ?Sized,
{
    config.validate()?;

    for attempt in 1..=config.max_generate_attempts {
        let mut board = Board::new(config.size, faces.border_face())?;
        generator.generate(&mut board, faces, rng);

        match simulate_full_solve(&board) {
            SolveOutcome::Cleared => {
                log::debug!("Attempt {}: board is solvable", attempt);
                return Ok(board);
            }
            outcome => {
                log::debug!("Attempt {}: {:?}, generating new board", attempt, outcome);
            }
        }
    }

    log::warn!(
        "No solvable board after {} attempts",
        config.max_generate_attempts
    );
    Err(GameError::GenerationFailed {
        attempts: config.max_generate_attempts,
    })
}
