use alloc::vec::Vec;

use super::*;

/// Deals one random face per pair onto two random unused interior cells.
///
/// Faces are drawn independently for every pair, so the same face can end up
/// on several pairs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RandomPairGenerator;

impl LayoutGenerator for RandomPairGenerator {
    fn generate<F, R>(&self, board: &mut Board, faces: &F, rng: &mut R) -> CellCount
    where
        F: FaceSupply,
        R: Rng + ?Sized,
    {
        let mut free_cells: Vec<Coord2> = board.iter_unused().collect();
        let pairs = free_cells.len() / 2;

        for _ in 0..pairs {
            let face = faces.random_face(rng);
            debug_assert!(!faces.is_reserved(face));

            for _ in 0..2 {
                let pick = rng.random_range(0..free_cells.len());
                let coords = free_cells.swap_remove(pick);
                board.place(coords, face);
            }
        }

        if !free_cells.is_empty() {
            log::debug!(
                "Odd number of free cells, {} left unused",
                free_cells.len()
            );
        }
        log::trace!("Placed {} pairs", pairs);
        pairs as CellCount
    }
}
