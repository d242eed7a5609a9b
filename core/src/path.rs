use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Connecting path between two tiles, with at most two bends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    start: Coord2,
    end: Coord2,
    bends: SmallVec<[Coord2; 2]>,
}

impl Path {
    fn new(start: Coord2, end: Coord2, bends: &[Coord2]) -> Self {
        Self {
            start,
            end,
            bends: SmallVec::from_slice(bends),
        }
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn end(&self) -> Coord2 {
        self.end
    }

    pub fn bends(&self) -> &[Coord2] {
        &self.bends
    }

    pub fn bend_count(&self) -> usize {
        self.bends.len()
    }

    /// Start, bend points, then end.
    pub fn waypoints(&self) -> impl Iterator<Item = Coord2> + '_ {
        core::iter::once(self.start)
            .chain(self.bends.iter().copied())
            .chain(core::iter::once(self.end))
    }

    /// Consecutive waypoint pairs, one per straight run.
    pub fn segments(&self) -> impl Iterator<Item = (Coord2, Coord2)> + '_ {
        self.waypoints().zip(self.waypoints().skip(1))
    }

    pub fn reversed(&self) -> Self {
        let mut bends = self.bends.clone();
        bends.reverse();
        Self {
            start: self.end,
            end: self.start,
            bends,
        }
    }
}

/// Searches for a path of at most three straight runs between two cells.
///
/// Only `Active` tiles block a run; the two endpoints never block regardless
/// of their state. Candidates are tried in a fixed order (direct, then the
/// horizontal-first branch, then the vertical-first branch) and the first hit
/// wins, so results are deterministic for a given board.
#[derive(Debug)]
pub struct PathFinder<'a> {
    board: &'a Board,
    start: Coord2,
    end: Coord2,
}

impl<'a> PathFinder<'a> {
    pub fn new(board: &'a Board, start: Coord2, end: Coord2) -> Result<Self> {
        let start = board.validate_interior(start)?;
        let end = board.validate_interior(end)?;
        Ok(Self { board, start, end })
    }

    pub fn find(&self) -> Option<Path> {
        let (start, end) = (self.start, self.end);

        if self.is_direct(start, end) {
            log::trace!("Direct path {:?} -> {:?}", start, end);
            return Some(Path::new(start, end, &[]));
        }

        for first_axis in [Axis::Horizontal, Axis::Vertical] {
            for first_bend in self.reachable_from(start, first_axis) {
                if self.is_direct(first_bend, end) {
                    log::trace!("One-bend path {:?} -> {:?} via {:?}", start, end, first_bend);
                    return Some(Path::new(start, end, &[first_bend]));
                }

                for second_bend in self.reachable_from(first_bend, first_axis.other()) {
                    if self.is_direct(second_bend, end) {
                        log::trace!(
                            "Two-bend path {:?} -> {:?} via {:?}, {:?}",
                            start,
                            end,
                            first_bend,
                            second_bend
                        );
                        return Some(Path::new(start, end, &[first_bend, second_bend]));
                    }
                }
            }
        }

        log::trace!("No path {:?} -> {:?}", start, end);
        None
    }

    fn is_passable(&self, coords: Coord2) -> bool {
        coords == self.start || coords == self.end || !self.board[coords].is_active()
    }

    /// Straight horizontal or vertical run with nothing active on the way.
    fn is_direct(&self, from: Coord2, to: Coord2) -> bool {
        [Axis::Horizontal, Axis::Vertical].into_iter().any(|axis| {
            axis.aligned(from, to)
                && LineIter::new(axis, from, to).all(|coords| self.is_passable(coords))
        })
    }

    fn reachable_from(&self, origin: Coord2, axis: Axis) -> impl Iterator<Item = Coord2> + '_ {
        let (width, height) = self.board.size();
        let bound = match axis {
            Axis::Horizontal => width,
            Axis::Vertical => height,
        };
        scan_outward(axis, origin, bound, move |coords| self.is_passable(coords))
    }
}

impl Board {
    /// Path between two interior cells, if one exists right now.
    pub fn find_path(&self, start: Coord2, end: Coord2) -> Result<Option<Path>> {
        Ok(PathFinder::new(self, start, end)?.find())
    }
}
