use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells surrounded by a one-cell `Dead` border ring.
///
/// Coordinates always address the full grid, border included, so the playable
/// interior spans `1..=width` by `1..=height`. Paths are free to run through
/// the border ring, which is why it exists at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Cell>,
    border_face: Face,
    selection: Option<Coord2>,
    destination: Option<Coord2>,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Cell>,
    border_face: Face,
    selection: Option<Coord2>,
    destination: Option<Coord2>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let (x_end, y_end) = raw.cells.dim();
        let max_full = usize::from(MAX_INTERIOR) + 2;
        if !(3..=max_full).contains(&x_end) || !(3..=max_full).contains(&y_end) {
            return Err(GameError::InvalidBoardShape);
        }
        let border_intact = raw.cells.indexed_iter().all(|((x, y), cell)| {
            let border = x == 0 || y == 0 || x == x_end - 1 || y == y_end - 1;
            !border || matches!(cell.state, CellState::Dead)
        });
        if !border_intact {
            return Err(GameError::InvalidBoardShape);
        }

        let board = Self {
            cells: raw.cells,
            border_face: raw.border_face,
            selection: None,
            destination: None,
        };
        let selection = raw
            .selection
            .map(|coords| board.validate_interior(coords))
            .transpose()?;
        let destination = raw
            .destination
            .map(|coords| board.validate_interior(coords))
            .transpose()?;
        Ok(Self {
            selection,
            destination,
            ..board
        })
    }
}

/// Deep copy of a board taken before a risky operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot(Board);

impl Board {
    pub fn new((width, height): Coord2, border_face: Face) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let full_width = width.checked_add(2).ok_or(GameError::InvalidBoardShape)?;
        let full_height = height.checked_add(2).ok_or(GameError::InvalidBoardShape)?;

        let (x_end, y_end) = (usize::from(full_width), usize::from(full_height));
        let cells = Array2::from_shape_fn((x_end, y_end), |(x, y)| {
            let border = x == 0 || y == 0 || x == x_end - 1 || y == y_end - 1;
            let state = if border {
                CellState::Dead
            } else {
                CellState::Unused
            };
            Cell::new(border_face, state)
        });

        Ok(Self {
            cells,
            border_face,
            selection: None,
            destination: None,
        })
    }

    /// Full grid size, border included.
    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    /// Playable interior size.
    pub fn interior_size(&self) -> Coord2 {
        let (width, height) = self.size();
        (width - 2, height - 2)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn interior_cells(&self) -> CellCount {
        let (width, height) = self.interior_size();
        mult(width, height)
    }

    pub fn border_face(&self) -> Face {
        self.border_face
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.validate_coords(coords).ok().map(|coords| self[coords])
    }

    pub fn face_at(&self, coords: Coord2) -> Face {
        self[coords].face
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self[coords].state
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn is_interior(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.interior_size();
        (1..=width).contains(&x) && (1..=height).contains(&y)
    }

    pub fn validate_interior(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_interior(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Row-major flattened index, the order every board scan follows.
    pub fn index_of(&self, (x, y): Coord2) -> usize {
        let (width, _) = self.size();
        usize::from(y) * usize::from(width) + usize::from(x)
    }

    pub fn coords_of(&self, index: usize) -> Coord2 {
        let (width, _) = self.size();
        let width = usize::from(width);
        ((index % width) as Coord, (index / width) as Coord)
    }

    /// Every coordinate in flattened index order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords()
            .filter(move |&coords| self[coords].state.is_active())
    }

    pub fn iter_unused(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords()
            .filter(move |&coords| matches!(self[coords].state, CellState::Unused))
    }

    pub fn active_count(&self) -> CellCount {
        self.count_where(|cell| cell.state.is_active())
    }

    /// Tiles still on the board, whether selected or not.
    pub fn remaining_tiles(&self) -> CellCount {
        self.count_where(|cell| cell.state.is_in_play())
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining_tiles() == 0
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Source cell of the move in progress.
    pub fn selection(&self) -> Option<Coord2> {
        self.selection
    }

    /// Destination cell of the move in progress.
    pub fn destination(&self) -> Option<Coord2> {
        self.destination
    }

    pub(crate) fn set_selection(&mut self, selection: Option<Coord2>) {
        self.selection = selection;
    }

    pub(crate) fn set_destination(&mut self, destination: Option<Coord2>) {
        self.destination = destination;
    }

    /// `Unused -> Active` on an interior cell, returns whether the cell changed.
    pub fn place(&mut self, coords: Coord2, face: Face) -> bool {
        if !self.is_interior(coords) {
            return false;
        }
        let cell = &mut self.cells[coords.to_nd_index()];
        if matches!(cell.state, CellState::Unused) {
            *cell = Cell::new(face, CellState::Active);
            true
        } else {
            false
        }
    }

    /// `Active -> Selected`, returns whether the cell changed.
    pub fn select(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.state.is_active() {
            cell.state = CellState::Selected;
            true
        } else {
            false
        }
    }

    /// `Selected -> Active`, returns whether the cell changed.
    pub fn deselect(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if matches!(cell.state, CellState::Selected) {
            cell.state = CellState::Active;
            true
        } else {
            false
        }
    }

    /// `Active/Selected -> Dead` for both cells of a matched pair. Nothing
    /// changes unless both are distinct tiles still in play.
    pub fn remove_pair(&mut self, first: Coord2, second: Coord2) -> bool {
        if !self.is_tile_pair(first, second) {
            return false;
        }
        for coords in [first, second] {
            self.cells[coords.to_nd_index()].state = CellState::Dead;
        }
        true
    }

    /// Returns every selected cell to `Active` and forgets the move in progress.
    pub fn unselect_all(&mut self) {
        for cell in self.cells.iter_mut() {
            if matches!(cell.state, CellState::Selected) {
                cell.state = CellState::Active;
            }
        }
        self.selection = None;
        self.destination = None;
    }

    /// Removes the first two selected cells in scan order, as left behind by a
    /// non-interactive hint.
    pub fn remove_selected_pair(&mut self) -> Option<(Coord2, Coord2)> {
        let mut selected = self
            .iter_coords()
            .filter(|&coords| matches!(self[coords].state, CellState::Selected));
        let first = selected.next()?;
        let second = selected.next()?;
        drop(selected);

        if self.face_at(first) != self.face_at(second) {
            log::warn!(
                "Selected cells are not a pair: {:?} at {:?}, {:?} at {:?}",
                self.face_at(first),
                first,
                self.face_at(second),
                second
            );
        }
        self.remove_pair(first, second);
        Some((first, second))
    }

    /// Exchanges the faces of two tiles in play, leaving both `Active`.
    pub fn swap_faces(&mut self, first: Coord2, second: Coord2) -> bool {
        if !self.is_tile_pair(first, second) {
            return false;
        }
        let first_face = self.face_at(first);
        let second_face = self.face_at(second);
        for (coords, face) in [(first, second_face), (second, first_face)] {
            self.cells[coords.to_nd_index()] = Cell::new(face, CellState::Active);
        }
        true
    }

    fn is_tile_pair(&self, first: Coord2, second: Coord2) -> bool {
        first != second
            && [first, second]
                .into_iter()
                .all(|coords| self.get(coords).is_some_and(|cell| cell.state.is_in_play()))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: BoardSnapshot) {
        *self = snapshot.0;
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
