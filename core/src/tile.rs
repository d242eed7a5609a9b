use serde::{Deserialize, Serialize};

/// Opaque tile picture, only ever compared for equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Face(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// Interior cell without a tile yet
    Unused,
    /// Tile in play
    Active,
    /// Tile picked as half of a candidate move
    Selected,
    /// Matched and removed, or part of the border ring
    Dead,
}

impl CellState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether a tile is still on the board, picked or not.
    pub const fn is_in_play(self) -> bool {
        matches!(self, Self::Active | Self::Selected)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Unused
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub face: Face,
    pub state: CellState,
}

impl Cell {
    pub const fn new(face: Face, state: CellState) -> Self {
        Self { face, state }
    }

    pub const fn is_active(self) -> bool {
        self.state.is_active()
    }
}
