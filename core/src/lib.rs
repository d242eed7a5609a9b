#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use path::*;
pub use solver::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod path;
mod solver;
mod tile;
mod types;

/// Largest interior dimension that still leaves room for the border ring.
pub const MAX_INTERIOR: Coord = Coord::MAX - 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playable interior `(width, height)`, border excluded
    pub size: Coord2,
    pub deck: Deck,
    pub max_generate_attempts: u32,
    pub max_shuffle_attempts: u32,
    pub hint_penalty_secs: u32,
    pub shuffle_penalty_secs: u32,
    /// Seconds without a match before an automatic hint, zero disables it
    pub auto_hint_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: (14, 10),
            deck: Deck::Mahjong,
            max_generate_attempts: 1000,
            max_shuffle_attempts: 100,
            hint_penalty_secs: 60,
            shuffle_penalty_secs: 60,
            auto_hint_secs: 5 * 60,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|err| {
            log::warn!("Could not parse game config: {}", err);
            GameError::InvalidConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if !(1..=MAX_INTERIOR).contains(&width) || !(1..=MAX_INTERIOR).contains(&height) {
            return Err(GameError::InvalidConfig);
        }
        if self.max_generate_attempts == 0 || self.max_shuffle_attempts == 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Outcome of a player click
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    /// First tile of a move picked
    Selected,
    /// Selection dropped by clicking something that is not an active tile
    Deselected,
    /// Faces differ, both tiles back in play
    Mismatched,
    /// Faces match but no path with at most two bends exists
    Blocked,
    Matched(Path),
    /// Last pair taken, the board is empty
    Cleared(Path),
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Deselected => true,
            Mismatched => true,
            Blocked => true,
            Matched(_) => true,
            Cleared(_) => true,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Matched(path) | Self::Cleared(path) => Some(path),
            _ => None,
        }
    }
}
