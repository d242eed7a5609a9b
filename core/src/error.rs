use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape is empty or too large")]
    InvalidBoardShape,
    #[error("Face supply has no usable faces")]
    NoUsableFaces,
    #[error("No solvable layout after {attempts} attempts")]
    GenerationFailed { attempts: u32 },
    #[error("Board already cleared, no new moves are accepted")]
    AlreadyCleared,
    #[error("Not allowed while the demo is running")]
    DemoActive,
    #[error("Demo is not running")]
    DemoInactive,
    #[error("Invalid game configuration")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;
