use core::num::Saturating;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Cleared,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Cleared)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One tick of the demo autoplay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DemoStep {
    /// A pair was found and taken off the board
    Removed(Path),
    /// Board was already clear, a new one was dealt
    Restarted,
    /// No move left, demo mode switched off
    Stopped,
}

/// A game from deal to clear: the live board plus everything the surrounding
/// game loop needs to drive it.
#[derive(Clone, Debug)]
pub struct PlayEngine {
    config: GameConfig,
    faces: FaceSet,
    rng: SmallRng,
    board: Board,
    score: Saturating<u32>,
    penalty_secs: Saturating<u32>,
    state: EngineState,
    demo: bool,
    next_hint: u32,
}

impl PlayEngine {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let faces = config.deck.face_set();
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = generate_solvable(&config, &RandomPairGenerator, &faces, &mut rng)?;
        log::debug!("New game {:?} with seed {}", config.size, seed);

        Ok(Self {
            next_hint: config.auto_hint_secs,
            config,
            faces,
            rng,
            board,
            score: Saturating(0),
            penalty_secs: Saturating(0),
            state: Default::default(),
            demo: false,
        })
    }

    /// Deals a fresh solvable board and resets score and penalties.
    pub fn restart(&mut self) -> Result<()> {
        self.board =
            generate_solvable(&self.config, &RandomPairGenerator, &self.faces, &mut self.rng)?;
        self.score = Saturating(0);
        self.penalty_secs = Saturating(0);
        self.state = EngineState::Playing;
        self.next_hint = self.config.auto_hint_secs;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score.0
    }

    /// Seconds to add to the player's clock for hints and shuffles.
    pub fn penalty_secs(&self) -> u32 {
        self.penalty_secs.0
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// Seconds until the next automatic hint.
    pub fn next_hint_in(&self) -> u32 {
        self.next_hint
    }

    /// Player picks a cell: first click selects a source, second click tries
    /// to match it.
    pub fn click(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;
        self.board.set_destination(None);

        let Some(source) = self.board.selection() else {
            return Ok(if self.board.select(coords) {
                self.board.set_selection(Some(coords));
                Selected
            } else {
                NoChange
            });
        };

        let outcome = if !self.board.state_at(coords).is_active() {
            self.board.deselect(source);
            Deselected
        } else {
            self.board.set_destination(Some(coords));
            if self.board.face_at(source) != self.board.face_at(coords) {
                self.board.deselect(source);
                Mismatched
            } else {
                self.board.select(coords);
                match self.board.find_path(source, coords)? {
                    Some(path) => self.apply_match(path),
                    None => {
                        self.board.deselect(source);
                        self.board.deselect(coords);
                        Blocked
                    }
                }
            }
        };

        self.board.set_selection(None);
        self.board.set_destination(None);
        Ok(outcome)
    }

    fn apply_match(&mut self, path: Path) -> ClickOutcome {
        self.board.remove_pair(path.start(), path.end());
        self.score += Saturating(1);
        self.next_hint = self.config.auto_hint_secs;
        log::debug!("Matched {:?} -> {:?}, score {}", path.start(), path.end(), self.score.0);

        if self.board.is_cleared() {
            log::debug!("Board cleared with score {}", self.score.0);
            self.state = EngineState::Cleared;
            ClickOutcome::Cleared(path)
        } else {
            ClickOutcome::Matched(path)
        }
    }

    /// Shows the next move. Interactive hints cost `hint_penalty_secs` and are
    /// not available while the demo runs.
    pub fn hint(&mut self, interactive: bool) -> Result<SolveStatus> {
        if interactive {
            self.check_not_demo()?;
            self.penalty_secs += Saturating(self.config.hint_penalty_secs);
        }
        Ok(self.run_hint())
    }

    fn run_hint(&mut self) -> SolveStatus {
        self.board.unselect_all();
        let status = hint(&mut self.board);
        self.board.unselect_all();

        if matches!(status, SolveStatus::NoMove) {
            log::warn!("This board might not be solvable");
        }
        status
    }

    /// Swaps tiles until the board is solvable again. Interactive shuffles cost
    /// `shuffle_penalty_secs` when they succeed.
    pub fn shuffle(&mut self, interactive: bool) -> Result<ShuffleOutcome> {
        if interactive {
            self.check_not_demo()?;
        }

        let outcome = shuffle(&mut self.board, &mut self.rng, self.config.max_shuffle_attempts);
        if interactive && outcome.is_success() {
            self.penalty_secs += Saturating(self.config.shuffle_penalty_secs);
        }
        Ok(outcome)
    }

    /// One-second driver hook; issues an automatic hint once the countdown
    /// runs out. A zero `auto_hint_secs` disables it.
    pub fn tick(&mut self) -> Option<SolveStatus> {
        if self.config.auto_hint_secs == 0 || self.state.is_finished() {
            return None;
        }

        self.next_hint = self.next_hint.saturating_sub(1);
        if self.next_hint > 0 {
            return None;
        }

        log::debug!("Scheduling automatic hint");
        self.next_hint = self.config.auto_hint_secs;
        Some(self.run_hint())
    }

    pub fn start_demo(&mut self) -> Result<()> {
        self.check_not_demo()?;
        self.demo = true;
        Ok(())
    }

    /// Leaves demo mode and deals a new board.
    pub fn stop_demo(&mut self) -> Result<()> {
        self.demo = false;
        self.restart()
    }

    /// Plays one demo move, restarting on a clear board and stopping when stuck.
    pub fn demo_step(&mut self) -> Result<DemoStep> {
        if !self.demo {
            return Err(GameError::DemoInactive);
        }

        self.board.unselect_all();
        match hint(&mut self.board) {
            SolveStatus::OneMove(path) => {
                self.board.remove_selected_pair();
                if self.board.is_cleared() {
                    self.state = EngineState::Cleared;
                }
                Ok(DemoStep::Removed(path))
            }
            SolveStatus::Cleared => {
                log::debug!("Board solved, restarting demo");
                self.restart()?;
                Ok(DemoStep::Restarted)
            }
            SolveStatus::NoMove => {
                log::warn!("Unable to solve board, stopping demo");
                self.demo = false;
                Ok(DemoStep::Stopped)
            }
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyCleared)
        } else {
            Ok(())
        }
    }

    fn check_not_demo(&self) -> Result<()> {
        if self.demo {
            Err(GameError::DemoActive)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig {
            size: (4, 2),
            auto_hint_secs: 3,
            ..GameConfig::default()
        }
    }

    fn engine_with(tiles: &[(Coord2, u16)]) -> PlayEngine {
        let mut engine = PlayEngine::new(small_config(), 0).unwrap();
        let mut board = Board::new(engine.config.size, engine.faces.border_face()).unwrap();
        for &(coords, face) in tiles {
            board.place(coords, Face(face));
        }
        engine.board = board;
        engine
    }

    #[test]
    fn new_engine_deals_full_solvable_board() {
        let engine = PlayEngine::new(GameConfig::default(), 17).unwrap();

        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.board().active_count(), 140);
        assert!(simulate_full_solve(engine.board()).is_cleared());
        assert_eq!(engine.next_hint_in(), 300);
    }

    #[test]
    fn matching_pair_is_removed_and_scored() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3), ((1, 2), 4), ((4, 2), 4)]);

        assert_eq!(engine.click((1, 1)).unwrap(), ClickOutcome::Selected);
        assert_eq!(engine.board().selection(), Some((1, 1)));
        assert_eq!(engine.board().state_at((1, 1)), CellState::Selected);

        let outcome = engine.click((3, 1)).unwrap();

        assert!(matches!(outcome, ClickOutcome::Matched(ref path) if path.bend_count() == 0));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.board().state_at((1, 1)), CellState::Dead);
        assert_eq!(engine.board().state_at((3, 1)), CellState::Dead);
        assert_eq!(engine.board().active_count(), 2);
        assert_eq!(engine.board().selection(), None);
    }

    #[test]
    fn mismatched_faces_deselect_both() {
        let mut engine = engine_with(&[((1, 1), 3), ((2, 1), 4), ((3, 1), 3), ((4, 1), 4)]);

        engine.click((1, 1)).unwrap();
        assert_eq!(engine.click((2, 1)).unwrap(), ClickOutcome::Mismatched);

        assert_eq!(engine.board().state_at((1, 1)), CellState::Active);
        assert_eq!(engine.board().state_at((2, 1)), CellState::Active);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn blocked_pair_reverts_to_active() {
        // (1, 1) is boxed in by 7 and 8, and 5 sits right above the other 3
        let mut engine = engine_with(&[
            ((1, 1), 3),
            ((2, 1), 7),
            ((1, 2), 8),
            ((2, 2), 9),
            ((3, 2), 3),
            ((4, 2), 6),
            ((3, 1), 5),
        ]);

        engine.click((1, 1)).unwrap();
        assert_eq!(engine.click((3, 2)).unwrap(), ClickOutcome::Blocked);

        assert_eq!(engine.board().state_at((1, 1)), CellState::Active);
        assert_eq!(engine.board().state_at((3, 2)), CellState::Active);
        assert_eq!(engine.board().active_count(), 7);
    }

    #[test]
    fn clicking_an_inactive_cell_drops_the_selection() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3)]);

        assert_eq!(engine.click((0, 0)).unwrap(), ClickOutcome::NoChange);
        engine.click((1, 1)).unwrap();
        assert_eq!(engine.click((1, 1)).unwrap(), ClickOutcome::Deselected);
        assert_eq!(engine.board().state_at((1, 1)), CellState::Active);
        assert_eq!(engine.click((9, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn clearing_the_board_ends_the_game() {
        let mut engine = engine_with(&[((1, 1), 3), ((4, 2), 3)]);

        engine.click((1, 1)).unwrap();
        let outcome = engine.click((4, 2)).unwrap();

        assert!(matches!(outcome, ClickOutcome::Cleared(_)));
        assert_eq!(engine.state(), EngineState::Cleared);
        assert_eq!(engine.click((1, 1)), Err(GameError::AlreadyCleared));

        engine.restart().unwrap();
        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn interactive_hint_costs_time_and_releases_cells() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3)]);
        engine.click((1, 1)).unwrap();

        let status = engine.hint(true).unwrap();

        let path = status.path().unwrap();
        assert_eq!((path.start(), path.end()), ((1, 1), (3, 1)));
        assert_eq!(engine.penalty_secs(), 60);
        assert_eq!(engine.board().active_count(), 2);
        assert_eq!(engine.board().selection(), None);
    }

    #[test]
    fn interactive_shuffle_costs_time_on_success() {
        let mut engine = engine_with(&[((1, 1), 1), ((2, 1), 1), ((3, 1), 2), ((4, 1), 2)]);

        let outcome = engine.shuffle(true).unwrap();

        assert!(outcome.is_success());
        assert_eq!(engine.penalty_secs(), 60);
        assert!(simulate_full_solve(engine.board()).is_cleared());

        engine.shuffle(false).unwrap();
        assert_eq!(engine.penalty_secs(), 60);
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3), ((1, 2), 4), ((4, 2), 4)]);
        engine.penalty_secs = Saturating(u32::MAX - 10);
        engine.score = Saturating(u32::MAX);

        engine.hint(true).unwrap();
        engine.click((1, 1)).unwrap();
        let outcome = engine.click((3, 1)).unwrap();

        assert!(matches!(outcome, ClickOutcome::Matched(_)));
        assert_eq!(engine.penalty_secs(), u32::MAX);
        assert_eq!(engine.score(), u32::MAX);
    }

    #[test]
    fn auto_hint_fires_after_countdown() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3)]);

        assert_eq!(engine.tick(), None);
        assert_eq!(engine.tick(), None);
        let status = engine.tick().unwrap();

        assert!(status.path().is_some());
        assert_eq!(engine.next_hint_in(), 3);
        assert_eq!(engine.penalty_secs(), 0);
        assert_eq!(engine.board().active_count(), 2);
    }

    #[test]
    fn match_resets_auto_hint_countdown() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3), ((1, 2), 4), ((2, 2), 4)]);

        engine.tick();
        engine.tick();
        engine.click((1, 1)).unwrap();
        engine.click((3, 1)).unwrap();

        assert_eq!(engine.next_hint_in(), 3);
    }

    #[test]
    fn demo_plays_board_to_the_end_and_restarts() {
        let mut engine = engine_with(&[((1, 1), 3), ((3, 1), 3), ((1, 2), 4), ((2, 2), 4)]);

        assert_eq!(engine.demo_step(), Err(GameError::DemoInactive));
        engine.start_demo().unwrap();
        assert_eq!(engine.start_demo(), Err(GameError::DemoActive));
        assert_eq!(engine.hint(true), Err(GameError::DemoActive));
        assert_eq!(engine.shuffle(true), Err(GameError::DemoActive));

        assert!(matches!(engine.demo_step().unwrap(), DemoStep::Removed(_)));
        assert!(matches!(engine.demo_step().unwrap(), DemoStep::Removed(_)));
        assert_eq!(engine.state(), EngineState::Cleared);
        assert_eq!(engine.score(), 0);

        assert_eq!(engine.demo_step().unwrap(), DemoStep::Restarted);
        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.board().active_count(), 8);
        assert!(engine.is_demo());

        engine.stop_demo().unwrap();
        assert!(!engine.is_demo());
    }

    #[test]
    fn demo_stops_when_stuck() {
        let mut engine = engine_with(&[
            ((1, 1), 3),
            ((2, 1), 7),
            ((1, 2), 8),
            ((2, 2), 9),
            ((3, 2), 3),
            ((4, 2), 6),
            ((3, 1), 5),
        ]);
        engine.start_demo().unwrap();

        assert_eq!(engine.demo_step().unwrap(), DemoStep::Stopped);
        assert!(!engine.is_demo());
    }
}
