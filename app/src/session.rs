use std::time::{SystemTime, UNIX_EPOCH};

use minado_core::{Coord2, Difficulty, Game, GameState, MarkOutcome, Result, RevealOutcome};
use serde::{Deserialize, Serialize};

use crate::timer::SessionClock;

/// One difficulty-sized run of the game: board, state machine, and clock.
/// Replaced wholesale on restart or difficulty change, never resized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    difficulty: Difficulty,
    game: Game,
    clock: SessionClock,
}

impl Session {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, time_seed())
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_game(difficulty, Game::new(difficulty.config(), seed))
    }

    /// Wrap an existing game, e.g. one restored by the host or built over a
    /// hand-placed board.
    pub fn with_game(difficulty: Difficulty, game: Game) -> Self {
        Self {
            difficulty,
            game,
            clock: SessionClock::default(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    pub fn timer_warning(&self) -> bool {
        self.clock.is_warning()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.game.reveal(coords)
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.game.toggle_mark(coords)
    }

    pub fn hint(&mut self) -> Result<RevealOutcome> {
        self.game.hint()
    }

    /// Advance the clock one second. Only a running game accumulates time:
    /// the timer starts with the first reveal and freezes at a terminal
    /// state.
    pub fn tick(&mut self) {
        if matches!(self.state(), GameState::Playing) {
            self.clock.tick();
        }
    }

    /// Fresh board at the same difficulty, timer back to zero.
    pub fn restart(&mut self) {
        *self = Self::new(self.difficulty);
    }

    /// Discard the current board and start over at the new size.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        *self = Self::new(difficulty);
    }
}

/// Seed material for a fresh board when the host does not supply any.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::from(elapsed.subsec_nanos()) ^ elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minado_core::Board;

    /// 2x2 board with one mine in the corner: every move is predictable.
    fn tiny_session() -> Session {
        let board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        Session::with_game(Difficulty::Easy, Game::with_board(board))
    }

    #[test]
    fn clock_only_runs_while_playing() {
        let mut session = tiny_session();

        session.tick();
        assert_eq!(session.elapsed_secs(), 0, "no time before the first reveal");

        session.reveal((0, 1)).unwrap();
        assert_eq!(session.state(), GameState::Playing);
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn clock_freezes_on_a_lost_game() {
        let mut session = tiny_session();
        session.reveal((0, 1)).unwrap();
        session.tick();

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(session.state(), GameState::Lost);

        session.tick();
        assert_eq!(session.elapsed_secs(), 1);
    }

    #[test]
    fn restart_resets_board_and_clock() {
        let mut session = Session::with_seed(Difficulty::Easy, 3);
        session.reveal((0, 0)).unwrap();
        session.tick();

        session.restart();

        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.elapsed_secs(), 0);
        assert!(!session.game().mines_placed());
        assert_eq!(session.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn switching_difficulty_discards_the_live_board() {
        let mut session = Session::with_seed(Difficulty::Hard, 3);
        session.reveal((0, 0)).unwrap();
        session.tick();
        assert_eq!(session.game().size(), (30, 16));

        session.change_difficulty(Difficulty::VeryHard);

        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.game().size(), (30, 24));
        assert_eq!(session.game().total_mines(), 150);
        assert!(!session.game().mines_placed());
    }
}
