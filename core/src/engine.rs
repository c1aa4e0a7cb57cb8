use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a single game.
///
/// `Won` and `Lost` are terminal: no further moves are accepted until the
/// session is restarted or switched to another difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One game from construction to win or loss.
///
/// Mines are not placed at construction. The layout is generated on the first
/// reveal, excluding that cell and its neighbors, which is what makes the
/// first reveal safe under every seed. Marks set before the first reveal
/// survive placement untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    mines: Option<Board>,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    marked_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            mines: None,
            grid: Array2::default(config.size.nd()),
            revealed_count: 0,
            marked_count: 0,
            state: GameState::default(),
            triggered_mine: None,
        }
    }

    /// Build a game over an already-placed layout, skipping lazy generation.
    pub fn with_board(board: Board) -> Self {
        let config = board.config();
        Self {
            mines: Some(board),
            ..Self::new(config, 0)
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mine counter for display; goes negative when the player over-marks.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.marked_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.nd()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mines_placed(&self) -> bool {
        self.mines.is_some()
    }

    /// False before placement: an empty board holds no mines yet.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mines
            .as_ref()
            .is_some_and(|board| board.contains_mine(coords))
    }

    /// Win predicate: every safe cell revealed. Mines never have to be
    /// revealed or marked to win.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.config.safe_cells()
    }

    /// Toggle the mark on a covered cell. Marking is allowed as soon as the
    /// board exists, including before the first reveal.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate(coords)?;
        self.check_not_finished()?;

        Ok(match self.grid[coords.nd()] {
            Cell::Hidden => {
                self.grid[coords.nd()] = Cell::Marked;
                self.marked_count += 1;
                MarkOutcome::Changed
            }
            Cell::Marked => {
                self.grid[coords.nd()] = Cell::Hidden;
                self.marked_count -= 1;
                MarkOutcome::Changed
            }
            Cell::Revealed(_) => MarkOutcome::NoChange,
        })
    }

    /// Reveal a covered cell: the primary player action.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate(coords)?;
        self.check_not_finished()?;

        if !matches!(self.grid[coords.nd()], Cell::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }

        self.ensure_mines_placed(coords)?;
        Ok(self.reveal_single_cell(coords))
    }

    /// Lazy placement, keyed off the first reveal target: placement happens
    /// strictly after that target is known, never before.
    fn ensure_mines_placed(&mut self, first_reveal: Coord2) -> Result<()> {
        if self.mines.is_none() {
            let board = RandomBoardGenerator::new(self.seed, first_reveal).generate(self.config)?;
            log::debug!("placed {} mines away from {:?}", board.mine_count(), first_reveal);
            self.mines = Some(board);
        }
        Ok(())
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.has_mine_at(coords) {
            self.triggered_mine = Some(coords);
            self.finish(false);
            return RevealOutcome::HitMine;
        }

        let size = self.config.size;
        let adjacent = self.adjacent_count(coords);
        self.grid[coords.nd()] = Cell::Revealed(adjacent);
        self.revealed_count += 1;
        log::trace!("revealed {:?}, adjacent mines: {}", coords, adjacent);

        if adjacent == 0 {
            // Flood the zero region breadth-first. The visited set bounds
            // every cell to a single visit; numbered cells are revealed but
            // never expanded, marked cells block propagation entirely.
            let mut visited: HashSet<Coord2> = HashSet::new();
            visited.insert(coords);
            let mut worklist: VecDeque<Coord2> = neighbors(coords, size)
                .filter(|&pos| matches!(self.grid[pos.nd()], Cell::Hidden))
                .collect();

            while let Some(next) = worklist.pop_front() {
                if !visited.insert(next) {
                    continue;
                }
                if !matches!(self.grid[next.nd()], Cell::Hidden) {
                    continue;
                }

                let next_adjacent = self.adjacent_count(next);
                self.grid[next.nd()] = Cell::Revealed(next_adjacent);
                self.revealed_count += 1;

                if next_adjacent == 0 {
                    worklist.extend(
                        neighbors(next, size)
                            .filter(|&pos| matches!(self.grid[pos.nd()], Cell::Hidden))
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        if self.is_cleared() {
            self.finish(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    fn adjacent_count(&self, coords: Coord2) -> u8 {
        self.mines
            .as_ref()
            .map_or(0, |board| board.adjacent_mine_count(coords))
    }

    fn mark_started(&mut self) {
        if self.state.is_initial() {
            log::debug!("first reveal done, game in progress");
            self.state = GameState::Playing;
        }
    }

    fn finish(&mut self, won: bool) {
        if self.state.is_final() {
            return;
        }
        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("game over: {:?}", self.state);
    }

    fn validate(&self, coords: Coord2) -> Result<Coord2> {
        if self.config.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
