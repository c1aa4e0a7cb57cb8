use minado_core::{Cell, Coord2, Difficulty, Game, GameState};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// What the renderer may know about one cell right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered { marked: bool },
    Revealed { adjacent: u8 },
    /// Only ever emitted once the game is lost; the fatal cell carries
    /// `triggered`.
    Mine { triggered: bool },
}

/// Full render feed for one frame. Everything the out-of-scope renderer
/// consumes, including the end-of-game pair of current time and best time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub difficulty: Difficulty,
    pub state: GameState,
    pub rows: u8,
    pub cols: u8,
    /// Row-major cell states, `rows * cols` entries.
    pub cells: Vec<CellView>,
    /// Mine counter; negative when the player over-marks.
    pub mines_left: isize,
    pub elapsed_secs: u32,
    pub timer_warning: bool,
    pub best_secs: Option<u32>,
    pub new_record: bool,
}

impl Snapshot {
    pub(crate) fn capture(session: &Session, best_secs: Option<u32>, new_record: bool) -> Self {
        let game = session.game();
        let (rows, cols) = game.size();
        let lost = matches!(game.state(), GameState::Lost);
        let mut cells = Vec::with_capacity(usize::from(rows) * usize::from(cols));
        for row in 0..rows {
            for col in 0..cols {
                cells.push(cell_view(game, (row, col), lost));
            }
        }
        Self {
            difficulty: session.difficulty(),
            state: game.state(),
            rows,
            cols,
            cells,
            mines_left: game.mines_left(),
            elapsed_secs: session.elapsed_secs(),
            timer_warning: session.timer_warning(),
            best_secs,
            new_record,
        }
    }

    pub fn cell(&self, (row, col): Coord2) -> CellView {
        self.cells[usize::from(row) * usize::from(self.cols) + usize::from(col)]
    }
}

/// Mines stay invisible until the session is lost, then the whole layout is
/// shown with the fatal cell singled out.
fn cell_view(game: &Game, coords: Coord2, lost: bool) -> CellView {
    if lost && game.has_mine_at(coords) {
        return CellView::Mine {
            triggered: game.triggered_mine() == Some(coords),
        };
    }
    match game.cell_at(coords) {
        Cell::Hidden => CellView::Covered { marked: false },
        Cell::Marked => CellView::Covered { marked: true },
        Cell::Revealed(adjacent) => CellView::Revealed { adjacent },
    }
}

/// `mm:ss` for the header timer and the end-of-game overlay.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
