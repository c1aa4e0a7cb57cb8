#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod hint;
mod types;

/// Board shape and mine total, as picked from the difficulty catalog or built
/// by hand for custom games.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mines = mines.clamp(1, area(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }

    /// Cells a player has to reveal to win.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.size.0 && coords.1 < self.size.1
    }

    /// Whether a first reveal can keep its full 3x3 neighborhood mine-free.
    /// The catalog entries always can; hand-built configs must be checked
    /// before use.
    pub const fn supports_safe_start(&self) -> bool {
        self.mines.saturating_add(9) < self.total_cells()
    }
}

/// A placed mine layout: which cells hold mines, and how many there are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: Array2<bool>,
    mine_count: CellCount,
}

impl Board {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let mine_count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self { mines, mine_count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.nd());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoordinate);
            }
            mines[coords.nd()] = true;
        }
        Ok(Self::from_mine_mask(mines))
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mines.dim();
        (rows.try_into().unwrap(), cols.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mined neighbors around `coords`, 0..=8.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mines[coords.nd()]
    }
}

/// Outcome of toggling a mark.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a reveal request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
