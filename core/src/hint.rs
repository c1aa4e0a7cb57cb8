use crate::*;

impl Game {
    /// Deterministic row-major scan for a covered, unmarked cell that is
    /// guaranteed mine-free. Before placement every candidate qualifies,
    /// since placement will exclude whichever cell gets revealed first.
    pub fn find_safe_cell(&self) -> Option<Coord2> {
        let (rows, cols) = self.size();
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .find(|&coords| {
                matches!(self.cell_at(coords), Cell::Hidden) && !self.has_mine_at(coords)
            })
    }

    /// Open a safe cell for the player. Indistinguishable from the player
    /// revealing that cell, mine placement and flood propagation included;
    /// a no-op when the game is over or nothing safe is left covered.
    pub fn hint(&mut self) -> Result<RevealOutcome> {
        if self.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        match self.find_safe_cell() {
            Some(coords) => self.reveal(coords),
            None => Ok(RevealOutcome::NoChange),
        }
    }
}
