use serde::{Deserialize, Serialize};

/// Player-visible state of one grid cell.
///
/// The payload of `Revealed` is the adjacent-mine count. It is only ever
/// written from a placed board, so it is meaningful whenever it is readable;
/// mine cells are never stored as `Revealed`, the fatal cell is tracked by
/// the engine separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Hidden,
    Revealed(u8),
    Marked,
}

impl Cell {
    /// Whether the cell still hides its content; marked cells stay covered.
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Hidden | Self::Marked)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}
