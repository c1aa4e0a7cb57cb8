/// Single board axis, wide enough for the largest catalog board.
pub type Coord = u8;

/// Count type used for mine totals and cell totals.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait AsIndex {
    fn nd(self) -> [usize; 2];
}

impl AsIndex for Coord2 {
    fn nd(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

/// Board area; saturates so oversized hand-built configs cannot wrap.
pub const fn area(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

const NEIGHBOR_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up-to-8 in-bounds neighbors of `center` on a board of `size`; edge and
/// corner cells yield fewer.
pub fn neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = size;
    NEIGHBOR_DELTAS.into_iter().filter_map(move |(dr, dc)| {
        let row = center.0.checked_add_signed(dr)?;
        let col = center.1.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some((row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_count_depends_on_position() {
        assert_eq!(neighbors((0, 0), (9, 9)).count(), 3);
        assert_eq!(neighbors((0, 4), (9, 9)).count(), 5);
        assert_eq!(neighbors((4, 4), (9, 9)).count(), 8);
        assert_eq!(neighbors((8, 8), (9, 9)).count(), 3);
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        for coords in neighbors((0, 0), (2, 2)) {
            assert!(coords.0 < 2 && coords.1 < 2);
        }
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }
}
