use ndarray::Array2;

use super::*;

/// Uniform random placement that keeps the first-revealed cell and its whole
/// neighborhood mine-free, so the first reveal always lands on a zero cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    safe_start: Coord2,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, safe_start: Coord2) -> Self {
        Self { seed, safe_start }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        if !config.contains(self.safe_start) {
            return Err(GameError::InvalidCoordinate);
        }
        if !config.supports_safe_start() {
            return Err(GameError::InvalidConfiguration);
        }

        let mut mines: Array2<bool> = Array2::default(config.size.nd());

        // Reserve the exclusion zone up front so the draw below cannot land
        // there.
        mines[self.safe_start.nd()] = true;
        let mut reserved: CellCount = 1;
        for pos in neighbors(self.safe_start, config.size) {
            mines[pos.nd()] = true;
            reserved += 1;
        }

        let mut free_cells = config.total_cells() - reserved;
        let mut placed: CellCount = 0;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mines.as_slice_mut().expect("fresh mask is contiguous");
            while placed < config.mines {
                // the nth currently-free slot receives the mine
                let mut slot = rng.random_range(0..free_cells);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if slot == 0 {
                        *cell = true;
                        placed += 1;
                        free_cells -= 1;
                        break;
                    }
                    slot -= 1;
                }
            }
        }

        // Hand the reserved zone back before counting.
        mines[self.safe_start.nd()] = false;
        for pos in neighbors(self.safe_start, config.size) {
            mines[pos.nd()] = false;
        }

        let board = Board::from_mine_mask(mines);
        if board.mine_count() != config.mines {
            log::warn!(
                "generated mine count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                config.mines
            );
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: GameConfig = GameConfig::new_unchecked((9, 9), 10);

    #[test]
    fn places_exactly_the_requested_mines() {
        let board = RandomBoardGenerator::new(7, (4, 4)).generate(CONFIG).unwrap();

        assert_eq!(board.mine_count(), 10);
        assert_eq!(board.safe_cells(), 71);
    }

    #[test]
    fn exclusion_zone_stays_mine_free() {
        for seed in 0..32 {
            let board = RandomBoardGenerator::new(seed, (4, 4)).generate(CONFIG).unwrap();

            assert!(!board.contains_mine((4, 4)));
            for pos in neighbors((4, 4), board.size()) {
                assert!(!board.contains_mine(pos), "seed {seed} mined {pos:?}");
            }
            assert_eq!(board.adjacent_mine_count((4, 4)), 0);
        }
    }

    #[test]
    fn corner_start_excludes_its_smaller_neighborhood() {
        let board = RandomBoardGenerator::new(3, (0, 0)).generate(CONFIG).unwrap();

        assert!(!board.contains_mine((0, 0)));
        assert_eq!(board.adjacent_mine_count((0, 0)), 0);
        assert_eq!(board.mine_count(), 10);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = RandomBoardGenerator::new(99, (2, 7)).generate(CONFIG).unwrap();
        let b = RandomBoardGenerator::new(99, (2, 7)).generate(CONFIG).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn rejects_configs_without_room_for_the_exclusion_zone() {
        // 3x3 leaves nothing outside a full 3x3 neighborhood
        let cramped = GameConfig::new_unchecked((3, 3), 1);
        let result = RandomBoardGenerator::new(0, (1, 1)).generate(cramped);
        assert_eq!(result, Err(GameError::InvalidConfiguration));

        let packed = GameConfig::new_unchecked((9, 9), 72);
        let result = RandomBoardGenerator::new(0, (4, 4)).generate(packed);
        assert_eq!(result, Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn rejects_out_of_bounds_start() {
        let result = RandomBoardGenerator::new(0, (9, 0)).generate(CONFIG);
        assert_eq!(result, Err(GameError::InvalidCoordinate));
    }
}
