use super::*;

/// Uniformly random placement that keeps the 3x3 block around the first revealed tile free of mines.
///
/// Candidates are drawn by rejection sampling: a random coordinate is drawn until it is neither a mine already nor
/// inside the spawn protection.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }

    fn is_protected(&self, coords: Coord2) -> bool {
        chebyshev_distance(coords, self.start) <= SPAWN_PROTECTION
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        use rand::prelude::*;

        let mut minefield = Minefield::empty(config.size);

        // sampling can only finish when enough unprotected tiles exist
        let protected = iter_coords(config.size)
            .filter(|&pos| self.is_protected(pos))
            .count() as CellCount;
        let free_tiles = config.total_cells() - protected;
        let mines = if config.mines > free_tiles {
            log::warn!(
                "Minefield cannot fit all mines, requested {} but only {} tiles are free",
                config.mines,
                free_tiles
            );
            free_tiles
        } else {
            config.mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut rejected = 0usize;
        while minefield.mine_count() < mines {
            let coords = (
                rng.random_range(0..config.size.0),
                rng.random_range(0..config.size.1),
            );
            if self.is_protected(coords) || !minefield.place_mine(coords) {
                rejected += 1;
            }
        }

        log::debug!(
            "Placed {} mines around start {:?} (seed {}, {} samples rejected)",
            minefield.mine_count(),
            self.start,
            self.seed,
            rejected
        );
        minefield
    }
}
