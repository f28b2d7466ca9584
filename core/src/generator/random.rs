use super::*;

/// Uniform rejection sampling: draw a random tile, keep it unless it is already mined or excluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig, zone: &ExclusionZone) -> Result<Array2<bool>> {
        use rand::prelude::*;

        config.validate()?;

        // sampling can only terminate if there is room for every mine
        let free_tiles = zone.free_tiles(config.size());
        if config.mines > free_tiles {
            log::warn!(
                "Cannot place {} mines, only {} tiles outside the exclusion zone",
                config.mines,
                free_tiles
            );
            return Err(GameError::TooManyMines);
        }

        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut rejected: u32 = 0;

        while mines_placed < config.mines {
            let coords = (
                rng.random_range(0..config.rows),
                rng.random_range(0..config.cols),
            );
            let tile = &mut mines[coords.to_nd_index()];
            if *tile || zone.contains(coords) {
                rejected = rejected.saturating_add(1);
                continue;
            }
            *tile = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines with seed {}, rejected {} samples",
            mines_placed,
            self.seed,
            rejected
        );
        Ok(mines)
    }
}
