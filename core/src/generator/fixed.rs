use alloc::vec::Vec;

use super::*;

/// Places mines at known coordinates, for reproducing a specific board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, config: GameConfig, zone: &ExclusionZone) -> Result<Array2<bool>> {
        let (rows, cols) = config.size();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        for coords in self.mines {
            if coords.0 >= rows || coords.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            if zone.contains(coords) {
                log::warn!("Fixed mine at {:?} is inside the exclusion zone", coords);
                return Err(GameError::InvalidLayout);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(mines)
    }
}
