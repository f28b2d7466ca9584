use alloc::collections::VecDeque;
use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

use crate::*;

/// Setup progress of a [`Minefield`].
///
/// Valid transitions:
/// - Unpopulated -> Populated (mines placed)
/// - Populated -> Ready (adjacency computed)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Unpopulated,
    Populated,
    Ready,
}

impl Stage {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// The grid, its mines and everything the player has done to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinefieldData")]
pub struct Minefield {
    tiles: Array2<Tile>,
    size: Coord2,
    mine_count: CellCount,
    placed_flags: CellCount,
    cursor: Coord2,
    stage: Stage,
}

/// Unchecked shape of a serialized [`Minefield`].
#[derive(Deserialize)]
struct MinefieldData {
    tiles: Array2<Tile>,
    size: Coord2,
    mine_count: CellCount,
    placed_flags: CellCount,
    cursor: Coord2,
    stage: Stage,
}

impl TryFrom<MinefieldData> for Minefield {
    type Error = GameError;

    fn try_from(data: MinefieldData) -> Result<Self> {
        let config = GameConfig::new(data.size.0, data.size.1, data.mine_count)?;
        if data.tiles.dim() != (usize::from(config.rows), usize::from(config.cols)) {
            return Err(GameError::InvalidLayout);
        }
        if data.cursor.0 >= config.rows || data.cursor.1 >= config.cols {
            return Err(GameError::InvalidCoords);
        }

        let mines = data.tiles.iter().filter(|tile| tile.mine).count();
        let expected_mines = match data.stage {
            Stage::Unpopulated => 0,
            Stage::Populated | Stage::Ready => usize::from(data.mine_count),
        };
        let flags = data.tiles.iter().filter(|tile| tile.flagged).count();
        let visible_flag = data.tiles.iter().any(|tile| tile.flagged && tile.visible);
        if mines != expected_mines || flags != usize::from(data.placed_flags) || visible_flag {
            log::warn!(
                "Rejected serialized minefield, {} mines, {} flags, stage {:?}",
                mines,
                flags,
                data.stage
            );
            return Err(GameError::InvalidLayout);
        }

        Ok(Self {
            tiles: data.tiles,
            size: data.size,
            mine_count: data.mine_count,
            placed_flags: data.placed_flags,
            cursor: data.cursor,
            stage: data.stage,
        })
    }
}

impl Minefield {
    /// Allocates an empty field with the cursor in the center. Mines are placed later, once the
    /// first reveal target is known.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let size = config.size();
        Ok(Self {
            tiles: Array2::default(size.to_nd_index()),
            size,
            mine_count: config.mines,
            placed_flags: 0,
            cursor: (config.rows / 2, config.cols / 2),
            stage: Stage::Unpopulated,
        })
    }

    pub fn create(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new(GameConfig::new(rows, cols, mines)?)
    }

    /// Builds a populated field from known mine positions, without any exclusion zone.
    pub fn with_layout(rows: Coord, cols: Coord, mines: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((rows, cols).to_nd_index());
        for &coords in mines {
            if coords.0 >= rows || coords.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }
        let count = mine_mask.iter().filter(|&&mine| mine).count();
        let count = CellCount::try_from(count).map_err(|_| GameError::TooManyMines)?;

        let mut field = Self::create(rows, cols, count)?;
        field.apply_mask(&mine_mask);
        Ok(field)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size.0, self.size.1, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn rows(&self) -> Coord {
        self.size.0
    }

    pub fn cols(&self) -> Coord {
        self.size.1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn placed_flags(&self) -> CellCount {
        self.placed_flags
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.placed_flags)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn tiles(&self) -> ArrayView2<'_, Tile> {
        self.tiles.view()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<TileView> {
        self.tile(coords).map(TileView::from)
    }

    pub fn set_cursor(&mut self, coords: Coord2) -> Result<()> {
        self.cursor = self.validate_coords(coords)?;
        Ok(())
    }

    /// Moves the cursor one tile, stopping at the border.
    pub fn move_cursor(&mut self, direction: Direction) {
        let (row, col) = self.cursor;
        let (last_row, last_col) = (self.size.0 - 1, self.size.1 - 1);
        self.cursor = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => (row.saturating_add(1).min(last_row), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, col.saturating_add(1).min(last_col)),
        };
    }

    pub fn jump_cursor(&mut self, edge: Edge) {
        let (row, col) = self.cursor;
        self.cursor = match edge {
            Edge::Top => (0, col),
            Edge::Bottom => (self.size.0 - 1, col),
            Edge::Left => (row, 0),
            Edge::Right => (row, self.size.1 - 1),
        };
    }

    /// Places mines with point exclusion of `excluded`, see [`Minefield::place_mines_with_rule`].
    pub fn place_mines(&mut self, excluded: Coord2, generator: impl MineGenerator) -> Result<()> {
        self.place_mines_with_rule(excluded, ExclusionRule::Point, generator)
    }

    pub fn place_mines_seeded(&mut self, excluded: Coord2, seed: u64) -> Result<()> {
        self.place_mines(excluded, RandomMineGenerator::new(seed))
    }

    /// Places exactly `mine_count` mines, none in the 3x3 block around the current cursor and
    /// none on `excluded`. The field is left untouched on error.
    pub fn place_mines_with_rule(
        &mut self,
        excluded: Coord2,
        rule: ExclusionRule,
        generator: impl MineGenerator,
    ) -> Result<()> {
        if self.stage != Stage::Unpopulated {
            return Err(GameError::AlreadyPopulated);
        }
        let excluded = self.validate_coords(excluded)?;
        let zone = ExclusionZone::new(self.cursor, excluded, rule);

        if self.mine_count > zone.free_tiles(self.size) {
            return Err(GameError::TooManyMines);
        }

        let mine_mask = generator.generate(self.config(), &zone)?;
        self.check_layout(&mine_mask, &zone)?;
        self.apply_mask(&mine_mask);

        log::debug!(
            "Placed {} mines, cursor {:?}, excluded {:?} ({:?})",
            self.mine_count,
            self.cursor,
            excluded,
            rule
        );
        Ok(())
    }

    fn check_layout(&self, mine_mask: &Array2<bool>, zone: &ExclusionZone) -> Result<()> {
        if mine_mask.dim() != self.tiles.dim() {
            log::warn!(
                "Generated layout has shape {:?}, expected {:?}",
                mine_mask.dim(),
                self.tiles.dim()
            );
            return Err(GameError::InvalidLayout);
        }

        let mut count: usize = 0;
        for ((row, col), &mine) in mine_mask.indexed_iter() {
            if !mine {
                continue;
            }
            count += 1;
            let coords = (row as Coord, col as Coord);
            if zone.contains(coords) {
                log::warn!("Generated layout has a mine at excluded tile {:?}", coords);
                return Err(GameError::InvalidLayout);
            }
        }

        if count != usize::from(self.mine_count) {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                self.mine_count
            );
            return Err(GameError::InvalidLayout);
        }
        Ok(())
    }

    fn apply_mask(&mut self, mine_mask: &Array2<bool>) {
        Zip::from(&mut self.tiles)
            .and(mine_mask)
            .for_each(|tile, &mine| tile.mine = mine);
        self.stage = Stage::Populated;
    }

    /// Stores the number of neighboring mines on every tile. Runs once, after placement.
    pub fn compute_adjacency(&mut self) -> Result<()> {
        match self.stage {
            Stage::Unpopulated => return Err(GameError::NotPopulated),
            Stage::Ready => return Err(GameError::AlreadyComputed),
            Stage::Populated => {}
        }

        let (rows, cols) = self.size;
        for row in 0..rows {
            for col in 0..cols {
                let count = self.count_neighbors((row, col), |tile| tile.mine);
                self.tiles[(row, col).to_nd_index()].adjacent_mines = count;
            }
        }

        self.stage = Stage::Ready;
        Ok(())
    }

    /// Reveals a hidden tile. Zero tiles cascade into their whole zero region and its numbered
    /// border. A mine is reported as [`RevealOutcome::HitMine`] and stays hidden.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_ready()?;

        let tile = self.tiles[coords.to_nd_index()];
        if tile.flagged {
            return Err(GameError::FlaggedTile);
        }
        if tile.visible {
            return Ok(RevealOutcome::NoChange);
        }
        Ok(self.reveal_single_tile(coords))
    }

    /// Reveals every unflagged neighbor of a visible number whose flag count matches it.
    /// Anything else is a no-op.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_ready()?;

        let tile = self.tiles[coords.to_nd_index()];
        if !tile.visible || tile.mine {
            return Ok(RevealOutcome::NoChange);
        }

        let flags = self.count_neighbors(coords, |tile| tile.flagged);
        if flags != tile.adjacent_mines {
            log::debug!(
                "Chord at {:?} ignored, {} flags for {} mines",
                coords,
                flags,
                tile.adjacent_mines
            );
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for neighbor_coords in NeighborIter::new(coords, self.size) {
            outcome = outcome | self.reveal_single_tile(neighbor_coords);
            if outcome == RevealOutcome::HitMine {
                break;
            }
        }
        Ok(outcome)
    }

    pub fn flagged_neighbors(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_neighbors(coords, |tile| tile.flagged))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];

        if tile.visible {
            return Ok(MarkOutcome::NoChange);
        }

        tile.flagged = !tile.flagged;
        if tile.flagged {
            self.placed_flags += 1;
        } else {
            self.placed_flags -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    pub fn hidden_count(&self) -> CellCount {
        let hidden = self.tiles.iter().filter(|tile| tile.is_hidden()).count();
        // bounded by rows * cols, which fits
        hidden as CellCount
    }

    /// Won once only mines remain hidden, whatever the flags say.
    pub fn check_victory(&self) -> bool {
        self.hidden_count() == self.mine_count
    }

    /// Exposes every mine after a loss, other tiles keep their visibility.
    pub fn reveal_all_mines(&mut self) {
        self.tiles
            .iter_mut()
            .filter(|tile| tile.mine)
            .for_each(|tile| tile.visible = true);
    }

    fn reveal_single_tile(&mut self, coords: Coord2) -> RevealOutcome {
        let tile = &mut self.tiles[coords.to_nd_index()];

        if !tile.is_openable() {
            return RevealOutcome::NoChange;
        }
        if tile.mine {
            log::debug!("Hit mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        tile.visible = true;
        log::debug!("Open tile at {:?}, mine count: {}", coords, tile.adjacent_mines);

        if tile.adjacent_mines == 0 {
            let opened = self.flood_from(coords);
            log::debug!("Flood-fill from {:?} opened {} tiles", coords, opened);
        }
        RevealOutcome::Revealed
    }

    /// Opens the zero region around an already visible zero tile. Tiles are marked visible as
    /// they are queued, so each one is opened once. Flags on opened tiles are removed.
    fn flood_from(&mut self, start: Coord2) -> usize {
        let bounds = self.size;
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.tiles[visit_coords.to_nd_index()].adjacent_mines != 0 {
                continue;
            }

            for pos in NeighborIter::new(visit_coords, bounds) {
                let neighbor = &mut self.tiles[pos.to_nd_index()];
                if neighbor.visible {
                    continue;
                }
                debug_assert!(!neighbor.mine, "zero tile at {visit_coords:?} borders a mine");

                if neighbor.flagged {
                    neighbor.flagged = false;
                    self.placed_flags -= 1;
                }
                neighbor.visible = true;
                opened += 1;
                log::trace!(
                    "Flood opened tile at {:?}, mine count: {}",
                    pos,
                    neighbor.adjacent_mines
                );
                to_visit.push_back(pos);
            }
        }
        opened
    }

    fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(&Tile) -> bool) -> u8 {
        let mut count = 0;
        for pos in NeighborIter::new(coords, self.size) {
            if predicate(&self.tiles[pos.to_nd_index()]) {
                count += 1;
            }
        }
        count
    }

    fn check_ready(&self) -> Result<()> {
        if self.stage.is_ready() {
            Ok(())
        } else {
            Err(GameError::NotReady)
        }
    }
}
