use serde::{Deserialize, Serialize};

/// One cell of the minefield.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub mine: bool,
    pub visible: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Tile {
    pub const fn is_hidden(self) -> bool {
        !self.visible
    }

    /// Hidden and not flagged, i.e. something a cascade may open.
    pub const fn is_openable(self) -> bool {
        !self.visible && !self.flagged
    }
}

/// What a renderer should draw for a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A mine exposed after the game was lost.
    Mine,
}

impl From<Tile> for TileView {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile { flagged: true, .. } => Self::Flagged,
            Tile { visible: false, .. } => Self::Hidden,
            Tile { mine: true, .. } => Self::Mine,
            Tile { adjacent_mines, .. } => Self::Revealed(adjacent_mines),
        }
    }
}

impl Default for TileView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_visibility() {
        let tile = Tile {
            mine: true,
            visible: true,
            flagged: true,
            adjacent_mines: 0,
        };
        assert_eq!(TileView::from(tile), TileView::Flagged);
    }

    #[test]
    fn exposed_mine_and_number() {
        let mine = Tile {
            mine: true,
            visible: true,
            ..Default::default()
        };
        let number = Tile {
            visible: true,
            adjacent_mines: 3,
            ..Default::default()
        };
        assert_eq!(TileView::from(mine), TileView::Mine);
        assert_eq!(TileView::from(number), TileView::Revealed(3));
        assert_eq!(TileView::from(Tile::default()), TileView::Hidden);
    }
}
