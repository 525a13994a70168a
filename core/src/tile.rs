use serde::{Deserialize, Serialize};

/// Player-visible annotation of a tile.
///
/// A revealed tile never carries a mark, and a tile is never flagged and questioned at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Hidden,
    Flagged,
    Questioned,
    Revealed,
}

impl TileState {
    pub const fn is_unrevealed(self) -> bool {
        !matches!(self, Self::Revealed)
    }
}

/// What a tile actually holds, fixed once the mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileContent {
    Empty,
    Adjacent(u8),
    Mine,
}

impl TileContent {
    pub(crate) const fn from_parts(is_mine: bool, adjacent_mines: u8) -> Self {
        match (is_mine, adjacent_mines) {
            (true, _) => Self::Mine,
            (false, 0) => Self::Empty,
            (false, count) => Self::Adjacent(count),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub content: TileContent,
    pub state: TileState,
}

impl Tile {
    pub const fn is_mine(&self) -> bool {
        matches!(self.content, TileContent::Mine)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, TileState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, TileState::Flagged)
    }

    pub const fn is_questioned(&self) -> bool {
        matches!(self.state, TileState::Questioned)
    }
}

/// Display class of a tile, all a renderer needs to pick a character and color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Hidden,
    Flagged,
    Questioned,
    Empty,
    Number(u8),
    Mine,
}

impl Glyph {
    /// Glyph of a tile whose content is on display.
    pub const fn shown(content: TileContent) -> Self {
        match content {
            TileContent::Empty => Self::Empty,
            TileContent::Adjacent(count) => Self::Number(count),
            TileContent::Mine => Self::Mine,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::Hidden
    }
}
