use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a board handed to renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub cursor: Coord2,
    pub state: GameState,
    pub mine_count: CellCount,
    pub flags_left: CellCount,
    pub elapsed_secs: u32,
    glyphs: Array2<Glyph>,
}

impl BoardSnapshot {
    /// Glyph at `coords`, out of bounds coordinates show as hidden.
    pub fn glyph_at(&self, coords: Coord2) -> Glyph {
        self.glyphs
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or_default()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = impl Iterator<Item = (Coord2, Glyph)> + '_> + '_ {
        let (size_x, size_y) = self.size;
        (0..size_y).map(move |y| (0..size_x).map(move |x| ((x, y), self.glyph_at((x, y)))))
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        let glyphs = Array2::from_shape_fn(self.size().to_nd_index(), |(x, y)| {
            self.glyph_unchecked((x as Coord, y as Coord))
        });

        BoardSnapshot {
            size: self.size(),
            cursor: self.cursor(),
            state: self.state(),
            mine_count: self.mine_count(),
            flags_left: self.flags_left(),
            elapsed_secs: self.elapsed_secs(),
            glyphs,
        }
    }
}
