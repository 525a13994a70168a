/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Distance where diagonal steps count the same as orthogonal ones.
pub fn chebyshev_distance(a: Coord2, b: Coord2) -> Coord {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

/// All coordinates of a board of the given size, column by column.
pub fn iter_coords((size_x, size_y): Coord2) -> impl Iterator<Item = Coord2> {
    (0..size_x).flat_map(move |x| (0..size_y).map(move |y| (x, y)))
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the in-bounds cells around `center`, diagonals included.
///
/// Corner cells yield 3 neighbors, edge cells 5 and interior cells 8.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_counts_depend_on_position() {
        let size = (4, 3);
        assert_eq!(NeighborIter::new((0, 0), size).count(), 3);
        assert_eq!(NeighborIter::new((3, 2), size).count(), 3);
        assert_eq!(NeighborIter::new((1, 0), size).count(), 5);
        assert_eq!(NeighborIter::new((0, 1), size).count(), 5);
        assert_eq!(NeighborIter::new((1, 1), size).count(), 8);
    }

    #[test]
    fn neighbors_exclude_center_and_stay_in_bounds() {
        let size = (3, 3);
        for center in iter_coords(size) {
            for pos in NeighborIter::new(center, size) {
                assert_ne!(pos, center);
                assert!(pos.0 < size.0 && pos.1 < size.1);
                assert_eq!(chebyshev_distance(pos, center), 1);
            }
        }
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn iter_coords_covers_whole_board() {
        assert_eq!(iter_coords((30, 16)).count(), 480);
        assert_eq!(iter_coords((2, 1)).collect::<Vec<_>>(), [(0, 0), (1, 0)]);
    }
}
