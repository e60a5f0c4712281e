use ndarray::Array2;

/// Single coordinate axis used for field width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts, cell totals and the running counters.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Widest field that can be created.
pub const MAX_WIDTH: Coord = 100;

/// Tallest field that can be created.
pub const MAX_HEIGHT: Coord = 100;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Flat offset of `coords` in a row-major buffer of the given `(width, height)`.
pub const fn index_of((width, _): Coord2, (x, y): Coord2) -> usize {
    y as usize * width as usize + x as usize
}

/// Converts `(x, y)` into the `[row, column]` index used by the cell grid.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// The up to eight in-bounds neighbors of a cell, in row-major order.
///
/// Walks the 3x3 window around the center, clipped to the field, and skips
/// the center itself.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    left: Coord,
    right: Coord,
    bottom: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    /// Neighbors of `center` on a field of `(width, height)` cells. Yields
    /// nothing when `center` lies outside the field.
    pub fn new(center: Coord2, (width, height): Coord2) -> Self {
        let (x, y) = center;
        let left = x.saturating_sub(1);
        let top = y.saturating_sub(1);
        let right = x.saturating_add(1).min(width.saturating_sub(1));
        let bottom = y.saturating_add(1).min(height.saturating_sub(1));

        Self {
            center,
            left,
            right,
            bottom,
            cursor: (x < width && y < height).then_some((left, top)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (x, y) = self.cursor?;
            self.cursor = if x < self.right {
                Some((x + 1, y))
            } else if y < self.bottom {
                Some((self.left, y + 1))
            } else {
                None
            };

            if (x, y) != self.center {
                return Some((x, y));
            }
        }
    }
}

/// Neighbor lookup bounded by the grid's own shape.
pub trait GridNeighbors {
    fn neighbors_of(&self, center: Coord2) -> NeighborIter;
}

impl<T> GridNeighbors for Array2<T> {
    fn neighbors_of(&self, center: Coord2) -> NeighborIter {
        // rows are `y`, columns are `x`
        let (rows, columns) = self.dim();
        let clip = |len: usize| Coord::try_from(len).unwrap_or(Coord::MAX);
        NeighborIter::new(center, (clip(columns), clip(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(neighbors((0, 0), (3, 3)), vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(neighbors((2, 2), (3, 3)), vec![(1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn edge_and_center_counts() {
        assert_eq!(neighbors((1, 0), (3, 3)).len(), 5);
        assert_eq!(neighbors((1, 1), (3, 3)).len(), 8);
        assert!(neighbors((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn single_row_only_has_horizontal_neighbors() {
        assert_eq!(neighbors((1, 0), (3, 1)), vec![(0, 0), (2, 0)]);
    }

    #[test]
    fn outside_center_has_no_neighbors() {
        assert!(neighbors((3, 0), (3, 3)).is_empty());
        assert!(neighbors((0, 0), (0, 0)).is_empty());
    }

    #[test]
    fn grid_shape_bounds_the_neighbors() {
        // 4 columns, 2 rows
        let grid = Array2::<u8>::zeros((2, 4));
        assert_eq!(
            grid.neighbors_of((3, 1)).collect::<Vec<_>>(),
            vec![(2, 0), (3, 0), (2, 1)]
        );
        assert_eq!(grid.neighbors_of((1, 0)).count(), 5);
        assert_eq!(
            grid.neighbors_of((0, 0)).collect::<Vec<_>>(),
            neighbors((0, 0), (4, 2))
        );
    }

    #[test]
    fn index_is_row_major() {
        assert_eq!(index_of((9, 9), (0, 0)), 0);
        assert_eq!(index_of((9, 9), (8, 0)), 8);
        assert_eq!(index_of((9, 9), (0, 1)), 9);
        assert_eq!(index_of((30, 16), (4, 2)), 64);
        assert_eq!((4u16, 2u16).to_nd_index(), [2, 4]);
    }
}
