use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer coordinates identifying one chunk of the world grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ChunkKey {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl ChunkKey {
    /// Create a key from coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The eight surrounding keys, row by row from the top-left.
    ///
    /// Coordinates saturate at the `i32` range, so a key on the edge of the
    /// range lists itself in place of the missing neighbours.
    pub fn neighbors(self) -> [ChunkKey; 8] {
        let ChunkKey { x, y } = self;
        let (left, right) = (x.saturating_sub(1), x.saturating_add(1));
        let (up, down) = (y.saturating_sub(1), y.saturating_add(1));
        [
            Self::new(left, up),
            Self::new(x, up),
            Self::new(right, up),
            Self::new(left, y),
            Self::new(right, y),
            Self::new(left, down),
            Self::new(x, down),
            Self::new(right, down),
        ]
    }
}

impl From<GridPos> for ChunkKey {
    fn from(pos: GridPos) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A position on the grid, one unit per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Create a position from coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in cells.
    pub fn distance_to(self, other: GridPos) -> f64 {
        // Widen before subtracting; the difference of two i32s fits in i64.
        let dx = (i64::from(other.x) - i64::from(self.x)) as f64;
        let dy = (i64::from(other.y) - i64::from(self.y)) as f64;
        dx.hypot(dy)
    }

    /// Offset this position by a delta, saturating at the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<ChunkKey> for GridPos {
    fn from(key: ChunkKey) -> Self {
        Self::new(key.x, key.y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance_to(a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn neighbors_exclude_self() {
        let key = ChunkKey::new(2, 2);
        let n = key.neighbors();
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&key));
        assert!(n.contains(&ChunkKey::new(1, 1)));
        assert!(n.contains(&ChunkKey::new(3, 3)));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let edge = ChunkKey::new(i32::MAX, i32::MIN);
        let n = edge.neighbors();
        assert!(n.contains(&ChunkKey::new(i32::MAX - 1, i32::MIN + 1)));
        assert!(n.contains(&edge));

        let far = GridPos::new(i32::MAX, 0);
        assert_eq!(far.offset(1, -1), GridPos::new(i32::MAX, -1));
        let d = GridPos::new(i32::MIN, 0).distance_to(far);
        assert!((d - (f64::from(i32::MAX) * 2.0 + 1.0)).abs() < 1.0);
    }

    #[test]
    fn keys_order_by_column_then_row() {
        let mut keys = vec![ChunkKey::new(1, 0), ChunkKey::new(0, 5), ChunkKey::new(0, 1)];
        keys.sort();
        assert_eq!(
            keys,
            vec![ChunkKey::new(0, 1), ChunkKey::new(0, 5), ChunkKey::new(1, 0)]
        );
    }
}
