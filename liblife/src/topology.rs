use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::pos::Position;

const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// How the edges of a board connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Positions past an edge don't exist and contribute nothing to neighbor counts.
    #[default]
    Bounded,

    /// Opposite edges are joined, so edge cells neighbor the cells on the opposite edge.
    Toroidal,
}

impl Topology {
    /// The distinct neighbors of `center` on a `width` by `height` board, excluding `center`.
    pub fn neighbors(self, width: usize, height: usize, center: Position) -> Vec<Position> {
        fn wrap(coord: usize, offset: isize, len: usize) -> usize {
            (coord as isize + offset).rem_euclid(len as isize) as usize
        }

        let neighbors = NEIGHBOR_RELATIVE_POSITIONS
            .iter()
            .filter_map(|rel_pos| match self {
                Topology::Bounded => center
                    .offset(rel_pos[0], rel_pos[1])
                    .filter(|pos| pos.x < width && pos.y < height),
                Topology::Toroidal => Some(Position {
                    x: wrap(center.x, rel_pos[0], width),
                    y: wrap(center.y, rel_pos[1], height),
                }),
            })
            .filter(|pos| *pos != center);

        match self {
            Topology::Bounded => neighbors.collect(),
            // Narrow tori fold several offsets onto the same cell.
            Topology::Toroidal => neighbors.sorted_unstable().dedup().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Topology;
    use crate::pos::Position;

    fn sorted(mut positions: Vec<Position>) -> Vec<Position> {
        positions.sort();
        positions
    }

    #[test]
    fn test_bounded_excludes_outside() {
        assert_eq!(Topology::Bounded.neighbors(3, 3, Position::new(1, 1)).len(), 8);
        assert_eq!(
            sorted(Topology::Bounded.neighbors(3, 3, Position::new(0, 0))),
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
        assert_eq!(Topology::Bounded.neighbors(3, 3, Position::new(2, 1)).len(), 5);
        assert!(Topology::Bounded.neighbors(1, 1, Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_toroidal_wraps() {
        let corner = sorted(Topology::Toroidal.neighbors(4, 4, Position::new(0, 0)));
        assert_eq!(corner.len(), 8);
        assert!(corner.contains(&Position::new(3, 3)));
        assert!(corner.contains(&Position::new(3, 0)));
        assert!(corner.contains(&Position::new(0, 3)));
    }

    #[test]
    fn test_toroidal_narrow_board() {
        assert!(Topology::Toroidal.neighbors(1, 1, Position::new(0, 0)).is_empty());
        assert_eq!(
            Topology::Toroidal.neighbors(2, 1, Position::new(0, 0)),
            vec![Position::new(1, 0)]
        );
        assert_eq!(Topology::Toroidal.neighbors(2, 2, Position::new(1, 1)).len(), 3);
    }
}
