use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Square};


#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub enum BoardOrientation {
    #[default]
    Normal, // rank 0 at the bottom
    Rotated, // rank 0 at the top, files mirrored
}

// Screen position of a square: `x` grows to the right, `y` grows downwards, (0, 0) is the
// top-left square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DisplayCoord {
    pub x: i32,
    pub y: i32,
}

pub fn to_display_coord(square: Square, shape: BoardShape, orientation: BoardOrientation) -> DisplayCoord {
    match orientation {
        BoardOrientation::Normal => DisplayCoord {
            x: square.file,
            y: shape.num_ranks - square.rank - 1,
        },
        BoardOrientation::Rotated => DisplayCoord {
            x: shape.num_files - square.file - 1,
            y: square.rank,
        },
    }
}

pub fn from_display_coord(
    q: DisplayCoord, shape: BoardShape, orientation: BoardOrientation,
) -> Option<Square> {
    let square = match orientation {
        BoardOrientation::Normal => Square::new(q.x, shape.num_ranks - q.y - 1),
        BoardOrientation::Rotated => Square::new(shape.num_files - q.x - 1, q.y),
    };
    shape.contains(square).then_some(square)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_coord_inverse() {
        let shape = BoardShape { num_files: 8, num_ranks: 5 };
        for orientation in [BoardOrientation::Normal, BoardOrientation::Rotated] {
            for square in shape.squares() {
                let q = to_display_coord(square, shape, orientation);
                assert_eq!(from_display_coord(q, shape, orientation), Some(square));
            }
        }
        assert_eq!(
            to_display_coord(Square::new(0, 0), shape, BoardOrientation::Normal),
            DisplayCoord { x: 0, y: 4 }
        );
        assert_eq!(from_display_coord(DisplayCoord { x: 8, y: 0 }, shape, BoardOrientation::Normal), None);
    }
}
