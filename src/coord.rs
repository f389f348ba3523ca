use std::{fmt, iter, ops};

use itertools::Itertools;
use serde::{Deserialize, Serialize};


// Board dimensions. Not fixed: always derived from the board sent by the authority.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub num_files: i32,
    pub num_ranks: i32,
}

impl BoardShape {
    pub fn contains(self, square: Square) -> bool {
        (0..self.num_files).contains(&square.file) && (0..self.num_ranks).contains(&square.rank)
    }
    pub fn num_squares(self) -> usize { (self.num_files * self.num_ranks) as usize }
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.num_files)
            .cartesian_product(0..self.num_ranks)
            .map(|(file, rank)| Square { file, rank })
    }
}


// Zero-based (file, rank). Serialized as `[file, rank]`, which is what the authority sends
// as a move start.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Square {
    pub file: i32,
    pub rank: i32,
}

impl Square {
    pub const fn new(file: i32, rank: i32) -> Self { Square { file, rank } }
}

impl From<(i32, i32)> for Square {
    fn from((file, rank): (i32, i32)) -> Self { Square { file, rank } }
}

impl From<Square> for (i32, i32) {
    fn from(square: Square) -> Self { (square.file, square.rank) }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.file, self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.file, self.rank)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement { dx: 0, dy: 0 };
    pub const fn new(dx: i32, dy: i32) -> Self { Displacement { dx, dy } }
}

impl ops::Add for Displacement {
    type Output = Self;
    fn add(self, other: Self) -> Self::Output {
        Displacement { dx: self.dx + other.dx, dy: self.dy + other.dy }
    }
}

impl iter::Sum for Displacement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self { iter.fold(Self::ZERO, ops::Add::add) }
}

impl ops::Add<Displacement> for Square {
    type Output = Self;
    fn add(self, d: Displacement) -> Self::Output {
        Square { file: self.file + d.dx, rank: self.rank + d.dy }
    }
}

impl ops::Sub for Square {
    type Output = Displacement;
    fn sub(self, other: Self) -> Self::Output {
        Displacement { dx: self.file - other.file, dy: self.rank - other.rank }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_arithmetic() {
        let d: Displacement = [Displacement::new(0, 1), Displacement::new(1, 1)].into_iter().sum();
        assert_eq!(d, Displacement::new(1, 2));
        assert_eq!(Square::new(3, 3) + d, Square::new(4, 5));
        assert_eq!(Square::new(4, 5) - Square::new(3, 3), d);
    }

    #[test]
    fn shape_bounds() {
        let shape = BoardShape { num_files: 8, num_ranks: 6 };
        assert!(shape.contains(Square::new(7, 5)));
        assert!(!shape.contains(Square::new(7, 6)));
        assert!(!shape.contains(Square::new(-1, 0)));
        assert_eq!(shape.squares().count(), shape.num_squares());
    }

    #[test]
    fn square_wire_format() {
        let square: Square = serde_json::from_str("[6, 1]").unwrap();
        assert_eq!(square, Square::new(6, 1));
        assert_eq!(serde_json::to_string(&square).unwrap(), "[6,1]");
    }
}
