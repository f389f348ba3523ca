use std::{fmt, ops};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Square};
use crate::piece::PieceId;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BoardError {
    Empty,
    RaggedFile { file: usize, expected_ranks: usize, actual_ranks: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "board has no squares"),
            BoardError::RaggedFile { file, expected_ranks, actual_ranks } => write!(
                f,
                "file {} has {} ranks, expected {}",
                file, actual_ranks, expected_ranks
            ),
        }
    }
}

// Board snapshot as sent by the authority. Indexed `[file][rank]`, with the wire form being
// a list of files. Never mutated: every update brings a whole new board.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<PieceId>>", into = "Vec<Vec<PieceId>>")]
pub struct Board {
    data: Array2<PieceId>,
}

impl Board {
    pub fn shape(&self) -> BoardShape {
        BoardShape {
            num_files: self.data.shape()[0] as i32,
            num_ranks: self.data.shape()[1] as i32,
        }
    }

    pub fn get(&self, square: Square) -> Option<&PieceId> { self.data.get(square_to_index(square)?) }

    // Squares occupied by a piece, in file-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, &PieceId)> + '_ {
        self.shape()
            .squares()
            .filter_map(|sq| self.get(sq).filter(|p| !p.is_empty()).map(|p| (sq, p)))
    }
}

impl TryFrom<Vec<Vec<PieceId>>> for Board {
    type Error = BoardError;
    fn try_from(files: Vec<Vec<PieceId>>) -> Result<Self, Self::Error> {
        let num_files = files.len();
        let num_ranks = files.first().map_or(0, |f| f.len());
        if num_files == 0 || num_ranks == 0 {
            return Err(BoardError::Empty);
        }
        if let Some((file, f)) = files.iter().enumerate().find(|(_, f)| f.len() != num_ranks) {
            return Err(BoardError::RaggedFile {
                file,
                expected_ranks: num_ranks,
                actual_ranks: f.len(),
            });
        }
        let flat = files.into_iter().flatten().collect();
        // Cannot fail: the vector length was verified above.
        let data = Array2::from_shape_vec((num_files, num_ranks), flat).map_err(|_| BoardError::Empty)?;
        Ok(Board { data })
    }
}

impl From<Board> for Vec<Vec<PieceId>> {
    fn from(board: Board) -> Self { board.data.outer_iter().map(|file| file.to_vec()).collect() }
}

impl ops::Index<Square> for Board {
    type Output = PieceId;
    #[track_caller]
    fn index(&self, square: Square) -> &Self::Output {
        let shape = self.shape();
        self.get(square).unwrap_or_else(|| {
            panic!(
                "Square ({}, {}) is out of bound for {}x{} board",
                square.file, square.rank, shape.num_files, shape.num_ranks
            )
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board ")?;
        f.debug_map().entries(self.occupied().map(|(sq, p)| (sq, p.as_str()))).finish()
    }
}

fn square_to_index(square: Square) -> Option<[usize; 2]> {
    Some([square.file.try_into().ok()?, square.rank.try_into().ok()?])
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_by_file_then_rank() {
        let board: Board = serde_json::from_str(
            r#"[["wRook", "wPawn", "None"], ["wKnight", "None", "bPawn"]]"#,
        )
        .unwrap();
        assert_eq!(board.shape(), BoardShape { num_files: 2, num_ranks: 3 });
        assert_eq!(board[Square::new(0, 1)], PieceId::new("wPawn"));
        assert_eq!(board[Square::new(1, 2)], PieceId::new("bPawn"));
        assert_eq!(board.get(Square::new(2, 0)), None);
        assert_eq!(board.get(Square::new(-1, 0)), None);
        assert_eq!(board.occupied().count(), 4);
    }

    #[test]
    fn rejects_ragged_and_empty() {
        let ragged: Result<Board, _> = serde_json::from_str(r#"[["None", "None"], ["None"]]"#);
        assert!(ragged.is_err());
        let no_files: Vec<Vec<PieceId>> = vec![];
        let no_ranks: Vec<Vec<PieceId>> = vec![vec![]];
        assert_eq!(Board::try_from(no_files), Err(BoardError::Empty));
        assert_eq!(Board::try_from(no_ranks), Err(BoardError::Empty));
    }
}
