// Sample positions shared by tests and the console `inspect` command.

use crate::board::Board;
use crate::coord::Square;
use crate::event::BoardPush;
use crate::moves::{Move, MoveDelta, MoveId, MoveList, MoveListError};
use crate::piece::PieceId;


pub fn empty_board(num_files: usize, num_ranks: usize) -> Board {
    board_with_pieces(num_files, num_ranks, &[])
}

pub fn board_with_pieces(num_files: usize, num_ranks: usize, pieces: &[(Square, &str)]) -> Board {
    let mut files = vec![vec![PieceId::empty(); num_ranks]; num_files];
    for &(square, piece) in pieces {
        files[square.file as usize][square.rank as usize] = PieceId::new(piece);
    }
    Board::try_from(files).unwrap()
}

pub fn classic_board() -> Board {
    let back_rank = ["Rook", "Knight", "Bishop", "Queen", "King", "Bishop", "Knight", "Rook"];
    let mut pieces = Vec::new();
    for (file, kind) in back_rank.iter().enumerate() {
        let file = file as i32;
        pieces.push((Square::new(file, 0), format!("White{kind}")));
        pieces.push((Square::new(file, 1), "WhitePawn".to_owned()));
        pieces.push((Square::new(file, 6), "BlackPawn".to_owned()));
        pieces.push((Square::new(file, 7), format!("Black{kind}")));
    }
    let pieces = pieces.iter().map(|(sq, p)| (*sq, p.as_str())).collect::<Vec<_>>();
    board_with_pieces(8, 8, &pieces)
}

// Single-delta move without effects.
pub fn simple_move(id: usize, origin: (i32, i32), delta: (i32, i32)) -> Move {
    Move::new(MoveId(id), origin.into(), vec![MoveDelta::step(delta.0, delta.1)])
}

pub fn effect_move(id: usize, origin: (i32, i32), delta: (i32, i32), effect: &str) -> Move {
    Move::new(MoveId(id), origin.into(), vec![MoveDelta::with_effect(delta.0, delta.1, effect)])
}

pub fn move_list(moves: Vec<Move>) -> Result<MoveList, MoveListError> { MoveList::new(moves) }

// White pawn about to promote on g8, plus a quiet knight move.
pub fn promotion_push() -> BoardPush {
    let board = board_with_pieces(8, 8, &[
        (Square::new(6, 6), "WhitePawn"),
        (Square::new(1, 0), "WhiteKnight"),
        (Square::new(4, 0), "WhiteKing"),
        (Square::new(4, 7), "BlackKing"),
    ]);
    let moves = move_list(vec![
        effect_move(0, (6, 6), (0, 1), "PromoteQueen"),
        effect_move(1, (6, 6), (0, 1), "PromoteRook"),
        effect_move(2, (6, 6), (0, 1), "PromoteBishop"),
        effect_move(3, (6, 6), (0, 1), "PromoteKnight"),
        simple_move(4, (1, 0), (1, 2)),
        simple_move(5, (1, 0), (-1, 2)),
    ])
    .unwrap();
    BoardPush { board, moves }
}
