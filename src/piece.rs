use std::fmt;

use serde::{Deserialize, Serialize};


// Opaque piece identifier chosen by the authority, e.g. "WhiteQueen" or "bKnight".
// The client never interprets it beyond looking up a pictogram.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub String);

pub const EMPTY_PIECE_IDS: [&str; 2] = ["None", "empty"];

pub const UNKNOWN_PIECE_PICTOGRAM: char = '?';

impl PieceId {
    pub fn new(id: impl Into<String>) -> Self { PieceId(id.into()) }
    pub fn empty() -> Self { PieceId(EMPTY_PIECE_IDS[0].to_owned()) }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn is_empty(&self) -> bool { EMPTY_PIECE_IDS.contains(&self.0.as_str()) }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> Self { PieceId(id.to_owned()) }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// The authority uses two naming schemes depending on the game description it was built from.
// Returns `None` for an id we have never seen.
pub fn lookup_pictogram(piece: &PieceId) -> Option<char> {
    let ch = match piece.as_str() {
        "None" | "empty" => ' ',
        "BlackPawn" | "bPawn" => '♟',
        "BlackKnight" | "bKnight" => '♞',
        "BlackBishop" | "bBishop" => '♝',
        "BlackRook" | "bRook" => '♜',
        "BlackQueen" | "bQueen" => '♛',
        "BlackKing" | "bKing" => '♚',
        "WhitePawn" | "wPawn" => '♙',
        "WhiteKnight" | "wKnight" => '♘',
        "WhiteBishop" | "wBishop" => '♗',
        "WhiteRook" | "wRook" => '♖',
        "WhiteQueen" | "wQueen" => '♕',
        "WhiteKing" | "wKing" => '♔',
        _ => return None,
    };
    Some(ch)
}

pub fn piece_to_pictogram(piece: &PieceId) -> char {
    lookup_pictogram(piece).unwrap_or(UNKNOWN_PIECE_PICTOGRAM)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_naming_schemes() {
        assert_eq!(piece_to_pictogram(&"WhiteQueen".into()), '♕');
        assert_eq!(piece_to_pictogram(&"wQueen".into()), '♕');
        assert_eq!(piece_to_pictogram(&"bKnight".into()), '♞');
        assert_eq!(piece_to_pictogram(&"empty".into()), ' ');
        assert_eq!(piece_to_pictogram(&"Archbishop".into()), UNKNOWN_PIECE_PICTOGRAM);
        assert!(PieceId::empty().is_empty());
        assert!(!PieceId::new("wKing").is_empty());
    }
}
