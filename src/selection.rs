use crate::coord::Square;
use crate::move_index::{IndexedMove, MoveIndex};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    // Not a destination of the selected origin: the click selects a new origin.
    None,
    // Commit right away.
    Single(IndexedMove),
    // Several moves end on the square (e.g. promotions). The user has to pick one.
    Ambiguous(Vec<IndexedMove>),
}

// Moves from `origin` that end exactly on `clicked`, in bucket order.
pub fn resolve_candidates(index: &MoveIndex, origin: Square, clicked: Square) -> Vec<IndexedMove> {
    index
        .bucket(origin)
        .iter()
        .filter(|m| m.destination(origin) == clicked)
        .cloned()
        .collect()
}

pub fn resolve(index: &MoveIndex, origin: Square, clicked: Square) -> Resolution {
    let mut candidates = resolve_candidates(index, origin, clicked);
    if candidates.len() > 1 {
        return Resolution::Ambiguous(candidates);
    }
    match candidates.pop() {
        Some(candidate) => Resolution::Single(candidate),
        None => Resolution::None,
    }
}
