use std::collections::HashMap;

use itertools::Itertools;
use log::warn;

use crate::coord::{BoardShape, Displacement, Square};
use crate::moves::{MoveId, MoveList};


// A move as seen from its origin square.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IndexedMove {
    pub id: MoveId,
    pub displacement: Displacement,
    pub effect_label: String,
}

impl IndexedMove {
    pub fn destination(&self, origin: Square) -> Square { origin + self.displacement }
}

// Legal moves grouped by origin square. Within a bucket moves keep authority order.
//
// The index is never patched: any change in the move list means building a new one.
#[derive(Clone, Default, Debug)]
pub struct MoveIndex {
    buckets: HashMap<Square, Vec<IndexedMove>>,
    num_moves: usize,
}

impl MoveIndex {
    pub fn empty() -> Self { Self::default() }

    pub fn build(moves: &MoveList, shape: BoardShape) -> Self {
        let mut buckets: HashMap<Square, Vec<IndexedMove>> = HashMap::new();
        for mv in moves {
            if !shape.contains(mv.origin) {
                // The authority is trusted, so keep the move. It just cannot be clicked.
                warn!("Move {} starts outside of the {:?} board: {:?}", mv.id, shape, mv.origin);
            }
            buckets.entry(mv.origin).or_default().push(IndexedMove {
                id: mv.id,
                displacement: mv.displacement(),
                effect_label: mv.effect_label(),
            });
        }
        MoveIndex { buckets, num_moves: moves.len() }
    }

    pub fn len(&self) -> usize { self.num_moves }
    pub fn is_empty(&self) -> bool { self.num_moves == 0 }

    // Empty for squares without legal moves.
    pub fn bucket(&self, origin: Square) -> &[IndexedMove] {
        self.buckets.get(&origin).map_or(&[], Vec::as_slice)
    }

    pub fn origins(&self) -> impl Iterator<Item = Square> + '_ { self.buckets.keys().copied().sorted() }

    // Distinct destinations reachable from `origin`, in first-seen order.
    pub fn destinations(&self, origin: Square) -> impl Iterator<Item = Square> + '_ {
        self.bucket(origin).iter().map(move |m| m.destination(origin)).unique()
    }
}
