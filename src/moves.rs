use std::collections::HashSet;
use std::fmt;

use derive_new::new;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::coord::{Displacement, Square};


// What the authority writes when a delta carries no effect.
pub const NO_EFFECT: &str = "None";

// Effect label of a move without any effects.
pub const EMPTY_EFFECT_LABEL: &str = "Ɛ";


// Identifies a move within one move list snapshot. This is the only thing sent back to the
// authority when committing a move.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub usize);

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

// Special consequence of a delta, e.g. a promotion. Opaque to the client: only used to label
// disambiguation options.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Effect {
    #[default]
    None,
    Tag(String),
}

impl Effect {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Effect::None => None,
            Effect::Tag(tag) => Some(tag),
        }
    }
}

impl From<Option<String>> for Effect {
    fn from(s: Option<String>) -> Self {
        match s {
            None => Effect::None,
            Some(s) if s == NO_EFFECT => Effect::None,
            Some(s) => Effect::Tag(s),
        }
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::None => NO_EFFECT.to_owned(),
            Effect::Tag(tag) => tag,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct MoveDelta {
    pub dx: i32,
    pub dy: i32,
    #[serde(default)]
    pub effect: Effect,
}

impl MoveDelta {
    pub fn step(dx: i32, dy: i32) -> Self { MoveDelta { dx, dy, effect: Effect::None } }
    pub fn with_effect(dx: i32, dy: i32, tag: &str) -> Self {
        MoveDelta { dx, dy, effect: Effect::from(Some(tag.to_owned())) }
    }
    pub fn displacement(&self) -> Displacement { Displacement::new(self.dx, self.dy) }
}

#[derive(Clone, PartialEq, Eq, Debug, new)]
pub struct Move {
    pub id: MoveId,
    pub origin: Square,
    pub deltas: Vec<MoveDelta>,
}

impl Move {
    pub fn displacement(&self) -> Displacement { self.deltas.iter().map(MoveDelta::displacement).sum() }

    pub fn destination(&self) -> Square { self.origin + self.displacement() }

    // Concatenation of all effect tags in delta order.
    pub fn effect_label(&self) -> String {
        let label = self.deltas.iter().filter_map(|d| d.effect.tag()).join("");
        if label.is_empty() { EMPTY_EFFECT_LABEL.to_owned() } else { label }
    }
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveListError {
    DuplicateId(MoveId),
}

impl fmt::Display for MoveListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveListError::DuplicateId(id) => write!(f, "move {} is listed twice", id),
        }
    }
}

// Move as it travels over the wire. Older authorities don't send `index` and address moves by
// their position in the list instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireMove {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<MoveId>,
    pub start: Square,
    pub letters: Vec<MoveDelta>,
}

// Legal moves in authority order, with move ids guaranteed to be unique.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<WireMove>", into = "Vec<WireMove>")]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new(moves: Vec<Move>) -> Result<Self, MoveListError> {
        let mut seen = HashSet::new();
        for mv in &moves {
            if !seen.insert(mv.id) {
                return Err(MoveListError::DuplicateId(mv.id));
            }
        }
        Ok(MoveList { moves })
    }

    pub fn empty() -> Self { MoveList { moves: Vec::new() } }
    pub fn len(&self) -> usize { self.moves.len() }
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &Move> + Clone { self.moves.iter() }
    pub fn get(&self, id: MoveId) -> Option<&Move> { self.moves.iter().find(|mv| mv.id == id) }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter { self.moves.iter() }
}

impl TryFrom<Vec<WireMove>> for MoveList {
    type Error = MoveListError;
    fn try_from(wire: Vec<WireMove>) -> Result<Self, Self::Error> {
        let moves = wire
            .into_iter()
            .enumerate()
            .map(|(pos, w)| Move {
                id: w.index.unwrap_or(MoveId(pos)),
                origin: w.start,
                deltas: w.letters,
            })
            .collect();
        MoveList::new(moves)
    }
}

impl From<MoveList> for Vec<WireMove> {
    fn from(list: MoveList) -> Self {
        list.moves
            .into_iter()
            .map(|mv| WireMove {
                index: Some(mv.id),
                start: mv.origin,
                letters: mv.deltas,
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_label_concatenates_tags() {
        let mv = Move::new(MoveId(0), Square::new(0, 0), vec![
            MoveDelta::with_effect(1, 0, "Capture"),
            MoveDelta::step(0, 1),
            MoveDelta::with_effect(0, 1, "PromoteQueen"),
        ]);
        assert_eq!(mv.effect_label(), "CapturePromoteQueen");
        assert_eq!(mv.destination(), Square::new(1, 2));

        let quiet = Move::new(MoveId(1), Square::new(0, 0), vec![MoveDelta::with_effect(0, 1, "None")]);
        assert_eq!(quiet.effect_label(), EMPTY_EFFECT_LABEL);
    }

    #[test]
    fn wire_ids_default_to_position() {
        let list: MoveList = serde_json::from_str(
            r#"[
                {"start": [1, 1], "letters": [{"dx": 0, "dy": 1, "effect": "None"}]},
                {"start": [1, 1], "letters": [{"dx": 0, "dy": 1}, {"dx": 0, "dy": 1}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(list.iter().map(|mv| mv.id).collect::<Vec<_>>(), vec![MoveId(0), MoveId(1)]);
        assert_eq!(list.get(MoveId(1)).unwrap().destination(), Square::new(1, 3));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let res: Result<MoveList, _> = serde_json::from_str(
            r#"[
                {"index": 3, "start": [0, 0], "letters": []},
                {"index": 3, "start": [1, 0], "letters": []}
            ]"#,
        );
        assert!(res.is_err());
    }
}
