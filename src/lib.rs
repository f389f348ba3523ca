// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod client;
pub mod coord;
pub mod display;
pub mod event;
pub mod move_index;
pub mod moves;
pub mod network;
pub mod piece;
pub mod prompt;
pub mod selection;
pub mod test_util;
pub mod view;

pub use board::{Board, BoardError};
pub use client::{BoardSyncController, ClickReaction, EventError, NotableEvent, Phase};
pub use coord::{BoardShape, Displacement, Square};
pub use display::{BoardOrientation, DisplayCoord};
pub use event::{AuthorityEvent, BoardPush, CommitId, CommitRequest, CommitResponse, OutgoingCommit};
pub use move_index::{IndexedMove, MoveIndex};
pub use moves::{Effect, Move, MoveDelta, MoveId, MoveList};
pub use piece::PieceId;
pub use prompt::{DisambiguationPrompt, PromptError};
pub use selection::Resolution;
pub use view::{BoardView, SquareView};
