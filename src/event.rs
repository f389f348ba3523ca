use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::moves::{MoveId, MoveList};


// Sent by the authority over the push channel whenever the board changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardPush {
    pub board: Board,
    #[serde(default)]
    pub moves: MoveList,
}

// Body of the move commit request.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequest {
    pub move_index: MoveId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub game_state: GameState,
}

// The authority sends more (e.g. the next move list), but only the board is trusted here:
// moves always arrive through the push channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
}


// Local sequence number that ties a commit response to its request. Never leaves the client.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CommitId(pub u64);

#[derive(Clone, Debug)]
pub struct OutgoingCommit {
    pub commit_id: CommitId,
    pub request: CommitRequest,
}

#[derive(Clone, Debug)]
pub enum AuthorityEvent {
    BoardPushed(BoardPush),
    CommitCompleted {
        commit_id: CommitId,
        // Transport or protocol error description on failure.
        result: Result<CommitResponse, String>,
    },
}
