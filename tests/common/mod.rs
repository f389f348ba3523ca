// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use board_client::board::Board;
use board_client::client::{BoardSyncController, ClickReaction, EventError, NotableEvent};
use board_client::coord::Square;
use board_client::event::{AuthorityEvent, BoardPush, CommitResponse, GameState, OutgoingCommit};
use board_client::moves::{Move, MoveList};
use board_client::network;


#[macro_export]
macro_rules! sq {
    ($file:literal, $rank:literal) => {
        board_client::coord::Square::new($file, $rank)
    };
}


// Controller plus the other end of its commit channel, standing in for the authority.
#[allow(dead_code)]
pub struct TestClient {
    pub controller: BoardSyncController,
    commits_rx: mpsc::Receiver<OutgoingCommit>,
}

impl TestClient {
    #[allow(dead_code)]
    pub fn new() -> Self {
        let (commits_tx, commits_rx) = mpsc::channel();
        TestClient {
            controller: BoardSyncController::new(commits_tx),
            commits_rx,
        }
    }

    #[allow(dead_code)]
    pub fn with_push(push: BoardPush) -> Self {
        let mut client = Self::new();
        client.controller.apply_board_push(push);
        client.drain();
        client
    }

    #[allow(dead_code)]
    pub fn push(&mut self, board: Board, moves: Vec<Move>) {
        let moves = MoveList::new(moves).unwrap();
        self.controller
            .process_authority_event(AuthorityEvent::BoardPushed(BoardPush { board, moves }))
            .unwrap();
    }

    #[allow(dead_code)]
    pub fn push_json(&mut self, json: &str) {
        let push = network::parse_board_push(json).unwrap();
        self.controller.apply_board_push(push);
    }

    #[allow(dead_code)]
    pub fn click(&mut self, square: Square) -> ClickReaction { self.controller.click_square(square) }

    // Commit request sent to the authority since the last call, if any.
    #[allow(dead_code)]
    pub fn sent_commit(&mut self) -> Option<OutgoingCommit> { self.commits_rx.try_recv().ok() }

    #[allow(dead_code)]
    pub fn respond(&mut self, commit: &OutgoingCommit, board: Board) -> Result<(), EventError> {
        self.controller.process_authority_event(AuthorityEvent::CommitCompleted {
            commit_id: commit.commit_id,
            result: Ok(CommitResponse { game_state: GameState { board } }),
        })
    }

    #[allow(dead_code)]
    pub fn fail(&mut self, commit: &OutgoingCommit, message: &str) -> Result<(), EventError> {
        self.controller.process_authority_event(AuthorityEvent::CommitCompleted {
            commit_id: commit.commit_id,
            result: Err(message.to_owned()),
        })
    }

    // Forgets notable events and render requests accumulated so far.
    #[allow(dead_code)]
    pub fn drain(&mut self) {
        while self.controller.next_notable_event().is_some() {}
        self.controller.take_render_request();
    }

    #[allow(dead_code)]
    pub fn notable_events(&mut self) -> Vec<NotableEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.controller.next_notable_event() {
            events.push(event);
        }
        events
    }
}
