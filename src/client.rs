use std::collections::{HashMap, VecDeque};
use std::mem;
use std::sync::mpsc;

use log::{debug, error, info};
use strum::IntoStaticStr;

use crate::board::Board;
use crate::coord::Square;
use crate::event::{
    AuthorityEvent, BoardPush, CommitId, CommitRequest, CommitResponse, OutgoingCommit,
};
use crate::move_index::MoveIndex;
use crate::moves::MoveId;
use crate::network;
use crate::prompt::{DisambiguationPrompt, ListenerRegistry, PromptError};
use crate::selection::{self, Resolution};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    BoardPushed,
    MoveCommitted(MoveId),
    CommitApplied,
    // Commit response arrived after a newer board push. Its board was not shown.
    CommitDiscarded(MoveId),
    CommitFailed(String),
    PromptOpened(Square),
    PromptDismissed,
}

#[derive(Clone, Debug)]
pub enum EventError {
    CannotApplyEvent(String),
    MalformedMessage(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickReaction {
    Ignored,
    Selected(Square),
    Deselected,
    Committed(MoveId),
    PromptOpened,
    // Click landed outside of an open prompt. Nothing else happens.
    PromptDismissed,
}

#[derive(Debug, IntoStaticStr)]
pub enum Phase {
    Idle,
    Selected {
        origin: Square,
        // Shown on a destination square when several moves from `origin` end there.
        prompt: Option<DisambiguationPrompt>,
    },
    AwaitingCommit {
        commit_id: CommitId,
        move_id: MoveId,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str { self.into() }
}

// Owns the board snapshot and the move index. Everything that changes them goes through here:
// board pushes, commit responses and clicks.
pub struct BoardSyncController {
    commits_tx: mpsc::Sender<OutgoingCommit>,
    board: Option<Board>,
    move_index: MoveIndex,
    phase: Phase,
    listeners: ListenerRegistry,
    next_commit_id: u64,
    // Commits that lost the race against a board push. Their responses must not be rendered.
    superseded_commits: HashMap<CommitId, MoveId>,
    notable_event_queue: VecDeque<NotableEvent>,
    render_requested: bool,
}

impl BoardSyncController {
    pub fn new(commits_tx: mpsc::Sender<OutgoingCommit>) -> Self {
        BoardSyncController {
            commits_tx,
            board: None,
            move_index: MoveIndex::empty(),
            phase: Phase::Idle,
            listeners: ListenerRegistry::new(),
            next_commit_id: 1,
            superseded_commits: HashMap::new(),
            notable_event_queue: VecDeque::new(),
            render_requested: false,
        }
    }

    pub fn board(&self) -> Option<&Board> { self.board.as_ref() }
    pub fn move_index(&self) -> &MoveIndex { &self.move_index }
    pub fn phase(&self) -> &Phase { &self.phase }
    pub fn listeners(&self) -> &ListenerRegistry { &self.listeners }

    pub fn selected_origin(&self) -> Option<Square> {
        match self.phase {
            Phase::Selected { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn prompt(&self) -> Option<&DisambiguationPrompt> {
        match self.phase {
            Phase::Selected { ref prompt, .. } => prompt.as_ref(),
            _ => None,
        }
    }

    pub fn pending_commit(&self) -> Option<MoveId> {
        match self.phase {
            Phase::AwaitingCommit { move_id, .. } => Some(move_id),
            _ => None,
        }
    }

    pub fn highlighted_destinations(&self) -> Vec<Square> {
        match self.selected_origin() {
            Some(origin) => self.move_index.destinations(origin).collect(),
            None => Vec::new(),
        }
    }

    pub fn next_notable_event(&mut self) -> Option<NotableEvent> { self.notable_event_queue.pop_front() }

    // Returns true at most once per batch of changes. All events processed since the last call
    // are covered by a single render.
    pub fn take_render_request(&mut self) -> bool { mem::take(&mut self.render_requested) }

    pub fn process_authority_event(&mut self, event: AuthorityEvent) -> Result<(), EventError> {
        match event {
            AuthorityEvent::BoardPushed(push) => {
                self.apply_board_push(push);
                Ok(())
            }
            AuthorityEvent::CommitCompleted { commit_id, result } => {
                self.apply_commit_result(commit_id, result)
            }
        }
    }

    // Raw push channel message. A message that cannot be decoded leaves all state unchanged.
    pub fn process_push_message(&mut self, text: &str) -> Result<(), EventError> {
        let push = network::parse_board_push(text)?;
        self.apply_board_push(push);
        Ok(())
    }

    pub fn apply_board_push(&mut self, push: BoardPush) {
        let BoardPush { board, moves } = push;
        let move_index = MoveIndex::build(&moves, board.shape());
        debug!("Board pushed: {} moves from {} squares", move_index.len(), move_index.origins().count());
        if let Phase::AwaitingCommit { commit_id, move_id } = self.phase {
            info!("Board push supersedes pending commit of move {}", move_id);
            self.superseded_commits.insert(commit_id, move_id);
        }
        if self.prompt().is_some() {
            self.notable_event_queue.push_back(NotableEvent::PromptDismissed);
        }
        self.board = Some(board);
        self.move_index = move_index;
        self.phase = Phase::Idle;
        self.notable_event_queue.push_back(NotableEvent::BoardPushed);
        self.render_requested = true;
    }

    fn apply_commit_result(
        &mut self, commit_id: CommitId, result: Result<CommitResponse, String>,
    ) -> Result<(), EventError> {
        let pending_move = match self.phase {
            Phase::AwaitingCommit { commit_id: pending, move_id } if pending == commit_id => move_id,
            _ => {
                return match self.superseded_commits.remove(&commit_id) {
                    Some(move_id) => {
                        match result {
                            Ok(_) => info!("Discarding response for move {}: board was pushed since", move_id),
                            Err(err) => error!("Commit of move {} failed after being superseded: {}", move_id, err),
                        }
                        self.notable_event_queue.push_back(NotableEvent::CommitDiscarded(move_id));
                        Ok(())
                    }
                    None => Err(EventError::CannotApplyEvent(format!(
                        "Got response for unknown commit {:?} while {}",
                        commit_id,
                        self.phase.name()
                    ))),
                };
            }
        };
        match result {
            Ok(response) => {
                // Moves for the new position come with the next push. Until then nothing is clickable.
                self.board = Some(response.game_state.board);
                self.move_index = MoveIndex::empty();
                self.notable_event_queue.push_back(NotableEvent::CommitApplied);
            }
            Err(err) => {
                // Nothing changed on the authority side, so the current move list is still valid.
                error!("Failed to commit move {}: {}", pending_move, err);
                self.notable_event_queue.push_back(NotableEvent::CommitFailed(err));
            }
        }
        self.phase = Phase::Idle;
        self.render_requested = true;
        Ok(())
    }

    pub fn click_square(&mut self, square: Square) -> ClickReaction {
        let Some(shape) = self.board.as_ref().map(Board::shape) else {
            debug!("Ignoring click on {:?}: no board yet", square);
            return ClickReaction::Ignored;
        };
        if !shape.contains(square) {
            debug!("Ignoring click on {:?}: outside of the board", square);
            return ClickReaction::Ignored;
        }
        match mem::replace(&mut self.phase, Phase::Idle) {
            phase @ Phase::AwaitingCommit { .. } => {
                debug!("Ignoring click on {:?}: waiting for commit", square);
                self.phase = phase;
                ClickReaction::Ignored
            }
            Phase::Idle => self.select(square),
            Phase::Selected { origin, prompt } => {
                self.render_requested = true;
                if prompt.is_some() {
                    drop(prompt);
                    self.phase = Phase::Selected { origin, prompt: None };
                    self.notable_event_queue.push_back(NotableEvent::PromptDismissed);
                    return ClickReaction::PromptDismissed;
                }
                if square == origin {
                    return ClickReaction::Deselected;
                }
                match selection::resolve(&self.move_index, origin, square) {
                    Resolution::None => self.select(square),
                    Resolution::Single(candidate) => self.commit(candidate.id),
                    Resolution::Ambiguous(candidates) => {
                        let prompt = DisambiguationPrompt::open(square, candidates, &self.listeners);
                        self.phase = Phase::Selected { origin, prompt: Some(prompt) };
                        self.notable_event_queue.push_back(NotableEvent::PromptOpened(square));
                        ClickReaction::PromptOpened
                    }
                }
            }
        }
    }

    pub fn choose_prompt_option(&mut self, option: usize) -> Result<MoveId, PromptError> {
        let Phase::Selected { origin, ref mut prompt } = self.phase else {
            return Err(PromptError::NoPrompt);
        };
        let p = prompt.take().ok_or(PromptError::NoPrompt)?;
        match p.choose(option) {
            Ok(move_id) => {
                self.commit(move_id);
                Ok(move_id)
            }
            Err((p, err)) => {
                self.phase = Phase::Selected { origin, prompt: Some(p) };
                Err(err)
            }
        }
    }

    // Click outside of the prompt. The origin stays selected.
    pub fn dismiss_prompt(&mut self) -> bool {
        if let Phase::Selected { ref mut prompt, .. } = self.phase {
            if prompt.take().is_some() {
                self.notable_event_queue.push_back(NotableEvent::PromptDismissed);
                self.render_requested = true;
                return true;
            }
        }
        false
    }

    fn select(&mut self, origin: Square) -> ClickReaction {
        self.phase = Phase::Selected { origin, prompt: None };
        self.render_requested = true;
        ClickReaction::Selected(origin)
    }

    fn commit(&mut self, move_id: MoveId) -> ClickReaction {
        let commit_id = CommitId(self.next_commit_id);
        self.next_commit_id += 1;
        let outgoing = OutgoingCommit {
            commit_id,
            request: CommitRequest { move_index: move_id },
        };
        self.render_requested = true;
        if let Err(err) = self.commits_tx.send(outgoing) {
            error!("Cannot send commit of move {}: {}", move_id, err);
            self.phase = Phase::Idle;
            self.notable_event_queue.push_back(NotableEvent::CommitFailed(err.to_string()));
            return ClickReaction::Ignored;
        }
        self.phase = Phase::AwaitingCommit { commit_id, move_id };
        self.notable_event_queue.push_back(NotableEvent::MoveCommitted(move_id));
        ClickReaction::Committed(move_id)
    }
}
