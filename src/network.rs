// Wire encoding shared by all front-ends. Transport itself (sockets, HTTP) lives with the
// front-end.

use std::fmt;

use serde::de;

use crate::client::EventError;
use crate::event::{BoardPush, CommitResponse};


// Relative to the authority base URL.
pub const COMMIT_PATH: &str = "/chess-board/moves";

#[derive(Debug)]
pub enum CommunicationError {
    Serde(serde_json::Error),
    Protocol(String),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Serde(err) => write!(f, "cannot parse message: {}", err),
            CommunicationError::Protocol(msg) => write!(f, "protocol error: {}", msg),
        }
    }
}

impl From<CommunicationError> for EventError {
    fn from(err: CommunicationError) -> Self { EventError::MalformedMessage(err.to_string()) }
}

pub fn parse_obj<T: de::DeserializeOwned>(s: &str) -> Result<T, CommunicationError> {
    serde_json::from_str(s).map_err(CommunicationError::Serde)
}

pub fn parse_board_push(s: &str) -> Result<BoardPush, CommunicationError> { parse_obj(s) }

pub fn parse_commit_response(s: &str) -> Result<CommitResponse, CommunicationError> {
    if s.trim().is_empty() {
        return Err(CommunicationError::Protocol("empty commit response".to_owned()));
    }
    parse_obj(s)
}

pub fn commit_url(authority_url: &str) -> String {
    format!("{}{}", authority_url.trim_end_matches('/'), COMMIT_PATH)
}
