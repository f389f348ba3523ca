use std::net::TcpStream;
use std::time::Duration;

use board_client::event::{CommitRequest, CommitResponse};
use board_client::network as wire;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};


pub struct PushReader {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl PushReader {
    pub fn connect(push_url: &str) -> Result<Self, tungstenite::Error> {
        let (socket, _) = tungstenite::connect(push_url)?;
        Ok(PushReader { socket })
    }

    // Blocks until the next data message. Control frames are skipped. Decoding is up to the
    // controller.
    pub fn read_message(&mut self) -> Result<String, tungstenite::Error> {
        loop {
            let msg = self.socket.read()?;
            match msg {
                Message::Text(_) | Message::Binary(_) => return Ok(msg.to_text()?.to_owned()),
                Message::Close(_) => return Err(tungstenite::Error::ConnectionClosed),
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
    }
}

pub struct CommitTransport {
    http: reqwest::blocking::Client,
    commit_url: String,
}

impl CommitTransport {
    pub fn new(authority_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(CommitTransport { http, commit_url: wire::commit_url(authority_url) })
    }

    // Errors are flattened to strings: the controller only reports them.
    pub fn commit(&self, request: CommitRequest) -> Result<CommitResponse, String> {
        let response = self
            .http
            .post(&self.commit_url)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|err| err.to_string())?;
        let body = response.text().map_err(|err| err.to_string())?;
        wire::parse_commit_response(&body).map_err(|err| err.to_string())
    }
}
