use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use board_client::client::{BoardSyncController, NotableEvent};
use board_client::coord::Square;
use board_client::event::{AuthorityEvent, OutgoingCommit};
use board_client::view::BoardView;
use crossterm::event::{
    self as term_event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{self, Stylize};
use crossterm::{cursor, execute, terminal};
use log::{info, warn};
use scopeguard::defer;

use crate::client_config::ClientConfig;
use crate::network::{CommitTransport, PushReader};
use crate::tui;


enum IncomingEvent {
    PushMessage(String),
    Authority(AuthorityEvent),
    PushChannelClosed(String),
    Terminal(term_event::Event),
}

enum InputReaction {
    Continue,
    Exit,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1)
        )?;
    }
    Ok(())
}

// Accepts "x,y" or "x y".
fn parse_square(input: &str) -> Option<Square> {
    let (file, rank) = input.trim().split_once([',', ' '])?;
    Some(Square::new(file.trim().parse().ok()?, rank.trim().parse().ok()?))
}

// Delivers a click that hit neither the board nor the prompt menu to whoever listens for it.
// Only an open prompt does.
fn notify_outside_click(controller: &mut BoardSyncController) -> bool {
    if controller.listeners().num_active() == 0 {
        return false;
    }
    controller.dismiss_prompt()
}

struct ConsoleClient {
    config: ClientConfig,
    controller: BoardSyncController,
    view: Option<BoardView>,
    keyboard_input: String,
    status_error: Option<String>,
}

impl ConsoleClient {
    fn refresh_view(&mut self) {
        self.view = BoardView::render(&self.controller, self.config.orientation);
    }

    fn process_terminal_event(&mut self, event: term_event::Event) -> InputReaction {
        match event {
            term_event::Event::Key(KeyEvent { code, modifiers, .. }) => {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    return InputReaction::Exit;
                }
                match code {
                    // Squares are typed with digits, so prompt options use letters.
                    KeyCode::Char(ch) if self.keyboard_input.is_empty() && self.controller.prompt().is_some() => {
                        match tui::prompt_option_for_key(ch) {
                            Some(option) => {
                                if let Err(err) = self.controller.choose_prompt_option(option) {
                                    self.status_error = Some(format!("Cannot choose option {}: {:?}", ch, err));
                                }
                            }
                            None => self.keyboard_input.push(ch),
                        }
                    }
                    KeyCode::Char(ch) => self.keyboard_input.push(ch),
                    KeyCode::Backspace => {
                        self.keyboard_input.pop();
                    }
                    KeyCode::Esc => {
                        notify_outside_click(&mut self.controller);
                    }
                    KeyCode::Enter => {
                        let input = std::mem::take(&mut self.keyboard_input);
                        if let Some(cmd) = input.strip_prefix('/') {
                            match cmd {
                                "quit" => return InputReaction::Exit,
                                _ => self.status_error = Some(format!("Unknown command: '{}'", cmd)),
                            }
                        } else if let Some(square) = parse_square(&input) {
                            self.controller.click_square(square);
                        } else {
                            self.status_error = Some(format!("Expected a square like '1,2', got '{}'", input));
                        }
                    }
                    _ => {}
                }
            }
            term_event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.process_mouse_click(column, row),
            _ => {}
        }
        InputReaction::Continue
    }

    fn process_mouse_click(&mut self, column: u16, row: u16) {
        let Some(ref view) = self.view else {
            return;
        };
        if let Some(option) = tui::prompt_option_at(row, view) {
            if let Err(err) = self.controller.choose_prompt_option(option) {
                warn!("Cannot choose prompt option {}: {:?}", option, err);
            }
        } else if let Some(handler) =
            tui::display_coord_at(column, row, view.shape).and_then(|q| view.handler_at(q))
        {
            handler.on_click(&mut self.controller);
        } else {
            notify_outside_click(&mut self.controller);
        }
    }

    fn process_notable_events(&mut self) {
        while let Some(event) = self.controller.next_notable_event() {
            match event {
                NotableEvent::BoardPushed | NotableEvent::CommitApplied => {
                    self.status_error = None;
                }
                NotableEvent::CommitFailed(err) => {
                    self.status_error = Some(format!("Move was not accepted: {}", err));
                }
                NotableEvent::MoveCommitted(..)
                | NotableEvent::CommitDiscarded(..)
                | NotableEvent::PromptOpened(..)
                | NotableEvent::PromptDismissed => {}
            }
        }
    }

    fn render(&self, stdout: &mut io::Stdout, full_redraw: bool) -> io::Result<()> {
        execute!(stdout, cursor::MoveTo(0, 0))?;
        if full_redraw {
            execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        match self.view {
            None => writeln_raw(stdout, "Waiting for the first board...")?,
            Some(ref view) => {
                writeln_raw(stdout, tui::render_board(view).trim_end_matches('\n'))?;
                for line in tui::render_prompt(view) {
                    writeln_raw(stdout, line)?;
                }
                let status = if view.awaiting_commit {
                    "Waiting for the authority..."
                } else if self.controller.move_index().is_empty() {
                    "No moves available"
                } else {
                    ""
                };
                writeln_raw(stdout, status.with(style::Color::DarkGrey))?;
            }
        }
        writeln_raw(stdout, format!("> {}▂", self.keyboard_input))?;
        if let Some(ref err) = self.status_error {
            writeln_raw(stdout, err.clone().with(style::Color::Red))?;
        }
        execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        Ok(())
    }
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    info!("Connecting to {}...", config.push_url);
    let mut push_reader = PushReader::connect(&config.push_url)
        .with_context(|| format!("Connecting to push channel at {}", config.push_url))?;
    let transport = CommitTransport::new(&config.authority_url, config.commit_timeout)
        .context("Creating HTTP client")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, term_event::EnableMouseCapture, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), term_event::DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_local = tx.clone();
    let tx_commit = tx;
    thread::spawn(move || {
        loop {
            match push_reader.read_message() {
                Ok(text) => {
                    if tx_net.send(IncomingEvent::PushMessage(text)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let _ = tx_net.send(IncomingEvent::PushChannelClosed(err.to_string()));
                    return;
                }
            }
        }
    });
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                return;
            }
        }
    });

    let (commits_tx, commits_rx) = mpsc::channel::<OutgoingCommit>();
    thread::spawn(move || {
        for OutgoingCommit { commit_id, request } in commits_rx {
            let result = transport.commit(request);
            let event = AuthorityEvent::CommitCompleted { commit_id, result };
            if tx_commit.send(IncomingEvent::Authority(event)).is_err() {
                return;
            }
        }
    });

    let mut client = ConsoleClient {
        config,
        controller: BoardSyncController::new(commits_tx),
        view: None,
        keyboard_input: String::new(),
        status_error: None,
    };
    client.render(&mut stdout, true)?;
    for event in rx {
        match event {
            IncomingEvent::PushMessage(text) => {
                if let Err(err) = client.controller.process_push_message(&text) {
                    warn!("Ignoring push message: {:?}", err);
                }
            }
            IncomingEvent::Authority(event) => {
                if let Err(err) = client.controller.process_authority_event(event) {
                    warn!("{:?}", err);
                }
            }
            IncomingEvent::PushChannelClosed(err) => {
                client.status_error = Some(format!("Lost connection to the authority: {}", err));
            }
            IncomingEvent::Terminal(event) => {
                if let InputReaction::Exit = client.process_terminal_event(event) {
                    return Ok(());
                }
            }
        }
        client.process_notable_events();
        let board_changed = client.controller.take_render_request();
        if board_changed {
            client.refresh_view();
        }
        client.render(&mut stdout, board_changed)?;
    }
    anyhow::bail!("Unexpected end of events stream")
}
