//! Modem-style line protocol.
//!
//! Before the handshake the device talks AT commands (no echo). After `ATDT`
//! the protocol switches to interactive mode: one character at a time, with
//! echo and destructive backspace, and each CR-terminated line is delivered to
//! the session.

pub const CONNECT_BANNER: &str = "CONNECT 9600";
pub const OK_REPLY: &str = "OK";

const CR: u8 = b'\r';
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;
const TAB: u8 = b'\t';

/// Bytes that erase one character on the device: left, blank, left.
pub const ERASE_SEQUENCE: &str = "\x08 \x08";

/// Longest line kept in either buffer; further input is dropped.
pub const MAX_LINE_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Command,
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// A line to send; the writer terminates it with CRLF.
    Reply(String),
    /// Raw text to echo back exactly as given.
    Echo(String),
    /// A submitted interactive line, without the CR.
    Line(String),
    /// Handshake completed (first dial or redial).
    Connected,
    /// The device hung up or reset the modem while connected.
    Disconnected,
    /// A byte that could not be used was discarded.
    Dropped(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtCommand {
    Reset,
    Dial(String),
    HangUp,
    Other(String),
}

impl AtCommand {
    /// Parses a command-mode line. Case and surrounding whitespace are ignored.
    pub fn parse(line: &str) -> Self {
        let command = line.trim().to_ascii_lowercase();
        if command == "atz" {
            AtCommand::Reset
        } else if let Some(number) = command.strip_prefix("atdt") {
            AtCommand::Dial(number.trim().to_string())
        } else if command == "ath" || command == "ath0" {
            AtCommand::HangUp
        } else {
            AtCommand::Other(command)
        }
    }

    /// Recognizes an AT command typed while already connected, which means
    /// the device is redialing or resetting rather than talking to the session.
    pub fn parse_in_session(line: &str) -> Option<Self> {
        match Self::parse(line) {
            AtCommand::Dial(number)
                if !number.is_empty() && number.chars().all(is_dial_char) =>
            {
                Some(AtCommand::Dial(number))
            }
            AtCommand::Reset => Some(AtCommand::Reset),
            AtCommand::HangUp => Some(AtCommand::HangUp),
            _ => None,
        }
    }
}

fn is_dial_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ',' | '*' | '#' | 'w' | 'p' | 't' | ' ')
}

#[derive(Debug, Clone, Default)]
pub struct LineProtocol {
    mode: Mode,
    command_buffer: String,
    line_buffer: String,
}

impl LineProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The interactive line typed so far.
    pub fn pending_line(&self) -> &str {
        &self.line_buffer
    }

    /// Consumes a chunk of raw bytes.
    ///
    /// Bytes are handled one by one, so a mode switch takes effect for the
    /// rest of the same chunk.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ProtocolEvent> {
        let mut events = Vec::new();
        for &byte in bytes {
            match self.mode {
                Mode::Command => self.command_byte(byte, &mut events),
                Mode::Interactive => self.interactive_byte(byte, &mut events),
            }
        }
        events
    }

    fn command_byte(&mut self, byte: u8, events: &mut Vec<ProtocolEvent>) {
        if !byte.is_ascii() {
            events.push(ProtocolEvent::Dropped(byte));
            return;
        }
        if byte == CR {
            let line = std::mem::take(&mut self.command_buffer);
            self.handle_command(AtCommand::parse(&line), events);
            return;
        }
        if self.command_buffer.len() >= MAX_LINE_LEN {
            // Garbage without a terminator; start over.
            self.command_buffer.clear();
            events.push(ProtocolEvent::Dropped(byte));
            return;
        }
        self.command_buffer.push(char::from(byte));
    }

    fn interactive_byte(&mut self, byte: u8, events: &mut Vec<ProtocolEvent>) {
        match byte {
            CR => {
                events.push(ProtocolEvent::Echo("\r\n".to_string()));
                let line = std::mem::take(&mut self.line_buffer);
                match AtCommand::parse_in_session(&line) {
                    Some(command) => self.handle_command(command, events),
                    None => events.push(ProtocolEvent::Line(line)),
                }
            }
            BACKSPACE | DELETE => {
                if self.line_buffer.pop().is_some() {
                    events.push(ProtocolEvent::Echo(ERASE_SEQUENCE.to_string()));
                }
            }
            TAB | 0x20..=0x7e => {
                if self.line_buffer.len() < MAX_LINE_LEN {
                    let ch = char::from(byte);
                    self.line_buffer.push(ch);
                    events.push(ProtocolEvent::Echo(ch.to_string()));
                } else {
                    events.push(ProtocolEvent::Dropped(byte));
                }
            }
            _ => events.push(ProtocolEvent::Dropped(byte)),
        }
    }

    fn handle_command(&mut self, command: AtCommand, events: &mut Vec<ProtocolEvent>) {
        match (self.mode, command) {
            (_, AtCommand::Dial(_)) => {
                events.push(ProtocolEvent::Reply(CONNECT_BANNER.to_string()));
                events.push(ProtocolEvent::Connected);
                self.mode = Mode::Interactive;
                self.line_buffer.clear();
            }
            (Mode::Interactive, AtCommand::Reset | AtCommand::HangUp) => {
                events.push(ProtocolEvent::Reply(OK_REPLY.to_string()));
                events.push(ProtocolEvent::Disconnected);
                self.mode = Mode::Command;
                self.command_buffer.clear();
            }
            (_, _) => events.push(ProtocolEvent::Reply(OK_REPLY.to_string())),
        }
    }
}
