//! The polling loop: bytes in, protocol events, session updates, bytes out.

use std::thread;

use gateway_core::{update, Effect, LineProtocol, Msg, ProtocolEvent, SessionState};
use gateway_logging::{gateway_debug, gateway_error, gateway_info, gateway_trace, gateway_warn};

use crate::config::Timing;
use crate::effects::EffectRunner;
use crate::transport::{Transport, TransportError};

const READ_CHUNK: usize = 100;

pub struct Gateway<T: Transport> {
    transport: T,
    protocol: LineProtocol,
    state: SessionState,
    runner: EffectRunner,
    timing: Timing,
    connections: u64,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, runner: EffectRunner, timing: Timing) -> Self {
        Self {
            transport,
            protocol: LineProtocol::new(),
            state: SessionState::new(),
            runner,
            timing,
            connections: 0,
        }
    }

    /// Polls forever. Transport failures are logged and retried, never fatal.
    pub fn run(&mut self) -> ! {
        gateway_info!("Gateway ready, waiting for ATDT");
        loop {
            if !self.poll_once() {
                thread::sleep(self.timing.idle_sleep);
            }
        }
    }

    /// One read plus any finished fetches. Returns whether anything happened.
    pub fn poll_once(&mut self) -> bool {
        let mut buf = [0u8; READ_CHUNK];
        let mut active = match self.transport.read(&mut buf) {
            Ok(0) => false,
            Ok(n) => {
                self.handle_bytes(&buf[..n]);
                true
            }
            Err(TransportError::Disconnected) => {
                gateway_warn!("Terminal dropped the line");
                self.hang_up();
                false
            }
            Err(err) => {
                gateway_error!("Read failed: {}", err);
                thread::sleep(self.timing.idle_sleep);
                false
            }
        };

        for msg in self.runner.drain() {
            self.dispatch(msg);
            active = true;
        }
        active
    }

    fn handle_bytes(&mut self, bytes: &[u8]) {
        for event in self.protocol.feed(bytes) {
            match event {
                ProtocolEvent::Reply(line) => self.write(&format!("{line}\r\n")),
                ProtocolEvent::Echo(text) => self.write(&text),
                ProtocolEvent::Line(line) => {
                    gateway_debug!("Input {:?}", line);
                    self.dispatch(Msg::Input(line));
                }
                ProtocolEvent::Connected => {
                    self.connections += 1;
                    gateway_logging::set_connection_id(self.connections);
                    gateway_info!("Connected");
                    thread::sleep(self.timing.connect_delay);
                    self.dispatch(Msg::Connected);
                }
                ProtocolEvent::Disconnected => {
                    gateway_info!("Hung up");
                    self.dispatch(Msg::Disconnected);
                }
                ProtocolEvent::Dropped(byte) => gateway_trace!("Dropped byte 0x{:02x}", byte),
            }
        }
    }

    /// The line went away without a modem command; start over in command mode.
    fn hang_up(&mut self) {
        self.protocol = LineProtocol::new();
        if self.state.is_connected() {
            self.dispatch(Msg::Disconnected);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::Show(screen) => {
                    for chunk in screen.wire_chunks() {
                        self.write(&chunk);
                    }
                }
                other => self.runner.run(other),
            }
        }
    }

    fn write(&mut self, text: &str) {
        if let Err(err) = self.transport.write_all(text.as_bytes()) {
            gateway_warn!("Write failed: {}", err);
        }
        thread::sleep(self.timing.write_delay);
    }
}
