//! Byte links to the terminal: a serial port or a single TCP client.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use gateway_logging::{gateway_info, gateway_warn};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("terminal disconnected")]
    Disconnected,
}

/// A duplex byte stream with short, bounded reads.
pub trait Transport {
    /// Reads whatever is available, waiting at most the poll timeout.
    /// Returns `Ok(0)` when nothing arrived in time.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Opens the device with DTR and RTS asserted, which most terminals need
    /// before they will talk.
    pub fn open(path: &str, baud_rate: u32, poll_timeout: Duration) -> Result<Self, TransportError> {
        let mut port = serialport::new(path, baud_rate).timeout(poll_timeout).open()?;
        port.write_data_terminal_ready(true)?;
        port.write_request_to_send(true)?;
        gateway_info!("Opened serial port {} at {} baud", path, baud_rate);
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(err) if is_timeout(&err) => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }
}

/// Serves one terminal emulator at a time over TCP.
///
/// When the client goes away the next read reports [`TransportError::Disconnected`]
/// and the listener waits for someone else to dial in.
pub struct TcpTransport {
    listener: TcpListener,
    client: Option<TcpStream>,
    poll_timeout: Duration,
}

impl TcpTransport {
    pub fn bind(addr: &str, poll_timeout: Duration) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        gateway_info!("Listening for terminals on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            client: None,
            poll_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.listener.local_addr()?)
    }

    fn accept(&mut self) -> Result<bool, TransportError> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                stream.set_nonblocking(false)?;
                stream.set_read_timeout(Some(self.poll_timeout))?;
                stream.set_nodelay(true)?;
                gateway_info!("Terminal connected from {}", peer);
                self.client = Some(stream);
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                std::thread::sleep(self.poll_timeout);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Transport for TcpTransport {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        if self.client.is_none() && !self.accept()? {
            return Ok(0);
        }
        let Some(stream) = self.client.as_mut() else {
            return Ok(0);
        };
        match stream.read(buf) {
            Ok(0) => {
                self.client = None;
                Err(TransportError::Disconnected)
            }
            Ok(n) => Ok(n),
            Err(err) if is_timeout(&err) => Ok(0),
            Err(err) => {
                gateway_warn!("Dropping terminal after read error: {}", err);
                self.client = None;
                Err(TransportError::Disconnected)
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let Some(stream) = self.client.as_mut() else {
            return Err(TransportError::Disconnected);
        };
        if let Err(err) = stream.write_all(bytes) {
            self.client = None;
            return Err(err.into());
        }
        Ok(())
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tcp_client_round_trip_and_hangup() {
        let mut transport = TcpTransport::bind("127.0.0.1:0", Duration::from_millis(20)).unwrap();
        let addr = transport.local_addr().unwrap();
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"AT\r").unwrap();

        let mut buf = [0u8; 100];
        let mut received = Vec::new();
        for _ in 0..100 {
            let n = transport.read(&mut buf).unwrap();
            received.extend_from_slice(&buf[..n]);
            if received.ends_with(b"\r") {
                break;
            }
        }
        assert_eq!(received, b"AT\r");

        transport.write_all(b"OK\r\n").unwrap();
        let mut reply = [0u8; 4];
        client.read_exact(&mut reply).unwrap();
        assert_eq!(&reply, b"OK\r\n");

        drop(client);
        let mut outcome = Ok(0);
        for _ in 0..100 {
            outcome = transport.read(&mut buf);
            if outcome.is_err() {
                break;
            }
        }
        assert!(matches!(outcome, Err(TransportError::Disconnected)));
    }

    #[test]
    fn reads_time_out_quietly_without_a_client() {
        let mut transport = TcpTransport::bind("127.0.0.1:0", Duration::from_millis(5)).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(transport.read(&mut buf).unwrap(), 0);
        assert!(matches!(
            transport.write_all(b"x"),
            Err(TransportError::Disconnected)
        ));
    }
}
