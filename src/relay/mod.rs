//! # Relay Bridge Module
//!
//! Forwards host-originated outbound payloads to a remote consumer over a
//! WebSocket connection.
//!
//! The bridge owns a single optional peer connection. Payloads are treated
//! as opaque strings framed by the host; they are forwarded verbatim when
//! the connection is open and silently dropped (never queued) otherwise.
//! Any transport failure closes the connection; reconnecting is a manual
//! operation, triggered again from the configuration view.
//!
//! Input capture must never stall on network I/O: every failure here is
//! contained inside the relay task and surfaced only as status state.

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::fmt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use crate::error::{Result, TouchBridgeError};

/// Write half of the peer connection.
type RelaySink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Connection lifecycle of the relay peer.
///
/// ```text
/// Absent → Connecting → {Open | Closed}
/// Open → Closed on any transport failure
/// ```
///
/// There is no automatic reconnect; only a new `connect` call leaves
/// `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayState {
    /// No connection has been attempted.
    #[default]
    Absent,
    /// A connect attempt is in flight.
    Connecting,
    /// The peer is reachable; payloads are forwarded.
    Open,
    /// The last attempt failed or the transport broke.
    Closed,
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RelayState::Absent => "not connected",
            RelayState::Connecting => "connecting...",
            RelayState::Open => "connected",
            RelayState::Closed => "connection error",
        };
        write!(f, "{}", text)
    }
}

/// Commands accepted by the relay task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// Attempt a connection to the given WebSocket address.
    Connect(String),
}

/// The single optional outbound network connection.
pub struct RelayBridge {
    state: RelayState,
    sink: Option<RelaySink>,
}

impl fmt::Debug for RelayBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayBridge")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for RelayBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayBridge {
    /// Creates a bridge with no connection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RelayState::Absent,
            sink: None,
        }
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Attempts a connection to the peer.
    ///
    /// Idempotent attempt: a repeated call replaces any previous
    /// connection. Failure leaves the state `Closed` and is non-fatal to
    /// the rest of the system.
    ///
    /// # Arguments
    ///
    /// * `address` - WebSocket address, e.g. `ws://192.168.0.106:9001`
    ///
    /// # Errors
    ///
    /// Returns `Relay` error if the peer is unreachable or the handshake
    /// fails.
    pub async fn connect(&mut self, address: &str) -> Result<()> {
        self.state = RelayState::Connecting;
        self.sink = None;
        info!("connecting to relay peer at {}", address);

        match connect_async(address).await {
            Ok((socket, _response)) => {
                // The read half is unused; payload flow is one-way
                let (sink, _stream) = socket.split();
                self.sink = Some(sink);
                self.state = RelayState::Open;
                info!("relay connection open");
                Ok(())
            }
            Err(e) => {
                self.state = RelayState::Closed;
                warn!("relay connect to {} failed: {}", address, e);
                Err(TouchBridgeError::Relay(format!(
                    "connect to {} failed: {}",
                    address, e
                )))
            }
        }
    }

    /// Forwards one payload to the peer.
    ///
    /// Returns `Ok(true)` when the payload was sent, `Ok(false)` when it
    /// was dropped because the connection is not open (not an error: the
    /// relay is optional).
    ///
    /// # Errors
    ///
    /// Returns `Relay` error on a transport failure; the connection moves
    /// to `Closed` and stays there until the next `connect`.
    pub async fn forward(&mut self, payload: &str) -> Result<bool> {
        let sink = match self.sink.as_mut() {
            Some(sink) if self.state == RelayState::Open => sink,
            _ => {
                trace!("relay not open, payload dropped");
                return Ok(false);
            }
        };

        match sink.send(Message::Text(payload.to_string())).await {
            Ok(()) => Ok(true),
            Err(e) => {
                self.state = RelayState::Closed;
                self.sink = None;
                Err(TouchBridgeError::Relay(format!("forward failed: {}", e)))
            }
        }
    }
}

/// Relay task: serves connect commands and forwards the payload stream,
/// publishing connection state for the configuration view.
///
/// Runs until both inbound channels close. No failure here ever reaches
/// the input pipeline.
pub async fn run(
    mut bridge: RelayBridge,
    mut commands: mpsc::Receiver<RelayCommand>,
    mut payloads: mpsc::UnboundedReceiver<String>,
    status: watch::Sender<RelayState>,
) {
    loop {
        tokio::select! {
            Some(command) = commands.recv() => match command {
                RelayCommand::Connect(address) => {
                    let _ = status.send(RelayState::Connecting);
                    if let Err(e) = bridge.connect(&address).await {
                        debug!("relay connect attempt failed: {}", e);
                    }
                    let _ = status.send(bridge.state());
                }
            },
            Some(payload) = payloads.recv() => {
                if let Err(e) = bridge.forward(&payload).await {
                    warn!("relay forward failed: {}", e);
                    let _ = status.send(bridge.state());
                }
            },
            else => break,
        }
    }
    debug!("relay task stopped");
}
