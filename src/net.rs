//! WebSocket connection to the instrument server
//!
//! The socket lives on its own thread. It only moves text:
//! - inbound text frames are forwarded over a channel to the UI thread
//! - outbound commands are queued over a channel and written by the socket thread
//!
//! All parsing and drawing stays on the UI thread, one message at a time.
//! There is no reconnection; once the connection ends the state says why.

use std::io::ErrorKind;
use std::net::TcpStream;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use eframe::egui;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use crate::error::PanelError;
use crate::input::CommandSink;
use crate::protocol::Command;

/// How long a read may block before the thread checks for outbound commands
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Connection lifecycle as shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Closed,
    Failed(String),
}

impl ConnectionState {
    pub fn describe(&self) -> String {
        match self {
            ConnectionState::Connecting => "Connecting...".to_string(),
            ConnectionState::Connected => "Connected".to_string(),
            ConnectionState::Closed => "Connection closed".to_string(),
            ConnectionState::Failed(reason) => format!("Connection failed: {}", reason),
        }
    }
}

/// Cloneable handle for queueing outbound commands
#[derive(Clone)]
pub struct Outbound {
    tx: Sender<String>,
}

impl CommandSink for Outbound {
    fn send(&self, command: &Command) {
        if self.tx.send(command.to_wire()).is_err() {
            log::debug!("socket gone, dropping '{}'", command);
        }
    }
}

/// Background WebSocket client
pub struct SocketClient {
    inbound: Receiver<String>,
    outbound: Outbound,
    state: Arc<Mutex<ConnectionState>>,
}

impl SocketClient {
    /// Start connecting to `url` in the background
    ///
    /// `ctx` is asked to repaint whenever a frame arrives so messages are
    /// applied without waiting for user input.
    pub fn connect(url: &str, ctx: egui::Context) -> Self {
        let (inbound_tx, inbound) = mpsc::channel();
        let (outbound_tx, outbound_rx) = mpsc::channel();
        let state = Arc::new(Mutex::new(ConnectionState::Connecting));

        let url = url.to_string();
        let thread_state = Arc::clone(&state);
        let spawned = thread::Builder::new()
            .name("hdsctl-socket".to_string())
            .spawn(move || {
                let result = run(&url, &inbound_tx, &outbound_rx, &thread_state, &ctx);
                let final_state = match result {
                    Ok(()) => {
                        log::info!("connection to {} closed", url);
                        ConnectionState::Closed
                    }
                    Err(e) => {
                        log::error!("connection to {} failed: {}", url, e);
                        ConnectionState::Failed(e.to_string())
                    }
                };
                set_state(&thread_state, final_state);
                ctx.request_repaint();
            });

        if let Err(e) = spawned {
            log::error!("failed to start socket thread: {}", e);
            set_state(&state, ConnectionState::Failed(e.to_string()));
        }

        Self {
            inbound,
            outbound: Outbound { tx: outbound_tx },
            state,
        }
    }

    /// Next received message, if one is waiting
    pub fn try_recv(&self) -> Option<String> {
        self.inbound.try_recv().ok()
    }

    pub fn outbound(&self) -> Outbound {
        self.outbound.clone()
    }

    pub fn state(&self) -> ConnectionState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

fn set_state(state: &Mutex<ConnectionState>, value: ConnectionState) {
    match state.lock() {
        Ok(mut guard) => *guard = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

fn run(
    url: &str,
    inbound: &Sender<String>,
    outbound: &Receiver<String>,
    state: &Mutex<ConnectionState>,
    ctx: &egui::Context,
) -> Result<(), PanelError> {
    log::info!("connecting to {}", url);
    let (mut socket, _response) = tungstenite::connect(url)?;
    set_poll_timeout(&socket)?;
    set_state(state, ConnectionState::Connected);
    ctx.request_repaint();
    log::info!("connected to {}", url);

    loop {
        loop {
            match outbound.try_recv() {
                Ok(text) => socket.send(Message::text(text))?,
                Err(TryRecvError::Empty) => break,
                // The UI went away
                Err(TryRecvError::Disconnected) => {
                    let _ = socket.close(None);
                    return Ok(());
                }
            }
        }

        match socket.read() {
            Ok(Message::Text(text)) => {
                if inbound.send(text.to_string()).is_err() {
                    return Ok(());
                }
                ctx.request_repaint();
            }
            Ok(Message::Close(_)) => return Ok(()),
            Ok(_) => {}
            Err(tungstenite::Error::Io(e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
            Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Make reads return periodically so queued commands are not held up
fn set_poll_timeout(socket: &WebSocket<MaybeTlsStream<TcpStream>>) -> Result<(), PanelError> {
    if let MaybeTlsStream::Plain(stream) = socket.get_ref() {
        stream.set_read_timeout(Some(POLL_INTERVAL))?;
    }
    Ok(())
}
