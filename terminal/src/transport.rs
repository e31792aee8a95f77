use anyhow::{Context, Result};
use client::{ConnectionError, Connector, Transport};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

/// What a websocket task reports back to the UI loop. Every event carries
/// the generation of the transport that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened { generation: u64 },
    Frame { generation: u64, text: String },
    Closed { generation: u64, reason: Option<String> },
}

/// Opens websocket transports, each driven by its own task.
pub struct WsConnector {
    events: UnboundedSender<TransportEvent>,
}

impl WsConnector {
    pub fn new(events: UnboundedSender<TransportEvent>) -> Self {
        Self { events }
    }
}

impl Connector for WsConnector {
    type Transport = WsTransport;

    fn open(&mut self, endpoint: &Url, generation: u64) -> Result<WsTransport, ConnectionError> {
        if !matches!(endpoint.scheme(), "ws" | "wss") {
            return Err(ConnectionError::Open {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme {}", endpoint.scheme()),
            });
        }

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_socket(
            endpoint.clone(),
            generation,
            outbound_rx,
            self.events.clone(),
        ));

        Ok(WsTransport {
            generation,
            outbound: outbound_tx,
        })
    }
}

/// Handle to a websocket task. Frames sent before the handshake completes
/// are queued and flushed once the socket is up.
pub struct WsTransport {
    generation: u64,
    outbound: UnboundedSender<Message>,
}

impl Transport for WsTransport {
    fn send_text(&mut self, frame: &str) -> Result<(), ConnectionError> {
        self.outbound
            .send(Message::Text(frame.into()))
            .map_err(|_| {
                ConnectionError::Transport(format!("websocket {} is closed", self.generation))
            })
    }

    fn close(&mut self) {
        // The task may already be gone.
        let _ = self.outbound.send(Message::Close(None));
    }
}

async fn run_socket(
    endpoint: Url,
    generation: u64,
    mut outbound: UnboundedReceiver<Message>,
    events: UnboundedSender<TransportEvent>,
) {
    let reason = match drive_socket(&endpoint, generation, &mut outbound, &events).await {
        Ok(()) => None,
        Err(err) => {
            warn!("Websocket {} failed: {:#}", generation, err);
            Some(format!("{err:#}"))
        }
    };
    info!("Websocket {} finished", generation);
    let _ = events.send(TransportEvent::Closed { generation, reason });
}

async fn drive_socket(
    endpoint: &Url,
    generation: u64,
    outbound: &mut UnboundedReceiver<Message>,
    events: &UnboundedSender<TransportEvent>,
) -> Result<()> {
    let (ws_stream, _) = connect_async(endpoint.as_str())
        .await
        .with_context(|| format!("Failed to connect to websocket {}", endpoint))?;
    let _ = events.send(TransportEvent::Opened { generation });
    let (mut ws_writer, mut ws_reader) = ws_stream.split();

    loop {
        tokio::select! {
            msg = ws_reader.next() => {
                let Some(msg) = msg else { return Ok(()) };
                match msg.context("Failed to read from websocket")? {
                    Message::Text(text) => {
                        let event = TransportEvent::Frame { generation, text: text.to_string() };
                        if events.send(event).is_err() {
                            return Ok(());
                        }
                    }
                    Message::Close(frame) => {
                        debug!("Websocket {} closed by server: {:?}", generation, frame);
                        return Ok(());
                    }
                    other => debug!("Websocket {} ignored {:?}", generation, other),
                }
            }
            out = outbound.recv() => {
                match out {
                    Some(Message::Close(frame)) => {
                        let _ = ws_writer.send(Message::Close(frame)).await;
                        return Ok(());
                    }
                    Some(msg) => ws_writer
                        .send(msg)
                        .await
                        .context("Failed to write to websocket")?,
                    None => {
                        let _ = ws_writer.close().await;
                        return Ok(());
                    }
                }
            }
        }
    }
}
