// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client speaking the `{event, payload}` envelope.
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::text(text.to_string())).await?;
        Ok(())
    }

    /// Send one client event
    pub async fn emit(
        &mut self,
        event: &str,
        payload: Value,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frame = json!({ "event": event, "payload": payload });
        self.send_text(&frame.to_string()).await
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next JSON text frame; control frames are skipped.
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            let msg = tokio::time::timeout(remaining, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?
                .ok_or("Stream closed")??;
            match msg {
                Message::Text(text) => return Ok(serde_json::from_str(text.as_str())?),
                Message::Close(_) => return Err("Connection closed".into()),
                _ => continue,
            }
        }
    }

    /// Skip pushes until one named `event` arrives; returns its payload.
    pub async fn expect_event(&mut self, event: &str) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            let msg = self.recv_json_timeout(RECV_TIMEOUT).await?;
            if msg["event"] == event {
                return Ok(msg["payload"].clone());
            }
        }
    }

    /// Assert that nothing named `event` arrives within `window`.
    pub async fn expect_no_event(
        &mut self,
        event: &str,
        window: Duration,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + window;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            match self.recv_json_timeout(remaining).await {
                Ok(msg) if msg["event"] == event => {
                    return Err(format!("unexpected {event}: {msg}").into());
                }
                Ok(_) => continue,
                Err(_) => return Ok(()),
            }
        }
    }
}
