//! WebSocket subscription to a table's push channel.
//!
//! A [`Session`] owns one connection and two background tasks: a
//! keep-alive that sends [`PING`] on a fixed interval, and a reader that
//! decodes every JSON frame into a [`ServerEvent`] and hands it to the
//! caller's callback. Both tasks end when the connection closes or the
//! session is closed or dropped.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use log::{debug, info, warn};
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpStream, sync::Mutex, task::JoinHandle, time};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use super::{
    errors::Result,
    messages::{PING, PONG, ServerEvent},
};

/// Default period between keep-alive frames.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// A live WebSocket subscription
pub struct Session {
    sink: Arc<Mutex<WsSink>>,
    heartbeat: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl Session {
    /// Connect to `url` and start forwarding events to `on_message`.
    ///
    /// The callback runs on the reader task and is dropped when the reader
    /// stops, so a callback that owns a channel sender closes the channel
    /// once the connection is gone.
    pub async fn connect<F>(url: &str, on_message: F) -> Result<Self>
    where
        F: FnMut(ServerEvent) + Send + 'static,
    {
        Self::connect_with_heartbeat(url, HEARTBEAT_INTERVAL, on_message).await
    }

    /// Like [`Session::connect`] with a custom keep-alive period. The first
    /// ping goes out one full `heartbeat` after connecting.
    pub async fn connect_with_heartbeat<F>(
        url: &str,
        heartbeat: Duration,
        mut on_message: F,
    ) -> Result<Self>
    where
        F: FnMut(ServerEvent) + Send + 'static,
    {
        let (ws_stream, _) = connect_async(url).await?;
        info!("WebSocket connected to {url}");

        let (sink, mut read) = ws_stream.split();
        let sink = Arc::new(Mutex::new(sink));

        let heartbeat = tokio::spawn(keep_alive(sink.clone(), heartbeat));

        let reader = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if text.as_str() == PONG {
                            continue;
                        }
                        match serde_json::from_str::<ServerEvent>(&text) {
                            Ok(event) => on_message(event),
                            Err(e) => debug!("Skipping undecodable frame: {e}"),
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!("Server closed the WebSocket");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("WebSocket read failed: {e}");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            sink,
            heartbeat,
            reader,
        })
    }

    /// Whether the reader has stopped, i.e. the connection is gone.
    pub fn is_finished(&self) -> bool {
        self.reader.is_finished()
    }

    /// Send a close frame and stop both background tasks.
    pub async fn close(self) {
        self.heartbeat.abort();

        let mut sink = self.sink.lock().await;
        if let Err(e) = sink.close().await {
            debug!("Closing WebSocket failed: {e}");
        }
        drop(sink);

        self.reader.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.heartbeat.abort();
        self.reader.abort();
    }
}

async fn keep_alive(sink: Arc<Mutex<WsSink>>, period: Duration) {
    let mut ticker = time::interval_at(time::Instant::now() + period, period);

    loop {
        ticker.tick().await;

        let mut sink = sink.lock().await;
        if let Err(e) = sink.send(Message::Text(PING.to_string().into())).await {
            debug!("Keep-alive stopped: {e}");
            break;
        }
    }
}
