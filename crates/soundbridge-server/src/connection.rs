//! Per-connection lifecycle for both endpoint roles.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use soundbridge_audio::FrameChunker;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::registry::{Client, Role};
use crate::server::AppState;

/// Reply sent to a streamer when a playback request fails.
#[derive(Debug, Serialize)]
struct ErrorReply<'a> {
    error: &'a str,
}

/// Own one accepted connection for its whole life: register it, run its
/// role's read loop, and always deregister on the way out.
///
/// The read loop is a genuine blocking await on the socket; an idle
/// connection consumes no CPU. Whichever side finishes first (peer close,
/// read error, writer failure) tears the connection down, and removal from
/// the registry is unconditional.
pub async fn serve(socket: WebSocket, role: Role, state: AppState) {
    let (client, rx) = Client::new(role, state.config.max_send_queue);
    state.registry.add(Arc::clone(&client)).await;
    info!(client_id = %client.id, role = role.label(), "connected");

    let (ws_tx, ws_rx) = socket.split();
    let mut writer = tokio::spawn(write_outbound(ws_tx, rx));

    let reader = async {
        match role {
            Role::Listener => listen_until_closed(ws_rx).await,
            Role::Streamer => run_streamer(ws_rx, &client, &state).await,
        }
    };

    tokio::select! {
        _ = &mut writer => {}
        () = reader => {
            writer.abort();
        }
    }

    state.registry.remove(&client.id).await;
    info!(client_id = %client.id, role = role.label(), "disconnected");
}

/// Writer task: pump the client's outbound queue into the socket sink.
async fn write_outbound(mut ws_tx: SplitSink<WebSocket, Message>, mut rx: mpsc::Receiver<Message>) {
    while let Some(msg) = rx.recv().await {
        if ws_tx.send(msg).await.is_err() {
            break;
        }
    }
}

/// A listener performs no protocol activity of its own; it parks on the
/// read side until the peer closes or the read fails.
async fn listen_until_closed(mut ws_rx: SplitStream<WebSocket>) {
    while let Some(Ok(msg)) = ws_rx.next().await {
        if matches!(msg, Message::Close(_)) {
            break;
        }
    }
}

/// A streamer alternates between awaiting a command and streaming the named
/// resource. One connection may drive any number of sequential playbacks.
async fn run_streamer(mut ws_rx: SplitStream<WebSocket>, client: &Arc<Client>, state: &AppState) {
    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(text) => {
                let name = text.trim();
                if name.is_empty() {
                    continue;
                }
                play(name, client, state).await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

/// Stream one named resource: open it, chunk it, broadcast every frame in
/// production order. A failure to open is reported to the requesting
/// connection only; the connection then goes back to awaiting commands.
async fn play(name: &str, client: &Arc<Client>, state: &AppState) {
    let source = match state.library.open(name) {
        Ok(source) => source,
        Err(e) => {
            warn!(client_id = %client.id, resource = name, error = %e, "playback request failed");
            send_error(client, &e.to_string());
            return;
        }
    };

    info!(client_id = %client.id, resource = name, "streaming");
    let mut frames = 0usize;
    for frame in FrameChunker::new(source) {
        let _ = state.broadcaster.broadcast(&frame, Some(&client.id)).await;
        frames += 1;
    }
    debug!(client_id = %client.id, resource = name, frames, "stream complete");
}

fn send_error(client: &Client, message: &str) {
    let reply = ErrorReply { error: message };
    if let Ok(json) = serde_json::to_string(&reply) {
        if !client.send(Message::Text(json.into())) {
            warn!(client_id = %client.id, "error reply dropped");
        }
    }
}
