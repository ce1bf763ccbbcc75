//! Frame fan-out to the current listener set.

use std::sync::Arc;

use axum::extract::ws::Message;
use soundbridge_audio::Frame;
use tracing::{debug, warn};

use crate::registry::{ClientId, ClientRegistry};

/// Pushes completed frames to every connection in a registry snapshot.
pub struct Broadcaster {
    registry: Arc<ClientRegistry>,
    echo_to_origin: bool,
}

impl Broadcaster {
    pub fn new(registry: Arc<ClientRegistry>, echo_to_origin: bool) -> Self {
        Self {
            registry,
            echo_to_origin,
        }
    }

    /// Send one frame, as a single binary message, to every connection in
    /// the snapshot taken at the moment of the call.
    ///
    /// Per-connection failures (queue full, writer gone) are logged and
    /// skipped; the failing connection's own lifecycle handler removes it
    /// when its read side dies. Nothing here is an error to the caller.
    ///
    /// With echo disabled, the originating connection is skipped so a
    /// streamer does not hear itself.
    ///
    /// Returns the number of connections the frame was queued to.
    pub async fn broadcast(&self, frame: &Frame, origin: Option<&ClientId>) -> usize {
        let snapshot = self.registry.snapshot().await;
        let mut delivered = 0usize;

        for client in &snapshot {
            if !self.echo_to_origin && origin == Some(&client.id) {
                continue;
            }
            if client.send(Message::Binary(frame.payload())) {
                delivered += 1;
            } else {
                warn!(client_id = %client.id, "frame send failed, skipping connection");
            }
        }

        debug!(delivered, snapshot = snapshot.len(), "broadcast frame");
        delivered
    }
}
