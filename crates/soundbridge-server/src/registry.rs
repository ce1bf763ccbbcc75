//! Thread-safe set of live connections.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Unique connection identifier. Ordered, so snapshots come out in a stable,
/// deterministic sequence.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new() -> Self {
        Self(format!("conn_{}", Uuid::now_v7()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which endpoint established the connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Receives broadcast frames and performs no protocol activity of its
    /// own (a forwarded call leg).
    Listener,
    /// Drives playback by naming resources; registered like any listener.
    Streamer,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Listener => "listener",
            Role::Streamer => "streamer",
        }
    }
}

/// One registered connection: its identity, role, and the outbound queue
/// feeding its writer task.
pub struct Client {
    pub id: ClientId,
    pub role: Role,
    tx: mpsc::Sender<Message>,
}

impl Client {
    /// Create a client with a bounded outbound queue. The receiver end goes
    /// to the connection's writer task.
    pub fn new(role: Role, queue: usize) -> (Arc<Self>, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(queue);
        let client = Arc::new(Self {
            id: ClientId::new(),
            role,
            tx,
        });
        (client, rx)
    }

    /// Enqueue one outbound message without waiting. Returns `false` if the
    /// queue is full or the connection's writer is gone.
    pub fn send(&self, msg: Message) -> bool {
        self.tx.try_send(msg).is_ok()
    }
}

/// The set of currently connected clients.
///
/// Snapshots take the shared lock and may run concurrently; add/remove take
/// the exclusive lock briefly. Removal deletes the entry outright, so a gone
/// connection can never reappear in a later snapshot.
pub struct ClientRegistry {
    clients: RwLock<BTreeMap<ClientId, Arc<Client>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(BTreeMap::new()),
        }
    }

    /// Add a connection. Adding the same identity twice keeps one entry.
    pub async fn add(&self, client: Arc<Client>) {
        let mut clients = self.clients.write().await;
        let _ = clients.insert(client.id.clone(), client);
    }

    /// Remove a connection by id. Unknown ids are a no-op.
    pub async fn remove(&self, id: &ClientId) {
        let mut clients = self.clients.write().await;
        let _ = clients.remove(id);
    }

    /// Point-in-time view of the active set, in id order.
    pub async fn snapshot(&self) -> Vec<Arc<Client>> {
        let clients = self.clients.read().await;
        clients.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
