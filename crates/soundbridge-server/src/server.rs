//! Configuration, router, and startup.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use soundbridge_audio::SoundLibrary;
use tower_http::cors::CorsLayer;

use crate::broadcast::Broadcaster;
use crate::connection;
use crate::ncco;
use crate::registry::{ClientRegistry, Role};

/// Server configuration, constructed once at startup and injected into
/// whatever needs it. No ambient globals.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on; 0 picks a free port.
    pub port: u16,
    /// Host:port advertised to the telephony provider in the NCCO document.
    pub public_host: String,
    /// Caller id placed on the outbound leg; empty means withheld.
    pub cli: String,
    /// Directory holding the WAV sound library.
    pub audio_dir: PathBuf,
    /// Outbound queue depth per connection.
    pub max_send_queue: usize,
    /// Whether a streamer hears its own broadcast.
    pub echo_to_origin: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            public_host: "localhost:8080".into(),
            cli: String::new(),
            audio_dir: PathBuf::from("audio"),
            max_send_queue: 256,
            echo_to_origin: false,
        }
    }
}

/// Shared application state passed to axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub registry: Arc<ClientRegistry>,
    pub broadcaster: Arc<Broadcaster>,
    pub library: Arc<SoundLibrary>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(ClientRegistry::new());
        let broadcaster = Arc::new(Broadcaster::new(
            Arc::clone(&registry),
            config.echo_to_origin,
        ));
        let library = Arc::new(SoundLibrary::new(config.audio_dir.clone()));
        Self {
            config: Arc::new(config),
            registry,
            broadcaster,
            library,
        }
    }
}

/// Build the axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/ncco", get(ncco_handler))
        .route("/event", get(event_handler).post(event_handler))
        .route("/socket", get(socket_handler))
        .route("/browser", get(browser_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind and start serving. Returns a handle carrying the bound port.
pub async fn start(config: ServerConfig) -> Result<ServerHandle, std::io::Error> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(port = local_addr.port(), "soundbridge server started");

    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server,
    })
}

/// Handle returned by [`start`] — keeps the server task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}

/// Upgrade to a listener connection (a forwarded call leg).
async fn socket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| connection::serve(socket, Role::Listener, state))
}

/// Upgrade to a streamer connection (the browser soundboard).
async fn browser_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| connection::serve(socket, Role::Streamer, state))
}

async fn ncco_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(ncco::answer_ncco(&state.config))
}

/// Acknowledgement no-op for provider call events.
async fn event_handler() -> &'static str {
    "ok"
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_service_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert!(!config.echo_to_origin);
        assert_eq!(config.audio_dir, PathBuf::from("audio"));
    }

    #[test]
    fn build_router_creates_routes() {
        let state = AppState::new(ServerConfig::default());
        let _router = build_router(state);
    }

    #[tokio::test]
    async fn server_starts_on_random_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            ..Default::default()
        };
        let handle = start(config).await.unwrap();
        assert!(handle.port > 0);
    }
}
