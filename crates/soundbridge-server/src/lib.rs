//! WebSocket audio relay server.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `registry` | Thread-safe set of live connections, add/remove/snapshot |
//! | `broadcast` | Frame fan-out to a registry snapshot, failures contained |
//! | `connection` | Per-connection lifecycle for both endpoint roles |
//! | `ncco` | Call-control document handed to the telephony provider |
//! | `server` | Config, axum router, startup |
//!
//! ## Data Flow
//!
//! A `/browser` connection names a sound resource → `soundbridge-audio`
//! opens and chunks it → `broadcast` pushes each frame to every connection
//! in the registry snapshot. A `/socket` connection only registers and
//! receives.

pub mod broadcast;
pub mod connection;
pub mod ncco;
pub mod registry;
pub mod server;

pub use broadcast::Broadcaster;
pub use registry::{Client, ClientId, ClientRegistry, Role};
pub use server::{build_router, start, AppState, ServerConfig, ServerHandle};
