//! Audio framing for the relay bridge.
//!
//! # Pipeline
//!
//! ```text
//! resource name → SoundLibrary lookup → WavSource (lazy i16 samples)
//! → FrameChunker (groups of exactly 160) → Frame (320 bytes, LE)
//! ```
//!
//! Everything here is synchronous and allocation-light: a sample stream is
//! any finite `Iterator<Item = i16>`, consumed once, front to back. The
//! server crate pulls frames from the chunker and fans them out.
//!
//! ## Crate Position
//!
//! Standalone (no other soundbridge crates).
//! Depended on by: soundbridge-server.

pub mod chunker;
pub mod error;
pub mod frame;
pub mod source;

pub use chunker::FrameChunker;
pub use error::AudioError;
pub use frame::{Frame, BYTES_PER_FRAME, SAMPLES_PER_FRAME, SAMPLE_RATE_HZ};
pub use source::{SoundLibrary, WavSource};
