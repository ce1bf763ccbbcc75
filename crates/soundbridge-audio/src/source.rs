//! Sample sources: where raw audio comes from.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::AudioError;

/// Lazily yields 16-bit samples from a WAV file.
///
/// Consumed once, front to back, no seeking. A decode error after a
/// successful open ends the stream early with a warning; playback that has
/// already started is cut short rather than aborted.
pub struct WavSource {
    name: String,
    samples: hound::WavIntoSamples<BufReader<File>, i16>,
    failed: bool,
}

impl WavSource {
    /// Open `path` and validate that it holds 16-bit integer PCM.
    pub fn open(name: &str, path: &Path) -> Result<Self, AudioError> {
        let reader = hound::WavReader::open(path).map_err(|e| match e {
            hound::Error::IoError(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                AudioError::ResourceNotFound(name.to_string())
            }
            other => AudioError::ResourceUnreadable {
                name: name.to_string(),
                reason: other.to_string(),
            },
        })?;

        let spec = reader.spec();
        if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
            return Err(AudioError::ResourceUnreadable {
                name: name.to_string(),
                reason: format!(
                    "expected 16-bit integer PCM, got {:?} at {} bits",
                    spec.sample_format, spec.bits_per_sample
                ),
            });
        }

        Ok(Self {
            name: name.to_string(),
            samples: reader.into_samples(),
            failed: false,
        })
    }
}

// The underlying hound reader has no Debug impl; show the parts that matter.
impl std::fmt::Debug for WavSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavSource")
            .field("name", &self.name)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl Iterator for WavSource {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.failed {
            return None;
        }
        match self.samples.next() {
            Some(Ok(sample)) => Some(sample),
            Some(Err(e)) => {
                warn!(resource = %self.name, error = %e, "decode error, ending stream early");
                self.failed = true;
                None
            }
            None => None,
        }
    }
}

/// Resolves resource names to WAV files under one library directory.
#[derive(Clone, Debug)]
pub struct SoundLibrary {
    dir: PathBuf,
}

impl SoundLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the named resource as a sample stream.
    ///
    /// Names are bare identifiers; anything that could walk out of the
    /// library directory is treated as not found.
    pub fn open(&self, name: &str) -> Result<WavSource, AudioError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(AudioError::ResourceNotFound(name.to_string()));
        }
        let path = self.dir.join(format!("{name}.wav"));
        WavSource::open(name, &path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
