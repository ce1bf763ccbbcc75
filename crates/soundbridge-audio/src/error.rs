//! Errors surfaced to the connection that requested a resource.

/// Failures opening or reading a sound resource.
///
/// These are values, not aborts: they travel back to the requesting
/// connection's handler and never touch other connections.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// Named sound resource does not exist in the library.
    #[error("sound not found: {0}")]
    ResourceNotFound(String),

    /// Resource exists but could not be opened or decoded.
    #[error("sound unreadable: {name}: {reason}")]
    ResourceUnreadable { name: String, reason: String },

    /// I/O error outside the two cases above.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_resource_name() {
        let e = AudioError::ResourceNotFound("airhorn".into());
        assert_eq!(e.to_string(), "sound not found: airhorn");

        let e = AudioError::ResourceUnreadable {
            name: "chime".into(),
            reason: "bad header".into(),
        };
        assert!(e.to_string().contains("chime"));
        assert!(e.to_string().contains("bad header"));
    }
}
