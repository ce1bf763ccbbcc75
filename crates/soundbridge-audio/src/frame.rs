//! The fixed-size unit of audio the bridge broadcasts.

use bytes::Bytes;

/// Sample rate of everything the bridge carries.
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Samples per frame: 10 ms of audio at 16 kHz.
pub const SAMPLES_PER_FRAME: usize = 160;

/// Wire size of one frame: 160 samples, 2 bytes each.
pub const BYTES_PER_FRAME: usize = SAMPLES_PER_FRAME * 2;

/// One complete frame: exactly 160 little-endian `i16` samples (320 bytes).
///
/// Frames are immutable; a `clone` shares the underlying buffer, so handing
/// the same frame to many connections costs a refcount bump per connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Bytes,
}

impl Frame {
    /// Encode exactly [`SAMPLES_PER_FRAME`] samples in stream order.
    ///
    /// Panics on any other count. Callers normally go through
    /// [`crate::FrameChunker`], which guarantees it.
    pub fn from_samples(samples: &[i16]) -> Self {
        assert_eq!(
            samples.len(),
            SAMPLES_PER_FRAME,
            "a frame holds exactly {SAMPLES_PER_FRAME} samples"
        );
        let mut buf = Vec::with_capacity(BYTES_PER_FRAME);
        for s in samples {
            buf.extend_from_slice(&s.to_le_bytes());
        }
        Self {
            data: Bytes::from(buf),
        }
    }

    /// The frame's wire bytes, shared, not copied.
    pub fn payload(&self) -> Bytes {
        self.data.clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_320_bytes() {
        let samples = vec![0i16; SAMPLES_PER_FRAME];
        let frame = Frame::from_samples(&samples);
        assert_eq!(frame.len(), BYTES_PER_FRAME);
        assert_eq!(frame.len(), 320);
    }

    #[test]
    fn samples_encode_little_endian_in_order() {
        let mut samples = vec![0i16; SAMPLES_PER_FRAME];
        samples[0] = 0x0102;
        samples[1] = -1;
        samples[159] = 0x7FFF;
        let frame = Frame::from_samples(&samples);
        let bytes = frame.payload();
        assert_eq!(&bytes[0..2], &[0x02, 0x01]);
        assert_eq!(&bytes[2..4], &[0xFF, 0xFF]);
        assert_eq!(&bytes[318..320], &[0xFF, 0x7F]);
    }

    #[test]
    #[should_panic(expected = "exactly 160 samples")]
    fn wrong_sample_count_is_rejected() {
        let _ = Frame::from_samples(&[0i16; 10]);
    }

    #[test]
    fn clone_shares_payload() {
        let frame = Frame::from_samples(&vec![7i16; SAMPLES_PER_FRAME]);
        let a = frame.payload();
        let b = frame.clone().payload();
        assert_eq!(a, b);
        // Same backing buffer, not a copy.
        assert_eq!(a.as_ptr(), b.as_ptr());
    }
}
