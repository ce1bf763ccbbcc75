//! Grouping a raw sample stream into fixed-size frames.

use crate::frame::{Frame, SAMPLES_PER_FRAME};

/// Lazy adapter that groups any sample stream into exact 160-sample frames.
///
/// Samples are pulled from the underlying stream only as frames are
/// requested. A frame is emitted only once 160 samples have accumulated; a
/// trailing group of fewer than 160 samples at end-of-stream is discarded,
/// never padded or emitted short.
pub struct FrameChunker<S> {
    samples: S,
    buf: Vec<i16>,
}

impl<S> FrameChunker<S>
where
    S: Iterator<Item = i16>,
{
    pub fn new(samples: S) -> Self {
        Self {
            samples,
            buf: Vec::with_capacity(SAMPLES_PER_FRAME),
        }
    }
}

impl<S> Iterator for FrameChunker<S>
where
    S: Iterator<Item = i16>,
{
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        while self.buf.len() < SAMPLES_PER_FRAME {
            match self.samples.next() {
                Some(sample) => self.buf.push(sample),
                // Trailing partial group: dropped, never padded.
                None => return None,
            }
        }
        let frame = Frame::from_samples(&self.buf);
        self.buf.clear();
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::BYTES_PER_FRAME;

    fn frames_for(sample_count: usize) -> Vec<Frame> {
        let samples = (0..sample_count).map(|i| i as i16);
        FrameChunker::new(samples).collect()
    }

    #[test]
    fn empty_stream_yields_no_frames() {
        assert_eq!(frames_for(0).len(), 0);
    }

    #[test]
    fn short_stream_yields_no_frames() {
        assert_eq!(frames_for(159).len(), 0);
    }

    #[test]
    fn exact_frame_boundary() {
        let frames = frames_for(160);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), BYTES_PER_FRAME);
    }

    #[test]
    fn extra_sample_is_dropped_not_padded() {
        assert_eq!(frames_for(161).len(), 1);
    }

    #[test]
    fn two_full_frames() {
        assert_eq!(frames_for(320).len(), 2);
    }

    #[test]
    fn frames_preserve_stream_order() {
        let frames = frames_for(320);
        // Sample 0 opens frame 0; sample 160 opens frame 1.
        assert_eq!(&frames[0].payload()[0..2], &0i16.to_le_bytes());
        assert_eq!(&frames[1].payload()[0..2], &160i16.to_le_bytes());
        assert_eq!(&frames[1].payload()[318..320], &319i16.to_le_bytes());
    }

    #[test]
    fn chunker_is_lazy() {
        let mut pulled = 0usize;
        let samples = (0..1000i16).inspect(|_| pulled += 1);
        let mut chunker = FrameChunker::new(samples);
        let _ = chunker.next();
        // One frame's worth pulled, no more.
        drop(chunker);
        assert_eq!(pulled, SAMPLES_PER_FRAME);
    }
}
