//! Slicing a sample buffer into overlapping, centered frames.
//!
//! Frame `t` covers samples `[t * hop - N/2, t * hop + N/2)`. Positions outside
//! the buffer read as zero, so the first sample sits at the center of frame 0
//! and the tail is zero-padded instead of dropped.

use crate::config::validate_frame_size;
use crate::{Error, Result};

/// One frame of raw (unwindowed) samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Hop index of this frame.
    pub index: usize,
    pub samples: Vec<f64>,
}

/// Number of centered frames needed to cover `len` samples at `hop`.
#[inline]
pub fn frame_count(len: usize, hop: usize) -> usize {
    if len == 0 || hop == 0 {
        return 0;
    }
    len.div_ceil(hop) + 1
}

/// Lazy, restartable sequence of frames over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    samples: &'a [f32],
    frame_size: usize,
    hop: usize,
    next: usize,
    count: usize,
}

impl<'a> Frames<'a> {
    pub fn new(samples: &'a [f32], frame_size: usize, hop: usize) -> Result<Self> {
        validate_frame_size(frame_size)?;
        if hop == 0 {
            return Err(Error::InvalidHopSize {
                analysis: hop,
                synthesis: hop,
            });
        }
        if samples.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            samples,
            frame_size,
            hop,
            next: 0,
            count: frame_count(samples.len(), hop),
        })
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Total number of frames, independent of iteration progress.
    #[inline]
    pub fn count_total(&self) -> usize {
        self.count
    }

    /// Start from the first frame again.
    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Write frame `index` into `out` without allocating.
    ///
    /// `out` must be `frame_size` long.
    pub fn fill(&self, index: usize, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.frame_size);
        let start = (index * self.hop) as isize - (self.frame_size / 2) as isize;
        for (i, slot) in out.iter_mut().enumerate() {
            let pos = start + i as isize;
            *slot = if pos >= 0 && (pos as usize) < self.samples.len() {
                self.samples[pos as usize] as f64
            } else {
                0.0
            };
        }
    }
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let mut samples = vec![0.0; self.frame_size];
        self.fill(index, &mut samples);
        Some(Frame { index, samples })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
