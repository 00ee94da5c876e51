//! Forward and inverse short-time Fourier transform.
//!
//! ## Algorithm Overview
//!
//! 1. **Forward**: window a frame, complex FFT, keep bins `0..=N/2`
//! 2. **Inverse**: mirror bins by conjugate symmetry, inverse FFT, scale by `1/N`
//!
//! Forward then inverse with no modification returns the windowed frame.
//! Undoing the window taper is the overlap-add stage's job.
//!
//! FFT plans are created once per frame size and shared across worker
//! threads; per-thread buffers live in a [`Workspace`].

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};

use crate::config::validate_frame_size;
use crate::framing::{frame_count, Frames};
use crate::window::{Window, WindowKind};
use crate::{Error, Result};

/// Half spectrum of one frame: `N/2 + 1` bins of a real-input DFT.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    /// Hop index of the analysis frame this spectrum came from.
    pub index: usize,
    bins: Box<[Complex64]>,
}

impl SpectralFrame {
    pub fn new(index: usize, bins: Box<[Complex64]>) -> Self {
        Self { index, bins }
    }

    /// Build a frame from per-bin magnitudes and phases.
    pub fn from_polar(index: usize, magnitudes: &[f64], phases: &[f64]) -> Self {
        let bins = magnitudes
            .iter()
            .zip(phases)
            .map(|(&m, &p)| Complex64::from_polar(m, p))
            .collect();
        Self { index, bins }
    }

    #[inline]
    pub fn bins(&self) -> &[Complex64] {
        &self.bins
    }

    #[inline]
    pub fn bins_mut(&mut self) -> &mut [Complex64] {
        &mut self.bins
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[inline]
    pub fn magnitude(&self, bin: usize) -> f64 {
        self.bins[bin].norm()
    }

    #[inline]
    pub fn phase(&self, bin: usize) -> f64 {
        self.bins[bin].arg()
    }

    pub fn is_finite(&self) -> bool {
        self.bins.iter().all(|c| c.re.is_finite() && c.im.is_finite())
    }
}

/// Per-thread FFT buffers, reused across frames.
#[derive(Debug, Clone)]
pub struct Workspace {
    buffer: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

/// Forward/inverse STFT for one frame size and window.
#[derive(Clone)]
pub struct Stft {
    frame_size: usize,
    window: Window,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for Stft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stft")
            .field("frame_size", &self.frame_size)
            .field("window", &self.window.kind())
            .finish_non_exhaustive()
    }
}

impl Stft {
    /// Plan transforms for `frame_size` (power of two, at least 4).
    pub fn new(window: WindowKind, frame_size: usize) -> Result<Self> {
        validate_frame_size(frame_size)?;

        let mut planner = FftPlanner::<f64>::new();
        Ok(Self {
            frame_size,
            window: Window::new(window, frame_size)?,
            forward: planner.plan_fft_forward(frame_size),
            inverse: planner.plan_fft_inverse(frame_size),
        })
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn workspace(&self) -> Workspace {
        let scratch_len = self
            .forward
            .get_inplace_scratch_len()
            .max(self.inverse.get_inplace_scratch_len());
        Workspace {
            buffer: vec![Complex64::new(0.0, 0.0); self.frame_size],
            scratch: vec![Complex64::new(0.0, 0.0); scratch_len],
        }
    }

    /// Window `frame` and transform it.
    pub fn forward(&self, frame: &[f64], index: usize) -> SpectralFrame {
        let mut work = self.workspace();
        self.forward_with(frame, index, &mut work)
    }

    /// Like [`forward`](Self::forward), reusing `work` instead of allocating FFT buffers.
    pub fn forward_with(&self, frame: &[f64], index: usize, work: &mut Workspace) -> SpectralFrame {
        debug_assert_eq!(frame.len(), self.frame_size);

        for ((slot, &sample), &w) in work
            .buffer
            .iter_mut()
            .zip(frame)
            .zip(self.window.weights())
        {
            *slot = Complex64::new(sample * w, 0.0);
        }

        self.forward
            .process_with_scratch(&mut work.buffer, &mut work.scratch);

        SpectralFrame::new(index, work.buffer[..self.num_bins()].into())
    }

    /// Inverse-transform `frame` into `out` (`frame_size` real samples).
    ///
    /// No window is applied here.
    pub fn inverse_with(&self, frame: &SpectralFrame, out: &mut [f64], work: &mut Workspace) {
        debug_assert_eq!(frame.len(), self.num_bins());
        debug_assert_eq!(out.len(), self.frame_size);

        let n = self.frame_size;
        let bins = frame.bins();
        work.buffer[..bins.len()].copy_from_slice(bins);
        for k in 1..n / 2 {
            work.buffer[n - k] = bins[k].conj();
        }

        self.inverse
            .process_with_scratch(&mut work.buffer, &mut work.scratch);

        let scale = 1.0 / n as f64;
        for (sample, c) in out.iter_mut().zip(&work.buffer) {
            *sample = c.re * scale;
        }
    }

    pub fn inverse(&self, frame: &SpectralFrame) -> Vec<f64> {
        let mut work = self.workspace();
        let mut out = vec![0.0; self.frame_size];
        self.inverse_with(frame, &mut out, &mut work);
        out
    }

    /// Forward transform of every centered frame of `samples` at `hop`.
    ///
    /// Frames are independent, so they are transformed in parallel; the
    /// result is in hop order.
    pub fn analyze(&self, samples: &[f32], hop: usize) -> Result<Vec<SpectralFrame>> {
        let frames = Frames::new(samples, self.frame_size, hop)?;
        let count = frame_count(samples.len(), hop);

        let spectra: Vec<SpectralFrame> = (0..count)
            .into_par_iter()
            .map_init(
                || (vec![0.0; self.frame_size], self.workspace()),
                |(frame, work), index| {
                    frames.fill(index, frame);
                    self.forward_with(frame, index, work)
                },
            )
            .collect();

        if let Some(bad) = spectra.iter().find(|s| !s.is_finite()) {
            return Err(Error::NonFiniteSample { index: bad.index });
        }

        tracing::trace!(
            frames = spectra.len(),
            frame_size = self.frame_size,
            hop,
            "STFT analysis complete"
        );
        Ok(spectra)
    }
}
