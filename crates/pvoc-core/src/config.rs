//! Processing configuration.

use crate::window::{Window, WindowKind};
use crate::{Error, Result};

/// Smallest frame size the radix-2 FFT path accepts.
pub const MIN_FRAME_SIZE: usize = 4;

/// Interpolation kernel used by the resampler in the pitch-shift pipeline.
///
/// - **Linear**: two taps, exact at integer positions (so a ratio of 1.0 is
///   lossless) and cheap. Acts as a weak low-pass; when shifting up, content
///   above `sample_rate / (2 * ratio)` folds back as aliasing.
/// - **Sinc**: band-limited windowed sinc. Suppresses aliasing and keeps the
///   top octave flat, at a few times the cost. Not exact at ratio 1.0 because
///   the anti-aliasing cutoff sits slightly below Nyquist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Interpolation {
    #[default]
    Linear,
    Sinc,
}

/// FFT size presets for time/frequency resolution trade-off
///
/// Larger frames resolve low notes better but smear transients:
///
/// - **Small (1024)**: speech, percussive material
/// - **Medium (2048)**: default, general music
/// - **Large (4096)**: sustained tonal material, large stretch factors
/// - **XLarge (8192)**: extreme stretching, pads and drones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum FftSize {
    /// 1024-point FFT
    Small = 1024,

    /// 2048-point FFT - Default
    #[default]
    Medium = 2048,

    /// 4096-point FFT
    Large = 4096,

    /// 8192-point FFT
    XLarge = 8192,
}

impl FftSize {
    /// Get the FFT size as usize
    pub fn size(&self) -> usize {
        *self as usize
    }

    /// Get the default hop size (FFT size / 4 = 75% overlap)
    pub fn hop_size(&self) -> usize {
        self.size() / 4
    }

    /// Width of one frequency bin in Hz at a given sample rate
    pub fn bin_width_hz(&self, sample_rate: f64) -> f64 {
        sample_rate / self.size() as f64
    }

    /// Time span of one frame in milliseconds at a given sample rate
    pub fn frame_ms(&self, sample_rate: f64) -> f64 {
        self.size() as f64 / sample_rate * 1000.0
    }
}

/// Configuration shared by the time-scale and pitch-shift pipelines.
///
/// The analysis hop is `frame_size / hop_divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct StretchConfig {
    /// Frame (FFT) size in samples. Power of two.
    pub frame_size: usize,

    /// Frames per analysis hop; 4 means 75% overlap.
    pub hop_divisor: usize,

    pub window: WindowKind,

    /// Resampler kernel for pitch shifting.
    pub interpolation: Interpolation,
}

impl StretchConfig {
    pub fn new() -> Self {
        Self {
            frame_size: FftSize::default().size(),
            hop_divisor: 4,
            window: WindowKind::Hann,
            interpolation: Interpolation::Linear,
        }
    }

    pub fn frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn fft_size(mut self, fft_size: FftSize) -> Self {
        self.frame_size = fft_size.size();
        self
    }

    pub fn hop_divisor(mut self, hop_divisor: usize) -> Self {
        self.hop_divisor = hop_divisor;
        self
    }

    pub fn window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Analysis hop Ha in samples (0 when `hop_divisor` is 0).
    pub fn analysis_hop(&self) -> usize {
        self.frame_size.checked_div(self.hop_divisor).unwrap_or(0)
    }

    /// Synthesis hop Hs for a time-scale factor: `round(Ha * factor)`, at least 1.
    pub fn synthesis_hop(&self, factor: f64) -> Result<usize> {
        validate_ratio(factor)?;
        let hop = (self.analysis_hop() as f64 * factor).round();
        Ok((hop as usize).max(1))
    }

    pub fn validate(&self) -> Result<()> {
        validate_frame_size(self.frame_size)?;

        let hop = self.analysis_hop();
        if hop == 0 {
            return Err(Error::InvalidHopSize {
                analysis: hop,
                synthesis: hop,
            });
        }

        // Unmodified resynthesis runs at Hs == Ha, so the analysis hop must
        // satisfy the overlap-add invariant as well.
        Window::new(self.window, self.frame_size)?.validate_overlap(hop)
    }
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame sizes must be radix-2 decomposable.
pub fn validate_frame_size(frame_size: usize) -> Result<()> {
    if frame_size < MIN_FRAME_SIZE || !frame_size.is_power_of_two() {
        return Err(Error::InvalidFrameSize(frame_size));
    }
    Ok(())
}

/// Time-scale factors and pitch ratios must be finite and strictly positive.
pub fn validate_ratio(ratio: f64) -> Result<()> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(Error::InvalidRatio(ratio));
    }
    Ok(())
}
