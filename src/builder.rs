//! Builder for configuring and constructing a `Vocoder`.

use crate::{FftSize, Interpolation, Result, StretchConfig, Vocoder, WindowKind};

/// Every setting starts from [`StretchConfig::default`] (2048-sample Hann
/// frames, quarter-frame hop, linear resampling). Nothing is checked until
/// [`build`](Self::build), which validates the whole configuration at once.
///
/// # Example
///
/// ```ignore
/// use pvoc::prelude::*;
///
/// let vocoder = Vocoder::builder()
///     .fft_size(FftSize::Large)
///     .hop_divisor(8)
///     .interpolation(Interpolation::Sinc)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct VocoderBuilder {
    config: StretchConfig,
}

impl VocoderBuilder {
    /// Must be a power of two, at least 4. Default: 2048
    pub fn frame_size(mut self, frame_size: usize) -> Self {
        self.config = self.config.frame_size(frame_size);
        self
    }

    /// Frame size from a preset.
    pub fn fft_size(mut self, fft_size: FftSize) -> Self {
        self.config = self.config.fft_size(fft_size);
        self
    }

    /// Analysis hop = frame size / divisor. Default: 4
    pub fn hop_divisor(mut self, hop_divisor: usize) -> Self {
        self.config = self.config.hop_divisor(hop_divisor);
        self
    }

    pub fn window(mut self, window: WindowKind) -> Self {
        self.config = self.config.window(window);
        self
    }

    /// Resampling kernel used by pitch shifting. Default: linear
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.config = self.config.interpolation(interpolation);
        self
    }

    /// Replace every setting with `config`.
    pub fn config(mut self, config: StretchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Vocoder> {
        Vocoder::with_config(self.config)
    }
}
