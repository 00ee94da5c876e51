//! # pvoc - Phase-Vocoder Time Scaling and Pitch Shifting
//!
//! Change the duration of a recording without changing its pitch, or its
//! pitch without changing its duration.
//!
//! ## Architecture
//!
//! pvoc is an umbrella crate that coordinates:
//! - **pvoc-core** - Sample buffers, configuration, windowing, framing, STFT
//! - **pvoc-stretch** - Phase vocoder, overlap-add, resampling, pipelines
//!
//! ## Quick Start
//!
//! ```ignore
//! use pvoc::prelude::*;
//!
//! let input = SampleBuffer::new(samples, 44100);
//!
//! // One-off calls with the default configuration
//! let slower = pvoc::time_scale(&input, 1.5)?;
//! let higher = pvoc::pitch_shift(&input, semitones_to_ratio(4.0))?;
//!
//! // Reusable engine with a custom configuration
//! let vocoder = Vocoder::builder()
//!     .fft_size(FftSize::Large)
//!     .interpolation(Interpolation::Sinc)
//!     .build()?;
//! let out = vocoder.process(&input, 0.8, 1.25)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serialization` - serde derives on configuration types

/// Re-export of pvoc-core for direct access
pub use pvoc_core as core;

/// Re-export of pvoc-stretch for direct access
pub use pvoc_stretch as stretch;

pub use pvoc_core::{
    // Complex spectrum bins
    Complex64,

    // Error
    Error,
    // Configuration
    FftSize,
    Interpolation,
    Result,
    // Buffers
    SampleBuffer,
    SpectralFrame,
    Stft,
    StretchConfig,
    Window,
    WindowKind,
};

pub use pvoc_stretch::{
    cents_to_ratio, deinterleave, downmix_to_mono, interleave, ratio_to_semitones,
    semitones_to_ratio, TimeStretcher,
};

mod builder;
mod engine;

pub use builder::VocoderBuilder;
pub use engine::Vocoder;

/// Time-scale `buffer` by `factor` with the default configuration.
///
/// Builds a fresh [`Vocoder`]; keep one around when processing many buffers.
pub fn time_scale(buffer: &SampleBuffer, factor: f64) -> Result<SampleBuffer> {
    Vocoder::new()?.time_scale(buffer, factor)
}

/// Pitch-shift `buffer` by `ratio` with the default configuration.
pub fn pitch_shift(buffer: &SampleBuffer, ratio: f64) -> Result<SampleBuffer> {
    Vocoder::new()?.pitch_shift(buffer, ratio)
}

/// Pitch-shift by `ratio`, then time-scale by `factor`, with the default configuration.
pub fn process(buffer: &SampleBuffer, factor: f64, ratio: f64) -> Result<SampleBuffer> {
    Vocoder::new()?.process(buffer, factor, ratio)
}

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{Vocoder, VocoderBuilder};

    // Essential types
    pub use crate::core::{
        Error, FftSize, Interpolation, Result, SampleBuffer, StretchConfig, WindowKind,
    };

    // Ratio helpers
    pub use crate::stretch::{cents_to_ratio, ratio_to_semitones, semitones_to_ratio};
}
