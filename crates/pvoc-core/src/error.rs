//! Error types for pvoc-core.

use thiserror::Error;

/// Error type for pvoc operations.
///
/// Every failure is reported synchronously to the caller. Nothing is retried
/// and nothing is logged as an error; the caller decides whether to abort or
/// fall back to defaults.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Zero-length sample buffer.
    #[error("Empty input: the sample buffer contains no samples")]
    EmptyInput,

    /// Frame size that the FFT cannot handle (zero, too small, or not a power of two).
    #[error("Invalid frame size: {0}. Must be a power of two >= 4")]
    InvalidFrameSize(usize),

    #[error("Invalid hop size: analysis={analysis}, synthesis={synthesis}. Must be non-zero")]
    InvalidHopSize { analysis: usize, synthesis: usize },

    /// Time-scale factor or pitch ratio that is not a positive finite number.
    #[error("Invalid ratio: {0}. Must be finite and > 0")]
    InvalidRatio(f64),

    #[error("Invalid sample rate: {0}. Must be > 0 Hz")]
    InvalidSampleRate(u32),

    /// NaN or infinity in the input, or in an intermediate spectrum.
    ///
    /// `index` is the sample index for input buffers and the frame index
    /// for spectra.
    #[error("Non-finite value at index {index}")]
    NonFiniteSample { index: usize },

    /// The window's squared overlap-sum drops to (near) zero at this hop.
    #[error(
        "Window overlap invalid: hop {hop} with frame size {frame_size} leaves gaps in the overlap-add envelope"
    )]
    WindowOverlapInvalid { hop: usize, frame_size: usize },

    #[error("Channel mismatch: {0}")]
    ChannelMismatch(String),

    #[error("Resampling error: {0}")]
    Resample(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
