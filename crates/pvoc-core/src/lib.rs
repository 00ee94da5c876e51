//! # pvoc-core
//!
//! Building blocks shared by the pvoc pipelines:
//! - **[`SampleBuffer`]**: mono `f32` samples plus sample rate
//! - **[`StretchConfig`]**: frame size, hop divisor, window, resampler kernel
//! - **[`Window`]**: Hann weights and the overlap-add invariant check
//! - **[`Frames`]**: centered, zero-padded framing
//! - **[`Stft`]**: forward/inverse STFT on `rustfft`, parallel analysis on `rayon`
//!
//! All operations work on in-memory buffers and report failures through
//! [`Error`]. Nothing here prints; diagnostics go through `tracing` at
//! trace level and are dropped unless the caller installs a subscriber.

pub mod buffer;
pub mod config;
pub mod error;
pub mod framing;
pub mod transform;
pub mod window;

pub use buffer::SampleBuffer;
pub use config::{validate_frame_size, validate_ratio, FftSize, Interpolation, StretchConfig};
pub use error::{Error, Result};
pub use framing::{frame_count, Frame, Frames};
pub use transform::{SpectralFrame, Stft, Workspace};
pub use window::{Window, WindowKind, MIN_OVERLAP_GAIN};

pub use rustfft::num_complex::Complex64;
