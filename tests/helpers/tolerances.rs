//! Tolerance constants for vocoder testing.
//!
//! Time scaling is not sample-exact for factors other than 1.0, so most
//! checks compare durations and spectral peaks rather than waveforms.

/// Floating point rounding errors (for passthrough).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Unit factors must reproduce the input to within this RMS error.
pub const IDENTITY_RMS_ERROR: f32 = 1e-3;

/// Minimum normalized cross-correlation for an unmodified round trip.
pub const MIN_CORRELATION: f64 = 0.99;

/// Allowed error of a spectral peak, in Hz.
/// A 2048-point frame at 44.1 kHz has 21.5 Hz bins; phase-vocoder frequency
/// estimates land well inside one bin for stationary tones.
pub const FREQUENCY_TOLERANCE_HZ: f64 = 5.0;
