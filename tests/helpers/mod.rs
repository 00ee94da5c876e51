//! Test helpers and fixtures for pvoc integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `IDENTITY_RMS_ERROR` (1e-3): unit factors must reproduce the input
//! - `MIN_CORRELATION` (0.99): round trips of a sinusoid
//! - `FREQUENCY_TOLERANCE_HZ` (5.0): spectral peak placement

#![allow(dead_code)]

pub mod tolerances;

use pvoc::prelude::*;
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

/// Default test sample rate (CD rate, as the reference recordings use)
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Smallest FFT length used for peak estimation (~2.7 Hz bins at 44.1 kHz).
const MIN_PEAK_FFT: usize = 16384;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs. Run with
/// `--nocapture` to see pipeline parameters.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Sine wave at half scale, wrapped in a buffer.
pub fn sine_buffer(frequency: f64, num_samples: usize) -> SampleBuffer {
    let samples = generate_sine(frequency, TEST_SAMPLE_RATE, num_samples)
        .into_iter()
        .map(|s| s * 0.5)
        .collect();
    SampleBuffer::new(samples, TEST_SAMPLE_RATE)
}

/// Two-partial test tone (fundamental plus a quieter fifth).
pub fn chord_buffer(fundamental: f64, num_samples: usize) -> SampleBuffer {
    let root = generate_sine(fundamental, TEST_SAMPLE_RATE, num_samples);
    let fifth = generate_sine(fundamental * 1.5, TEST_SAMPLE_RATE, num_samples);
    let samples = root
        .iter()
        .zip(&fifth)
        .map(|(a, b)| 0.4 * a + 0.2 * b)
        .collect();
    SampleBuffer::new(samples, TEST_SAMPLE_RATE)
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// RMS of the sample-wise difference. Signals must be equally long.
pub fn rms_error(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "rms_error on signals of different length");
    if a.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| ((x - y) as f64).powi(2))
        .sum();
    (sum_sq / a.len() as f64).sqrt() as f32
}

/// Normalized cross-correlation at lag zero, in [-1, 1].
pub fn correlation(a: &[f32], b: &[f32]) -> f64 {
    let (mut ab, mut aa, mut bb) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        ab += x * y;
        aa += x * x;
        bb += y * y;
    }
    if aa == 0.0 || bb == 0.0 {
        return 0.0;
    }
    ab / (aa * bb).sqrt()
}

/// Frequency of the strongest spectral peak, in Hz.
///
/// Hann-windows the signal, zero-pads it to at least 16384 points and refines
/// the peak bin with parabolic interpolation on log magnitudes.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32) -> f64 {
    let len = samples.len();
    assert!(len > 1, "need at least two samples");

    let n = (len * 2).next_power_of_two().max(MIN_PEAK_FFT);
    let mut buffer = vec![Complex64::new(0.0, 0.0); n];
    for (i, &s) in samples.iter().enumerate() {
        let w = 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (len - 1) as f64).cos();
        buffer[i] = Complex64::new(s as f64 * w, 0.0);
    }

    FftPlanner::new().plan_fft_forward(n).process(&mut buffer);

    let magnitudes: Vec<f64> = buffer[..n / 2].iter().map(|c| c.norm()).collect();
    let peak = (1..magnitudes.len() - 1)
        .max_by(|&a, &b| magnitudes[a].total_cmp(&magnitudes[b]))
        .unwrap_or(1);

    let (a, b, c) = (
        magnitudes[peak - 1].max(f64::MIN_POSITIVE).ln(),
        magnitudes[peak].max(f64::MIN_POSITIVE).ln(),
        magnitudes[peak + 1].max(f64::MIN_POSITIVE).ln(),
    );
    let denom = a - 2.0 * b + c;
    let offset = if denom.abs() > 1e-12 {
        0.5 * (a - c) / denom
    } else {
        0.0
    };

    (peak as f64 + offset) * sample_rate as f64 / n as f64
}

/// Middle half of a signal, away from the edge frames.
pub fn middle(samples: &[f32]) -> &[f32] {
    let quarter = samples.len() / 4;
    &samples[quarter..samples.len() - quarter]
}

/// Assert that the strongest partial of `samples` sits within `tolerance` Hz of `expected`.
pub fn assert_frequency(samples: &[f32], expected: f64, tolerance: f64, context: &str) {
    let found = dominant_frequency(samples, TEST_SAMPLE_RATE);
    assert!(
        (found - expected).abs() <= tolerance,
        "{}: expected peak at {:.2} Hz (+/- {}), found {:.2} Hz",
        context,
        expected,
        tolerance,
        found
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sine() {
        let samples = generate_sine(440.0, 44100, 44100);
        assert_eq!(samples.len(), 44100);
        // Full-scale sine wave has RMS of ~0.707
        assert!((rms(&samples) - 0.707).abs() < 0.01);
    }

    #[test]
    fn test_dominant_frequency() {
        let samples = generate_sine(440.0, 44100, 8192);
        assert!((dominant_frequency(&samples, 44100) - 440.0).abs() < 1.0);
    }

    #[test]
    fn test_correlation() {
        let a = generate_sine(440.0, 44100, 4410);
        let inverted: Vec<f32> = a.iter().map(|s| -s).collect();
        assert!((correlation(&a, &a) - 1.0).abs() < 1e-9);
        assert!((correlation(&a, &inverted) + 1.0).abs() < 1e-9);
    }
}
