//! Error reporting through the public API
//!
//! Run with:
//! ```bash
//! cargo test -p pvoc --test error_tests
//! ```

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{sine_buffer, TEST_SAMPLE_RATE};
use pvoc::prelude::*;

#[test]
fn test_empty_input() {
    let empty = SampleBuffer::new(Vec::new(), TEST_SAMPLE_RATE);

    assert_eq!(pvoc::time_scale(&empty, 1.5).unwrap_err(), Error::EmptyInput);
    assert_eq!(pvoc::pitch_shift(&empty, 1.5).unwrap_err(), Error::EmptyInput);
    assert_eq!(pvoc::process(&empty, 1.5, 0.8).unwrap_err(), Error::EmptyInput);
}

#[test]
fn test_invalid_factors() {
    let input = sine_buffer(440.0, 4096);

    for bad in [0.0, -1.0, -0.5] {
        assert_eq!(
            pvoc::time_scale(&input, bad).unwrap_err(),
            Error::InvalidRatio(bad)
        );
        assert_eq!(
            pvoc::pitch_shift(&input, bad).unwrap_err(),
            Error::InvalidRatio(bad)
        );
    }

    assert!(matches!(
        pvoc::time_scale(&input, f64::INFINITY),
        Err(Error::InvalidRatio(_))
    ));
    assert!(matches!(
        pvoc::pitch_shift(&input, f64::NAN),
        Err(Error::InvalidRatio(_))
    ));
}

#[test]
fn test_invalid_frame_size() {
    assert_eq!(
        Vocoder::builder().frame_size(0).build().unwrap_err(),
        Error::InvalidFrameSize(0)
    );
    assert_eq!(
        Vocoder::builder().frame_size(3000).build().unwrap_err(),
        Error::InvalidFrameSize(3000)
    );
    assert_eq!(
        Vocoder::builder().frame_size(2).build().unwrap_err(),
        Error::InvalidFrameSize(2)
    );
}

#[test]
fn test_invalid_hop() {
    assert!(matches!(
        Vocoder::builder().hop_divisor(0).build(),
        Err(Error::InvalidHopSize { .. })
    ));

    // Hop equal to the frame: windows never overlap
    assert_eq!(
        Vocoder::builder().hop_divisor(1).build().unwrap_err(),
        Error::WindowOverlapInvalid {
            hop: 2048,
            frame_size: 2048
        }
    );
}

#[test]
fn test_synthesis_hop_too_large() {
    let input = sine_buffer(440.0, 8192);

    assert_eq!(
        pvoc::time_scale(&input, 4.0).unwrap_err(),
        Error::WindowOverlapInvalid {
            hop: 2048,
            frame_size: 2048
        }
    );
    assert!(matches!(
        pvoc::pitch_shift(&input, 5.0),
        Err(Error::WindowOverlapInvalid { .. })
    ));

    // Past half a frame the windows still overlap, but not enough
    assert_eq!(
        pvoc::time_scale(&input, 2.5).unwrap_err(),
        Error::WindowOverlapInvalid {
            hop: 1280,
            frame_size: 2048
        }
    );
}

#[test]
fn test_non_finite_input() {
    let mut samples = vec![0.1_f32; 4096];
    samples[1234] = f32::NAN;
    let nan = SampleBuffer::new(samples, TEST_SAMPLE_RATE);
    assert_eq!(
        pvoc::time_scale(&nan, 1.5).unwrap_err(),
        Error::NonFiniteSample { index: 1234 }
    );

    let mut samples = vec![0.1_f32; 4096];
    samples[7] = f32::INFINITY;
    let inf = SampleBuffer::new(samples, TEST_SAMPLE_RATE);
    assert_eq!(
        pvoc::pitch_shift(&inf, 1.2).unwrap_err(),
        Error::NonFiniteSample { index: 7 }
    );
}

#[test]
fn test_zero_sample_rate() {
    let buffer = SampleBuffer::new(vec![0.0; 100], 0);
    assert_eq!(
        pvoc::time_scale(&buffer, 1.5).unwrap_err(),
        Error::InvalidSampleRate(0)
    );
}

#[test]
fn test_error_messages() {
    assert!(!Error::EmptyInput.to_string().is_empty());
    assert!(Error::InvalidRatio(-2.0).to_string().contains("-2"));
    assert!(Error::InvalidFrameSize(0).to_string().contains('0'));
}
