//! Overlap-add resynthesis.
//!
//! Each inverse-transformed frame is tapered by the synthesis window and
//! *added* into a shared accumulator at its scheduled offset. The squared
//! window is accumulated alongside, and every output sample is divided by
//! that envelope, which flattens the ripple of overlapping windows and also
//! handles the uneven hops of a fractional time-scale schedule.

use pvoc_core::{Result, SpectralFrame, Stft, Window};
use rayon::prelude::*;

use crate::phase_vocoder::HopSchedule;

/// Envelope values at or below this are treated as uncovered (output 0.0).
pub const ENVELOPE_FLOOR: f64 = 1e-8;

/// Accumulator for windowed frames.
///
/// Offsets are in accumulator coordinates; `finish` drops the first
/// `frame_size / 2` samples so frame centers line up with output samples.
#[derive(Debug, Clone)]
pub struct OverlapAdd<'a> {
    window: &'a Window,
    output: Vec<f64>,
    envelope: Vec<f64>,
}

impl<'a> OverlapAdd<'a> {
    pub fn new(window: &'a Window, capacity: usize) -> Self {
        Self {
            window,
            output: vec![0.0; capacity],
            envelope: vec![0.0; capacity],
        }
    }

    /// Window `frame` and add it at `offset`, growing the buffers as needed.
    pub fn add(&mut self, offset: usize, frame: &[f64]) {
        let end = offset + frame.len();
        if end > self.output.len() {
            self.output.resize(end, 0.0);
            self.envelope.resize(end, 0.0);
        }

        let weights = self.window.weights();
        for (i, (&sample, &w)) in frame.iter().zip(weights).enumerate() {
            self.output[offset + i] += sample * w;
            self.envelope[offset + i] += w * w;
        }
    }

    /// Normalized samples `[frame_size / 2, frame_size / 2 + len)`, zero-padded.
    pub fn finish(self, len: usize) -> Vec<f32> {
        let start = self.window.len() / 2;
        (start..start + len)
            .map(|i| match (self.output.get(i), self.envelope.get(i)) {
                (Some(&sample), Some(&env)) if env > ENVELOPE_FLOOR => (sample / env) as f32,
                _ => 0.0,
            })
            .collect()
    }
}

/// Resynthesize `frames` placed according to `schedule`.
///
/// Fails with `WindowOverlapInvalid` before doing any work if the
/// schedule's largest hop leaves gaps between windows.
pub fn synthesize(
    stft: &Stft,
    frames: &[SpectralFrame],
    schedule: &HopSchedule,
    output_len: usize,
) -> Result<Vec<f32>> {
    stft.window().validate_overlap(schedule.max_hop())?;

    let frame_size = stft.frame_size();
    let time_frames: Vec<Vec<f64>> = frames
        .par_iter()
        .map_init(
            || stft.workspace(),
            |work, frame| {
                let mut samples = vec![0.0; frame_size];
                stft.inverse_with(frame, &mut samples, work);
                samples
            },
        )
        .collect();

    let capacity = frames
        .last()
        .map_or(0, |f| schedule.offset(f.index) + frame_size);
    let mut ola = OverlapAdd::new(stft.window(), capacity);
    for (frame, samples) in frames.iter().zip(&time_frames) {
        ola.add(schedule.offset(frame.index), samples);
    }

    tracing::trace!(
        frames = frames.len(),
        output_len,
        max_hop = schedule.max_hop(),
        "overlap-add complete"
    );
    Ok(ola.finish(output_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvoc_core::{Error, WindowKind};

    fn test_signal(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| ((i as f32 * 0.031).sin() + (i as f32 * 0.0071).cos()) * 0.4)
            .collect()
    }

    #[test]
    fn test_frames_are_added_not_overwritten() {
        let window = Window::new(WindowKind::Hann, 8).unwrap();
        let mut ola = OverlapAdd::new(&window, 0);
        ola.add(0, &[1.0; 8]);
        ola.add(4, &[1.0; 8]);

        // Samples 4..8 of the accumulator see both frames
        let w = window.weights();
        for i in 4..8 {
            let expected = w[i] + w[i - 4];
            assert!((ola.output[i] - expected).abs() < 1e-12);
            assert!((ola.envelope[i] - (w[i] * w[i] + w[i - 4] * w[i - 4])).abs() < 1e-12);
        }
        assert_eq!(ola.output.len(), 12);
    }

    #[test]
    fn test_finish_zero_pads_uncovered_samples() {
        let window = Window::new(WindowKind::Hann, 8).unwrap();
        let mut ola = OverlapAdd::new(&window, 0);
        ola.add(0, &[0.5; 8]);

        let out = ola.finish(10);
        assert_eq!(out.len(), 10);
        // Center of the frame: envelope = 1, output = 0.5
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!(out[9].abs() < 1e-12);
    }

    #[test]
    fn test_analysis_synthesis_round_trip() {
        let stft = Stft::new(WindowKind::Hann, 256).unwrap();
        let input = test_signal(3000);

        let spectra = stft.analyze(&input, 64).unwrap();
        let schedule = HopSchedule::uniform(64, 64).unwrap();
        let output = synthesize(&stft, &spectra, &schedule, input.len()).unwrap();

        assert_eq!(output.len(), input.len());
        for (i, (a, b)) in output.iter().zip(&input).enumerate() {
            assert!((a - b).abs() < 1e-5, "sample {}: {} vs {}", i, a, b);
        }
    }

    #[test]
    fn test_round_trip_at_half_overlap() {
        let stft = Stft::new(WindowKind::Hann, 128).unwrap();
        let input = test_signal(1000);

        let spectra = stft.analyze(&input, 64).unwrap();
        let schedule = HopSchedule::uniform(64, 64).unwrap();
        let output = synthesize(&stft, &spectra, &schedule, input.len()).unwrap();

        for (a, b) in output.iter().zip(&input) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rejects_gapped_schedule() {
        let stft = Stft::new(WindowKind::Hann, 128).unwrap();
        let spectra = stft.analyze(&test_signal(500), 32).unwrap();
        let schedule = HopSchedule::uniform(32, 128).unwrap();

        assert_eq!(
            synthesize(&stft, &spectra, &schedule, 2000),
            Err(Error::WindowOverlapInvalid {
                hop: 128,
                frame_size: 128
            })
        );
    }

    #[test]
    fn test_empty_frames() {
        let stft = Stft::new(WindowKind::Hann, 64).unwrap();
        let schedule = HopSchedule::uniform(16, 16).unwrap();
        let output = synthesize(&stft, &[], &schedule, 5).unwrap();
        assert_eq!(output, vec![0.0; 5]);
    }
}
