//! Time-scale and pitch-shift pipelines.
//!
//! ```text
//! time_scale:  frames -> STFT -> phase vocoder (Hs = Ha * s) -> ISTFT -> overlap-add
//! pitch_shift: time_scale(r) -> resample (step r)
//! ```

use pvoc_core::{validate_ratio, Result, SampleBuffer, Stft, StretchConfig};

use crate::overlap_add;
use crate::phase_vocoder::{HopSchedule, PhaseVocoder};
use crate::resample::resample;

/// Phase-vocoder pipeline for one validated configuration.
///
/// The window and FFT plans are built once in [`new`](Self::new) and reused
/// by every call. Calls share no mutable state, so one stretcher can serve
/// several threads.
#[derive(Debug, Clone)]
pub struct TimeStretcher {
    config: StretchConfig,
    stft: Stft,
}

impl TimeStretcher {
    pub fn new(config: StretchConfig) -> Result<Self> {
        config.validate()?;
        let stft = Stft::new(config.window, config.frame_size)?;
        Ok(Self { config, stft })
    }

    #[inline]
    pub fn config(&self) -> &StretchConfig {
        &self.config
    }

    #[inline]
    pub fn stft(&self) -> &Stft {
        &self.stft
    }

    /// Change duration by `factor` (> 1 slows down, < 1 speeds up), keeping pitch.
    ///
    /// The output has `round(len * factor)` samples (at least one) at the
    /// input's sample rate. A factor of 1.0 goes through the same path as
    /// any other factor.
    pub fn time_scale(&self, buffer: &SampleBuffer, factor: f64) -> Result<SampleBuffer> {
        buffer.validate()?;
        validate_ratio(factor)?;

        let samples = self.stretch_samples(buffer.samples(), factor)?;
        Ok(buffer.with_samples(samples))
    }

    /// Shift pitch by `ratio` (> 1 up, < 1 down), keeping duration.
    ///
    /// Stretches by `ratio`, then reads the stretched signal back at step
    /// `ratio`, so the output has exactly as many samples as the input.
    pub fn pitch_shift(&self, buffer: &SampleBuffer, ratio: f64) -> Result<SampleBuffer> {
        buffer.validate()?;
        validate_ratio(ratio)?;

        let stretched = self.stretch_samples(buffer.samples(), ratio)?;
        let shifted = resample(&stretched, ratio, buffer.len(), self.config.interpolation)?;

        tracing::debug!(
            ratio,
            len = buffer.len(),
            interpolation = ?self.config.interpolation,
            "pitch shift complete"
        );
        Ok(buffer.with_samples(shifted))
    }

    fn stretch_samples(&self, samples: &[f32], factor: f64) -> Result<Vec<f32>> {
        let analysis_hop = self.config.analysis_hop();
        let schedule = HopSchedule::scaled(analysis_hop, factor)?;
        // Fail before the expensive part
        self.stft.window().validate_overlap(schedule.max_hop())?;

        let vocoder = PhaseVocoder::with_schedule(self.config.frame_size, schedule)?;
        let spectra = self.stft.analyze(samples, analysis_hop)?;
        let retimed = vocoder.retime(&spectra)?;

        let output_len = ((samples.len() as f64 * factor).round() as usize).max(1);
        let output = overlap_add::synthesize(&self.stft, &retimed, &schedule, output_len)?;

        tracing::debug!(
            factor,
            frame_size = self.config.frame_size,
            analysis_hop,
            synthesis_hop = schedule.nominal_hop(),
            frames = spectra.len(),
            input_len = samples.len(),
            output_len,
            "time scale complete"
        );
        Ok(output)
    }
}
