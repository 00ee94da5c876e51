//! Vocoder that coordinates the time-scale and pitch-shift pipelines

use pvoc_stretch::{check_channels, TimeStretcher};
use rayon::prelude::*;

use crate::{Result, SampleBuffer, StretchConfig, VocoderBuilder};

/// Phase-vocoder engine.
///
/// Owns a validated [`StretchConfig`] and the window and FFT plans derived
/// from it, so repeated calls skip all setup. Every operation takes the input
/// by reference and returns a new buffer; the engine itself is never mutated,
/// so it can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use pvoc::prelude::*;
///
/// let vocoder = Vocoder::builder().fft_size(FftSize::Large).build()?;
///
/// let slower = vocoder.time_scale(&input, 2.0)?;           // twice as long
/// let fifth_up = vocoder.pitch_shift(&input, 1.5)?;        // same length
/// let both = vocoder.process(&input, 0.75, semitones_to_ratio(-2.0))?;
///
/// // Stereo: channels are independent and run in parallel
/// let stereo = vocoder.time_scale_channels(&[left, right], 1.25)?;
/// ```
#[derive(Debug, Clone)]
pub struct Vocoder {
    stretcher: TimeStretcher,
}

impl Vocoder {
    /// Vocoder with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(StretchConfig::default())
    }

    pub fn with_config(config: StretchConfig) -> Result<Self> {
        let stretcher = TimeStretcher::new(config)?;
        tracing::debug!(
            frame_size = config.frame_size,
            analysis_hop = config.analysis_hop(),
            interpolation = ?config.interpolation,
            "vocoder ready"
        );
        Ok(Self { stretcher })
    }

    pub fn builder() -> VocoderBuilder {
        VocoderBuilder::default()
    }

    #[inline]
    pub fn config(&self) -> &StretchConfig {
        self.stretcher.config()
    }

    /// Frame size in samples.
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.config().frame_size
    }

    #[inline]
    pub fn analysis_hop(&self) -> usize {
        self.config().analysis_hop()
    }

    /// Underlying pipeline, for access to the STFT and window.
    #[inline]
    pub fn stretcher(&self) -> &TimeStretcher {
        &self.stretcher
    }

    /// Change duration by `factor` (> 1 slower, < 1 faster) without changing pitch.
    pub fn time_scale(&self, buffer: &SampleBuffer, factor: f64) -> Result<SampleBuffer> {
        self.stretcher.time_scale(buffer, factor)
    }

    /// Change pitch by `ratio` (> 1 higher, < 1 lower) without changing duration.
    pub fn pitch_shift(&self, buffer: &SampleBuffer, ratio: f64) -> Result<SampleBuffer> {
        self.stretcher.pitch_shift(buffer, ratio)
    }

    /// Pitch-shift by `ratio`, then time-scale the result by `factor`.
    ///
    /// A stage whose factor is exactly 1.0 is skipped. Both arguments are
    /// validated up front, so a bad time factor fails before any pitch work.
    pub fn process(&self, buffer: &SampleBuffer, factor: f64, ratio: f64) -> Result<SampleBuffer> {
        buffer.validate()?;
        pvoc_core::validate_ratio(factor)?;
        pvoc_core::validate_ratio(ratio)?;

        let shifted = if ratio == 1.0 {
            buffer.clone()
        } else {
            self.pitch_shift(buffer, ratio)?
        };

        if factor == 1.0 {
            Ok(shifted)
        } else {
            self.time_scale(&shifted, factor)
        }
    }

    /// Time-scale each channel independently, in parallel.
    ///
    /// Channels must share a sample rate and length.
    pub fn time_scale_channels(
        &self,
        channels: &[SampleBuffer],
        factor: f64,
    ) -> Result<Vec<SampleBuffer>> {
        check_channels(channels)?;
        channels
            .par_iter()
            .map(|channel| self.time_scale(channel, factor))
            .collect()
    }

    /// Pitch-shift each channel independently, in parallel.
    ///
    /// Channels must share a sample rate and length.
    pub fn pitch_shift_channels(
        &self,
        channels: &[SampleBuffer],
        ratio: f64,
    ) -> Result<Vec<SampleBuffer>> {
        check_channels(channels)?;
        channels
            .par_iter()
            .map(|channel| self.pitch_shift(channel, ratio))
            .collect()
    }
}
