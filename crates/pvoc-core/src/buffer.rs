//! Mono sample buffer handed to and returned from the processing pipelines.

use crate::{Error, Result};

/// Mono audio samples with their sample rate.
///
/// The sample rate is carried unchanged through every pipeline: time-scaling
/// changes the number of samples, never the rate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Copy samples from a slice.
    pub fn from_slice(samples: &[f32], sample_rate: u32) -> Self {
        Self::new(samples.to_vec(), sample_rate)
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (0.0 when the sample rate is zero).
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Build a buffer with the same sample rate around new samples.
    pub fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self::new(samples, self.sample_rate)
    }

    /// Check that the buffer can enter a pipeline.
    ///
    /// Fails on an empty buffer, a zero sample rate, or the first NaN/Inf sample.
    pub fn validate(&self) -> Result<()> {
        if self.samples.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if let Some(index) = self.samples.iter().position(|s| !s.is_finite()) {
            return Err(Error::NonFiniteSample { index });
        }
        Ok(())
    }
}

impl AsRef<[f32]> for SampleBuffer {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}
