//! Analysis/synthesis windows and the overlap-add invariant.

use std::f64::consts::PI;

use crate::config::validate_frame_size;
use crate::{Error, Result};

/// Minimum squared overlap-sum, relative to its maximum, that a window/hop
/// pair must keep everywhere in the steady-state region.
pub const MIN_OVERLAP_GAIN: f64 = 1e-3;

/// Window shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum WindowKind {
    /// Periodic Hann window
    #[default]
    Hann,
}

/// Fixed-length real window weights.
///
/// Computed once per frame size and read-only afterwards. The same weights
/// are used for analysis and synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    kind: WindowKind,
    weights: Box<[f64]>,
}

impl Window {
    pub fn new(kind: WindowKind, size: usize) -> Result<Self> {
        validate_frame_size(size)?;
        let weights = match kind {
            WindowKind::Hann => Self::create_hann_window(size),
        };
        Ok(Self { kind, weights })
    }

    /// Periodic Hann window, so copies at N/4 hop sum to a constant.
    fn create_hann_window(size: usize) -> Box<[f64]> {
        (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
            .collect()
    }

    #[inline]
    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Largest hop the overlap check accepts: copies must overlap by at
    /// least half a frame.
    #[inline]
    pub fn max_hop(&self) -> usize {
        self.len() / 2
    }

    /// Sum of squared window copies spaced `hop` apart, over one hop period.
    ///
    /// Entry `n` is `sum_m w[n + m * hop]^2`. Analysis and synthesis both
    /// apply the window, so this is the gain the overlap-add stage divides out.
    pub fn overlap_gain(&self, hop: usize) -> Vec<f64> {
        if hop == 0 {
            return Vec::new();
        }
        (0..hop)
            .map(|n| {
                self.weights
                    .iter()
                    .skip(n)
                    .step_by(hop)
                    .map(|w| w * w)
                    .sum()
            })
            .collect()
    }

    /// Check that overlapping copies at `hop` leave no (near-)zero gaps.
    ///
    /// Hops above [`max_hop`](Self::max_hop) are rejected outright. Past half
    /// a frame the squared-window envelope dips towards zero between frames,
    /// and dividing by it blows up leakage from neighbouring frames into
    /// level and pitch errors.
    pub fn validate_overlap(&self, hop: usize) -> Result<()> {
        if hop == 0 {
            return Err(Error::InvalidHopSize {
                analysis: hop,
                synthesis: hop,
            });
        }

        let invalid = Error::WindowOverlapInvalid {
            hop,
            frame_size: self.len(),
        };
        if hop > self.max_hop() {
            return Err(invalid);
        }

        let gain = self.overlap_gain(hop);
        let max = gain.iter().copied().fold(0.0_f64, f64::max);
        let min = gain.iter().copied().fold(f64::INFINITY, f64::min);
        if max <= 0.0 || min / max < MIN_OVERLAP_GAIN {
            return Err(invalid);
        }
        Ok(())
    }
}
