//! Phase Vocoder Core
//!
//! Re-times a sequence of spectral frames analysed at hop `Ha` so they can be
//! resynthesized at hop `Hs` with the pitch unchanged and the duration scaled
//! by `Hs / Ha`.
//!
//! ## Algorithm Overview
//!
//! For every bin `k`, frame by frame:
//!
//! 1. **Phase difference**: `dphi = phi - phi_prev`
//! 2. **Deviation**: `dev = wrap(dphi - omega_k * Ha)` with `omega_k = 2*pi*k/N`
//! 3. **True frequency**: `omega_true = omega_k + dev / Ha`
//! 4. **Accumulation**: `acc[k] += omega_true * Hs`
//! 5. **Synthesis**: input magnitude, accumulated phase
//!
//! The accumulator for frame 0 is seeded with frame 0's own phases.
//!
//! ## Ordering
//!
//! The accumulation is the only sequential dependency in the pipeline. The
//! per-frame advances (steps 1-3) only look at two adjacent analysis frames,
//! so [`PhaseVocoder::retime`] computes them in parallel and then runs the
//! accumulation as a scan.

use std::f64::consts::{PI, TAU};

use pvoc_core::{validate_ratio, Complex64, Error, Result, SpectralFrame};
use rayon::prelude::*;

/// Wrap phase to [-PI, PI)
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    (phase + PI).rem_euclid(TAU) - PI
}

/// Where each synthesized frame lands in the output.
///
/// Frame `t` is placed at `round(t * Ha * factor)`, so the per-frame
/// synthesis hop alternates between `floor(Ha * factor)` and
/// `ceil(Ha * factor)` and the overall time-scale is exact. With an integer
/// `Hs` the schedule is uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopSchedule {
    analysis_hop: usize,
    factor: f64,
}

impl HopSchedule {
    /// Uniform schedule: every synthesis hop is exactly `synthesis_hop`.
    pub fn uniform(analysis_hop: usize, synthesis_hop: usize) -> Result<Self> {
        if analysis_hop == 0 || synthesis_hop == 0 {
            return Err(Error::InvalidHopSize {
                analysis: analysis_hop,
                synthesis: synthesis_hop,
            });
        }
        Ok(Self {
            analysis_hop,
            factor: synthesis_hop as f64 / analysis_hop as f64,
        })
    }

    /// Schedule for a time-scale factor.
    ///
    /// Fails with `InvalidHopSize` when `Ha * factor` is below one sample.
    pub fn scaled(analysis_hop: usize, factor: f64) -> Result<Self> {
        validate_ratio(factor)?;
        let synthesis = analysis_hop as f64 * factor;
        if analysis_hop == 0 || synthesis < 1.0 {
            return Err(Error::InvalidHopSize {
                analysis: analysis_hop,
                synthesis: synthesis.floor() as usize,
            });
        }
        Ok(Self {
            analysis_hop,
            factor,
        })
    }

    #[inline]
    pub fn analysis_hop(&self) -> usize {
        self.analysis_hop
    }

    /// Time-scale factor `Hs / Ha`.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Output offset of frame `index`.
    #[inline]
    pub fn offset(&self, index: usize) -> usize {
        (index as f64 * self.analysis_hop as f64 * self.factor).round() as usize
    }

    /// Synthesis hop leading into frame `index` (the nominal hop for frame 0).
    #[inline]
    pub fn hop(&self, index: usize) -> usize {
        if index == 0 {
            return self.nominal_hop();
        }
        self.offset(index) - self.offset(index - 1)
    }

    /// `round(Ha * factor)`
    pub fn nominal_hop(&self) -> usize {
        (self.analysis_hop as f64 * self.factor).round() as usize
    }

    /// Largest hop the schedule can produce; this is the hop the overlap-add
    /// invariant has to hold for.
    pub fn max_hop(&self) -> usize {
        (self.analysis_hop as f64 * self.factor).ceil() as usize
    }
}

/// Per-bin phase state threaded through [`PhaseVocoder::step`].
///
/// Holds the previous analysis phase and the running synthesis phase for
/// every bin. It is a plain value: each step consumes it and returns the
/// updated one.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAccumulator {
    last_phase: Box<[f64]>,
    accumulated: Box<[f64]>,
}

impl PhaseAccumulator {
    /// Seed from the first analysis frame.
    pub fn seed(frame: &SpectralFrame) -> Self {
        let phases: Box<[f64]> = frame.bins().iter().map(|c| c.arg()).collect();
        Self {
            last_phase: phases.clone(),
            accumulated: phases,
        }
    }

    /// Running synthesis phase per bin.
    #[inline]
    pub fn phases(&self) -> &[f64] {
        &self.accumulated
    }

    /// Analysis phase of the last frame consumed.
    #[inline]
    pub fn last_phase(&self) -> &[f64] {
        &self.last_phase
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.accumulated.len()
    }

    /// Consume one analysis frame, given its phases and per-bin synthesis
    /// advances, and return the frame with synthesized phases.
    fn advance(
        &mut self,
        frame: &SpectralFrame,
        phases: &[f64],
        advances: &[f64],
    ) -> SpectralFrame {
        debug_assert_eq!(phases.len(), self.num_bins());
        debug_assert_eq!(advances.len(), self.num_bins());

        self.last_phase.copy_from_slice(phases);
        for (acc, delta) in self.accumulated.iter_mut().zip(advances) {
            *acc = wrap_phase(*acc + delta);
        }

        let bins = frame
            .bins()
            .iter()
            .zip(self.accumulated.iter())
            .map(|(bin, &phase)| Complex64::from_polar(bin.norm(), phase))
            .collect();
        SpectralFrame::new(frame.index, bins)
    }
}

/// Phase vocoder for one frame size and hop schedule.
#[derive(Debug, Clone)]
pub struct PhaseVocoder {
    frame_size: usize,
    schedule: HopSchedule,
    // omega_k * Ha per bin
    expected_phase_diff: Box<[f64]>,
}

impl PhaseVocoder {
    /// Vocoder with fixed analysis and synthesis hops.
    pub fn new(frame_size: usize, analysis_hop: usize, synthesis_hop: usize) -> Result<Self> {
        Self::with_schedule(frame_size, HopSchedule::uniform(analysis_hop, synthesis_hop)?)
    }

    pub fn with_schedule(frame_size: usize, schedule: HopSchedule) -> Result<Self> {
        pvoc_core::validate_frame_size(frame_size)?;

        let num_bins = frame_size / 2 + 1;
        let hop = schedule.analysis_hop() as f64;
        let expected_phase_diff = (0..num_bins)
            .map(|k| 2.0 * PI * k as f64 * hop / frame_size as f64)
            .collect();

        Ok(Self {
            frame_size,
            schedule,
            expected_phase_diff,
        })
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.expected_phase_diff.len()
    }

    #[inline]
    pub fn schedule(&self) -> &HopSchedule {
        &self.schedule
    }

    /// Synthesis phase advance of bin `k` between two analysis phases.
    #[inline]
    fn bin_advance(&self, k: usize, phase: f64, last_phase: f64, synthesis_hop: usize) -> f64 {
        let expected = self.expected_phase_diff[k];
        let deviation = wrap_phase(phase - last_phase - expected);
        let true_freq = (expected + deviation) / self.schedule.analysis_hop() as f64;
        true_freq * synthesis_hop as f64
    }

    /// Advance the accumulator by one analysis frame.
    ///
    /// The synthesis hop is taken from the schedule at `frame.index`.
    /// Returns the updated accumulator and the re-timed frame.
    pub fn step(
        &self,
        accumulator: PhaseAccumulator,
        frame: &SpectralFrame,
    ) -> (PhaseAccumulator, SpectralFrame) {
        debug_assert_eq!(frame.len(), self.num_bins());
        let mut acc = accumulator;
        let synthesis_hop = self.schedule.hop(frame.index);

        let phases: Box<[f64]> = frame.bins().iter().map(|c| c.arg()).collect();
        let advances: Box<[f64]> = phases
            .iter()
            .zip(acc.last_phase.iter())
            .enumerate()
            .map(|(k, (&phase, &last))| self.bin_advance(k, phase, last, synthesis_hop))
            .collect();

        let retimed = acc.advance(frame, &phases, &advances);
        (acc, retimed)
    }

    /// Re-time a whole analysis sequence.
    ///
    /// Frame `0` passes through with its own phases; every later frame gets
    /// its phases from the accumulator. Fails with `NonFiniteSample` (frame
    /// index) if a synthesized spectrum is not finite.
    pub fn retime(&self, frames: &[SpectralFrame]) -> Result<Vec<SpectralFrame>> {
        let Some(first) = frames.first() else {
            return Ok(Vec::new());
        };

        let phases: Vec<Box<[f64]>> = frames
            .par_iter()
            .map(|f| f.bins().iter().map(|c| c.arg()).collect())
            .collect();

        // Advances only depend on adjacent analysis frames
        let advances: Vec<Box<[f64]>> = (1..frames.len())
            .into_par_iter()
            .map(|t| {
                let hop = self.schedule.hop(frames[t].index);
                phases[t]
                    .iter()
                    .zip(phases[t - 1].iter())
                    .enumerate()
                    .map(|(k, (&phase, &last))| self.bin_advance(k, phase, last, hop))
                    .collect()
            })
            .collect();

        // The running sum itself is sequential
        let mut accumulator = PhaseAccumulator::seed(first);
        let mut output = Vec::with_capacity(frames.len());
        output.push(first.clone());

        for (t, advance) in (1..frames.len()).zip(&advances) {
            output.push(accumulator.advance(&frames[t], &phases[t], advance));
        }

        if let Some(bad) = output.iter().find(|f| !f.is_finite()) {
            return Err(Error::NonFiniteSample { index: bad.index });
        }
        Ok(output)
    }
}
