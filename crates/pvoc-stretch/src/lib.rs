//! Phase-vocoder time scaling and pitch shifting.
//!
//! Built on the framing and STFT primitives of `pvoc-core`:
//!
//! - [`PhaseVocoder`]: re-times analysis spectra for a new synthesis hop
//! - [`overlap_add`]: windowed resynthesis with envelope normalization
//! - [`resample`](resample::resample): linear or band-limited sinc resampling
//! - [`TimeStretcher`]: the full time-scale and pitch-shift pipelines
//!
//! ```ignore
//! use pvoc_core::{SampleBuffer, StretchConfig};
//! use pvoc_stretch::TimeStretcher;
//!
//! let stretcher = TimeStretcher::new(StretchConfig::default())?;
//! let slower = stretcher.time_scale(&buffer, 1.5)?;
//! let higher = stretcher.pitch_shift(&buffer, pvoc_stretch::semitones_to_ratio(3.0))?;
//! ```

pub mod channels;
pub mod overlap_add;
pub mod phase_vocoder;
pub mod pitch;
pub mod resample;
pub mod time_stretch;

pub use channels::{check_channels, deinterleave, downmix_to_mono, interleave};
pub use overlap_add::{synthesize, OverlapAdd, ENVELOPE_FLOOR};
pub use phase_vocoder::{wrap_phase, HopSchedule, PhaseAccumulator, PhaseVocoder};
pub use pitch::{cents_to_ratio, ratio_to_semitones, semitones_to_ratio};
pub use resample::resample;
pub use time_stretch::TimeStretcher;
