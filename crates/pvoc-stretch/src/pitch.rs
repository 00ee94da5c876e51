//! Pitch ratio conversions.

/// Frequency ratio for a shift in semitones: `2^(semitones / 12)`.
#[inline]
pub fn semitones_to_ratio(semitones: f64) -> f64 {
    2.0_f64.powf(semitones / 12.0)
}

/// Frequency ratio for a shift in cents (100 cents = 1 semitone).
#[inline]
pub fn cents_to_ratio(cents: f64) -> f64 {
    2.0_f64.powf(cents / 1200.0)
}

/// Semitones for a frequency ratio: `12 * log2(ratio)`.
#[inline]
pub fn ratio_to_semitones(ratio: f64) -> f64 {
    12.0 * ratio.log2()
}
