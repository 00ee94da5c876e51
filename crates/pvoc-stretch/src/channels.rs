//! Splitting interleaved multi-channel audio into independent mono channels.
//!
//! The pipelines are mono. Multi-channel audio is processed one channel at a
//! time, with no state shared between channels.

use pvoc_core::{Error, Result, SampleBuffer};

/// Split interleaved samples into one `Vec` per channel.
pub fn deinterleave(interleaved: &[f32], channels: usize) -> Result<Vec<Vec<f32>>> {
    check_interleaved(interleaved, channels)?;
    Ok((0..channels)
        .map(|c| {
            interleaved
                .iter()
                .skip(c)
                .step_by(channels)
                .copied()
                .collect()
        })
        .collect())
}

/// Interleave equally long channels.
pub fn interleave(channels: &[Vec<f32>]) -> Result<Vec<f32>> {
    let Some(first) = channels.first() else {
        return Ok(Vec::new());
    };
    let frames = first.len();
    if let Some(bad) = channels.iter().position(|c| c.len() != frames) {
        return Err(Error::ChannelMismatch(format!(
            "channel {} has {} samples, expected {}",
            bad,
            channels[bad].len(),
            frames
        )));
    }

    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        out.extend(channels.iter().map(|c| c[i]));
    }
    Ok(out)
}

/// Average all channels of interleaved audio into one.
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Result<Vec<f32>> {
    check_interleaved(interleaved, channels)?;
    let scale = 1.0 / channels as f32;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect())
}

/// Channels processed together must agree on sample rate and length.
pub fn check_channels(channels: &[SampleBuffer]) -> Result<()> {
    let Some(first) = channels.first() else {
        return Err(Error::ChannelMismatch("no channels".into()));
    };
    for (i, channel) in channels.iter().enumerate().skip(1) {
        if channel.sample_rate() != first.sample_rate() {
            return Err(Error::ChannelMismatch(format!(
                "channel {} is at {} Hz, expected {} Hz",
                i,
                channel.sample_rate(),
                first.sample_rate()
            )));
        }
        if channel.len() != first.len() {
            return Err(Error::ChannelMismatch(format!(
                "channel {} has {} samples, expected {}",
                i,
                channel.len(),
                first.len()
            )));
        }
    }
    Ok(())
}

fn check_interleaved(interleaved: &[f32], channels: usize) -> Result<()> {
    if channels == 0 {
        return Err(Error::ChannelMismatch("channel count is zero".into()));
    }
    if interleaved.len() % channels != 0 {
        return Err(Error::ChannelMismatch(format!(
            "{} samples do not divide into {} channels",
            interleaved.len(),
            channels
        )));
    }
    Ok(())
}
