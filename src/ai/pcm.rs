//! Raw PCM decoding for synthesized speech.
//!
//! The speech endpoint returns headerless signed 16-bit little-endian PCM.

use crate::constants::PCM16_SCALE;

/// Decoded audio, one sample vector per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / f64::from(self.sample_rate)
        }
    }
}

/// Decodes interleaved PCM16 into normalized float channels.
///
/// Each sample is divided by 32768, so values land in `[-1.0, 1.0)`. A
/// trailing odd byte is ignored, as is a final frame that is missing samples
/// for some channels. `channels` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use asoka::ai::decode_pcm16;
///
/// let bytes = [0x00, 0x40, 0x00, 0xC0]; // 16384, -16384
/// let buffer = decode_pcm16(&bytes, 24_000, 1);
/// assert_eq!(buffer.channels[0], vec![0.5, -0.5]);
/// ```
pub fn decode_pcm16(bytes: &[u8], sample_rate: u32, channels: usize) -> AudioBuffer {
    let channel_count = channels.max(1);
    let samples: Vec<f32> = bytes
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / PCM16_SCALE)
        .collect();

    let frames = samples.len() / channel_count;
    let mut decoded = vec![Vec::with_capacity(frames); channel_count];
    for frame in samples.chunks_exact(channel_count) {
        for (channel, sample) in decoded.iter_mut().zip(frame) {
            channel.push(*sample);
        }
    }

    AudioBuffer {
        sample_rate,
        channels: decoded,
    }
}
