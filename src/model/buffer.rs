//! In-memory PCM sample buffer

use thiserror::Error;

/// Reasons a buffer is rejected at the entry of `analyze` / `enhance`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBufferError {
    #[error("buffer has no channels")]
    NoChannels,

    #[error("buffer has no samples")]
    Empty,

    #[error("channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid sample rate: {0}Hz")]
    InvalidSampleRate(u32),
}

/// Decoded audio: one `Vec<f32>` per channel, samples nominally in [-1, 1]
///
/// Treated as an immutable value. Transforms never touch the input's storage,
/// they build a new buffer via [`SampleBuffer::map_channels`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Sample data per channel
    pub channels: Vec<Vec<f32>>,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from planar channel data (not validated)
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    /// Create a single-channel buffer
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(vec![samples], sample_rate)
    }

    /// Check the shape invariants: at least one channel, equal non-zero
    /// lengths, positive sample rate
    pub fn validate(&self) -> Result<(), InvalidBufferError> {
        if self.sample_rate == 0 {
            return Err(InvalidBufferError::InvalidSampleRate(self.sample_rate));
        }

        let first = self.channels.first().ok_or(InvalidBufferError::NoChannels)?;
        let expected = first.len();
        if expected == 0 {
            return Err(InvalidBufferError::Empty);
        }

        for (channel, samples) in self.channels.iter().enumerate().skip(1) {
            if samples.len() != expected {
                return Err(InvalidBufferError::ChannelLengthMismatch {
                    channel,
                    expected,
                    actual: samples.len(),
                });
            }
        }

        Ok(())
    }

    /// Number of channels
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// First channel, the one all feature extraction reads
    pub fn primary(&self) -> &[f32] {
        self.channels.first().map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Largest absolute sample value across all channels
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    /// Build a new buffer of the same sample rate by transforming each channel
    pub fn map_channels<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[f32]) -> Vec<f32>,
    {
        Self {
            channels: self.channels.iter().map(|c| f(c)).collect(),
            sample_rate: self.sample_rate,
        }
    }
}
