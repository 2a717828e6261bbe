//! Dynamics stages: compression and peak normalization

use super::traits::{Stage, StageId};
use crate::model::SampleBuffer;

/// Compression knee, absolute amplitude
pub const COMPRESSION_THRESHOLD: f32 = 0.3;
/// Peak level targeted by normalization
pub const NORMALIZE_TARGET: f32 = 0.95;

/// Hard-knee compressor above 0.3 with ratio `1 + 3 * amount / 100`
#[derive(Debug, Clone, Copy)]
pub struct Compression {
    pub amount: f32,
}

impl Compression {
    /// Always >= 1 for non-negative amounts
    pub fn ratio(&self) -> f32 {
        1.0 + 3.0 * self.amount / 100.0
    }
}

impl Stage for Compression {
    fn id(&self) -> StageId {
        StageId::Compression
    }

    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let ratio = self.ratio().max(1.0);

        samples
            .iter()
            .map(|&sample| {
                let magnitude = sample.abs();
                if magnitude > COMPRESSION_THRESHOLD {
                    sample.signum()
                        * (COMPRESSION_THRESHOLD + (magnitude - COMPRESSION_THRESHOLD) / ratio)
                } else {
                    sample
                }
            })
            .collect()
    }
}

/// Scales every channel by `0.95 / peak`, the peak taken across all channels
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalize;

impl Stage for Normalize {
    fn id(&self) -> StageId {
        StageId::Normalize
    }

    /// Without the buffer-wide peak a single channel is normalized on its own
    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        scale_to_target(samples, peak)
    }

    fn apply(&self, buffer: &SampleBuffer) -> SampleBuffer {
        let peak = buffer.peak();
        log::debug!("Normalize: peak {:.4} -> {:.2}", peak, NORMALIZE_TARGET);
        buffer.map_channels(|channel| scale_to_target(channel, peak))
    }
}

/// All-zero input (peak 0) is passed through
fn scale_to_target(samples: &[f32], peak: f32) -> Vec<f32> {
    if peak <= 0.0 {
        return samples.to_vec();
    }
    let gain = NORMALIZE_TARGET / peak;
    samples.iter().map(|&s| s * gain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_above_knee() {
        let stage = Compression { amount: 100.0 };
        assert_eq!(stage.ratio(), 4.0);

        let output = stage.process_channel(&[0.1, 0.7, -0.7, 0.3], 44100);
        assert_eq!(output[0], 0.1);
        assert!((output[1] - 0.4).abs() < 1e-6);
        assert!((output[2] + 0.4).abs() < 1e-6);
        assert_eq!(output[3], 0.3);
    }

    #[test]
    fn test_normalize_uses_global_peak() {
        let buffer = SampleBuffer::new(vec![vec![0.25, -0.1], vec![0.5, 0.0]], 8000);
        let output = Normalize.apply(&buffer);
        assert!((output.channels[0][0] - 0.475).abs() < 1e-6);
        assert!((output.channels[1][0] - 0.95).abs() < 1e-6);
        assert!((output.peak() - NORMALIZE_TARGET).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_silence_is_noop() {
        let buffer = SampleBuffer::mono(vec![0.0; 16], 8000);
        assert_eq!(Normalize.apply(&buffer), buffer);
    }
}
