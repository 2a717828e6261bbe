//! Before/after quality comparison for an enhancement pass

use crate::analysis::quality_metrics;
use crate::enhance::{EnhancementConfig, EnhancementPipeline};
use crate::model::{InvalidBufferError, QualityMetrics, SampleBuffer};
use serde::{Deserialize, Serialize};

/// Metric deltas, `after - before`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDelta {
    pub overall_score: f32,
    pub clarity: f32,
    pub signal_to_noise_db: f32,
    pub dynamic_range_db: f32,
    pub peak_level_db: f32,
    pub average_level_db: f32,
    pub silence_ratio: f32,
    /// The input clipped and the output does not
    pub clipping_resolved: bool,
}

/// Result of [`enhance_and_compare`]
#[derive(Debug, Clone)]
pub struct EnhancementOutcome {
    pub buffer: SampleBuffer,
    pub before: QualityMetrics,
    pub after: QualityMetrics,
    pub delta: QualityDelta,
}

pub fn compare(before: &QualityMetrics, after: &QualityMetrics) -> QualityDelta {
    QualityDelta {
        overall_score: after.overall_score - before.overall_score,
        clarity: after.clarity - before.clarity,
        signal_to_noise_db: after.signal_to_noise_db - before.signal_to_noise_db,
        dynamic_range_db: after.dynamic_range_db - before.dynamic_range_db,
        peak_level_db: after.peak_level_db - before.peak_level_db,
        average_level_db: after.average_level_db - before.average_level_db,
        silence_ratio: after.silence_ratio - before.silence_ratio,
        clipping_resolved: before.clipping && !after.clipping,
    }
}

/// Enhance a buffer and measure quality on both sides of the pass
pub fn enhance_and_compare(
    buffer: &SampleBuffer,
    config: &EnhancementConfig,
) -> Result<EnhancementOutcome, InvalidBufferError> {
    let enhanced = EnhancementPipeline::new(*config).run(buffer)?;

    let before = quality_metrics(buffer.primary());
    let after = quality_metrics(enhanced.primary());
    let delta = compare(&before, &after);

    log::debug!(
        "Quality delta: score {:+.1}, SNR {:+.1}dB, DR {:+.1}dB",
        delta.overall_score,
        delta.signal_to_noise_db,
        delta.dynamic_range_db
    );

    Ok(EnhancementOutcome {
        buffer: enhanced,
        before,
        after,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pass_has_zero_delta() {
        let buffer = SampleBuffer::mono(vec![0.1, -0.3, 0.2, 0.05], 8000);
        let outcome = enhance_and_compare(&buffer, &EnhancementConfig::default()).unwrap();

        assert_eq!(outcome.buffer, buffer);
        assert_eq!(outcome.delta.overall_score, 0.0);
        assert_eq!(outcome.delta.peak_level_db, 0.0);
        assert!(!outcome.delta.clipping_resolved);
    }

    #[test]
    fn test_clipping_resolved_by_normalize() {
        let buffer = SampleBuffer::mono(vec![1.0, -0.5, 0.25, 0.0], 8000);
        let config = EnhancementConfig::new().with_normalize(true);
        let outcome = enhance_and_compare(&buffer, &config).unwrap();

        assert!(outcome.before.clipping);
        assert!(!outcome.after.clipping);
        assert!(outcome.delta.clipping_resolved);
        assert!(outcome.delta.peak_level_db < 0.0);
    }
}
