//! Time-domain quality metrics
//!
//! Single pass over the samples for peak/RMS/silence, plus a sort of the
//! magnitudes for the noise floor estimate.

use crate::model::QualityMetrics;

/// Floor for amplitudes fed into `log10` and used as divisors
pub const EPSILON: f32 = 1e-10;

/// Peak at or above this counts as clipping
const CLIPPING_THRESHOLD: f32 = 0.99;
/// Samples below this magnitude count as silence
const SILENCE_THRESHOLD: f32 = 0.01;
/// Share of the quietest samples used for the noise floor
const NOISE_FLOOR_FRACTION: f64 = 0.1;

/// Compute quality metrics for a channel
pub fn quality_metrics(samples: &[f32]) -> QualityMetrics {
    let (rms, peak) = calculate_rms_and_peak(samples);

    let silent = samples
        .iter()
        .filter(|s| s.abs() < SILENCE_THRESHOLD)
        .count();
    let silence_ratio = if samples.is_empty() {
        1.0
    } else {
        silent as f32 / samples.len() as f32
    };

    let noise_floor = estimate_noise_floor(samples);

    let peak_level_db = amplitude_to_db(peak);
    let average_level_db = amplitude_to_db(rms);
    let dynamic_range_db = peak_level_db - average_level_db;
    let signal_to_noise_db = 20.0 * (rms.max(EPSILON) / noise_floor).log10();
    let clipping = peak >= CLIPPING_THRESHOLD;
    let clarity = (70.0 + signal_to_noise_db / 2.0).clamp(0.0, 100.0);

    let mut overall_score = 100.0f32;
    if clipping {
        overall_score -= 30.0;
    }
    if dynamic_range_db < 10.0 {
        overall_score -= 20.0;
    }
    if signal_to_noise_db < 20.0 {
        overall_score -= 15.0;
    }
    if silence_ratio > 0.3 {
        overall_score -= 10.0;
    }

    QualityMetrics {
        overall_score: overall_score.clamp(0.0, 100.0),
        clarity,
        dynamic_range_db,
        signal_to_noise_db,
        peak_level_db,
        average_level_db,
        clipping,
        silence_ratio,
        peak,
        rms,
        noise_floor,
    }
}

/// `20 * log10(amplitude)`, with the amplitude floored at [`EPSILON`]
pub fn amplitude_to_db(amplitude: f32) -> f32 {
    20.0 * amplitude.max(EPSILON).log10()
}

/// RMS of the quietest 10% of samples by magnitude
///
/// Returns [`EPSILON`] when that subset is empty or entirely silent.
pub fn estimate_noise_floor(samples: &[f32]) -> f32 {
    let count = (samples.len() as f64 * NOISE_FLOOR_FRACTION).floor() as usize;
    if count == 0 {
        return EPSILON;
    }

    let mut magnitudes: Vec<f32> = samples.iter().map(|s| s.abs()).collect();
    magnitudes.sort_by(f32::total_cmp);

    let (rms, _) = calculate_rms_and_peak(&magnitudes[..count]);
    rms.max(EPSILON)
}

/// Calculate RMS and peak values for a sample chunk
#[inline]
pub fn calculate_rms_and_peak(samples: &[f32]) -> (f32, f32) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }

    let mut sum_sq = 0.0f64;
    let mut peak = 0.0f32;

    for &sample in samples {
        let abs = sample.abs();
        sum_sq += (abs as f64) * (abs as f64);
        if abs > peak {
            peak = abs;
        }
    }

    let rms = (sum_sq / samples.len() as f64).sqrt() as f32;
    (rms, peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, amplitude: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_calculate_rms_and_peak() {
        let samples = vec![0.0, 0.5, -0.5, 0.25, -0.25];
        let (rms, peak) = calculate_rms_and_peak(&samples);
        assert!((peak - 0.5).abs() < 0.001);
        assert!(rms > 0.0 && rms < peak);
    }

    #[test]
    fn test_silent_input_is_finite() {
        let metrics = quality_metrics(&[0.0; 1000]);
        assert_eq!(metrics.peak, 0.0);
        assert_eq!(metrics.rms, 0.0);
        assert!(!metrics.clipping);
        assert_eq!(metrics.silence_ratio, 1.0);
        assert!(metrics.peak_level_db.is_finite());
        assert!(metrics.signal_to_noise_db.is_finite());
        assert_eq!(metrics.dynamic_range_db, 0.0);
        // DR < 10, SNR < 20, silence > 0.3
        assert_eq!(metrics.overall_score, 55.0);
    }

    #[test]
    fn test_single_sample_uses_epsilon_noise_floor() {
        assert_eq!(estimate_noise_floor(&[0.4]), EPSILON);
        let metrics = quality_metrics(&[0.4]);
        assert!(metrics.signal_to_noise_db.is_finite());
        assert_eq!(metrics.clarity, 100.0);
    }

    #[test]
    fn test_sine_levels() {
        let samples = sine(440.0, 0.5, 44100, 44100);
        let metrics = quality_metrics(&samples);

        assert!((metrics.peak_level_db - 20.0 * 0.5f32.log10()).abs() < 0.01);
        // RMS of a sine is amplitude / sqrt(2), so the crest factor is ~3 dB
        assert!((metrics.dynamic_range_db - 3.01).abs() < 0.05);
        assert!(!metrics.clipping);
    }

    #[test]
    fn test_clipping_penalty() {
        let samples = sine(220.0, 1.0, 8000, 8000);
        let metrics = quality_metrics(&samples);
        assert!(metrics.clipping);
        assert!(metrics.overall_score <= 70.0);
    }

    #[test]
    fn test_clarity_tracks_snr() {
        let samples = sine(440.0, 0.5, 44100, 4410);
        let metrics = quality_metrics(&samples);
        let expected = (70.0 + metrics.signal_to_noise_db / 2.0).clamp(0.0, 100.0);
        assert!((metrics.clarity - expected).abs() < 1e-4);
    }
}
