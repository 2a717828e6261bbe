//! Autocorrelation pitch detection
//!
//! The signal is cut into 30 ms windows with 50% overlap. Each window is
//! searched for the lag (between `sr/500` and `sr/50` samples) with the
//! largest raw autocorrelation. Windows are independent, so the track is
//! computed with rayon and collected in window order.

use crate::model::PitchRange;
use rayon::prelude::*;

/// Lowest pitch considered, Hz
pub const MIN_PITCH_HZ: f32 = 50.0;
/// Highest pitch considered, Hz
pub const MAX_PITCH_HZ: f32 = 500.0;
/// Analysis window length in seconds
const WINDOW_SECS: f64 = 0.030;

/// Estimate the pitch of one window
///
/// Returns 0.0 when no lag has a positive correlation.
pub fn detect_pitch(window: &[f32], sample_rate: u32) -> f32 {
    let min_lag = ((sample_rate as f32 / MAX_PITCH_HZ) as usize).max(1);
    let max_lag = (sample_rate as f32 / MIN_PITCH_HZ) as usize;

    let mut best_lag = 0usize;
    let mut best_corr = 0.0f64;

    for lag in min_lag..=max_lag.min(window.len().saturating_sub(1)) {
        let corr: f64 = window[..window.len() - lag]
            .iter()
            .zip(&window[lag..])
            .map(|(&a, &b)| a as f64 * b as f64)
            .sum();

        if corr > best_corr {
            best_corr = corr;
            best_lag = lag;
        }
    }

    if best_lag == 0 {
        0.0
    } else {
        sample_rate as f32 / best_lag as f32
    }
}

/// Pitch estimates for every full window, in order (including zeros)
pub fn pitch_track(samples: &[f32], sample_rate: u32) -> Vec<f32> {
    let window_size = (sample_rate as f64 * WINDOW_SECS).round() as usize;
    let hop = window_size / 2;
    if window_size == 0 || hop == 0 || samples.len() < window_size {
        return Vec::new();
    }

    let starts: Vec<usize> = (0..=samples.len() - window_size).step_by(hop).collect();
    log::debug!(
        "Pitch track: {} windows of {} samples (hop {})",
        starts.len(),
        window_size,
        hop
    );

    starts
        .par_iter()
        .map(|&start| detect_pitch(&samples[start..start + window_size], sample_rate))
        .collect()
}

/// Min/max/average of the estimates inside [50, 500] Hz
///
/// All zero when no window produced a usable estimate.
pub fn pitch_statistics(track: &[f32]) -> PitchRange {
    let valid: Vec<f32> = track
        .iter()
        .copied()
        .filter(|p| (MIN_PITCH_HZ..=MAX_PITCH_HZ).contains(p))
        .collect();

    if valid.is_empty() {
        return PitchRange::default();
    }

    let min = valid.iter().copied().fold(f32::INFINITY, f32::min);
    let max = valid.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let sum: f64 = valid.iter().map(|&p| p as f64).sum();

    PitchRange {
        min,
        max,
        average: (sum / valid.len() as f64) as f32,
    }
}
