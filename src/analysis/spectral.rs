//! FFT-based spectral summary
//!
//! Channel 0 is cut into `FFT_SIZE` frames at 50% overlap, each
//! Blackman-windowed (the last one zero-padded), and the per-frame magnitudes
//! are averaged into one `NUM_BINS` spectrum. Bin `k` maps to
//! `k * sample_rate / (2 * NUM_BINS)` Hz.

use crate::model::{FrequencyRange, SpectralAnalysis};
use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

/// Number of magnitude bins (half the FFT size)
pub const NUM_BINS: usize = 8192;
/// FFT size
pub const FFT_SIZE: usize = NUM_BINS * 2;
/// Distance between frame starts
pub const HOP_SIZE: usize = FFT_SIZE / 2;

/// Harmonic must exceed this share of the peak magnitude
const HARMONIC_THRESHOLD: f32 = 0.3;
/// Bandwidth edges are the outermost bins above this share of the peak
const BANDWIDTH_THRESHOLD: f32 = 0.1;

/// Number of frames needed to cover `len` samples (at least one)
pub fn frame_count(len: usize) -> usize {
    if len <= FFT_SIZE {
        1
    } else {
        1 + (len - FFT_SIZE).div_ceil(HOP_SIZE)
    }
}

/// Average magnitude spectrum over the whole channel
pub fn magnitude_spectrum(samples: &[f32]) -> Vec<f32> {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);
    let window = blackman_window(FFT_SIZE);

    let frames = frame_count(samples.len());
    log::debug!(
        "Spectrum: {} frame(s) of {} samples (hop {})",
        frames,
        FFT_SIZE,
        HOP_SIZE
    );

    let spectra: Vec<Vec<f64>> = (0..frames)
        .into_par_iter()
        .map(|frame| {
            let start = frame * HOP_SIZE;
            let mut buffer: Vec<Complex<f64>> = (0..FFT_SIZE)
                .map(|i| {
                    let sample = samples.get(start + i).copied().unwrap_or(0.0) as f64;
                    Complex::new(sample * window[i], 0.0)
                })
                .collect();

            fft.process(&mut buffer);

            buffer[..NUM_BINS]
                .iter()
                .map(|c| c.norm() / FFT_SIZE as f64)
                .collect()
        })
        .collect();

    // Summed in frame order so the result does not depend on scheduling
    let mut average = vec![0.0f64; NUM_BINS];
    for spectrum in &spectra {
        for (acc, &mag) in average.iter_mut().zip(spectrum) {
            *acc += mag;
        }
    }

    average
        .iter()
        .map(|&sum| (sum / frames as f64) as f32)
        .collect()
}

/// Convert a bin index to Hz
#[inline]
pub fn bin_to_frequency(bin: usize, sample_rate: u32, num_bins: usize) -> f32 {
    (bin as f64 * sample_rate as f64 / (2.0 * num_bins as f64)) as f32
}

/// Convert a frequency to the nearest bin index
#[inline]
fn frequency_to_bin(frequency: f32, sample_rate: u32, num_bins: usize) -> usize {
    (frequency as f64 * 2.0 * num_bins as f64 / sample_rate as f64).round() as usize
}

/// Spectral analysis of a channel
pub fn spectral_analysis(samples: &[f32], sample_rate: u32) -> SpectralAnalysis {
    let magnitudes = magnitude_spectrum(samples);
    summarize_spectrum(&magnitudes, sample_rate)
}

/// Reduce a magnitude array to the spectral summary statistics
pub fn summarize_spectrum(magnitudes: &[f32], sample_rate: u32) -> SpectralAnalysis {
    let num_bins = magnitudes.len();

    let (peak_bin, peak) = magnitudes
        .iter()
        .copied()
        .enumerate()
        .fold((0usize, 0.0f32), |best, (bin, mag)| {
            if mag > best.1 {
                (bin, mag)
            } else {
                best
            }
        });

    if peak <= 0.0 {
        return SpectralAnalysis {
            frequency_range: FrequencyRange::default(),
            dominant_frequency: 0.0,
            harmonics: Vec::new(),
            spectral_centroid: 0.0,
            spectral_flatness: 0.0,
            bandwidth_hz: 0.0,
        };
    }

    let dominant_frequency = bin_to_frequency(peak_bin, sample_rate, num_bins);

    // A DC peak has no harmonic series
    let harmonics = if peak_bin == 0 {
        Vec::new()
    } else {
        (2..=5)
            .map(|n| dominant_frequency * n as f32)
            .filter(|&freq| {
                let bin = frequency_to_bin(freq, sample_rate, num_bins);
                bin < num_bins && magnitudes[bin] > peak * HARMONIC_THRESHOLD
            })
            .collect()
    };

    let mut weighted = 0.0f64;
    let mut total = 0.0f64;
    for (bin, &mag) in magnitudes.iter().enumerate() {
        weighted += bin_to_frequency(bin, sample_rate, num_bins) as f64 * mag as f64;
        total += mag as f64;
    }
    let spectral_centroid = if total > 0.0 {
        (weighted / total) as f32
    } else {
        0.0
    };

    let spectral_flatness = spectral_flatness(magnitudes);

    let floor = peak * BANDWIDTH_THRESHOLD;
    let low = magnitudes.iter().position(|&m| m > floor).unwrap_or(peak_bin);
    let high = magnitudes.iter().rposition(|&m| m > floor).unwrap_or(peak_bin);
    let min = bin_to_frequency(low, sample_rate, num_bins);
    let max = bin_to_frequency(high, sample_rate, num_bins);

    SpectralAnalysis {
        frequency_range: FrequencyRange { min, max },
        dominant_frequency,
        harmonics,
        spectral_centroid,
        spectral_flatness,
        bandwidth_hz: max - min,
    }
}

/// Geometric mean over arithmetic mean of the non-zero magnitudes
pub fn spectral_flatness(magnitudes: &[f32]) -> f32 {
    let mut log_sum = 0.0f64;
    let mut sum = 0.0f64;
    let mut count = 0usize;

    for &mag in magnitudes.iter().filter(|&&m| m > 0.0) {
        log_sum += (mag as f64).ln();
        sum += mag as f64;
        count += 1;
    }

    if count == 0 || sum <= 0.0 {
        return 0.0;
    }

    let geometric = (log_sum / count as f64).exp();
    let arithmetic = sum / count as f64;
    (geometric / arithmetic).clamp(0.0, 1.0) as f32
}

fn blackman_window(size: usize) -> Vec<f64> {
    let n = size as f64;
    (0..size)
        .map(|i| {
            let x = 2.0 * std::f64::consts::PI * i as f64 / n;
            0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * freq * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_bin_conversion() {
        assert_eq!(bin_to_frequency(0, 44100, NUM_BINS), 0.0);
        assert!((bin_to_frequency(NUM_BINS, 44100, NUM_BINS) - 22050.0).abs() < 1e-3);
        assert_eq!(frequency_to_bin(22050.0, 44100, NUM_BINS), NUM_BINS);
    }

    #[test]
    fn test_dominant_frequency_of_sine() {
        let analysis = spectral_analysis(&sine(1000.0, 44100, FFT_SIZE), 44100);
        let resolution = 44100.0 / FFT_SIZE as f32;
        assert!((analysis.dominant_frequency - 1000.0).abs() <= resolution);
        assert!(analysis.spectral_flatness < 0.2);
        assert!(analysis.frequency_range.min <= analysis.dominant_frequency);
        assert!(analysis.frequency_range.max >= analysis.dominant_frequency);
    }

    #[test]
    fn test_harmonics_detected_from_magnitudes() {
        // Synthetic spectrum: fundamental at bin 100, strong 2nd, weak 3rd
        let mut magnitudes = vec![0.0f32; 1000];
        magnitudes[100] = 1.0;
        magnitudes[200] = 0.5;
        magnitudes[300] = 0.1;
        magnitudes[400] = 0.31;

        let analysis = summarize_spectrum(&magnitudes, 2000);
        assert_eq!(analysis.dominant_frequency, 100.0);
        assert_eq!(analysis.harmonics, vec![200.0, 400.0]);
        assert_eq!(analysis.frequency_range.min, 100.0);
        assert_eq!(analysis.frequency_range.max, 400.0);
        assert_eq!(analysis.bandwidth_hz, 300.0);
    }

    #[test]
    fn test_frames_cover_whole_channel() {
        assert_eq!(frame_count(0), 1);
        assert_eq!(frame_count(FFT_SIZE), 1);
        assert_eq!(frame_count(FFT_SIZE + 1), 2);
        // Last frame starts at 32768 and is zero-padded past 44100
        assert_eq!(frame_count(44100), 5);
    }

    #[test]
    fn test_tone_after_leading_silence() {
        let sample_rate = 44100;
        let mut samples = vec![0.0f32; sample_rate as usize / 2];
        samples.extend(sine(440.0, sample_rate, sample_rate as usize * 3 / 2));

        let analysis = spectral_analysis(&samples, sample_rate);
        let resolution = sample_rate as f32 / FFT_SIZE as f32;
        assert!(
            (analysis.dominant_frequency - 440.0).abs() <= resolution,
            "dominant {}",
            analysis.dominant_frequency
        );
        assert!(analysis.spectral_centroid > 0.0);
        assert!(analysis.bandwidth_hz > 0.0);
    }

    #[test]
    fn test_dc_peak_has_no_harmonics() {
        let analysis = spectral_analysis(&[0.3; 4096], 44100);
        assert_eq!(analysis.dominant_frequency, 0.0);
        assert!(analysis.harmonics.is_empty());

        let mut magnitudes = vec![0.0f32; 64];
        magnitudes[0] = 1.0;
        assert!(summarize_spectrum(&magnitudes, 8000).harmonics.is_empty());
    }

    #[test]
    fn test_silence_is_all_zero() {
        let analysis = spectral_analysis(&[0.0; 64], 44100);
        assert_eq!(analysis.dominant_frequency, 0.0);
        assert_eq!(analysis.spectral_flatness, 0.0);
        assert!(analysis.harmonics.is_empty());
    }

    #[test]
    fn test_flatness_of_flat_spectrum_is_one() {
        assert!((spectral_flatness(&[0.5; 32]) - 1.0).abs() < 1e-6);
        assert_eq!(spectral_flatness(&[0.0; 32]), 0.0);
    }
}
