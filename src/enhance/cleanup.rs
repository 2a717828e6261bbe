//! Cleanup stages: noise reduction, click removal, breath removal, de-essing
//!
//! All four are time-domain approximations with fixed thresholds. Detection
//! always reads the stage's input, never samples already rewritten by the
//! same stage.

use super::traits::{Stage, StageId};

/// Subtracts a "quiet sample" noise profile from the signal
///
/// The profile keeps only samples below `-40 - 0.2 * amount` dBFS (zero
/// elsewhere) and is subtracted position-for-position at `amount / 100`.
#[derive(Debug, Clone, Copy)]
pub struct NoiseReduction {
    pub amount: f32,
}

impl NoiseReduction {
    /// Linear gate threshold for the current amount
    pub fn threshold(&self) -> f32 {
        let threshold_db = -40.0 - 0.2 * self.amount;
        10f32.powf(threshold_db / 20.0)
    }
}

impl Stage for NoiseReduction {
    fn id(&self) -> StageId {
        StageId::NoiseReduction
    }

    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let threshold = self.threshold();
        let strength = self.amount / 100.0;

        samples
            .iter()
            .map(|&sample| {
                let profile = if sample.abs() < threshold { sample } else { 0.0 };
                sample - profile * strength
            })
            .collect()
    }
}

/// Median-filters samples that jump by more than `0.1 + 0.4 * amount / 100`
#[derive(Debug, Clone, Copy)]
pub struct ClickRemoval {
    pub amount: f32,
}

impl ClickRemoval {
    pub fn threshold(&self) -> f32 {
        0.1 + 0.4 * self.amount / 100.0
    }

    /// Median window length, `3 + 7 * amount / 100` samples
    pub fn window_size(&self) -> usize {
        (3.0 + 7.0 * self.amount / 100.0).floor() as usize
    }
}

impl Stage for ClickRemoval {
    fn id(&self) -> StageId {
        StageId::ClickRemoval
    }

    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let threshold = self.threshold();
        let window = self.window_size();
        let mut scratch = Vec::with_capacity(window);
        let mut output = samples.to_vec();
        let mut repaired = 0usize;

        for i in 1..samples.len() {
            if (samples[i] - samples[i - 1]).abs() <= threshold {
                continue;
            }

            let start = i.saturating_sub(window / 2);
            let end = (start + window).min(samples.len());
            scratch.clear();
            scratch.extend_from_slice(&samples[start..end]);
            output[i] = median(&mut scratch);
            repaired += 1;
        }

        if repaired > 0 {
            log::debug!("Click removal: repaired {} sample(s)", repaired);
        }
        output
    }
}

/// Attenuates samples whose surrounding 50 ms RMS is below
/// `0.02 + 0.08 * amount / 100`
#[derive(Debug, Clone, Copy)]
pub struct BreathRemoval {
    pub amount: f32,
}

/// Local energy window for breath detection
const BREATH_WINDOW_SECS: f64 = 0.050;

impl BreathRemoval {
    pub fn threshold(&self) -> f32 {
        0.02 + 0.08 * self.amount / 100.0
    }
}

impl Stage for BreathRemoval {
    fn id(&self) -> StageId {
        StageId::BreathRemoval
    }

    fn process_channel(&self, samples: &[f32], sample_rate: u32) -> Vec<f32> {
        let threshold = self.threshold() as f64;
        let gain = 1.0 - self.amount / 100.0;
        let window = ((sample_rate as f64 * BREATH_WINDOW_SECS).round() as usize).max(1);

        // Prefix sums of squares make each window lookup O(1)
        let mut prefix = Vec::with_capacity(samples.len() + 1);
        prefix.push(0.0f64);
        let mut acc = 0.0f64;
        for &sample in samples {
            acc += sample as f64 * sample as f64;
            prefix.push(acc);
        }

        samples
            .iter()
            .enumerate()
            .map(|(i, &sample)| {
                let start = i.saturating_sub(window / 2);
                let end = (start + window).min(samples.len());
                let sum_sq = (prefix[end] - prefix[start]).max(0.0);
                let energy = (sum_sq / (end - start) as f64).sqrt();
                if energy < threshold {
                    sample * gain
                } else {
                    sample
                }
            })
            .collect()
    }
}

/// Attenuates samples after a steep first difference (sibilance proxy)
#[derive(Debug, Clone, Copy)]
pub struct DeEsser {
    pub amount: f32,
}

impl DeEsser {
    pub fn threshold(&self) -> f32 {
        0.3 - 0.2 * self.amount / 100.0
    }

    pub fn gain(&self) -> f32 {
        1.0 - 0.7 * self.amount / 100.0
    }
}

impl Stage for DeEsser {
    fn id(&self) -> StageId {
        StageId::DeEsser
    }

    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let threshold = self.threshold();
        let gain = self.gain();

        samples
            .iter()
            .enumerate()
            .map(|(i, &sample)| {
                if i > 0 && (sample - samples[i - 1]).abs() > threshold {
                    sample * gain
                } else {
                    sample
                }
            })
            .collect()
    }
}

/// Upper median of a scratch slice (reorders it)
fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f32::total_cmp);
    values[values.len() / 2]
}
