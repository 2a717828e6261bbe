//! Tone stages: brightness/warmth EQ and clarity boost

use super::traits::{Stage, StageId};

/// Trailing moving-average length used as the warmth low-pass
const WARMTH_TAPS: usize = 10;

/// Shelving EQ approximation
///
/// Positive brightness adds a scaled first difference (high-pass), negative
/// brightness scales the whole sample down. Warmth mixes in a 10-sample
/// trailing moving average with weight `(warmth / 50) * 0.3`.
#[derive(Debug, Clone, Copy)]
pub struct Equalizer {
    pub brightness: f32,
    pub warmth: f32,
}

impl Equalizer {
    pub fn warmth_weight(&self) -> f32 {
        (self.warmth / 50.0) * 0.3
    }
}

impl Stage for Equalizer {
    fn id(&self) -> StageId {
        StageId::Equalizer
    }

    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let weight = self.warmth_weight();
        let mut window_sum = 0.0f64;

        samples
            .iter()
            .enumerate()
            .map(|(i, &sample)| {
                let mut output = if self.brightness > 0.0 {
                    let high_pass = if i > 0 { sample - samples[i - 1] } else { 0.0 };
                    sample + 0.3 * high_pass * (1.0 + self.brightness / 100.0)
                } else if self.brightness < 0.0 {
                    sample * (1.0 + self.brightness / 100.0)
                } else {
                    sample
                };

                if self.warmth != 0.0 {
                    window_sum += sample as f64;
                    if i >= WARMTH_TAPS {
                        window_sum -= samples[i - WARMTH_TAPS] as f64;
                    }
                    let taps = (i + 1).min(WARMTH_TAPS);
                    let low_pass = (window_sum / taps as f64) as f32;
                    output = output * (1.0 - weight) + low_pass * weight;
                }

                output
            })
            .collect()
    }
}

/// Harmonic boost approximation: `clamp(x * (1 + 0.3 * amount / 100), -1, 1)`
#[derive(Debug, Clone, Copy)]
pub struct Clarity {
    pub amount: f32,
}

impl Stage for Clarity {
    fn id(&self) -> StageId {
        StageId::Clarity
    }

    fn process_channel(&self, samples: &[f32], _sample_rate: u32) -> Vec<f32> {
        let gain = 1.0 + 0.3 * self.amount / 100.0;
        samples
            .iter()
            .map(|&sample| (sample * gain).clamp(-1.0, 1.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_brightness_adds_high_pass() {
        let eq = Equalizer {
            brightness: 50.0,
            warmth: 0.0,
        };
        let output = eq.process_channel(&[0.1, 0.3, 0.3], 44100);
        assert_eq!(output[0], 0.1);
        // 0.3 + 0.3 * 0.2 * 1.5
        assert!((output[1] - 0.39).abs() < 1e-6);
        assert!((output[2] - 0.3).abs() < 1e-7);
    }

    #[test]
    fn test_negative_brightness_scales() {
        let eq = Equalizer {
            brightness: -50.0,
            warmth: 0.0,
        };
        let output = eq.process_channel(&[0.4, -0.8], 44100);
        assert!((output[0] - 0.2).abs() < 1e-7);
        assert!((output[1] + 0.4).abs() < 1e-7);
    }

    #[test]
    fn test_warmth_blends_moving_average() {
        let eq = Equalizer {
            brightness: 0.0,
            warmth: 50.0,
        };
        assert!((eq.warmth_weight() - 0.3).abs() < 1e-7);

        // Impulse: after it leaves the 10-tap window the output returns to 0
        let mut input = vec![0.0f32; 20];
        input[0] = 1.0;
        let output = eq.process_channel(&input, 44100);

        assert!((output[0] - 1.0).abs() < 1e-6);
        // 0.7 * 0 + 0.3 * (1 / 2)
        assert!((output[1] - 0.15).abs() < 1e-6);
        assert!((output[9] - 0.03).abs() < 1e-6);
        assert!(output[10].abs() < 1e-9);
    }

    #[test]
    fn test_constant_signal_unchanged_by_warmth() {
        let eq = Equalizer {
            brightness: 0.0,
            warmth: -40.0,
        };
        let output = eq.process_channel(&[0.25; 32], 44100);
        assert!(output.iter().all(|s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_clarity_gain_and_clamp() {
        let stage = Clarity { amount: 100.0 };
        let output = stage.process_channel(&[0.5, -0.9, 0.0], 44100);
        assert!((output[0] - 0.65).abs() < 1e-6);
        assert_eq!(output[1], -1.0);
        assert_eq!(output[2], 0.0);
    }
}
