//! Energy-based emotion heuristic
//!
//! Ordered rules over the mean absolute amplitude and its variance pick one
//! of four fixed score tables. Not a classifier; the tables are reference
//! constants.

use super::speaker::mean_abs_amplitude;
use crate::model::{Emotion, EmotionAnalysis, EmotionScores};

const EXCITED_SCORES: EmotionScores = EmotionScores {
    happy: 70.0,
    sad: 5.0,
    angry: 20.0,
    neutral: 10.0,
    excited: 80.0,
};

const ANGRY_SCORES: EmotionScores = EmotionScores {
    happy: 15.0,
    sad: 10.0,
    angry: 75.0,
    neutral: 20.0,
    excited: 40.0,
};

const SAD_SCORES: EmotionScores = EmotionScores {
    happy: 5.0,
    sad: 70.0,
    angry: 5.0,
    neutral: 30.0,
    excited: 5.0,
};

const NEUTRAL_SCORES: EmotionScores = EmotionScores {
    happy: 25.0,
    sad: 20.0,
    angry: 10.0,
    neutral: 70.0,
    excited: 10.0,
};

/// Classify a channel
pub fn emotion_analysis(samples: &[f32]) -> EmotionAnalysis {
    let energy = mean_abs_amplitude(samples);
    let variance = amplitude_variance(samples, energy);
    log::debug!("Emotion features: energy={:.4}, variance={:.5}", energy, variance);

    from_scores(scores_for(energy, variance))
}

/// Select the score table for the given energy and variance
pub fn scores_for(energy: f32, variance: f32) -> EmotionScores {
    if energy > 0.15 && variance > 0.02 {
        EXCITED_SCORES
    } else if energy > 0.12 && variance > 0.015 {
        ANGRY_SCORES
    } else if energy < 0.08 {
        SAD_SCORES
    } else {
        NEUTRAL_SCORES
    }
}

/// Highest-scoring label wins; ties go to the earlier label in `Emotion::ALL`
fn from_scores(emotions: EmotionScores) -> EmotionAnalysis {
    let mut dominant = Emotion::ALL[0];
    for emotion in Emotion::ALL {
        if emotions.get(emotion) > emotions.get(dominant) {
            dominant = emotion;
        }
    }

    EmotionAnalysis {
        dominant,
        confidence: emotions.get(dominant),
        emotions,
    }
}

/// Population variance of `|sample|` around `mean`
fn amplitude_variance(samples: &[f32], mean: f32) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples
        .iter()
        .map(|s| {
            let d = (s.abs() - mean) as f64;
            d * d
        })
        .sum();
    (sum / samples.len() as f64) as f32
}
