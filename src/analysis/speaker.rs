//! Heuristic speaker profile
//!
//! Fixed thresholds over the pitch statistics and mean amplitude. These are
//! not trained classifiers and the constants must stay as they are: the
//! numbers are shown to users as-is.

use super::pitch::{pitch_statistics, pitch_track};
use crate::model::{Gender, PitchRange, SpeakerProfile, VoiceType};

/// Average pitch separating male from female voices, Hz
const GENDER_SPLIT_HZ: f32 = 165.0;
/// Male voices below this are bass, otherwise tenor
const BASS_CEILING_HZ: f32 = 130.0;
/// Female voices below this are alto, otherwise soprano
const ALTO_CEILING_HZ: f32 = 220.0;
const MAX_GENDER_CONFIDENCE: f32 = 90.0;
const BASE_GENDER_CONFIDENCE: f32 = 50.0;

/// Build the speaker profile of a channel
pub fn speaker_profile(samples: &[f32], sample_rate: u32) -> SpeakerProfile {
    let track = pitch_track(samples, sample_rate);
    let pitch_range = pitch_statistics(&track);
    let mean_abs = mean_abs_amplitude(samples);

    profile_from(pitch_range, mean_abs)
}

/// Combine pitch statistics and mean absolute amplitude into a profile
pub fn profile_from(pitch_range: PitchRange, mean_abs: f32) -> SpeakerProfile {
    let (gender, confidence) = classify_gender(pitch_range.average);

    SpeakerProfile {
        gender,
        confidence,
        pitch_range,
        speaking_rate_wpm: speaking_rate_wpm(mean_abs),
        energy: (mean_abs * 500.0).clamp(0.0, 100.0),
        voice_type: classify_voice_type(gender, pitch_range.average),
    }
}

/// Gender and confidence from the average pitch
///
/// An average of 0 means no voiced window was found.
pub fn classify_gender(average_pitch: f32) -> (Gender, f32) {
    if average_pitch <= 0.0 || average_pitch == GENDER_SPLIT_HZ {
        return (Gender::Unknown, 0.0);
    }

    let distance = (average_pitch - GENDER_SPLIT_HZ).abs();
    let confidence = (BASE_GENDER_CONFIDENCE + distance).min(MAX_GENDER_CONFIDENCE);

    if average_pitch < GENDER_SPLIT_HZ {
        (Gender::Male, confidence)
    } else {
        (Gender::Female, confidence)
    }
}

pub fn classify_voice_type(gender: Gender, average_pitch: f32) -> VoiceType {
    match gender {
        Gender::Male if average_pitch < BASS_CEILING_HZ => VoiceType::Bass,
        Gender::Male => VoiceType::Tenor,
        Gender::Female if average_pitch < ALTO_CEILING_HZ => VoiceType::Alto,
        Gender::Female => VoiceType::Soprano,
        Gender::Unknown => VoiceType::Unknown,
    }
}

/// Words-per-minute proxy: 0 for quiet input, else `120 + (energy - 0.05) * 300`
pub fn speaking_rate_wpm(mean_abs: f32) -> u32 {
    if mean_abs <= 0.05 {
        return 0;
    }
    (120.0 + (mean_abs as f64 - 0.05) * 300.0).floor() as u32
}

/// Mean of `|sample|`
pub fn mean_abs_amplitude(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|s| s.abs() as f64).sum();
    (sum / samples.len() as f64) as f32
}
